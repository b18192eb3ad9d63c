use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Highest card of the led suit played so far.
    pub fn highest_of_led_suit(&self) -> Option<Card> {
        highest_of_suit(&self.plays, self.led_suit()?)
    }

    pub fn next_to_play(&self) -> Option<PlayerPosition> {
        if self.is_complete() {
            return None;
        }
        Some(
            self.plays
                .last()
                .map(|play| play.position.next())
                .unwrap_or(self.leader),
        )
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        let expected = self.next_to_play().ok_or(TrickError::TrickComplete)?;
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }
        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Off-suit discards never win, whatever their rank.
    pub fn winner(&self) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        let led = self.led_suit()?;
        self.plays
            .iter()
            .filter(|play| play.card.suit == led)
            .max_by_key(|play| play.card.sort_value())
            .map(|play| play.position)
    }

    pub fn penalty_total(&self) -> u32 {
        self.plays
            .iter()
            .map(|play| play.card.penalty_score())
            .sum()
    }

    pub fn contains_heart(&self) -> bool {
        self.plays.iter().any(|play| play.card.suit.is_heart())
    }
}

pub fn highest_of_suit(plays: &[Play], suit: Suit) -> Option<Card> {
    plays
        .iter()
        .map(|play| play.card)
        .filter(|card| card.suit == suit)
        .max_by_key(|card| card.sort_value())
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn full_trick(leader: PlayerPosition, cards: [Card; 4]) -> Trick {
        let mut trick = Trick::new(leader);
        let mut seat = leader;
        for card in cards {
            trick.play(seat, card).unwrap();
            seat = seat.next();
        }
        trick
    }

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::South, Card::new(Rank::Three, Suit::Clubs)),
            Err(TrickError::OutOfTurn { .. })
        ));
        assert_eq!(trick.next_to_play(), Some(PlayerPosition::East));
    }

    #[test]
    fn off_suit_card_never_wins() {
        let trick = full_trick(
            PlayerPosition::North,
            [
                Card::new(Rank::Seven, Suit::Clubs),
                Card::new(Rank::Queen, Suit::Spades),
                Card::new(Rank::Ace, Suit::Clubs),
                Card::new(Rank::Three, Suit::Clubs),
            ],
        );
        assert_eq!(trick.led_suit(), Some(Suit::Clubs));
        assert_eq!(trick.winner(), Some(PlayerPosition::South));
        assert_eq!(trick.penalty_total(), 13);
    }

    #[test]
    fn leader_wins_when_nobody_follows() {
        let trick = full_trick(
            PlayerPosition::West,
            [
                Card::new(Rank::Two, Suit::Diamonds),
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::King, Suit::Spades),
                Card::new(Rank::Ace, Suit::Clubs),
            ],
        );
        assert_eq!(trick.winner(), Some(PlayerPosition::West));
        assert!(trick.contains_heart());
        assert_eq!(trick.penalty_total(), 1);
    }

    #[test]
    fn complete_trick_rejects_more_plays() {
        let mut trick = full_trick(
            PlayerPosition::East,
            [
                Card::new(Rank::Two, Suit::Clubs),
                Card::new(Rank::Three, Suit::Clubs),
                Card::new(Rank::Four, Suit::Clubs),
                Card::new(Rank::Five, Suit::Clubs),
            ],
        );
        assert_eq!(trick.next_to_play(), None);
        assert_eq!(
            trick.play(PlayerPosition::East, Card::new(Rank::Six, Suit::Clubs)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, Card::new(Rank::Ten, Suit::Spades))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::King, Suit::Spades))
            .unwrap();
        assert_eq!(trick.winner(), None);
        assert_eq!(
            trick.highest_of_led_suit(),
            Some(Card::new(Rank::King, Suit::Spades))
        );
    }
}
