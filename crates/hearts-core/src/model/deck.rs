use crate::error::RulesError;
use crate::model::card::Card;
use crate::model::player::Player;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const HAND_SIZE: usize = 13;
pub const PLAYER_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards, suit-major in `Suit::ALL` order.
    pub fn fresh_set() -> Self {
        let mut cards = Vec::with_capacity(HAND_SIZE * PLAYER_COUNT);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::fresh_set();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffles a fresh set and hands consecutive blocks of 13 to the players
    /// in list order. Any previous hand and won cards are discarded.
    pub fn deal<R: rand::Rng + ?Sized>(
        players: &mut [Player],
        rng: &mut R,
    ) -> Result<(), RulesError> {
        if players.len() != PLAYER_COUNT {
            return Err(RulesError::InvalidPlayerCount {
                count: players.len(),
            });
        }
        Self::shuffled(rng).deal_into(players);
        Ok(())
    }

    fn deal_into(self, players: &mut [Player]) {
        for (player, block) in players.iter_mut().zip(self.cards.chunks(HAND_SIZE)) {
            player.receive_deal(block.to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, HAND_SIZE};
    use crate::error::RulesError;
    use crate::model::player::{Player, PlayerPosition};
    use crate::model::controller::FirstLegal;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn table(count: usize) -> Vec<Player> {
        PlayerPosition::LOOP
            .iter()
            .cycle()
            .take(count)
            .map(|seat| Player::new(seat.to_string(), false, Box::new(FirstLegal)))
            .collect()
    }

    #[test]
    fn fresh_set_has_52_unique_cards() {
        let deck = Deck::fresh_set();
        assert_eq!(deck.cards().len(), 52);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        assert_eq!(
            Deck::shuffled_with_seed(42).cards(),
            Deck::shuffled_with_seed(42).cards()
        );
        assert_ne!(
            Deck::shuffled_with_seed(1).cards(),
            Deck::shuffled_with_seed(2).cards()
        );
    }

    #[test]
    fn deal_partitions_the_deck() {
        let mut players = table(4);
        let mut rng = StdRng::seed_from_u64(7);
        Deck::deal(&mut players, &mut rng).unwrap();

        let mut seen = HashSet::new();
        for player in &players {
            assert_eq!(player.hand().len(), HAND_SIZE);
            assert!(player.won_cards().is_empty());
            for card in player.hand().iter() {
                assert!(seen.insert(*card), "{card} dealt twice");
            }
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn deal_rejects_wrong_table_size() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [0, 3, 5] {
            let mut players = table(count);
            assert_eq!(
                Deck::deal(&mut players, &mut rng),
                Err(RulesError::InvalidPlayerCount { count })
            );
        }
    }
}
