use crate::error::RulesError;
use crate::model::card::Card;
use crate::model::controller::{MoveView, SeatController, TradeView};
use crate::model::hand::Hand;
use crate::model::trick::Trick;
use core::fmt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

/// Snapshot of the trick a seat is asked to play into.
#[derive(Debug, Clone, Copy)]
pub struct TrickContext<'a> {
    pub seat: PlayerPosition,
    pub trick: &'a Trick,
    pub hearts_broken: bool,
    pub trick_number: usize,
}

pub struct Player {
    name: String,
    hand: Hand,
    won_cards: Vec<Card>,
    score: u32,
    is_human: bool,
    controller: Box<dyn SeatController>,
}

impl Player {
    pub fn new(name: impl Into<String>, is_human: bool, controller: Box<dyn SeatController>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            won_cards: Vec::new(),
            score: 0,
            is_human,
            controller,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn won_cards(&self) -> &[Card] {
        &self.won_cards
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Starts a round: replaces the hand and clears won cards and score.
    pub(crate) fn receive_deal(&mut self, cards: Vec<Card>) {
        self.hand = Hand::with_cards(cards);
        self.won_cards.clear();
        self.score = 0;
    }

    /// Asks the controller for three distinct held cards.
    ///
    /// The cards stay in the hand until [`Player::hand_over`].
    pub fn propose_trade(
        &mut self,
        seat: PlayerPosition,
        rng: &mut StdRng,
    ) -> Result<[Card; 3], RulesError> {
        let view = TradeView {
            seat,
            name: &self.name,
            hand: &self.hand,
            target: seat.next(),
        };
        let cards = self
            .controller
            .choose_trade(&view, rng)
            .ok_or(RulesError::EmptyOptionSet { seat })?;
        let distinct = cards[0] != cards[1] && cards[0] != cards[2] && cards[1] != cards[2];
        if !distinct || !cards.iter().all(|card| self.hand.contains(*card)) {
            return Err(RulesError::IllegalTrade { seat, cards });
        }
        Ok(cards)
    }

    /// Removes a selection previously returned by [`Player::propose_trade`].
    pub fn hand_over(&mut self, cards: [Card; 3]) {
        for card in cards {
            self.hand.remove(card);
        }
    }

    pub fn receive_trade(&mut self, cards: [Card; 3]) {
        self.hand.extend(cards);
    }

    /// Picks and removes the card this seat plays to `ctx.trick`.
    ///
    /// The Two of Clubs is forced when leading the first trick. A controller
    /// answer outside the legal options is a contract violation and is
    /// returned as [`RulesError::IllegalMove`] without touching the hand.
    pub fn propose_move(
        &mut self,
        ctx: &TrickContext<'_>,
        rng: &mut StdRng,
    ) -> Result<Card, RulesError> {
        let led_suit = ctx.trick.led_suit();
        let options = self.hand.legal_options(led_suit, ctx.hearts_broken);
        if options.is_empty() {
            return Err(RulesError::EmptyOptionSet { seat: ctx.seat });
        }

        let opening_lead =
            ctx.trick_number == 0 && led_suit.is_none() && self.hand.contains(Card::TWO_OF_CLUBS);
        let card = if opening_lead {
            Card::TWO_OF_CLUBS
        } else {
            let view = MoveView {
                seat: ctx.seat,
                name: &self.name,
                hand: &self.hand,
                led_suit,
                prior_plays: ctx.trick.plays(),
                hearts_broken: ctx.hearts_broken,
                trick_number: ctx.trick_number,
                score: self.score,
            };
            self.controller
                .choose_move(&view, &options, rng)
                .ok_or(RulesError::EmptyOptionSet { seat: ctx.seat })?
        };

        if !options.contains(&card) {
            return Err(RulesError::IllegalMove {
                seat: ctx.seat,
                card,
            });
        }
        self.hand.remove(card);
        Ok(card)
    }

    /// Puts a played card back after its trick was abandoned.
    pub(crate) fn take_back(&mut self, card: Card) {
        self.hand.add(card);
    }

    pub(crate) fn take_trick(&mut self, cards: impl IntoIterator<Item = Card>, points: u32) {
        self.won_cards.extend(cards);
        self.score += points;
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("won_cards", &self.won_cards)
            .field("score", &self.score)
            .field("is_human", &self.is_human)
            .finish_non_exhaustive()
    }
}
