//! Seat controllers decide what a player trades and plays.
//!
//! The engine never asks a human or a bot directly; it asks the
//! [`SeatController`] owned by the [`Player`](crate::model::player::Player).
//! Terminal front ends wrap their prompts in a [`Human`] controller, computer
//! opponents live in the `hearts-bot` crate.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::trick::Play;
use rand::rngs::StdRng;

/// What a seat sees when asked to pick three cards to trade.
#[derive(Debug, Clone, Copy)]
pub struct TradeView<'a> {
    pub seat: PlayerPosition,
    pub name: &'a str,
    pub hand: &'a Hand,
    pub target: PlayerPosition,
}

/// What a seat sees when asked to play to the current trick.
#[derive(Debug, Clone, Copy)]
pub struct MoveView<'a> {
    pub seat: PlayerPosition,
    pub name: &'a str,
    pub hand: &'a Hand,
    pub led_suit: Option<Suit>,
    pub prior_plays: &'a [Play],
    pub hearts_broken: bool,
    pub trick_number: usize,
    pub score: u32,
}

impl MoveView<'_> {
    pub fn is_leading(&self) -> bool {
        self.prior_plays.is_empty()
    }
}

/// A `None` answer means the seat has nothing to offer; the player turns it
/// into [`RulesError::EmptyOptionSet`](crate::RulesError::EmptyOptionSet).
pub trait SeatController {
    /// Three distinct cards from `view.hand`.
    fn choose_trade(&mut self, view: &TradeView<'_>, rng: &mut StdRng) -> Option<[Card; 3]>;

    /// One card from `options`, which is never empty.
    fn choose_move(
        &mut self,
        view: &MoveView<'_>,
        options: &[Card],
        rng: &mut StdRng,
    ) -> Option<Card>;
}

/// Controller backed by two selection callbacks, typically prompts that keep
/// asking until the answer is legal.
pub struct Human<M, T> {
    select_move: M,
    select_trade: T,
}

impl<M, T> Human<M, T>
where
    M: FnMut(&MoveView<'_>, &[Card]) -> Option<Card>,
    T: FnMut(&TradeView<'_>) -> Option<[Card; 3]>,
{
    pub fn new(select_move: M, select_trade: T) -> Self {
        Self {
            select_move,
            select_trade,
        }
    }
}

impl<M, T> SeatController for Human<M, T>
where
    M: FnMut(&MoveView<'_>, &[Card]) -> Option<Card>,
    T: FnMut(&TradeView<'_>) -> Option<[Card; 3]>,
{
    fn choose_trade(&mut self, view: &TradeView<'_>, _rng: &mut StdRng) -> Option<[Card; 3]> {
        (self.select_trade)(view)
    }

    fn choose_move(
        &mut self,
        view: &MoveView<'_>,
        options: &[Card],
        _rng: &mut StdRng,
    ) -> Option<Card> {
        (self.select_move)(view, options)
    }
}

/// Trades the first three cards and plays the first legal option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegal;

impl SeatController for FirstLegal {
    fn choose_trade(&mut self, view: &TradeView<'_>, _rng: &mut StdRng) -> Option<[Card; 3]> {
        view.hand.first_three()
    }

    fn choose_move(
        &mut self,
        _view: &MoveView<'_>,
        options: &[Card],
        _rng: &mut StdRng,
    ) -> Option<Card> {
        options.first().copied()
    }
}
