use crate::game::round::RoundPhase;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::trick::TrickError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("a round needs exactly 4 players, got {count}")]
    InvalidPlayerCount { count: usize },
    #[error("{seat} returned {card}, which is not a legal play")]
    IllegalMove { seat: PlayerPosition, card: Card },
    #[error("{seat} must trade three distinct held cards, got {cards:?}")]
    IllegalTrade { seat: PlayerPosition, cards: [Card; 3] },
    #[error("no legal option left for {seat}")]
    EmptyOptionSet { seat: PlayerPosition },
    #[error("round is in {actual:?}, expected {expected:?}")]
    WrongPhase {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error(transparent)]
    Trick(#[from] TrickError),
}
