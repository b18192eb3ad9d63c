mod play;
mod trade;

pub use play::{PlayPlanner, Tactic};
pub use trade::TradePlanner;

use hearts_core::model::card::Card;
use hearts_core::model::controller::{MoveView, SeatController, TradeView};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Computer opponent: random trade, cautious narrowing, random pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputerStrategy;

impl ComputerStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn boxed() -> Box<dyn SeatController> {
        Box::new(Self)
    }
}

impl SeatController for ComputerStrategy {
    fn choose_trade(&mut self, view: &TradeView<'_>, rng: &mut StdRng) -> Option<[Card; 3]> {
        let selection = TradePlanner::choose(view.hand, rng)?;
        log_trade_decision(view, &selection);
        Some(selection)
    }

    fn choose_move(
        &mut self,
        view: &MoveView<'_>,
        options: &[Card],
        rng: &mut StdRng,
    ) -> Option<Card> {
        let (tactic, narrowed) = PlayPlanner::narrow(options, view);
        let Some(&chosen) = narrowed.choose(rng) else {
            event!(
                target: "hearts_bot::play",
                Level::ERROR,
                seat = %view.seat,
                tactic = ?tactic,
                legal_count = options.len(),
                "narrowing left no card to play"
            );
            return None;
        };
        log_play_decision(view, options, narrowed.len(), tactic, chosen);
        Some(chosen)
    }
}

fn log_trade_decision(view: &TradeView<'_>, selection: &[Card; 3]) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let cards = selection
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    event!(
        target: "hearts_bot::trade",
        Level::DEBUG,
        seat = %view.seat,
        target = %view.target,
        cards = %cards
    );
}

fn log_play_decision(
    view: &MoveView<'_>,
    legal: &[Card],
    narrowed: usize,
    tactic: Tactic,
    chosen: Card,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };
    event!(
        target: "hearts_bot::play",
        Level::DEBUG,
        seat = %view.seat,
        tactic = ?tactic,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        narrowed_count = narrowed,
        chosen = %chosen,
        hearts_broken = view.hearts_broken,
        trick_cards = view.prior_plays.len(),
    );
}
