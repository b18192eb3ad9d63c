use crate::error::RulesError;
use crate::game::round::{RoundEngine, RoundObserver, RoundOutcome};
use crate::model::player::{Player, PlayerPosition};
use crate::model::score::ScoreBoard;

pub const DEFAULT_TARGET_SCORE: u32 = 100;

/// Consecutive rounds at one table with cumulative scoring.
pub struct MatchState {
    engine: RoundEngine,
    scores: ScoreBoard,
    rounds: Vec<RoundOutcome>,
    target_score: u32,
    seed: u64,
}

impl MatchState {
    pub fn new(players: Vec<Player>, seed: u64) -> Result<Self, RulesError> {
        Self::with_target(players, seed, DEFAULT_TARGET_SCORE)
    }

    pub fn with_target(
        players: Vec<Player>,
        seed: u64,
        target_score: u32,
    ) -> Result<Self, RulesError> {
        Ok(Self {
            engine: RoundEngine::with_seed(players, seed)?,
            scores: ScoreBoard::new(),
            rounds: Vec::new(),
            target_score,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn rounds(&self) -> &[RoundOutcome] {
        &self.rounds
    }

    pub fn round_number(&self) -> usize {
        self.rounds.len()
    }

    pub fn players(&self) -> &[Player] {
        self.engine.players()
    }

    pub fn is_finished(&self) -> bool {
        self.scores.highest_total() >= self.target_score
    }

    pub fn leader(&self) -> PlayerPosition {
        self.scores.leading_player()
    }

    /// Plays a full round and folds its adjusted scores into the totals.
    pub fn play_round(
        &mut self,
        observer: &mut dyn RoundObserver,
    ) -> Result<&RoundOutcome, RulesError> {
        self.engine.reset();
        let outcome = self.engine.run(observer)?;
        self.scores.apply_round(outcome.scores());
        self.rounds.push(outcome);
        Ok(&self.rounds[self.rounds.len() - 1])
    }
}
