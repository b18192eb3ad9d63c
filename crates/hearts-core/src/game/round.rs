//! One round of Hearts: deal, trade, thirteen tricks, scoring.
//!
//! [`RoundEngine`] is the only thing that mutates state shared between seats
//! (leader, hearts broken, scores). Each step checks the current
//! [`RoundPhase`] so callers can drive it one step at a time or call
//! [`RoundEngine::run`] for the whole round.

use crate::error::RulesError;
use crate::model::card::Card;
use crate::model::deck::{Deck, HAND_SIZE, PLAYER_COUNT};
use crate::model::player::{Player, PlayerPosition, TrickContext};
use crate::model::score::moon_adjusted;
use crate::model::trick::{Play, Trick};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{Level, event};

pub const TRICKS_PER_ROUND: usize = HAND_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    Dealing,
    Trading,
    Playing,
    Scoring,
    Done,
}

/// Cross-seat state of the round in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundState {
    leader: PlayerPosition,
    hearts_broken: bool,
    trick_number: usize,
}

impl RoundState {
    fn new() -> Self {
        Self {
            leader: PlayerPosition::North,
            hearts_broken: false,
            trick_number: 0,
        }
    }

    /// Seat that leads the next trick.
    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    /// Once set, stays set until the next deal.
    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    /// Tricks completed so far, 0 through 13.
    pub fn trick_number(&self) -> usize {
        self.trick_number
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickSummary {
    pub trick_number: usize,
    pub winner: PlayerPosition,
    pub plays: Vec<Play>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerResult {
    pub seat: PlayerPosition,
    pub name: String,
    pub won_cards: Vec<Card>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub results: Vec<PlayerResult>,
    /// Points taken in tricks, before any moon-shot adjustment.
    pub penalties: [u32; 4],
    pub moon_shooter: Option<PlayerPosition>,
}

impl RoundOutcome {
    pub fn scores(&self) -> [u32; 4] {
        let mut scores = [0; 4];
        for result in &self.results {
            scores[result.seat.index()] = result.score;
        }
        scores
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Dealt {
        hand_sizes: [usize; 4],
    },
    TradesExchanged {
        received: [[Card; 3]; 4],
    },
    CardPlayed {
        trick_number: usize,
        seat: PlayerPosition,
        card: Card,
    },
    TrickCompleted(TrickSummary),
    HeartsBroken {
        trick_number: usize,
    },
    MoonShot {
        shooter: PlayerPosition,
    },
    RoundComplete(RoundOutcome),
}

/// Fire-and-forget observation hook; the engine never waits on it.
pub trait RoundObserver {
    fn notify(&mut self, event: &RoundEvent);
}

impl RoundObserver for () {
    fn notify(&mut self, _event: &RoundEvent) {}
}

impl RoundObserver for Vec<RoundEvent> {
    fn notify(&mut self, event: &RoundEvent) {
        self.push(event.clone());
    }
}

pub struct RoundEngine {
    players: Vec<Player>,
    state: RoundState,
    phase: RoundPhase,
    trick_history: Vec<Trick>,
    outcome: Option<RoundOutcome>,
    rng: StdRng,
}

impl RoundEngine {
    pub fn new(players: Vec<Player>, rng: StdRng) -> Result<Self, RulesError> {
        if players.len() != PLAYER_COUNT {
            return Err(RulesError::InvalidPlayerCount {
                count: players.len(),
            });
        }
        Ok(Self {
            players,
            state: RoundState::new(),
            phase: RoundPhase::Dealing,
            trick_history: Vec::with_capacity(TRICKS_PER_ROUND),
            outcome: None,
            rng,
        })
    }

    pub fn with_seed(players: Vec<Player>, seed: u64) -> Result<Self, RulesError> {
        Self::new(players, StdRng::seed_from_u64(seed))
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: PlayerPosition) -> &Player {
        &self.players[seat.index()]
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Returns a finished engine to `Dealing` so the same table can play again.
    pub fn reset(&mut self) {
        self.state = RoundState::new();
        self.phase = RoundPhase::Dealing;
        self.trick_history.clear();
        self.outcome = None;
    }

    pub fn deal(&mut self, observer: &mut dyn RoundObserver) -> Result<(), RulesError> {
        self.expect_phase(RoundPhase::Dealing)?;
        Deck::deal(&mut self.players, &mut self.rng)?;
        self.state = RoundState::new();
        self.phase = RoundPhase::Trading;

        event!(target: "hearts_core::round", Level::DEBUG, "dealt");
        observer.notify(&RoundEvent::Dealt {
            hand_sizes: self.hand_sizes(),
        });
        Ok(())
    }

    /// Collects all four proposals first, then hands each to the next seat.
    ///
    /// No card moves until every proposal is valid, so a failed call can be
    /// retried.
    pub fn trade(&mut self, observer: &mut dyn RoundObserver) -> Result<(), RulesError> {
        self.expect_phase(RoundPhase::Trading)?;
        let mut proposals = [[Card::TWO_OF_CLUBS; 3]; PLAYER_COUNT];
        for seat in PlayerPosition::LOOP {
            proposals[seat.index()] =
                self.players[seat.index()].propose_trade(seat, &mut self.rng)?;
        }
        for seat in PlayerPosition::LOOP {
            self.players[seat.index()].hand_over(proposals[seat.index()]);
        }

        let mut received = [[Card::TWO_OF_CLUBS; 3]; PLAYER_COUNT];
        for seat in PlayerPosition::LOOP {
            let target = seat.next();
            let cards = proposals[seat.index()];
            self.players[target.index()].receive_trade(cards);
            received[target.index()] = cards;
        }

        self.state.leader = self.two_of_clubs_holder();
        self.phase = RoundPhase::Playing;

        event!(
            target: "hearts_core::round",
            Level::DEBUG,
            opening_leader = %self.state.leader,
            "trades exchanged"
        );
        observer.notify(&RoundEvent::TradesExchanged { received });
        Ok(())
    }

    /// Plays one trick starting from the current leader.
    ///
    /// If a seat fails, cards already played to the trick go back to their
    /// hands and the trick can be replayed. Observers keep the
    /// [`RoundEvent::CardPlayed`] events they already saw.
    pub fn play_trick(
        &mut self,
        observer: &mut dyn RoundObserver,
    ) -> Result<TrickSummary, RulesError> {
        self.expect_phase(RoundPhase::Playing)?;
        let trick_number = self.state.trick_number;
        let mut trick = Trick::new(self.state.leader);

        if let Err(err) = self.collect_plays(&mut trick, observer) {
            for play in trick.plays() {
                self.players[play.position.index()].take_back(play.card);
            }
            event!(
                target: "hearts_core::round",
                Level::WARN,
                trick = trick_number,
                error = %err,
                "trick abandoned"
            );
            return Err(err);
        }

        let winner = trick.winner().expect("complete trick has a winner");
        let points = trick.penalty_total();
        self.players[winner.index()]
            .take_trick(trick.plays().iter().map(|play| play.card), points);

        let summary = TrickSummary {
            trick_number,
            winner,
            plays: trick.plays().to_vec(),
            points,
        };
        event!(
            target: "hearts_core::round",
            Level::DEBUG,
            trick = trick_number,
            winner = %winner,
            points,
            "trick resolved"
        );
        observer.notify(&RoundEvent::TrickCompleted(summary.clone()));

        if !self.state.hearts_broken && trick.contains_heart() {
            self.state.hearts_broken = true;
            event!(target: "hearts_core::round", Level::DEBUG, trick = trick_number, "hearts broken");
            observer.notify(&RoundEvent::HeartsBroken { trick_number });
        }

        self.state.leader = winner;
        self.state.trick_number += 1;
        self.trick_history.push(trick);
        if self.state.trick_number == TRICKS_PER_ROUND {
            self.phase = RoundPhase::Scoring;
        }
        Ok(summary)
    }

    pub fn score(&mut self, observer: &mut dyn RoundObserver) -> Result<RoundOutcome, RulesError> {
        self.expect_phase(RoundPhase::Scoring)?;
        let mut penalties = [0; PLAYER_COUNT];
        for (slot, player) in penalties.iter_mut().zip(&self.players) {
            *slot = player.score();
        }

        let (adjusted, moon_shooter) = moon_adjusted(penalties);
        if let Some(shooter) = moon_shooter {
            for (player, score) in self.players.iter_mut().zip(adjusted) {
                player.set_score(score);
            }
            event!(target: "hearts_core::round", Level::INFO, shooter = %shooter, "moon shot");
            observer.notify(&RoundEvent::MoonShot { shooter });
        }

        let results = PlayerPosition::LOOP
            .iter()
            .zip(&self.players)
            .map(|(&seat, player)| PlayerResult {
                seat,
                name: player.name().to_string(),
                won_cards: player.won_cards().to_vec(),
                score: player.score(),
            })
            .collect();
        let outcome = RoundOutcome {
            results,
            penalties,
            moon_shooter,
        };

        event!(
            target: "hearts_core::round",
            Level::INFO,
            scores = ?outcome.scores(),
            "round complete"
        );
        self.phase = RoundPhase::Done;
        self.outcome = Some(outcome.clone());
        observer.notify(&RoundEvent::RoundComplete(outcome.clone()));
        Ok(outcome)
    }

    /// Drives whatever is left of the round to `Done`.
    pub fn run(&mut self, observer: &mut dyn RoundObserver) -> Result<RoundOutcome, RulesError> {
        loop {
            match self.phase {
                RoundPhase::Dealing => self.deal(observer)?,
                RoundPhase::Trading => self.trade(observer)?,
                RoundPhase::Playing => {
                    self.play_trick(observer)?;
                }
                RoundPhase::Scoring => return self.score(observer),
                RoundPhase::Done => {
                    return self.outcome.clone().ok_or(RulesError::WrongPhase {
                        expected: RoundPhase::Scoring,
                        actual: RoundPhase::Done,
                    });
                }
            }
        }
    }

    fn collect_plays(
        &mut self,
        trick: &mut Trick,
        observer: &mut dyn RoundObserver,
    ) -> Result<(), RulesError> {
        let trick_number = self.state.trick_number;
        while let Some(seat) = trick.next_to_play() {
            let ctx = TrickContext {
                seat,
                trick: &*trick,
                hearts_broken: self.state.hearts_broken,
                trick_number,
            };
            let card = self.players[seat.index()].propose_move(&ctx, &mut self.rng)?;
            if let Err(err) = trick.play(seat, card) {
                self.players[seat.index()].take_back(card);
                return Err(err.into());
            }
            observer.notify(&RoundEvent::CardPlayed {
                trick_number,
                seat,
                card,
            });
        }
        Ok(())
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), RulesError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RulesError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn hand_sizes(&self) -> [usize; 4] {
        let mut sizes = [0; PLAYER_COUNT];
        for (slot, player) in sizes.iter_mut().zip(&self.players) {
            *slot = player.hand().len();
        }
        sizes
    }

    fn two_of_clubs_holder(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|seat| self.players[seat.index()].hand().contains(Card::TWO_OF_CLUBS))
            .unwrap_or(PlayerPosition::North)
    }
}
