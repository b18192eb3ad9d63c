use crate::model::player::PlayerPosition;
use serde::Serialize;

/// Penalty points available in one round: thirteen Hearts plus the Queen of Spades.
pub const ROUND_POINTS: u32 = 26;

/// Applies the shoot-the-moon rule to one round's scores.
///
/// When a single seat took all 26 points it scores 0 and everyone else 26.
/// Returns the adjusted scores and the shooter, if any.
pub fn moon_adjusted(scores: [u32; 4]) -> ([u32; 4], Option<PlayerPosition>) {
    let mut shooters = PlayerPosition::LOOP
        .iter()
        .copied()
        .filter(|seat| scores[seat.index()] == ROUND_POINTS);
    match (shooters.next(), shooters.next()) {
        (Some(shooter), None) => {
            let mut adjusted = [ROUND_POINTS; 4];
            adjusted[shooter.index()] = 0;
            (adjusted, Some(shooter))
        }
        _ => (scores, None),
    }
}

/// Running totals across the rounds of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub fn add_penalty(&mut self, seat: PlayerPosition, points: u32) {
        self.totals[seat.index()] += points;
    }

    pub fn score(&self, seat: PlayerPosition) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    /// Lowest total leads in Hearts; ties go to the earlier seat.
    pub fn leading_player(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .min_by_key(|seat| self.score(*seat))
            .unwrap_or(PlayerPosition::North)
    }

    pub fn highest_total(&self) -> u32 {
        self.totals.iter().copied().max().unwrap_or(0)
    }

    /// Adds one round's already moon-adjusted scores.
    pub fn apply_round(&mut self, scores: [u32; 4]) {
        for seat in PlayerPosition::LOOP.iter().copied() {
            self.add_penalty(seat, scores[seat.index()]);
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScoreBoard, moon_adjusted};
    use crate::model::player::PlayerPosition;

    #[test]
    fn scoreboard_tracks_penalty_points() {
        let mut board = ScoreBoard::new();
        board.add_penalty(PlayerPosition::East, 13);
        assert_eq!(board.score(PlayerPosition::East), 13);
        assert_eq!(board.score(PlayerPosition::North), 0);
    }

    #[test]
    fn leading_player_is_lowest_score() {
        let mut board = ScoreBoard::new();
        board.apply_round([26, 0, 3, 1]);
        board.apply_round([0, 4, 0, 0]);
        assert_eq!(board.leading_player(), PlayerPosition::West);
        assert_eq!(board.highest_total(), 26);
    }

    #[test]
    fn ordinary_round_is_unchanged() {
        assert_eq!(moon_adjusted([1, 5, 0, 20]), ([1, 5, 0, 20], None));
    }

    #[test]
    fn shooting_the_moon_inverts_scores() {
        let (adjusted, shooter) = moon_adjusted([0, 0, 26, 0]);
        assert_eq!(adjusted, [26, 26, 0, 26]);
        assert_eq!(shooter, Some(PlayerPosition::South));
    }
}
