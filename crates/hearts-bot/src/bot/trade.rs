use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use rand::Rng;
use rand::seq::SliceRandom;

pub struct TradePlanner;

impl TradePlanner {
    /// Three distinct cards drawn uniformly from the hand.
    pub fn choose<R: Rng + ?Sized>(hand: &Hand, rng: &mut R) -> Option<[Card; 3]> {
        let picked: Vec<Card> = hand.cards().choose_multiple(rng, 3).copied().collect();
        match picked.as_slice() {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TradePlanner;
    use hearts_core::model::deck::Deck;
    use hearts_core::model::hand::Hand;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn picks_three_distinct_held_cards() {
        let hand = Hand::with_cards(Deck::shuffled_with_seed(4).cards()[..13].to_vec());
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            let [a, b, c] = TradePlanner::choose(&hand, &mut rng).unwrap();
            assert!(a != b && b != c && a != c);
            assert!(hand.contains(a) && hand.contains(b) && hand.contains(c));
        }
    }

    #[test]
    fn short_hand_yields_nothing() {
        let hand = Hand::with_cards(Deck::fresh_set().cards()[..2].to_vec());
        let mut rng = StdRng::seed_from_u64(21);
        assert_eq!(TradePlanner::choose(&hand, &mut rng), None);
    }
}
