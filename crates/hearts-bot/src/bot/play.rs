use hearts_core::model::card::Card;
use hearts_core::model::controller::MoveView;
use hearts_core::model::rank::Rank;
use hearts_core::model::suit::Suit;
use hearts_core::model::trick::highest_of_suit;
use std::borrow::Cow;

/// Which preference narrowed the legal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    LeadLow,
    LeadLowest,
    DumpQueen,
    Duck,
    MinimizeOverpay,
    ShieldQueen,
    Unrestricted,
}

pub struct PlayPlanner;

impl PlayPlanner {
    /// Narrows `legal` to the cards a cautious player prefers.
    ///
    /// The result is always a non-empty subset of `legal` when `legal` is
    /// non-empty. Rules are tried in order and the first that applies wins.
    pub fn narrow<'a>(legal: &'a [Card], view: &MoveView<'_>) -> (Tactic, Cow<'a, [Card]>) {
        if legal.is_empty() {
            return (Tactic::Unrestricted, Cow::Borrowed(legal));
        }

        if view.is_leading() {
            let low = keep(legal, |card| card.sort_value() < Rank::Jack.value());
            if !low.is_empty() {
                return (Tactic::LeadLow, Cow::Owned(low));
            }
            let lowest = legal.iter().copied().min_by_key(|card| card.sort_value());
            return (Tactic::LeadLowest, Cow::Owned(lowest.into_iter().collect()));
        }

        let led_suit = view.led_suit;
        let spades_above_queen = highest_of_suit(view.prior_plays, Suit::Spades)
            .is_some_and(|card| card.rank > Rank::Queen);

        if legal.contains(&Card::QUEEN_OF_SPADES)
            && (led_suit != Some(Suit::Spades) || spades_above_queen)
        {
            return (Tactic::DumpQueen, Cow::Owned(vec![Card::QUEEN_OF_SPADES]));
        }

        let queen_in_trick = view
            .prior_plays
            .iter()
            .any(|play| play.card.is_queen_of_spades());
        if led_suit == Some(Suit::Hearts) || queen_in_trick {
            let to_beat = led_suit
                .and_then(|suit| highest_of_suit(view.prior_plays, suit))
                .map(|card| card.sort_value())
                .unwrap_or(0);
            let under = keep(legal, |card| card.sort_value() < to_beat);
            if let Some(best_under) = under.iter().map(|card| card.sort_value()).max() {
                return (
                    Tactic::Duck,
                    Cow::Owned(keep(&under, |card| card.sort_value() == best_under)),
                );
            }
            let lowest = legal
                .iter()
                .map(|card| card.sort_value())
                .min()
                .unwrap_or(0);
            return (
                Tactic::MinimizeOverpay,
                Cow::Owned(keep(legal, |card| card.sort_value() == lowest)),
            );
        }

        if led_suit == Some(Suit::Spades) && !spades_above_queen {
            let safe = keep(legal, |card| !card.is_queen_of_spades());
            if !safe.is_empty() && safe.len() < legal.len() {
                return (Tactic::ShieldQueen, Cow::Owned(safe));
            }
        }

        (Tactic::Unrestricted, Cow::Borrowed(legal))
    }
}

fn keep(cards: &[Card], predicate: impl Fn(&Card) -> bool) -> Vec<Card> {
    cards.iter().copied().filter(|card| predicate(card)).collect()
}
