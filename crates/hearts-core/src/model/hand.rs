use crate::model::card::Card;
use crate::model::suit::Suit;

/// Cards held by one seat, always sorted by suit then rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The three lowest-sorted cards, if the hand holds that many.
    pub fn first_three(&self) -> Option<[Card; 3]> {
        match self.cards.as_slice() {
            &[a, b, c, ..] => Some([a, b, c]),
            _ => None,
        }
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    /// Cards this hand may play. `led_suit` is `None` when the seat is leading.
    ///
    /// A leader may not open Hearts until they are broken unless nothing else
    /// is held; a follower must match the led suit when able and may discard
    /// anything otherwise. Never empty for a non-empty hand.
    pub fn legal_options(&self, led_suit: Option<Suit>, hearts_broken: bool) -> Vec<Card> {
        let preferred: Vec<Card> = match led_suit {
            None if hearts_broken => return self.cards.clone(),
            None => self
                .cards
                .iter()
                .copied()
                .filter(|card| !card.suit.is_heart())
                .collect(),
            Some(suit) => self
                .cards
                .iter()
                .copied()
                .filter(|card| card.suit == suit)
                .collect(),
        };
        if preferred.is_empty() {
            self.cards.clone()
        } else {
            preferred
        }
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}
