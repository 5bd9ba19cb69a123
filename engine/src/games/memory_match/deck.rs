use super::settings::SessionSettings;
use crate::games::session_rng::SessionRng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<char>,
}

impl Deck {
    pub fn shuffled(settings: &SessionSettings, rng: &mut SessionRng) -> Self {
        let mut cards = Vec::with_capacity(settings.preset().card_count());
        cards.extend_from_slice(settings.symbols());
        cards.extend_from_slice(settings.symbols());
        rng.shuffle(&mut cards);
        Self { cards }
    }

    #[cfg(test)]
    pub fn from_cards(cards: Vec<char>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<char> {
        self.cards.get(index).copied()
    }

    pub fn is_match(&self, first: usize, second: usize) -> bool {
        match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => first != second && a == b,
            _ => false,
        }
    }

    pub fn cards(&self) -> &[char] {
        &self.cards
    }
}
