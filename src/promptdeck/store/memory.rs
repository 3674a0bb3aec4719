use super::CardSource;
use crate::error::Result;
use crate::model::{Card, CardDocument};

/// Card source backed by a fixed document. Used in tests and for embedding.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    document: CardDocument,
}

impl InMemorySource {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            document: CardDocument::new(cards),
        }
    }

    pub fn from_document(document: CardDocument) -> Self {
        Self { document }
    }
}

impl CardSource for InMemorySource {
    fn load(&self) -> Result<CardDocument> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} cards)", self.document.prompts.len())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::CardStore;

    pub struct StoreFixture {
        cards: Vec<Card>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self { cards: Vec::new() }
        }

        /// Adds `count` plain cards titled "Card 1".."Card N".
        pub fn with_cards(mut self, count: usize) -> Self {
            let start = self.cards.len();
            for i in start..start + count {
                let card = Card::new(format!("c{}", i + 1), format!("Card {}", i + 1))
                    .with_description(format!("Description for card {}", i + 1))
                    .with_content(format!("Content for card {}", i + 1))
                    .with_category("General");
                self.cards.push(card);
            }
            self
        }

        pub fn with_card(mut self, card: Card) -> Self {
            self.cards.push(card);
            self
        }

        /// The two-card deck used throughout the filter tests.
        pub fn alpha_beta() -> Self {
            Self::new()
                .with_card(
                    Card::new("a", "Alpha")
                        .with_category("Writing")
                        .with_model("GPT-4")
                        .with_tags(["blog", "seo"])
                        .with_description("Draft long form posts")
                        .with_content("You are an editor.")
                        .with_date("2024-01-10"),
                )
                .with_card(
                    Card::new("b", "Beta")
                        .with_category("Code")
                        .with_model("Claude")
                        .with_tags(["rust", "review"])
                        .with_description("Review a pull request")
                        .with_content("You are a senior reviewer.")
                        .with_date("2024-06-02"),
                )
        }

        pub fn source(self) -> InMemorySource {
            InMemorySource::new(self.cards)
        }

        pub fn store(self) -> CardStore {
            CardStore::from_cards(self.cards)
        }
    }
}
