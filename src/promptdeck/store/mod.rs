//! # Card Store
//!
//! The card store is the in-memory, ordered collection of cards the gallery
//! works on. It is populated once per session from a [`CardSource`] and is
//! read-only afterwards: filtering never mutates cards, it only decides which
//! of them are visible.
//!
//! ## Sources
//!
//! Cards can come from several places, all behind the [`CardSource`] trait:
//!
//! - [`fs::JsonFileSource`]: a local `{ "categories": [...], "prompts": [...] }` document
//! - [`http::HttpSource`]: the same document fetched once over HTTP(S)
//! - [`fs::MarkdownDirSource`]: a directory of markdown prompt files with YAML
//!   front matter, one card per file
//! - [`memory::InMemorySource`]: fixed cards, for tests
//!
//! [`source_for`] picks an implementation from a user supplied string.
//!
//! ## Load Failures
//!
//! A failed load is not fatal for the gallery. [`CardStore::load_or_empty`]
//! logs the error and hands back an empty store, so the UI shows an empty
//! gallery rather than nothing at all.
//!
//! ## Favorites
//!
//! Per-card favorite flags are not part of the card data. They live in a
//! small durable key-value store, see [`kv`] and [`crate::favorites`].

use crate::error::Result;
use crate::model::{Card, CardDocument};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

pub mod fs;
pub mod http;
pub mod kv;
pub mod memory;

/// Anything that can produce the card document once.
pub trait CardSource {
    /// Load the full document. Called once per session.
    fn load(&self) -> Result<CardDocument>;

    /// Human readable origin, for log lines.
    fn describe(&self) -> String;
}

/// Chooses a source for a path or URL.
///
/// - `http://` / `https://` → [`http::HttpSource`]
/// - an existing directory → [`fs::MarkdownDirSource`]
/// - anything else → [`fs::JsonFileSource`]
pub fn source_for(spec: &str) -> Box<dyn CardSource> {
    let lower = spec.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Box::new(http::HttpSource::new(spec));
    }
    let path = Path::new(spec);
    if path.is_dir() {
        Box::new(fs::MarkdownDirSource::new(path))
    } else {
        Box::new(fs::JsonFileSource::new(path))
    }
}

/// Ordered, read-only collection of cards plus the declared category list.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<Card>,
    categories: Vec<String>,
}

impl CardStore {
    /// Builds a store from a loaded document.
    ///
    /// Cards without an id get one: their `url`, else `card-<n>` by load
    /// position, never reusing an id some other card carries explicitly.
    /// When two cards share an id the first one wins.
    pub fn from_document(doc: CardDocument) -> Self {
        let explicit: HashSet<String> = doc
            .prompts
            .iter()
            .filter(|card| !card.id.trim().is_empty())
            .map(|card| card.id.clone())
            .collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cards = Vec::with_capacity(doc.prompts.len());

        for (i, mut card) in doc.prompts.into_iter().enumerate() {
            if card.id.trim().is_empty() {
                card.id = generated_id(&card, i + 1, |id| {
                    !explicit.contains(id) && !seen.contains(id)
                });
            }
            if !seen.insert(card.id.clone()) {
                tracing::warn!(id = %card.id, title = %card.title, "dropping card with duplicate id");
                continue;
            }
            cards.push(card);
        }

        let categories = if doc.categories.is_empty() {
            distinct(cards.iter().map(|c| c.category.as_str()))
        } else {
            doc.categories
        };

        Self { cards, categories }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self::from_document(CardDocument::new(cards))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads from `source`, falling back to an empty store on failure.
    pub fn load_or_empty(source: &dyn CardSource) -> Self {
        match source.load() {
            Ok(doc) => {
                let store = Self::from_document(doc);
                tracing::info!(
                    source = %source.describe(),
                    cards = store.len(),
                    "card store loaded"
                );
                store
            }
            Err(e) => {
                tracing::error!(source = %source.describe(), error = %e, "failed to load cards");
                Self::empty()
            }
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Declared categories, or the distinct card categories when the
    /// document did not declare any.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn models(&self) -> Vec<String> {
        distinct(self.cards.iter().filter_map(|c| c.model.as_deref()))
    }

    pub fn tags(&self) -> Vec<String> {
        distinct(self.cards.iter().flat_map(|c| c.tags.iter().map(String::as_str)))
    }

    /// Number of cards per value of a facet, sorted by value.
    pub fn facet_counts<'a, F, I>(&'a self, values_of: F) -> BTreeMap<String, usize>
    where
        F: Fn(&'a Card) -> I,
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            let unique: BTreeSet<&str> = values_of(card).into_iter().collect();
            for value in unique.into_iter().filter(|v| !v.is_empty()) {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// The card's url when free, else `card-<position>`, suffixed `-2`, `-3`, ...
/// until free.
fn generated_id(card: &Card, position: usize, is_free: impl Fn(&str) -> bool) -> String {
    if let Some(url) = card.url.as_deref() {
        if !url.trim().is_empty() && is_free(url) {
            return url.to_string();
        }
    }
    let base = format!("card-{}", position);
    let mut candidate = base.clone();
    let mut suffix = 1;
    while !is_free(&candidate) {
        suffix += 1;
        candidate = format!("{}-{}", base, suffix);
    }
    candidate
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
