//! Predicate engine: does a card match the current filter state?
//!
//! Each facet is its own predicate and the overall match is their logical
//! AND. A facet left at its default (`""` search, `"all"` category/model,
//! empty tag set) always matches.
//!
//! - search: case-insensitive substring of title, description, any tag, and
//!   optionally the content body
//! - category / model: case-insensitive exact match
//! - tags: the card carries at least one of the selected tags (OR)

use crate::model::{Card, ALL};
use std::collections::BTreeSet;

/// User-controlled filter inputs. Fully determines the visible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub model: String,
    pub tags: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            model: ALL.to_string(),
            tags: BTreeSet::new(),
        }
    }
}

impl FilterState {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True when no facet constrains the visible set.
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty()
            && is_all(&self.category)
            && is_all(&self.model)
            && self.tags.is_empty()
    }
}

/// Which optional predicates are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Include the content body in text search.
    pub search_content: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            search_content: true,
        }
    }
}

/// A filter state prepared for repeated matching (lower-cased once).
pub struct Matcher {
    needle: String,
    category: Option<String>,
    model: Option<String>,
    tags: Vec<String>,
    options: MatchOptions,
}

impl Matcher {
    pub fn new(filter: &FilterState, options: MatchOptions) -> Self {
        Self {
            needle: filter.search.trim().to_lowercase(),
            category: facet(&filter.category),
            model: facet(&filter.model),
            tags: filter.tags.iter().map(|t| t.to_lowercase()).collect(),
            options,
        }
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.matches_text(card)
            && matches_facet(self.category.as_deref(), &card.category)
            && matches_facet(self.model.as_deref(), card.model_str())
            && self.matches_tags(card)
    }

    fn matches_text(&self, card: &Card) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let needle = self.needle.as_str();
        contains_ci(&card.title, needle)
            || contains_ci(&card.description, needle)
            || card.tags.iter().any(|t| contains_ci(t, needle))
            || (self.options.search_content && contains_ci(&card.content, needle))
    }

    fn matches_tags(&self, card: &Card) -> bool {
        self.tags.is_empty()
            || card
                .tags
                .iter()
                .any(|t| self.tags.contains(&t.to_lowercase()))
    }
}

/// One-off convenience over [`Matcher`].
pub fn matches(card: &Card, filter: &FilterState, options: MatchOptions) -> bool {
    Matcher::new(filter, options).matches(card)
}

/// Cards matching `filter`, in store order.
pub fn filter_cards<'a>(
    cards: &'a [Card],
    filter: &FilterState,
    options: MatchOptions,
) -> Vec<&'a Card> {
    let matcher = Matcher::new(filter, options);
    cards.iter().filter(|c| matcher.matches(c)).collect()
}

pub fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

fn facet(value: &str) -> Option<String> {
    if is_all(value) {
        None
    } else {
        Some(value.trim().to_lowercase())
    }
}

fn matches_facet(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.trim().to_lowercase() == w,
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
