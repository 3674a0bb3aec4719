use crate::error::DeckError;
use crate::model::Card;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordering applied to the visible set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Insertion order, untouched.
    #[default]
    None,
    /// Title, case-insensitive.
    Name,
    /// Category, case-insensitive.
    Category,
    /// Date, newest first. Undated cards go last.
    Date,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[SortKey::None, SortKey::Name, SortKey::Category, SortKey::Date]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Date => "date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "default" => Ok(SortKey::None),
            "name" | "title" => Ok(SortKey::Name),
            "category" => Ok(SortKey::Category),
            "date" => Ok(SortKey::Date),
            other => Err(DeckError::InvalidInput(format!(
                "Unknown sort key '{}' (expected one of: none, name, category, date)",
                other
            ))),
        }
    }
}

/// Total order over two cards for `key`.
///
/// [`SortKey::None`] reports every pair as equal, which under a stable sort
/// leaves the input order as is.
pub fn compare(a: &Card, b: &Card, key: SortKey) -> Ordering {
    match key {
        SortKey::None => Ordering::Equal,
        SortKey::Name => compare_text(&a.title, &b.title),
        SortKey::Category => compare_text(&a.category, &b.category),
        SortKey::Date => match (a.parsed_date(), b.parsed_date()) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Stable in-place sort; equal keys keep their relative order.
pub fn sort_cards(cards: &mut [&Card], key: SortKey) {
    if key == SortKey::None {
        return;
    }
    cards.sort_by(|a, b| compare(a, b, key));
}

/// Collation-style comparison in three levels: base letters (accents and
/// case ignored), then accents, then the raw strings so that "alpha" and
/// "Alpha" still have a fixed order.
fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercased, with combining marks stripped after canonical decomposition.
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
