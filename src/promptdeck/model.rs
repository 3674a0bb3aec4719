use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Facet value meaning "no constraint" for category and model filters.
pub const ALL: &str = "all";

/// A single displayable prompt record.
///
/// Every field tolerates being absent or `null` in the source data; missing
/// values read as empty so that a malformed card never aborts a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub date: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
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

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The card's model, or the empty string when it has none.
    pub fn model_str(&self) -> &str {
        self.model.as_deref().unwrap_or("")
    }

    /// Parses the leading `YYYY-MM-DD` of the date field, if any.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}

/// The optional input document: `{ "categories": [...], "prompts": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDocument {
    #[serde(default, deserialize_with = "lenient_tags")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient_cards")]
    pub prompts: Vec<Card>,
}

impl CardDocument {
    pub fn new(prompts: Vec<Card>) -> Self {
        Self {
            categories: Vec::new(),
            prompts,
        }
    }
}

/// Scalars that show up where a string is expected (`version: 1.0`).
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => format!("{:?}", n),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Other(_) => String::new(),
        }
    }
}

/// Tags given either as a list or as one comma separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagList {
    List(Vec<Option<Scalar>>),
    Joined(String),
}

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(de)?
        .map(Scalar::into_string)
        .unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(de)?
        .map(Scalar::into_string)
        .filter(|s| !s.trim().is_empty()))
}

fn lenient_tags<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    let tags = match Option::<TagList>::deserialize(de)? {
        None => Vec::new(),
        Some(TagList::List(items)) => items
            .into_iter()
            .flatten()
            .map(Scalar::into_string)
            .collect(),
        Some(TagList::Joined(s)) => s.split(',').map(|t| t.trim().to_string()).collect(),
    };
    Ok(tags.into_iter().filter(|t| !t.is_empty()).collect())
}

fn lenient_cards<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<Card>, D::Error> {
    let raw = Option::<Vec<serde_json::Value>>::deserialize(de)?.unwrap_or_default();
    let cards = raw
        .into_iter()
        .enumerate()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(i, value)| match serde_json::from_value::<Card>(value) {
            Ok(card) => Some(card),
            Err(e) => {
                tracing::warn!(position = i + 1, error = %e, "skipping malformed card");
                None
            }
        })
        .collect();
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_read_as_empty() {
        let card: Card = serde_json::from_str(r#"{"title": "Alpha"}"#).unwrap();
        assert_eq!(card.title, "Alpha");
        assert_eq!(card.description, "");
        assert_eq!(card.model, None);
        assert!(card.tags.is_empty());
    }

    #[test]
    fn nulls_and_numbers_are_tolerated() {
        let card: Card = serde_json::from_str(
            r#"{"id": "a", "title": null, "version": 1.5, "tags": null, "model": ""}"#,
        )
        .unwrap();
        assert_eq!(card.title, "");
        assert_eq!(card.version, "1.5");
        assert!(card.tags.is_empty());
        assert_eq!(card.model, None);
    }

    #[test]
    fn comma_joined_tags_are_split() {
        let card: Card = serde_json::from_str(r#"{"tags": "writing, code,,seo"}"#).unwrap();
        assert_eq!(card.tags, vec!["writing", "code", "seo"]);
    }

    #[test]
    fn type_field_maps_to_prompt_type() {
        let card: Card = serde_json::from_str(r#"{"type": "Few-shot"}"#).unwrap();
        assert_eq!(card.prompt_type.as_deref(), Some("Few-shot"));
    }

    #[test]
    fn document_skips_null_cards() {
        let doc: CardDocument = serde_json::from_str(
            r#"{"categories": ["Code"], "prompts": [{"id": "a"}, null, {"id": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.categories, vec!["Code"]);
        assert_eq!(doc.prompts.len(), 2);
    }

    #[test]
    fn document_skips_cards_that_are_not_objects() {
        let doc: CardDocument =
            serde_json::from_str(r#"{"prompts": [{"id": "a"}, 42, "oops"]}"#).unwrap();
        assert_eq!(doc.prompts.len(), 1);
    }

    #[test]
    fn structured_values_in_text_fields_read_as_empty() {
        let card: Card = serde_json::from_str(r#"{"id": "a", "title": {"nested": 1}}"#).unwrap();
        assert_eq!(card.title, "");
    }

    #[test]
    fn float_versions_keep_their_decimal() {
        let card: Card = serde_json::from_str(r#"{"version": 1.0}"#).unwrap();
        assert_eq!(card.version, "1.0");
    }

    #[test]
    fn parses_date_prefix() {
        let card = Card::new("a", "A").with_date("2024-03-05T10:00:00Z");
        assert_eq!(
            card.parsed_date(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert_eq!(Card::new("b", "B").with_date("soon").parsed_date(), None);
    }
}
