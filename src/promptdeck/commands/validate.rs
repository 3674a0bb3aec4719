use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Card;
use crate::store::CardStore;
use chrono::NaiveDate;

const MIN_DESCRIPTION_CHARS: usize = 10;

/// Problems found on a single card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardValidation {
    pub id: String,
    pub title: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CardValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub checked: usize,
    /// Only cards with at least one error or warning, in store order.
    pub cards: Vec<CardValidation>,
}

impl ValidationReport {
    pub fn invalid_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_valid()).count()
    }

    pub fn valid_count(&self) -> usize {
        self.checked - self.invalid_count()
    }

    pub fn warning_count(&self) -> usize {
        self.cards.iter().map(|c| c.warnings.len()).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}

pub fn run(store: &CardStore) -> Result<CmdResult> {
    let report = check_all(store.cards());
    let mut result = CmdResult::default();
    if report.checked == 0 {
        result.add_message(CmdMessage::warning("No prompts to validate."));
    } else if report.is_valid() {
        result.add_message(CmdMessage::success(format!(
            "All {} prompts are valid",
            report.checked
        )));
    } else {
        result.add_message(CmdMessage::error(format!(
            "{} of {} prompts have errors",
            report.invalid_count(),
            report.checked
        )));
    }
    Ok(result.with_validation(report))
}

pub fn check_all(cards: &[Card]) -> ValidationReport {
    let found = cards
        .iter()
        .map(check)
        .filter(|v| !v.errors.is_empty() || !v.warnings.is_empty())
        .collect();
    ValidationReport {
        checked: cards.len(),
        cards: found,
    }
}

pub fn check(card: &Card) -> CardValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let required = [
        ("title", card.title.as_str()),
        ("description", card.description.as_str()),
        ("model", card.model_str()),
        ("category", card.category.as_str()),
        ("version", card.version.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("missing required field '{}'", field));
        }
    }
    if card.content.trim().is_empty() {
        errors.push("prompt text is empty".to_string());
    }

    if card.tags.is_empty() {
        warnings.push("tag list is empty".to_string());
    }
    let description_chars = card.description.trim().chars().count();
    if description_chars > 0 && description_chars < MIN_DESCRIPTION_CHARS {
        warnings.push(format!(
            "description is shorter than {} characters",
            MIN_DESCRIPTION_CHARS
        ));
    }
    if let Some(date) = card.date.as_deref().filter(|d| !d.trim().is_empty()) {
        if NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
            warnings.push(format!("date '{}' is not YYYY-MM-DD", date));
        }
    }

    CardValidation {
        id: card.id.clone(),
        title: card.title.clone(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    fn complete() -> Card {
        let mut card = Card::new("ok", "Complete")
            .with_description("A well described prompt")
            .with_model("GPT-4")
            .with_category("Writing")
            .with_tags(["blog"])
            .with_content("Write a post.");
        card.version = "1.0".into();
        card
    }

    #[test]
    fn complete_card_is_clean() {
        let v = check(&complete());
        assert!(v.errors.is_empty());
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn missing_fields_are_errors() {
        let v = check(&Card::new("x", ""));
        assert!(!v.is_valid());
        for field in ["title", "description", "model", "category", "version"] {
            assert!(
                v.errors.iter().any(|e| e.contains(field)),
                "expected error for {}",
                field
            );
        }
        assert!(v.errors.iter().any(|e| e.contains("empty")));
    }

    #[test]
    fn soft_problems_are_warnings() {
        let mut card = complete().with_description("Short").with_tags(Vec::<String>::new());
        card.date = Some("last week".into());
        let v = check(&card);
        assert!(v.is_valid());
        assert_eq!(v.warnings.len(), 3);
    }

    #[test]
    fn date_with_time_part_is_warned() {
        let mut card = complete();
        card.date = Some("2024-03-05T10:00Z".into());
        assert_eq!(check(&card).warnings.len(), 1);

        card.date = Some(" 2024-03-05 ".into());
        assert!(check(&card).warnings.is_empty());
    }

    #[test]
    fn report_counts() {
        let report = check_all(&[complete(), Card::new("bad", "Bad")]);
        assert_eq!(report.checked, 2);
        assert_eq!(report.cards.len(), 1);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.valid_count(), 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn run_summarizes() {
        let result = run(&StoreFixture::new().with_card(complete()).store()).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        let result = run(&StoreFixture::new().with_cards(2).store()).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(result.validation.unwrap().invalid_count(), 2);
    }
}
