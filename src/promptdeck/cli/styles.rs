//! Styles for the promptdeck CLI.
//!
//! Templates only use the semantic names in [`names`]; what each one looks
//! like is decided here, once.

use super::output::Theme;
use console::Style;
use once_cell::sync::Lazy;

pub mod names {
    pub const INDEX: &str = "index";
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const CATEGORY: &str = "category";
    pub const MODEL: &str = "model";
    pub const TAG: &str = "tag";
    pub const FAVORITE: &str = "favorite";
    pub const HEADING: &str = "heading";
    pub const COUNT: &str = "count";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

pub static DECK_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::INDEX, Style::new().yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::MUTED, Style::new().color256(245))
        .add(names::CATEGORY, Style::new().cyan())
        .add(names::MODEL, Style::new().magenta())
        .add(names::TAG, Style::new().blue())
        .add(names::FAVORITE, Style::new().yellow().bold())
        .add(names::HEADING, Style::new().bold().underlined())
        .add(names::COUNT, Style::new().color256(245).italic())
        .add(names::INFO, Style::new().color256(245))
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defines_every_name() {
        for name in [
            names::INDEX,
            names::TITLE,
            names::MUTED,
            names::CATEGORY,
            names::MODEL,
            names::TAG,
            names::FAVORITE,
            names::HEADING,
            names::COUNT,
            names::INFO,
            names::SUCCESS,
            names::WARNING,
            names::ERROR,
        ] {
            assert!(DECK_THEME.has(name), "missing style {}", name);
        }
    }
}
