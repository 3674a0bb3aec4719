//! Template rendering with named styles.
//!
//! Templates are minijinja; styling goes through a `style` filter that maps a
//! semantic name (`"title"`, `"muted"`) to a [`console::Style`] from a
//! [`Theme`]. With color off the filter passes text through unchanged, so the
//! same template serves terminals and pipes.
//!
//! An unknown style name is not an error: the text is prefixed with `(!?)` so
//! typos in templates show up in the output instead of being silently dropped.

use console::{Style, Term};
use minijinja::{Environment, Value};
use promptdeck::error::{DeckError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A named collection of styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style. Replaces an existing style of the same name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    #[cfg(test)]
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Whether stdout is a terminal that takes ANSI colors.
pub fn colors_supported() -> bool {
    Term::stdout().features().colors_supported()
}

/// Holds compiled templates sharing one environment, so templates can
/// `include` each other.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: Theme, use_color: bool) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        let theme = Arc::new(theme);
        env.add_filter("style", move |value: Value, name: String| -> String {
            theme.apply(&name, &value.to_string(), use_color)
        });
        Self { env }
    }

    pub fn add_template(&mut self, name: &'static str, source: &'static str) -> Result<()> {
        self.env
            .add_template(name, source)
            .map_err(|e| DeckError::Render(e.to_string()))
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| DeckError::Render(e.to_string()))?;
        template
            .render(data)
            .map_err(|e| DeckError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Data {
        name: String,
    }

    fn renderer(use_color: bool) -> Renderer {
        let theme = Theme::new().add("ok", Style::new().green().force_styling(true));
        let mut renderer = Renderer::new(theme, use_color);
        renderer
            .add_template("greet", "Hello {{ name | style(\"ok\") }}\n")
            .unwrap();
        renderer
            .add_template("typo", "{{ name | style(\"nope\") }}")
            .unwrap();
        renderer
    }

    #[test]
    fn plain_output_without_color() {
        let out = renderer(false)
            .render("greet", &Data { name: "deck".into() })
            .unwrap();
        assert_eq!(out, "Hello deck\n");
    }

    #[test]
    fn styled_output_with_color() {
        let out = renderer(true)
            .render("greet", &Data { name: "deck".into() })
            .unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("deck"));
    }

    #[test]
    fn unknown_style_is_flagged() {
        let out = renderer(false)
            .render("typo", &Data { name: "deck".into() })
            .unwrap();
        assert_eq!(out, "(!?) deck");
    }

    #[test]
    fn unknown_template_is_a_render_error() {
        let err = renderer(false).render("missing", &()).unwrap_err();
        assert!(matches!(err, DeckError::Render(_)));
    }
}
