//! Output templates, kept as stand-alone `.jinja` files and embedded at
//! compile time.
//!
//! The environment trims blocks, so a line holding only a `{% ... %}` tag
//! produces no output. Layout math (widths, truncation, padding) happens in
//! `render.rs`; templates only pick styles and arrange lines.

use super::output::{Renderer, Theme};
use promptdeck::error::Result;

pub const CARD_LIST: &str = "card_list";
pub const FULL_CARD: &str = "full_card";
pub const FACETS: &str = "facets";
pub const VALIDATION: &str = "validation";
pub const CONFIG: &str = "config";
pub const MESSAGES: &str = "messages";
pub const BROWSE_HELP: &str = "browse_help";

const TEMPLATES: &[(&str, &str)] = &[
    (CARD_LIST, include_str!("templates/card_list.jinja")),
    (FULL_CARD, include_str!("templates/full_card.jinja")),
    (FACETS, include_str!("templates/facets.jinja")),
    (VALIDATION, include_str!("templates/validation.jinja")),
    (CONFIG, include_str!("templates/config.jinja")),
    (MESSAGES, include_str!("templates/messages.jinja")),
    (BROWSE_HELP, include_str!("templates/browse_help.jinja")),
];

/// A renderer with every template registered.
pub fn renderer(theme: Theme, use_color: bool) -> Result<Renderer> {
    let mut renderer = Renderer::new(theme, use_color);
    for (name, source) in TEMPLATES {
        renderer.add_template(name, source)?;
    }
    Ok(renderer)
}
