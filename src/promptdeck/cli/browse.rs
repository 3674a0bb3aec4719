//! Interactive gallery session.
//!
//! Reads one command per line and answers with the refreshed window, the
//! expanded card or a message. Filter and page state carry across lines. A
//! bad line prints an error and the session goes on; only I/O failures end
//! it early.

use super::commands::deliver_clipboard;
use super::output::Renderer;
use super::render::{
    render_browse_help, render_facets, render_full_cards, render_messages, render_window,
};
use promptdeck::api::{CmdMessage, DeckApi};
use promptdeck::commands::list::GalleryEvent;
use promptdeck::error::{DeckError, Result};
use promptdeck::store::kv::KeyValueStore;
use std::io::{BufRead, Write};
use std::str::FromStr;

const PROMPT: &str = "> ";

pub const HELP: &[(&str, &str)] = &[
    ("/<text>, search <text>", "Search title, description, tags and prompt"),
    ("c, category <name|all>", "Filter by category"),
    ("m, model <name|all>", "Filter by model"),
    ("t, tag <tag>", "Toggle a tag filter"),
    ("sort <none|name|category|date>", "Change the order"),
    ("n, next / p, prev", "Next or previous page"),
    ("g, page <n>", "Jump to a page"),
    ("clear", "Drop every filter"),
    ("v, view <card>...", "Show the full prompt"),
    ("y, copy <card>", "Copy the prompt text"),
    ("f, fav <card>...", "Toggle favorite"),
    ("favs", "List favorites"),
    ("facets", "Categories, models and tags"),
    ("h, help", "This list"),
    ("q, quit", "Leave"),
];

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Redraw the current window.
    Show,
    Event(GalleryEvent),
    View(Vec<String>),
    Copy(String),
    Fav(Vec<String>),
    Favorites,
    Facets,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = DeckError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(BrowseCommand::Show);
        }
        if let Some(text) = line.strip_prefix('/') {
            return Ok(BrowseCommand::Event(GalleryEvent::Search(
                text.trim().to_string(),
            )));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let words = || rest.split_whitespace().map(str::to_string).collect::<Vec<_>>();

        let command = match word.to_lowercase().as_str() {
            "s" | "search" => BrowseCommand::Event(GalleryEvent::Search(rest.to_string())),
            "c" | "category" => BrowseCommand::Event(GalleryEvent::Category(or_all(rest))),
            "m" | "model" => BrowseCommand::Event(GalleryEvent::Model(or_all(rest))),
            "t" | "tag" => BrowseCommand::Event(GalleryEvent::ToggleTag(required(rest, "tag")?)),
            "sort" => BrowseCommand::Event(GalleryEvent::Sort(rest.parse()?)),
            "n" | "next" => BrowseCommand::Event(GalleryEvent::NextPage),
            "p" | "prev" => BrowseCommand::Event(GalleryEvent::PrevPage),
            "g" | "page" => {
                let page = rest.parse::<usize>().map_err(|_| {
                    DeckError::InvalidInput(format!("'{}' is not a page number", rest))
                })?;
                BrowseCommand::Event(GalleryEvent::GotoPage(page))
            }
            "clear" | "reset" => BrowseCommand::Event(GalleryEvent::Clear),
            "v" | "view" => {
                required(rest, "card")?;
                BrowseCommand::View(words())
            }
            "y" | "copy" => BrowseCommand::Copy(required(rest, "card")?),
            "f" | "fav" => {
                required(rest, "card")?;
                BrowseCommand::Fav(words())
            }
            "favs" | "favorites" => BrowseCommand::Favorites,
            "facets" => BrowseCommand::Facets,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            other => {
                return Err(DeckError::InvalidInput(format!(
                    "Unknown command '{}' (type help)",
                    other
                )))
            }
        };
        Ok(command)
    }
}

fn or_all(value: &str) -> String {
    if value.is_empty() {
        "all".to_string()
    } else {
        value.to_string()
    }
}

fn required(value: &str, what: &str) -> Result<String> {
    if value.is_empty() {
        return Err(DeckError::InvalidInput(format!("Expected a {}", what)));
    }
    Ok(value.to_string())
}

pub struct BrowseSession<'a, K: KeyValueStore> {
    api: &'a mut DeckApi<K>,
    renderer: &'a Renderer,
    copy: &'a dyn Fn(&str) -> Result<()>,
}

impl<'a, K: KeyValueStore> BrowseSession<'a, K> {
    pub fn new(
        api: &'a mut DeckApi<K>,
        renderer: &'a Renderer,
        copy: &'a dyn Fn(&str) -> Result<()>,
    ) -> Self {
        Self {
            api,
            renderer,
            copy,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "{}", render_window(self.renderer, &self.api.window())?)?;
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let outcome = line
                .parse::<BrowseCommand>()
                .and_then(|command| self.execute(command));
            match outcome {
                Ok(Some(text)) => write!(out, "{}", text)?,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(line = %line, error = %e, "browse command failed");
                    let message = CmdMessage::error(e.to_string());
                    write!(out, "{}", render_messages(self.renderer, &[message])?)?;
                }
            }
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Output for one command, or `None` to end the session.
    fn execute(&mut self, command: BrowseCommand) -> Result<Option<String>> {
        let renderer = self.renderer;
        let text = match command {
            BrowseCommand::Quit => return Ok(None),
            BrowseCommand::Show => render_window(renderer, &self.api.window())?,
            BrowseCommand::Event(event) => render_window(renderer, &self.api.apply(event)?)?,
            BrowseCommand::View(cards) => {
                let result = self.api.view(&cards)?;
                let mut text = render_full_cards(renderer, &result.listed_cards)?;
                text.push_str(&render_messages(renderer, &result.messages)?);
                text
            }
            BrowseCommand::Copy(card) => {
                let mut result = self.api.copy_text(&card)?;
                deliver_clipboard(&mut result, self.copy);
                render_messages(renderer, &result.messages)?
            }
            BrowseCommand::Fav(cards) => {
                let result = self.api.toggle_favorite(&cards)?;
                render_messages(renderer, &result.messages)?
            }
            BrowseCommand::Favorites => {
                let mut result = self.api.favorites()?;
                result.page = None;
                render_window(renderer, &result)?
            }
            BrowseCommand::Facets => match self.api.facets()?.facets {
                Some(facets) => render_facets(renderer, &facets)?,
                None => String::new(),
            },
            BrowseCommand::Help => render_browse_help(renderer, HELP)?,
        };
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::DECK_THEME;
    use crate::cli::templates;
    use promptdeck::config::DeckConfig;
    use promptdeck::favorites::Favorites;
    use promptdeck::sort::SortKey;
    use promptdeck::store::kv::MemoryKvStore;
    use promptdeck::model::Card;
    use promptdeck::store::CardStore;
    use std::cell::RefCell;
    use std::io::Cursor;

    fn numbered(count: usize) -> CardStore {
        CardStore::from_cards(
            (1..=count)
                .map(|i| Card::new(format!("c{}", i), format!("Card {}", i)))
                .collect(),
        )
    }

    fn alpha_beta() -> CardStore {
        CardStore::from_cards(vec![
            Card::new("a", "Alpha")
                .with_category("Writing")
                .with_content("You are an editor."),
            Card::new("b", "Beta")
                .with_category("Code")
                .with_content("You are a senior reviewer."),
        ])
    }

    fn api(store: CardStore) -> DeckApi<MemoryKvStore> {
        let config = DeckConfig {
            page_size: 2,
            ..DeckConfig::default()
        };
        DeckApi::new(
            store,
            Favorites::load(MemoryKvStore::new()),
            config,
            std::env::temp_dir(),
        )
        .unwrap()
    }

    fn session_output(api: &mut DeckApi<MemoryKvStore>, input: &str) -> (String, Vec<String>) {
        let renderer = templates::renderer(DECK_THEME.clone(), false).unwrap();
        let copied = RefCell::new(Vec::new());
        let copy = |text: &str| -> Result<()> {
            copied.borrow_mut().push(text.to_string());
            Ok(())
        };
        let mut out = Vec::new();
        BrowseSession::new(api, &renderer, &copy)
            .run(Cursor::new(input.to_string()), &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), copied.into_inner())
    }

    #[test]
    fn parses_commands() {
        assert_eq!("".parse::<BrowseCommand>().unwrap(), BrowseCommand::Show);
        assert_eq!(
            "/ code review ".parse::<BrowseCommand>().unwrap(),
            BrowseCommand::Event(GalleryEvent::Search("code review".into()))
        );
        assert_eq!(
            "c".parse::<BrowseCommand>().unwrap(),
            BrowseCommand::Event(GalleryEvent::Category("all".into()))
        );
        assert_eq!(
            "sort date".parse::<BrowseCommand>().unwrap(),
            BrowseCommand::Event(GalleryEvent::Sort(SortKey::Date))
        );
        assert_eq!(
            "v 1 b".parse::<BrowseCommand>().unwrap(),
            BrowseCommand::View(vec!["1".into(), "b".into()])
        );
        assert_eq!("Q".parse::<BrowseCommand>().unwrap(), BrowseCommand::Quit);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!("frobnicate".parse::<BrowseCommand>().is_err());
        assert!("g two".parse::<BrowseCommand>().is_err());
        assert!("sort size".parse::<BrowseCommand>().is_err());
        assert!("t".parse::<BrowseCommand>().is_err());
        assert!("y".parse::<BrowseCommand>().is_err());
    }

    #[test]
    fn state_carries_across_lines() {
        let mut api = api(numbered(5));
        let (out, _) = session_output(&mut api, "n\nn\nq\n");
        assert!(out.contains("Page 1 of 3"));
        assert!(out.contains("Page 3 of 3"));
        assert_eq!(api.window().page.unwrap().page, 3);
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let mut api = api(alpha_beta());
        let (out, _) = session_output(&mut api, "bogus\nv 9\nc Code\n");
        assert!(out.contains("Unknown command 'bogus'"));
        assert_eq!(api.controller().visible_count(), 1);
    }

    #[test]
    fn copy_uses_injected_clipboard() {
        let mut api = api(alpha_beta());
        let (out, copied) = session_output(&mut api, "y b\n");
        assert_eq!(copied, vec!["You are a senior reviewer.".to_string()]);
        assert!(out.contains("Prompt copied to clipboard."));
    }

    #[test]
    fn favorites_toggle_and_list() {
        let mut api = api(alpha_beta());
        let (out, _) = session_output(&mut api, "f 2\nfavs\n");
        assert!(out.contains("Added \"Beta\""));
        assert_eq!(api.favorites().unwrap().listed_cards.len(), 1);
    }

    #[test]
    fn quit_stops_reading() {
        let mut api = api(numbered(5));
        session_output(&mut api, "q\nn\n");
        assert_eq!(api.window().page.unwrap().page, 1);
    }

    #[test]
    fn help_lists_commands() {
        let mut api = api(alpha_beta());
        let (out, _) = session_output(&mut api, "help\n");
        assert!(out.contains("Commands"));
        assert!(out.contains("Toggle favorite"));
    }
}
