//! Dispatch for the promptdeck binary.
//!
//! - `run()`: parse arguments, install logging, build the context, dispatch
//! - `init_context()`: config, card store and favorites for this invocation
//! - `handle_*()`: call the API and print the rendered result
//!
//! Running with no subcommand lists the first page.

use super::browse::BrowseSession;
use super::output::{colors_supported, Renderer};
use super::render::{
    render_card_list, render_config, render_facets, render_full_cards, render_messages,
    render_validation, render_window,
};
use super::setup::{Cli, Commands, FilterArgs};
use super::styles::DECK_THEME;
use super::templates;
use clap::Parser;
use promptdeck::api::{CmdMessage, CmdResult, ConfigAction, DeckApi};
use promptdeck::clipboard::copy_to_clipboard;
use promptdeck::commands::list::ListRequest;
use promptdeck::config::{data_dir, kv_path, DeckConfig};
use promptdeck::error::{DeckError, Result};
use promptdeck::favorites::Favorites;
use promptdeck::store::kv::FileKvStore;
use promptdeck::store::{source_for, CardStore};
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const NO_SOURCE_HINT: &str =
    "No card source configured. Pass --source or run: promptdeck config source <path-or-url>";

struct AppContext {
    api: DeckApi<FileKvStore>,
    renderer: Renderer,
    has_source: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let load_cards = !matches!(cli.command, Some(Commands::Config { .. }));
    let mut ctx = init_context(&cli, load_cards)?;

    match cli.command {
        Some(Commands::List { filter }) => handle_list(&mut ctx, filter),
        Some(Commands::View { cards }) => handle_view(&ctx, cards),
        Some(Commands::Copy { card, print }) => handle_copy(&ctx, card, print),
        Some(Commands::Fav { cards }) => handle_fav(&mut ctx, cards),
        Some(Commands::Favorites) => handle_favorites(&ctx),
        Some(Commands::Facets) => handle_facets(&ctx),
        Some(Commands::Validate) => handle_validate(&ctx),
        Some(Commands::Browse { filter }) => handle_browse(&mut ctx, filter),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list_request(&mut ctx, ListRequest::default()),
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `--verbose` means debug.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .try_init();
}

fn init_context(cli: &Cli, load_cards: bool) -> Result<AppContext> {
    let dir = data_dir()?;
    let mut config = match DeckConfig::load(&dir) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "unreadable config, using defaults");
            DeckConfig::default()
        }
    };
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(source) = &cli.source {
        config.source = Some(source.clone());
    }

    let has_source = config.source.is_some();
    let store = match (&config.source, load_cards) {
        (Some(spec), true) => CardStore::load_or_empty(source_for(spec).as_ref()),
        _ => CardStore::empty(),
    };
    debug!(dir = %dir.display(), cards = store.len(), "context ready");

    let favorites = Favorites::load(FileKvStore::new(kv_path(&dir)));
    let renderer = templates::renderer(DECK_THEME.clone(), !cli.no_color && colors_supported())?;

    Ok(AppContext {
        api: DeckApi::new(store, favorites, config, dir)?,
        renderer,
        has_source,
    })
}

fn handle_list(ctx: &mut AppContext, filter: FilterArgs) -> Result<()> {
    handle_list_request(ctx, filter.into_request())
}

fn handle_list_request(ctx: &mut AppContext, request: ListRequest) -> Result<()> {
    let result = ctx.api.list(request)?;
    print!("{}", render_window(&ctx.renderer, &result)?);
    if !ctx.has_source {
        print_messages(&ctx.renderer, &[CmdMessage::info(NO_SOURCE_HINT)])?;
    }
    Ok(())
}

fn handle_view(ctx: &AppContext, cards: Vec<String>) -> Result<()> {
    let result = ctx.api.view(&cards)?;
    print!("{}", render_full_cards(&ctx.renderer, &result.listed_cards)?);
    print_messages(&ctx.renderer, &result.messages)
}

fn handle_copy(ctx: &AppContext, card: String, print: bool) -> Result<()> {
    let mut result = ctx.api.copy_text(&card)?;
    if print {
        if let Some(text) = &result.clipboard {
            print!("{}", text);
        }
        return Ok(());
    }
    deliver_clipboard(&mut result, &copy_to_clipboard);
    print_messages(&ctx.renderer, &result.messages)
}

fn handle_fav(ctx: &mut AppContext, cards: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle_favorite(&cards)?;
    print_messages(&ctx.renderer, &result.messages)
}

fn handle_favorites(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.favorites()?;
    let (empty_message, messages) = match result.messages.split_first() {
        Some((first, rest)) if result.listed_cards.is_empty() => (first.content.as_str(), rest),
        _ => ("", result.messages.as_slice()),
    };
    print!(
        "{}",
        render_card_list(&ctx.renderer, &result.listed_cards, None, empty_message)?
    );
    print_messages(&ctx.renderer, messages)
}

fn handle_facets(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.facets()?;
    if let Some(facets) = &result.facets {
        print!("{}", render_facets(&ctx.renderer, facets)?);
    }
    print_messages(&ctx.renderer, &result.messages)
}

fn handle_validate(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.validate()?;
    if let Some(report) = &result.validation {
        print!("{}", render_validation(&ctx.renderer, report)?);
    }
    print_messages(&ctx.renderer, &result.messages)?;
    match &result.validation {
        Some(report) if !report.is_valid() => Err(DeckError::Validation(report.invalid_count())),
        _ => Ok(()),
    }
}

fn handle_browse(ctx: &mut AppContext, filter: FilterArgs) -> Result<()> {
    ctx.api.list(filter.into_request())?;
    if !ctx.has_source {
        print_messages(&ctx.renderer, &[CmdMessage::info(NO_SOURCE_HINT)])?;
    }
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let copy = copy_to_clipboard;
    let mut session = BrowseSession::new(&mut ctx.api, &ctx.renderer, &copy);
    session.run(stdin.lock(), &mut stdout)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(&ctx.renderer, config)?);
        }
    }
    print_messages(&ctx.renderer, &result.messages)
}

/// Puts `result.clipboard` on the clipboard and reports how it went. Blank
/// text is never copied.
///
/// A failed write is not fatal: the text is still shown by `view`, so the
/// failure becomes a warning.
pub(super) fn deliver_clipboard(result: &mut CmdResult, copy: &dyn Fn(&str) -> Result<()>) {
    let Some(text) = result.clipboard.as_deref().filter(|t| !t.trim().is_empty()) else {
        return;
    };
    match copy(text) {
        Ok(()) => result.add_message(CmdMessage::success("Prompt copied to clipboard.")),
        Err(e) => {
            warn!(error = %e, "clipboard write failed");
            result.add_message(CmdMessage::warning(format!(
                "Could not copy to clipboard: {}",
                e
            )));
        }
    }
}

fn print_messages(renderer: &Renderer, messages: &[CmdMessage]) -> Result<()> {
    let output = render_messages(renderer, messages)?;
    if !output.is_empty() {
        print!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck::api::MessageLevel;

    #[test]
    fn delivered_clipboard_reports_success() {
        let mut result = CmdResult::default().with_clipboard("hello".into());
        let copied = std::cell::RefCell::new(String::new());
        deliver_clipboard(&mut result, &|text| {
            copied.borrow_mut().push_str(text);
            Ok(())
        });
        assert_eq!(copied.borrow().as_str(), "hello");
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn failed_clipboard_is_a_warning() {
        let mut result = CmdResult::default().with_clipboard("hello".into());
        deliver_clipboard(&mut result, &|_| {
            Err(DeckError::Clipboard("no clipboard tool".into()))
        });
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("no clipboard tool"));
    }

    #[test]
    fn nothing_to_deliver_is_silent() {
        let mut result = CmdResult::default();
        deliver_clipboard(&mut result, &|_| panic!("should not copy"));
        assert!(result.messages.is_empty());
    }
}
