use clap::{Args, Parser, Subcommand};
use promptdeck::commands::list::ListRequest;
use promptdeck::predicate::FilterState;
use promptdeck::sort::SortKey;

#[derive(Parser, Debug)]
#[command(
    name = "promptdeck",
    bin_name = "promptdeck",
    version,
    about = "Browse, filter and copy a deck of AI prompt cards",
    long_about = None,
    after_help = "Point it at your prompts once:\n  promptdeck config source ./prompts.json\n\nRunning with no command lists the first page."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Card source: a JSON file, a directory of markdown prompts, or an http(s) URL
    #[arg(short, long, global = true, help_heading = "Options")]
    pub source: Option<String>,

    /// Cards per page for this run
    #[arg(long, global = true, value_parser = parse_page_size, help_heading = "Options")]
    pub page_size: Option<usize>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Plain output without colors
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

/// Filter, sort and page flags shared by `list` and `browse`.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Text to look for in title, description, tags and prompt text
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Only this category ("all" for any)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only this model ("all" for any)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Only cards carrying this tag; repeat to accept any of several
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Sort order: none, name, category or date
    #[arg(long, value_parser = parse_sort, default_value = "none")]
    pub sort: SortKey,

    /// Page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl FilterArgs {
    pub fn into_request(self) -> ListRequest {
        let mut filter = FilterState::default().with_tags(self.tags);
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        if let Some(category) = self.category {
            filter = filter.with_category(category);
        }
        if let Some(model) = self.model {
            filter = filter.with_model(model);
        }
        ListRequest {
            filter,
            sort: self.sort,
            page: self.page,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cards, one page at a time
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the full prompt of one or more cards
    #[command(alias = "v", display_order = 2)]
    View {
        /// Card positions (as listed) or ids
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },

    /// Copy a card's prompt text to the clipboard
    #[command(alias = "cp", display_order = 3)]
    Copy {
        /// Card position (as listed) or id
        card: String,

        /// Print the prompt text to stdout instead
        #[arg(long)]
        print: bool,
    },

    /// Toggle the favorite flag of one or more cards
    #[command(display_order = 4)]
    Fav {
        /// Card positions (as listed) or ids
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },

    /// List favorite cards
    #[command(display_order = 5)]
    Favorites,

    /// Categories, models and tags with card counts
    #[command(display_order = 6)]
    Facets,

    /// Check cards for missing fields and empty prompts
    #[command(display_order = 7)]
    Validate,

    /// Interactive session: filter, page, view and copy from a prompt
    #[command(alias = "b", display_order = 8)]
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Get or set configuration
    #[command(display_order = 9)]
    Config {
        /// Configuration key (page-size, search-content, debounce-ms, source)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a number", s)),
    }
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}
