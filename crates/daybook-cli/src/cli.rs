use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use daybook_core::VERSION;

/// Daybook - a journaling calendar for the terminal
#[derive(Parser)]
#[command(name = "daybook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the journal data
    #[arg(long, global = true, env = "DAYBOOK_DIR", value_name = "DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Data directory to record in the config
    #[arg(value_name = "DIR")]
    pub dir: Option<String>,

    /// Default category for new entries
    #[arg(long)]
    pub default_category: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Day to file the entry under (YYYY-MM-DD, default today)
    #[arg(long, allow_hyphen_values = true)]
    pub date: Option<String>,

    /// Entry text
    #[arg(short, long = "message", value_name = "TEXT")]
    pub message: Option<String>,

    /// Rating from 1 to 5
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Category label (repeatable)
    #[arg(short, long, value_name = "CATEGORY")]
    pub category: Vec<String>,

    /// Image reference
    #[arg(long, value_name = "URL")]
    pub img_url: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Move the entry to another day
    #[arg(long, allow_hyphen_values = true)]
    pub date: Option<String>,

    /// New entry text
    #[arg(short, long = "message", value_name = "TEXT")]
    pub message: Option<String>,

    /// New rating from 1 to 5
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Replace categories (repeatable)
    #[arg(short, long, value_name = "CATEGORY")]
    pub category: Vec<String>,

    /// New image reference (empty string clears it)
    #[arg(long, value_name = "URL")]
    pub img_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Day the entry is filed under
    #[arg(value_name = "DATE", allow_hyphen_values = true)]
    pub date: String,

    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `day` command
#[derive(Args)]
pub struct DayArgs {
    /// Day to show (default today)
    #[arg(value_name = "DATE", allow_hyphen_values = true)]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dates` command
#[derive(Args)]
pub struct DatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `cards` command
#[derive(Args)]
pub struct CardsArgs {
    /// Open at this entry ID
    #[arg(long, value_name = "ID", conflicts_with = "date")]
    pub from: Option<String>,

    /// Open at the first entry of this day
    #[arg(long, allow_hyphen_values = true)]
    pub date: Option<String>,

    /// Cards shown on each side of the current one
    #[arg(long, default_value_t = daybook_core::carousel::DEFAULT_RADIUS)]
    pub radius: usize,

    /// Print the window and exit
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `calendar` command
#[derive(Args)]
pub struct CalendarArgs {
    #[command(subcommand)]
    pub action: Option<CalendarAction>,

    /// Months shown on each side of the anchor
    #[arg(long, global = true, default_value_t = 1)]
    pub months: u32,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Clone)]
pub enum CalendarAction {
    /// Show the months around the current anchor
    Show,
    /// Move forward one month
    Next,
    /// Move back one month
    Prev,
    /// Move forward one year
    NextYear,
    /// Move back one year
    PrevYear,
    /// Move to the current month
    Today,
    /// Move to the month containing a date
    Jump {
        #[arg(value_name = "DATE", allow_hyphen_values = true)]
        date: String,
    },
}

/// Arguments for the `years` command
#[derive(Args)]
pub struct YearsArgs {
    /// Center year (default: calendar anchor year)
    #[arg(long, allow_hyphen_values = true)]
    pub around: Option<i32>,

    /// Simulated scroll offset in pixels
    #[arg(long, value_name = "PX", requires = "viewport")]
    pub scroll_top: Option<f64>,

    /// Simulated viewport height in pixels
    #[arg(long, value_name = "PX")]
    pub viewport: Option<f64>,

    /// Rows printed on each side of the center
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `key` command
#[derive(Args)]
pub struct KeyArgs {
    /// Date to encode (YYYY-MM-DD, signed years allowed)
    #[arg(value_name = "DATE", allow_hyphen_values = true)]
    pub date: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config and create the data directory
    Init(InitArgs),

    /// Add an entry to a day
    Add(AddArgs),

    /// Edit an entry (use --date to move it)
    Edit(EditArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Show the entries of one day
    Day(DayArgs),

    /// List days that have entries
    Dates(DatesArgs),

    /// Page through all entries card by card
    Cards(CardsArgs),

    /// Browse the month timeline
    Calendar(CalendarArgs),

    /// Show the year picker around a year
    Years(YearsArgs),

    /// Print the storage key and display forms of a date
    Key(KeyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
