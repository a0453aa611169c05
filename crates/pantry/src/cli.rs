//! Clap derive structures for the `pantry` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use clap::{Args, Parser, Subcommand, ValueEnum};

use pantry_core::SortOrder;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pantry -- browse the Open Food Facts catalog from a terminal
#[derive(Debug, Parser)]
#[command(
    name = "pantry",
    version,
    about = "Browse the Open Food Facts product catalog from the command line",
    long_about = "Search, filter, sort and page through food products.\n\n\
        Categories are browsed page by page, text searches are matched\n\
        against product names, and barcodes resolve to a single product.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Catalog profile to use
    #[arg(long, short = 'p', env = "PANTRY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog base URL (overrides profile)
    #[arg(long, env = "PANTRY_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "PANTRY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PANTRY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Result ordering, applied to each fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Catalog order
    #[default]
    None,
    /// Product name, A to Z
    NameAsc,
    /// Product name, Z to A
    NameDesc,
    /// Nutri-Score, best first
    GradeAsc,
    /// Nutri-Score, worst first
    GradeDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => Self::None,
            SortArg::NameAsc => Self::NameAsc,
            SortArg::NameDesc => Self::NameDesc,
            SortArg::GradeAsc => Self::GradeAsc,
            SortArg::GradeDesc => Self::GradeDesc,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse a category page by page
    #[command(alias = "b")]
    Browse(BrowseArgs),

    /// Search product names
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Look up a product by barcode
    #[command(alias = "l")]
    Lookup(LookupArgs),

    /// Show every field of one product
    #[command(alias = "show")]
    Product(ProductArgs),

    /// List categories that contain products
    #[command(alias = "cats")]
    Categories,

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Listing Arguments ─────────────────────────────────────────

/// Sorting and paging for listing commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Sort order
    #[arg(long, short = 's', value_enum, default_value_t = SortArg::None)]
    pub sort: SortArg,

    /// Number of pages to load
    #[arg(
        long,
        short = 'n',
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..=50)
    )]
    pub pages: u32,
}

// ── Catalog Commands ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Category to browse [default: profile's default category]
    pub category: Option<String>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text matched case-insensitively against product names
    pub text: String,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Product barcode (EAN/UPC)
    pub barcode: String,
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product barcode (EAN/UPC)
    pub identifier: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// Write a config file with the built-in profile
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
