//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros.

use crate::widget::{ModalSize, WalboxOptions};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Lightbox modals over a page in the terminal
#[derive(Parser, Debug)]
#[command(name = "walbox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Page file to show (default: built-in demo page)
    #[arg(value_name = "PAGE")]
    pub page: Option<PathBuf>,

    /// Config file (default: ~/.config/walbox/config.toml)
    #[arg(short, long, env = "WALBOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Tick rate in ticks per second; fades and debounces advance on ticks
    #[arg(short = 't', long, default_value_t = 20.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short = 'F', long, default_value_t = 30.0)]
    pub frame_rate: f64,

    /// Open a modal with this title at start
    #[arg(long)]
    pub title: Option<String>,

    /// Open a modal with this content (HTML or a URL) at start
    #[arg(long)]
    pub content: Option<String>,

    /// Show the start-up modal's content as an embedded frame
    #[arg(long, default_value_t = false)]
    pub iframe: bool,

    /// Size class of the start-up modal
    #[arg(long, value_enum)]
    pub size: Option<SizeArg>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a page's triggers and what each would show, without a terminal
    Check {
        /// Page file to check
        page: PathBuf,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print an example config file
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// `--size` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizeArg {
    Small,
    Medium,
    Large,
}

impl From<SizeArg> for ModalSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Small => ModalSize::Small,
            SizeArg::Medium => ModalSize::Medium,
            SizeArg::Large => ModalSize::Large,
        }
    }
}

impl Cli {
    /// Options for the start-up modal, if `--title` or `--content` was given
    pub fn direct_options(&self, base: &WalboxOptions) -> Option<WalboxOptions> {
        if self.title.is_none() && self.content.is_none() {
            return None;
        }
        Some(WalboxOptions {
            title: self.title.clone(),
            content: self.content.clone(),
            iframe: self.iframe,
            size: self.size.map_or(base.size, ModalSize::from),
            ..base.clone()
        })
    }
}

/// Generate shell completions and print to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "walbox", &mut io::stdout());
}
