// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::missing_panics_doc)] // Internal functions don't need # Panics docs
#![allow(clippy::must_use_candidate)] // Not all getters need #[must_use]
#![allow(clippy::module_name_repetitions)] // e.g., WalboxConfig in config module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around HTML, JSON, etc.
#![allow(clippy::too_many_lines)] // Some functions are naturally long
#![allow(clippy::struct_excessive_bools)] // Option structs carry many flags
#![allow(clippy::cast_possible_truncation)] // Cell coordinates are clamped before casting
#![allow(clippy::cast_sign_loss)] // Cell coordinates are clamped before casting
#![allow(clippy::cast_precision_loss)] // Duration to f32 precision loss is acceptable
#![allow(clippy::cast_possible_wrap)] // Terminal sizes fit in i32
#![allow(clippy::redundant_closure_for_method_calls)] // Sometimes closures are clearer
#![allow(clippy::if_not_else)] // Negative conditions can be clearer for early returns
#![allow(clippy::match_same_arms)] // Explicit arms are clearer than combined patterns
#![allow(clippy::single_match_else)] // match with else is fine for Result handling
#![allow(clippy::option_if_let_else)] // if-let is more readable for Option handling
#![allow(clippy::needless_pass_by_value)] // PathBuf by value is fine for config loading
#![allow(clippy::trivially_copy_pass_by_ref)] // &self on Copy types follows Rust conventions

//! Walbox - lightbox modals for pages in the terminal
//!
//! Shows a page of elements; clicking a bound trigger opens a modal over a
//! dimming overlay. Modals can be dragged by the title bar, closed with the
//! close control, the overlay or Esc, and follow the viewport on scroll
//! and resize.
//!
//! Usage:
//!   walbox                  # Demo page
//!   walbox page.toml        # Your page
//!   walbox check page.toml  # List triggers without a terminal

mod app;
mod check;
mod cli;
mod config;
mod errors;
mod event;
mod page;
mod text;
mod tui;
mod ui;
mod widget;

use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::Result;
use config::WalboxConfig;
use page::Page;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get the log directory path
fn get_log_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("/tmp/walbox/logs"),
        |dirs| dirs.cache_dir().join("walbox").join("logs"),
    )
}

fn load_config(path: Option<&PathBuf>) -> WalboxConfig {
    match path {
        Some(path) => WalboxConfig::load_from_path(path.clone()),
        None => WalboxConfig::load(),
    }
}

fn load_page(path: Option<&PathBuf>) -> Result<Page> {
    match path {
        Some(path) => Ok(Page::load(path)?),
        None => Ok(Page::demo()),
    }
}

/// Print what each trigger on a page would open
fn handle_check(page: &PathBuf, json: bool, config: &WalboxConfig) -> Result<()> {
    let page = Page::load(page)?;
    let reports = check::check_page(&page, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", check::format_table(&reports));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize error handling
    color_eyre::install()?;

    // Handle subcommands
    match &cli.command {
        Some(Commands::Check { page, json }) => {
            let config = load_config(cli.config.as_ref());
            return handle_check(page, *json, &config);
        }
        Some(Commands::Config) => {
            print!("{}", WalboxConfig::example());
            return Ok(());
        }
        Some(Commands::Completions { shell }) => {
            // Generate shell completions
            cli::print_completions(*shell);
            return Ok(());
        }
        None => {
            // TUI mode: continue with full setup
        }
    }

    // Setup file logging with rotation
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "walbox.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Log to file only; the terminal belongs to the TUI
    let log_filter = format!("walbox={}", cli.log_level);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(non_blocking),
        )
        .init();

    tracing::info!("Starting walbox v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {:?}", log_dir);

    // Load configuration and page
    let config = load_config(cli.config.as_ref());
    let page = load_page(cli.page.as_ref())?;
    tracing::info!(
        title = %page.title,
        elements = page.elements.len(),
        bindings = page.bindings.len(),
        "Loaded page"
    );

    run_tui(&cli, page, config).await
}

async fn run_tui(cli: &Cli, page: Page, config: WalboxConfig) -> Result<()> {
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    // Calculate durations from rates
    let tick_duration = Duration::from_secs_f64(1.0 / cli.tick_rate.max(1.0));
    let frame_duration = Duration::from_secs_f64(1.0 / cli.frame_rate.max(1.0));

    tracing::info!(
        "TUI starting: {:.1} FPS, {:.1} ticks/sec",
        cli.frame_rate,
        cli.tick_rate
    );

    // Create event channel
    let (event_tx, mut event_rx) = mpsc::channel(100);

    // Initialize terminal (raw mode, alternate screen, mouse capture)
    let mut terminal = tui::init()?;

    // RAII guard ensures terminal is restored on panic or early return
    let _guard = tui::TerminalGuard;

    let size = terminal.size()?;
    let mut app = App::new(
        page,
        config,
        Some(event_tx.clone()),
        (size.width, size.height),
    )?;

    // --title/--content open a modal straight away
    let base = app.config.defaults.resolve();
    if let Some(options) = cli.direct_options(&base) {
        let id = app.open_direct(options);
        tracing::info!(modal = %id, "Opened start-up modal");
    }

    // Create cancellation token for graceful shutdown
    let cancel = CancellationToken::new();

    // Spawn input event handler with cancellation support
    let input_tx = event_tx.clone();
    let input_cancel = cancel.clone();
    let input_handle = tokio::spawn(async move {
        event::input::listen(input_tx, input_cancel).await;
    });

    // Frame rate limiting state
    let mut last_frame = Instant::now();

    // Main loop
    loop {
        // Frame rate limiting with dirty flag check
        let now = Instant::now();
        if app.needs_render && now.duration_since(last_frame) >= frame_duration {
            terminal.draw(|f| ui::render(f, &app))?;
            app.rendered();
            last_frame = now;
        }

        // Wake for the next tick, or sooner if a widget timer is due
        let timeout = app.widget.next_deadline().map_or(tick_duration, |due| {
            due.saturating_duration_since(Instant::now()).min(tick_duration)
        });

        // Handle events with tick-based timeout
        tokio::select! {
            Some(event) = event_rx.recv() => {
                app.handle_event(event);
            }
            () = tokio::time::sleep(timeout) => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Graceful shutdown: signal input listener to stop
    tracing::debug!("Shutting down input listener");
    cancel.cancel();
    input_handle.abort();

    // Restore terminal (guard will also restore on drop, but explicit is cleaner)
    tui::restore()?;
    terminal.show_cursor()?;

    Ok(())
}
