//! TTRPG Campaign Tracker TUI.
//!
//! A terminal tool for game masters: campaigns with per-feature trackers
//! (NPCs, journal, settlements, travel plans, magic items, bastions,
//! conflicts, characters, expectations), persisted as one JSON document
//! with export/import.

mod app;
mod events;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

use tracker_core::{CampaignCollection, CampaignRegistry, CampaignStore};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let data_file = data_file_from_args(&args);
    let store = CampaignStore::new(data_file);
    log::info!("using data file {}", store.path().display());

    // Load never takes the app down: a broken data file degrades to an
    // empty collection plus a visible error.
    let (collection, load_error) = match store.load().await {
        Ok(collection) => (collection, None),
        Err(error) => {
            log::error!("failed to load campaign data: {error}");
            (CampaignCollection::new(), Some(error))
        }
    };
    let registry = CampaignRegistry::new(store, collection);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(registry, load_error)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Resolve the data file: `--data-file <path>` beats the environment,
/// which beats the platform default.
fn data_file_from_args(args: &[String]) -> PathBuf {
    if let Some(position) = args.iter().position(|a| a == "--data-file") {
        if let Some(path) = args.get(position + 1) {
            return PathBuf::from(path);
        }
    }
    CampaignStore::default_path()
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Drain one queued store operation per frame so errors surface
        // against a current screen
        if let Some(op) = app.pending.pop_front() {
            app.run_pending_op(op).await;
            continue;
        }

        // Poll for events with a timeout for the status fade
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("TTRPG Campaign Tracker - campaign data for game masters");
    println!();
    println!("USAGE:");
    println!("  tracker [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help           Show this help message");
    println!("  --data-file <PATH>   Use PATH as the campaign data file");
    println!();
    println!("ENVIRONMENT:");
    println!("  TRACKER_DATA_FILE    Data file location (overridden by --data-file)");
    println!("  RUST_LOG             Log filter (e.g. info, tracker_core=debug)");
    println!();
    println!("DATA:");
    println!("  Campaigns persist as one JSON document. Use :export [dir] to");
    println!("  write ttrpg_campaigns.json and :import <file> to replace the");
    println!("  stored data from an export.");
}
