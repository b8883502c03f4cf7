#[cfg(feature = "xlsx")]
use std::{rc::Rc, time::Duration};

#[cfg(feature = "xlsx")]
use chrono::Local;
#[cfg(feature = "xlsx")]
use clap::Parser;

#[cfg(feature = "xlsx")]
use sheetdiff::cli::Cli;
#[cfg(feature = "xlsx")]
use sheetdiff::core::{CalamineResolver, DiffSession, SessionWatcher, Settings, load_settings};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "xlsx")]
fn print_state(session: &DiffSession) -> anyhow::Result<()> {
    let now_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    println!("Last refresh: {now_str}");
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

#[cfg(feature = "xlsx")]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let cwd = std::env::current_dir()?;
    let settings = load_settings(&cwd).unwrap_or_default();

    let mut session = DiffSession::with_seed(Rc::new(CalamineResolver), cli.seed(&settings));
    session.set_show_location_grid_line(settings.show_location_grid_line);
    print_state(&session)?;

    if cli.should_watch(&settings) {
        watch_loop(&mut session, &settings)?;
    }
    Ok(())
}

#[cfg(feature = "xlsx")]
fn watch_loop(session: &mut DiffSession, settings: &Settings) -> anyhow::Result<()> {
    let mut watcher = SessionWatcher::new()?;
    watcher.track(session)?;
    tracing::info!(files = ?watcher.watched_files(), "watching for workbook changes");

    let interval = Duration::from_millis(settings.poll_interval_ms.max(10));
    loop {
        std::thread::sleep(interval);
        if watcher.pump(session) {
            print_state(session)?;
        }
    }
}

#[cfg(not(feature = "xlsx"))]
fn main() -> anyhow::Result<()> {
    init_logging();
    eprintln!(
        "Built without the `xlsx` feature; nothing to read workbooks with. \
Enable it with `--features xlsx`, or just run tests with `--no-default-features`."
    );
    Ok(())
}
