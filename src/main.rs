use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::path::Path;
use std::{io, time::Duration};
use tokio::io::AsyncReadExt;
use tracing::{Level, debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod app;
mod cli;
mod clipboard;
mod config;
mod entry;
mod error;
mod models;
mod page;
mod rsync;
mod selection;
mod session;
mod size;
mod ui;

use app::App;
use cli::Cli;
use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use config::ConfigManager;
use rsync::Remote;
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_file(path.clone())?,
        None => ConfigManager::new()?,
    };
    let app_config = config_manager.load_config()?;

    init_logging(&config_manager.log_dir(&app_config))?;
    debug!("Starting with {:?}", cli);

    let html = read_page(&cli).await?;
    let listing = page::parse_listing(&html).context("Page is not a directory listing")?;

    let remote = Remote::new(cli.remote.clone().unwrap_or(app_config.remote_host));
    let options = cli.options.clone().unwrap_or(app_config.default_options);
    let destination = cli
        .destination
        .clone()
        .unwrap_or(app_config.default_destination);
    let mut session = Session::new(listing, remote, options, destination);

    if cli.print {
        return print_report(&mut session, &cli);
    }

    let clipboard: Box<dyn Clipboard> = match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            warn!("{:#}; copied text will not leave the application", e);
            Box::new(MemoryClipboard::default())
        }
    };
    let app = App::new(
        session,
        config_manager.get_config_path().to_path_buf(),
        clipboard,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
    }

    Ok(())
}

fn init_logging(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let log_file = log_dir.join(format!(
        "myrient-picker_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = File::create(&log_file).context("Failed to create log file")?;

    fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("myrient_picker=debug".parse()?),
        )
        .with_ansi(false)
        .with_writer(file)
        .init();

    Ok(())
}

async fn read_page(cli: &Cli) -> Result<String> {
    let bytes = if cli.reads_stdin() {
        let mut bytes = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut bytes)
            .await
            .context("Failed to read listing from stdin")?;
        bytes
    } else {
        tokio::fs::read(&cli.page)
            .await
            .with_context(|| format!("Failed to read listing page {}", cli.page))?
    };
    Ok(decode_page(&bytes))
}

/// Saved pages are not always valid UTF-8; stray bytes become U+FFFD.
fn decode_page(bytes: &[u8]) -> String {
    let html = String::from_utf8_lossy(bytes);
    if let std::borrow::Cow::Owned(_) = html {
        warn!("Listing is not valid UTF-8; replaced invalid bytes");
    }
    html.into_owned()
}

fn print_report(session: &mut Session, cli: &Cli) -> Result<()> {
    if !cli.select.is_empty() {
        for title in &cli.select {
            if !session.entries().iter().any(|e| e.title() == title.as_str()) {
                warn!("No entry titled {:?}", title);
                eprintln!("warning: no entry titled {:?}", title);
            }
        }
        session.select_only(&cli.select);
    }

    if cli.json {
        let report = session.report()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = session.summary();
    eprintln!(
        "Selected {} ({})",
        summary.count_display(),
        summary.size_display()
    );
    println!("{}", session.command()?);
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw::<B>(f, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key)?;

                if app.should_quit {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_page_still_parses() {
        let mut bytes = b"<html><body><h1>Index of /files/x/</h1>\
            <table id=\"list\"><thead><tr><th>Name</th></tr></thead><tbody>\
            <tr><td><a href=\"a.zip\">a".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b".zip</a></td><td>3 KiB</td></tr></tbody></table></body></html>");

        let listing = page::parse_listing(&decode_page(&bytes)).unwrap();
        assert_eq!(listing.rows.len(), 1);
        assert_eq!(listing.rows[0].link_text.as_deref(), Some("a\u{FFFD}.zip"));
        assert_eq!(listing.rows[0].size_text.as_deref(), Some("3 KiB"));
    }
}
