use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use healthdash::config::{DashboardConfig, Settings};
use healthdash::sampler::{LoadSampler, MissingCpuPolicy, Sampler, StatusSampler};
use healthdash::{events, ui};
use healthdash::{App, FileHealthClient, HealthClient, HealthReport, HttpHealthClient};

#[derive(Parser, Debug)]
#[command(name = "healthdash")]
#[command(about = "Terminal dashboard for polling a service health endpoint")]
struct Args {
    /// Base URL of the service exposing the health endpoint
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Path of the health endpoint
    #[arg(long)]
    path: Option<String>,

    /// Read health payloads from a JSON file instead of HTTP
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (defaults to ./healthdash.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Status card refresh interval (e.g., "15s", "500ms")
    #[arg(long)]
    status_interval: Option<String>,

    /// CPU chart sampling interval (e.g., "5s")
    #[arg(long)]
    load_interval: Option<String>,

    /// Number of CPU samples kept in the chart (1 to 10000)
    #[arg(short, long)]
    window: Option<usize>,

    /// HTTP request timeout (e.g., "10s")
    #[arg(long)]
    timeout: Option<String>,

    /// What to plot when the payload has no cpu_percent
    #[arg(long, value_enum)]
    missing_cpu: Option<MissingCpuPolicy>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, export the state to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of file and environment settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref url) = self.url {
            settings.base_url = url.clone();
        }
        if let Some(ref path) = self.path {
            settings.health_path = path.clone();
        }
        if let Some(ref interval) = self.status_interval {
            settings.status_interval = interval.clone();
        }
        if let Some(ref interval) = self.load_interval {
            settings.load_interval = interval.clone();
        }
        if let Some(window) = self.window {
            settings.window = window;
        }
        if let Some(ref timeout) = self.timeout {
            settings.timeout = timeout.clone();
        }
        if let Some(policy) = self.missing_cpu {
            settings.missing_cpu = policy;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    let config = settings.resolve()?;

    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let client = build_client(&args, &config)?;
    info!(endpoint = client.description(), ?config, "starting");

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return rt.block_on(export_once(client, &config, export_path));
    }

    run_tui(client, config)
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given; in headless mode they fall back to stderr.
/// Otherwise nothing is installed so the TUI keeps the terminal to itself.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if headless {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    }
    Ok(())
}

fn build_client(args: &Args, config: &DashboardConfig) -> Result<Arc<dyn HealthClient>> {
    if let Some(ref path) = args.file {
        return Ok(Arc::new(FileHealthClient::new(path)));
    }
    let client = HttpHealthClient::new(&config.base_url, &config.health_path, config.timeout)?;
    Ok(Arc::new(client))
}

/// Poll once through both samplers and write the resulting report.
async fn export_once(
    client: Arc<dyn HealthClient>,
    config: &DashboardConfig,
    export_path: &Path,
) -> Result<()> {
    let result = client.fetch_health().await;
    if let Err(ref e) = result {
        warn!(error = %e, "health fetch failed");
    }

    let mut status = StatusSampler::new();
    let ticket = status.begin();
    status.complete(ticket, result.clone());

    let mut load = LoadSampler::new(config.window, config.missing_cpu);
    let ticket = load.begin();
    load.complete(ticket, result);

    let status = status.state();
    let load = load.state();
    let report = HealthReport::new(client.description(), status.health.as_ref(), &load.window);
    report.write_to(export_path)?;

    println!("Exported health state to: {}", export_path.display());
    Ok(())
}

/// Run the TUI against the given client
fn run_tui(client: Arc<dyn HealthClient>, config: DashboardConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(client, config);

    let result = run_app(&mut terminal, &mut app);

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 48;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5u16.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::render(frame, app);
        })?;

        // Samplers publish in the background; redraw at least every 250ms
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(250))? {
            if key.kind == KeyEventKind::Press {
                events::handle_key_event(app, key);
            }
        }
    }

    Ok(())
}
