use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use hubwatch::app::App;
use hubwatch::events;
use hubwatch::panel::{MetricsHistory, Panel};
use hubwatch::settings::Settings;
use hubwatch::source::{FileSource, HttpSource, SnapshotSource};
use hubwatch::ui::{self, Theme};
use hubwatch::updater::StatsUpdater;

#[derive(Parser, Debug)]
#[command(name = "hubwatch")]
#[command(about = "Terminal status panel for CFAi Hub server statistics")]
struct Args {
    /// Statistics endpoint URL
    #[arg(short, long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Path to a local statistics JSON file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Config file path (default: hubwatch.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (stderr is unusable in raw mode)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Theme: dark, light or auto
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file.as_deref())?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = Some(endpoint);
    }
    if let Some(file) = args.file {
        settings.endpoint = None;
        settings.stats_file = file.display().to_string();
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }

    let source: Box<dyn SnapshotSource> = match &settings.endpoint {
        Some(endpoint) => Box::new(
            HttpSource::builder()
                .endpoint(endpoint)
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build(),
        ),
        None => Box::new(FileSource::new(&settings.stats_file)),
    };
    let source_description = source.description().to_string();

    // The TUI loop stays synchronous; the update loop runs on the runtime
    // in the background.
    let rt = tokio::runtime::Runtime::new()?;
    let _enter = rt.enter();

    let panel = Arc::new(Mutex::new(Panel::template(&settings.applications)));
    let history = Arc::new(Mutex::new(MetricsHistory::new()));
    let updater = Arc::new(StatsUpdater::new(
        source,
        panel.clone(),
        history,
        settings.applications.clone(),
    ));
    let handle = updater.clone().start(Duration::from_secs(settings.refresh_secs));

    let theme = Theme::from_name(&settings.theme);
    let mut app = App::new(panel, updater, handle, source_description, theme);

    run_tui(&mut app)
}

/// Install a file-backed tracing subscriber when a log file is requested.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hubwatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run the TUI until the user quits.
fn run_tui(app: &mut App) -> Result<()> {
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

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 50;
    const MIN_HEIGHT: u16 = 12;

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
                let height = area.height.min(5);
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height - height) / 2,
                    area.width,
                    height,
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::render(frame, app);
        })?;

        // The update loop runs in the background; the draw above picks up
        // whatever it has applied. Here we only need input.
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                crossterm::event::Event::Key(key) => events::handle_key_event(app, key),
                crossterm::event::Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
