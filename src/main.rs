use swipedeck::cli::{AppConfig, Args};
use swipedeck::config::UserConfig;
use swipedeck::domain::{demo_profiles, load_profiles};
use swipedeck::tui::{pointer_from_mouse, render, ViewState};
use swipedeck::App;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Frame interval of the UI loop
const FRAME: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_tracing(args.log_file.clone());

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load user config: {}", e);
        UserConfig::default()
    });

    let config = match AppConfig::from_args(args, &user_config.engine) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    run_app_with_config(&config, &mut user_config)
}

/// Sends logs to a file so they never corrupt the TUI
fn init_tracing(log_file: Option<PathBuf>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swipedeck=info"));

    let path = log_file.or_else(|| UserConfig::config_dir().map(|dir| dir.join("swipedeck.log")));
    let file = path.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match (path, file) {
        (Some(path), Some(file)) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            info!(path = %path.display(), "logging initialized");
        }
        // No usable log file: stay silent rather than write over the TUI
        _ => tracing_subscriber::registry().with(env_filter).init(),
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(err);
        }

        let backend = CrosstermBackend::new(out);
        let terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = io::stdout();
                let _ = execute!(out, LeaveAlternateScreen, DisableMouseCapture);
                return Err(err);
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the TUI application with configuration
fn run_app_with_config(config: &AppConfig, user_config: &mut UserConfig) -> io::Result<()> {
    let pool = match &config.feed {
        Some(path) => match load_profiles(path) {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => demo_profiles(),
    };
    info!(profiles = pool.len(), mode = config.mode.label(), "starting");

    // Show welcome on first launch or if --welcome flag is set
    let show_welcome = config.show_welcome || !user_config.welcome_shown;
    let mut app = App::new(pool, config.mode, config.engine.clone(), show_welcome)
        .map_err(io::Error::other)?;

    let result = {
        let mut session = TerminalSession::new()?;
        run_loop(&mut session.terminal, &mut app, user_config)
    };

    // Print summary after exit
    let stats = app.statistics();
    if stats.total > 0 {
        println!("Swiped {} profiles", stats.total);
        println!("   Picked: {}", stats.picks);
        println!("   Passed: {}", stats.passes);
        let picks: Vec<&str> = app
            .swipe_log()
            .picks()
            .map(|id| app.profile(id).map_or(id.as_str(), |p| p.name.as_str()))
            .collect();
        if !picks.is_empty() {
            println!("   {}", picks.join(", "));
        }
    }
    info!(total = stats.total, picks = stats.picks, passes = stats.passes, "session ended");

    result
}

/// Main application loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        let size = terminal.size()?;
        app.set_screen(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| render(frame, app))?;

        if app.should_quit() {
            break;
        }

        // Handle input
        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let was_welcome = *app.view() == ViewState::Welcome;
                app.handle_key(key);

                if was_welcome && *app.view() != ViewState::Welcome {
                    // Mark welcome as shown and persist
                    user_config.welcome_shown = true;
                    if let Err(e) = user_config.save() {
                        warn!("Failed to save user config: {}", e);
                    }
                }
            }
            Event::Mouse(mouse) => {
                if let Some(input) = pointer_from_mouse(mouse, app.engine()) {
                    app.handle_pointer(input, Instant::now());
                }
            }
            _ => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
