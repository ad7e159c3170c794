mod animation;
mod app;
mod config;
mod error;
mod input;
mod logging;
mod raster;
mod shooting;
mod stars;
mod surface;
mod types;
mod ui;

use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_rx = logging::init(LevelFilter::Info);
    let loaded = config::load_config();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, App::from_loaded(loaded, Some(log_rx))).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_secs_f64(1.0 / app.config.frame_rate() as f64);
    let size = terminal.size()?;
    app.start_animation(size.width, size.height);
    let mut last_tick = Instant::now();

    loop {
        app.poll_logs();

        // Render
        terminal.draw(|f| ui::draw(f, &app))?;

        // Poll for events with timeout to maintain tick rate
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                // Only handle key press events, ignore release/repeat
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(&mut app, key);
                }
                Event::Resize(cols, rows) => app.on_resize(cols, rows),
                _ => {}
            }
        }

        // Display refresh: deliver the pending frame
        if last_tick.elapsed() >= tick_rate {
            app.tick = app.tick.wrapping_add(1);
            app.pump_frame();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    // App drops here, stopping the animation on every exit path.
    Ok(())
}
