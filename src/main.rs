mod audio;
mod audio_api;
mod loader;
mod machine;
mod model;
mod settings;
mod shared;
mod transport;
mod tui;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use machine::DrumMachine;
use shared::InputEvent;
use tui::TuiState;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// Logs go to a file; the terminal belongs to the TUI.
fn init_logging(base_dir: &Path) {
    use simplelog::{Config, LevelFilter, WriteLogger};

    let log_path = base_dir.join(".beatbox").join("beatbox.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(file) = std::fs::File::create(&log_path) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }
}

fn run() -> anyhow::Result<()> {
    let base_dir = std::env::current_dir().unwrap_or_default();
    init_logging(&base_dir);

    let samples_root: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| base_dir.join("sounds"));
    let kit = std::env::args().nth(2).unwrap_or_else(|| "default".to_string());

    let mut settings = settings::load_settings(&base_dir);
    let mut theme = tui::theme_by_name(&settings.theme);

    let audio = audio::start_audio()?;

    let mut machine = DrumMachine::new();
    let step_events = machine.subscribe();
    for cmd in machine.initial_commands() {
        audio.send(cmd);
    }
    for cmd in loader::load_kit(&samples_root, &kit, audio.sample_rate()) {
        audio.send(cmd);
    }

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(16); // ~60fps
    let mut last_tick = Instant::now();
    let mut tui_state = TuiState::default();

    loop {
        let ds = machine.display_state();
        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds, tui_state.selected_track, theme);
        })?;

        let events = tui::input::poll_input(tick_rate, &mut tui_state)?;
        for event in events {
            match event {
                InputEvent::Quit => {
                    settings.theme = theme.name.to_string();
                    if let Err(e) = settings::save_settings(&base_dir, &settings) {
                        log::warn!("could not save settings: {e:#}");
                    }
                    drop(term);
                    drop(audio); // stop the stream before leaving raw mode
                    return Ok(());
                }
                InputEvent::CycleTheme => {
                    theme = tui::next_theme(theme.name);
                    settings.theme = theme.name.to_string();
                    if let Err(e) = settings::save_settings(&base_dir, &settings) {
                        log::warn!("could not save settings: {e:#}");
                    }
                }
                other => {
                    for cmd in machine.handle_input(other) {
                        audio.send(cmd);
                    }
                }
            }
        }

        // Drive the step clock with real elapsed time so a slow frame never
        // drops a step.
        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        for cmd in machine.tick(elapsed) {
            audio.send(cmd);
        }
        // keep the subscription drained; the channel is unbounded
        while let Ok(event) = step_events.try_recv() {
            log::trace!("step event: {event:?}");
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
