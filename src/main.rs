mod render;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mouse_maze::{Command, Direction, MazeResult, Session, Settings, Status};
use render::{board_lines, Renderer};

fn main() -> MazeResult<()> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(settings: &Settings) -> MazeResult<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, settings: &Settings) -> MazeResult<()> {
    let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, "starting mouse maze");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut session = Session::new(&mut rng, settings.session.clone())?;
    log_board(&session);
    let mut renderer = Renderer::new(session.grid().size());
    let tick = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
                if let Some(command) = command_for(key.code) {
                    debug!(?command, "input");
                    let status = session.dispatch(&mut rng, command)?;
                    if matches!(status, Some(Status::LevelStarted { .. })) {
                        log_board(&session);
                    }
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            if let Some(Status::LevelStarted { .. }) = session.update(&mut rng, elapsed)? {
                log_board(&session);
            }
        }
        renderer.render(stdout, &session.snapshot())?;

        let spent = frame_start.elapsed();
        if spent < frame_time {
            thread::sleep(frame_time - spent);
        }
    }
}

fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Command::Move(Direction::Right),
        KeyCode::Char('?') => Command::RequestHint,
        KeyCode::Char('p') => Command::StartAutoPlay,
        KeyCode::Char('x') => Command::StopAutoPlay,
        KeyCode::Char('r') => Command::Reset,
        _ => return None,
    };
    Some(command)
}

fn log_board(session: &Session) {
    for line in board_lines(&session.snapshot()) {
        debug!(level = session.level(), "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for(KeyCode::Up), Some(Command::Move(Direction::Up)));
        assert_eq!(command_for(KeyCode::Char('l')), Some(Command::Move(Direction::Right)));
        assert_eq!(command_for(KeyCode::Char('?')), Some(Command::RequestHint));
        assert_eq!(command_for(KeyCode::Char('p')), Some(Command::StartAutoPlay));
        assert_eq!(command_for(KeyCode::Char('r')), Some(Command::Reset));
        assert_eq!(command_for(KeyCode::Char('z')), None);
    }
}
