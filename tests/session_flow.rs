use std::time::Duration;

use mouse_maze::{
    find_shortest_path, obstacle_count, Cell, Command, Direction, Grid, Mode, MoveOutcome,
    Session, SessionConfig, Status, GRID_SIZE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const GOAL: Cell = Cell::new(GRID_SIZE - 1, GRID_SIZE - 1);

fn fast_config() -> SessionConfig {
    SessionConfig {
        auto_step: Duration::from_millis(10),
        advance_delay: Duration::from_millis(50),
        ..SessionConfig::default()
    }
}

fn follow(session: &mut Session, path: &[Cell]) -> Vec<MoveOutcome> {
    let mut outcomes = Vec::new();
    for &next in path {
        let from = session.player();
        let dx = next.x as isize - from.x as isize;
        let dy = next.y as isize - from.y as isize;
        outcomes.push(session.move_player(dx, dy));
    }
    outcomes
}

#[test]
fn manual_shortest_walk_is_optimal() {
    let mut rng = ChaCha8Rng::seed_from_u64(100);
    let mut session = Session::new(&mut rng, fast_config()).expect("session");
    let route = find_shortest_path(session.grid(), session.player(), session.goal());
    assert!(!route.is_empty());

    let outcomes = follow(&mut session, &route);
    assert_eq!(outcomes.last(), Some(&MoveOutcome::Won));
    assert_eq!(session.steps(), route.len());
    match session.status() {
        Some(Status::Victory {
            level,
            steps,
            min_steps,
            is_optimal,
        }) => {
            assert_eq!(level, 1);
            assert_eq!(steps, min_steps);
            assert!(is_optimal);
        }
        other => panic!("expected victory, got {other:?}"),
    }
}

#[test]
fn auto_play_on_sealed_goal_stays_playing() {
    let mut grid = Grid::new(GRID_SIZE);
    grid.set_blocked(Cell::new(GRID_SIZE - 2, GRID_SIZE - 1));
    grid.set_blocked(Cell::new(GRID_SIZE - 1, GRID_SIZE - 2));
    let mut session = Session::from_grid(fast_config(), 1, grid).expect("board");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let status = session
        .dispatch(&mut rng, Command::StartAutoPlay)
        .expect("dispatch");
    assert_eq!(status, Some(Status::NoPathForAuto));
    assert_eq!(session.mode(), Mode::Playing);
    assert!(!session.is_auto_playing());
    assert_eq!(session.steps(), 0);
}

#[test]
fn auto_play_counts_every_tick_and_clears_level() {
    let config = fast_config();
    let tick = config.auto_step;
    let delay = config.advance_delay;
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut session = Session::new(&mut rng, config).expect("session");
    let route_len = find_shortest_path(session.grid(), session.player(), session.goal()).len();

    assert_eq!(session.start_auto_play(), Some(Status::AutoPlaying));
    let mut ticks = 1;
    while session.is_auto_playing() {
        let before = session.steps();
        session.update(&mut rng, tick).expect("update");
        assert_eq!(session.steps(), before + 1);
        ticks += 1;
        assert!(ticks <= route_len, "auto-play overran its route");
    }

    assert_eq!(ticks, route_len);
    assert_eq!(session.player(), GOAL);
    assert_eq!(session.mode(), Mode::Victory);
    assert!(matches!(
        session.status(),
        Some(Status::Victory {
            is_optimal: true,
            ..
        })
    ));

    let next = session.update(&mut rng, delay).expect("advance");
    assert_eq!(next, Some(Status::LevelStarted { level: 2 }));
    assert_eq!(session.steps(), 0);
    assert!(session.hint().is_empty());
}

#[test]
fn levels_stay_solvable_as_density_rises() {
    let config = SessionConfig {
        advance_delay: Duration::from_millis(1),
        ..SessionConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5150);
    let mut session = Session::new(&mut rng, config).expect("session");

    for level in 1..=8u32 {
        assert_eq!(session.level(), level);
        let grid = session.grid();
        assert_eq!(grid.blocked_count(), obstacle_count(GRID_SIZE, level));
        assert!(!grid.is_blocked(Cell::new(0, 0)));
        assert!(!grid.is_blocked(GOAL));
        let route = find_shortest_path(grid, Cell::new(0, 0), GOAL);
        assert!(!route.is_empty());

        follow(&mut session, &route);
        assert_eq!(session.mode(), Mode::Victory);
        session
            .update(&mut rng, Duration::from_millis(1))
            .expect("advance");
    }
    assert_eq!(session.level(), 9);
}

#[test]
fn moves_into_walls_and_edges_are_free() {
    let mut grid = Grid::new(GRID_SIZE);
    grid.set_blocked(Cell::new(0, 1));
    let mut session = Session::from_grid(fast_config(), 1, grid).expect("board");
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    for dir in [Direction::Up, Direction::Left, Direction::Down] {
        let status = session.dispatch(&mut rng, Command::Move(dir)).expect("move");
        assert_eq!(status, None);
    }
    assert_eq!(session.player(), Cell::new(0, 0));
    assert_eq!(session.steps(), 0);

    session
        .dispatch(&mut rng, Command::Move(Direction::Right))
        .expect("move");
    assert_eq!(session.player(), Cell::new(1, 0));
    assert_eq!(session.steps(), 1);
}
