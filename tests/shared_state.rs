use std::sync::Arc;
use std::thread;

use slither::config::GridSize;
use slither::game::GameState;
use slither::input::Direction;
use slither::snake::Position;

#[test]
fn input_and_tick_threads_share_one_game() {
    let state = Arc::new(
        GameState::new_with_seed(
            Position::new(20, 20),
            GridSize {
                width: 40,
                height: 40,
            },
            9,
        )
        .expect("valid config"),
    );

    let input = {
        let state = Arc::clone(&state);
        thread::spawn(move || {
            let turns = [
                Direction::Up,
                Direction::Left,
                Direction::Down,
                Direction::Right,
            ];
            for turn in turns.iter().cycle().take(2_000) {
                state.set_direction(*turn);
            }
        })
    };

    let observer = {
        let state = Arc::clone(&state);
        thread::spawn(move || {
            for _ in 0..2_000 {
                let snapshot = state.snapshot();
                assert_eq!(snapshot.score, snapshot.body.len());
                if let Some(first) = snapshot.body.first() {
                    let dx = (first.x - snapshot.head.x).abs();
                    let dy = (first.y - snapshot.head.y).abs();
                    assert_eq!(dx + dy, 1, "neck must touch the head");
                }
            }
        })
    };

    for _ in 0..200 {
        state.step();
    }

    input.join().expect("input thread should finish");
    observer.join().expect("observer thread should finish");

    assert_eq!(state.tick_count(), 200);
    assert_eq!(state.score(), state.body().len());
}
