use grid_snake::config::{GridSize, SimulationConfig};
use grid_snake::food::spawn_position;
use grid_snake::game::{GameState, TickOutcome};
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn length_grows_only_when_score_does(
        seed in any::<u64>(),
        food_count in 1usize..6,
        turns in prop::collection::vec(direction(), 1..200),
    ) {
        let config = SimulationConfig {
            bounds: GridSize { width: 100, height: 100 },
            food_count,
            ..SimulationConfig::default()
        };
        let reward = config.food_reward;
        let mut state = GameState::new_with_seed(config, seed);

        for turn in turns {
            let len_before = state.snake().len();
            let score_before = state.score();
            let direction_before = state.snake().direction();

            state.set_direction(turn);
            prop_assert_ne!(state.snake().direction(), direction_before.opposite());

            let outcome = state.tick();
            prop_assert!(outcome.is_ok());
            prop_assert!(state.score() >= score_before);

            let grew = state.snake().len() - len_before;
            let gained = state.score() - score_before;
            prop_assert!(grew <= 1);
            prop_assert_eq!(gained, u32::try_from(grew).unwrap() * reward);

            if matches!(outcome, Ok(TickOutcome::Terminated { .. })) {
                break;
            }
            prop_assert_eq!(state.foods().len(), food_count);
        }
    }

    #[test]
    fn move_advances_head_by_one_segment(
        x in 0i32..40,
        y in 0i32..30,
        segment_size in 1u16..20,
        turn in direction(),
    ) {
        let pitch = i32::from(segment_size);
        let start = Position::new(x * pitch, y * pitch);
        let mut snake = Snake::new(start, Direction::Right, segment_size);

        snake.set_direction(turn);
        let expected = start.stepped(snake.direction(), pitch);
        snake.move_forward();

        prop_assert_eq!(snake.head(), expected);
        prop_assert_eq!(snake.len(), 1);
    }

    #[test]
    fn uniform_spawn_stays_on_grid(
        seed in any::<u64>(),
        width in 1u16..500,
        height in 1u16..500,
        segment_size in 1u16..25,
    ) {
        prop_assume!(width >= segment_size && height >= segment_size);

        let bounds = GridSize { width, height };
        let mut rng = StdRng::seed_from_u64(seed);
        let snake = Snake::new(Position::new(0, 0), Direction::Right, segment_size);
        let pitch = i32::from(segment_size);

        for _ in 0..50 {
            let position = spawn_position(&mut rng, bounds, segment_size, &snake, false)
                .expect("uniform spawn always yields a cell");
            prop_assert!(position.is_within_bounds(bounds));
            prop_assert_eq!(position.x % pitch, 0);
            prop_assert_eq!(position.y % pitch, 0);
        }
    }
}
