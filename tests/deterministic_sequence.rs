use chroma_snake::collision::{self, Collision};
use chroma_snake::config::{FoodPolicy, Rgb, ScoringRule, SimConfig};
use chroma_snake::food::{FoodItem, FoodSet};
use chroma_snake::game::{Flow, GameState};
use chroma_snake::input::{Direction, GameInput};
use chroma_snake::snake::{Position, Snake};
use chroma_snake::state::GameStatus;

fn config(scoring: ScoringRule, food_policy: FoodPolicy) -> SimConfig {
    SimConfig {
        scoring,
        food_policy,
        ..SimConfig::with_grid(10, 10)
    }
}

fn started(config: SimConfig, seed: u64) -> GameState {
    let mut state = GameState::new_with_seed(config, seed);
    state.apply_input(GameInput::AnyKey);
    assert_eq!(state.status, GameStatus::Playing);
    state
}

#[test]
fn first_tick_eats_adjacent_food() {
    for policy in [FoodPolicy::Single, FoodPolicy::Burst { min: 1, max: 3 }] {
        let mut state = started(config(ScoringRule::Flat { points: 10 }, policy), 42);
        assert_eq!(state.snake.head(), Position { x: 5, y: 5 });
        assert_eq!(state.snake.direction(), Direction::Right);
        state.foods = FoodSet::from_items(
            30,
            vec![FoodItem::new(Position { x: 6, y: 5 }, Rgb(0, 255, 0))],
        );

        let event = state.tick().expect("food at (6, 5) should be eaten");

        assert_eq!(event.position, Position { x: 6, y: 5 });
        assert_eq!(
            state.snake.segments().copied().collect::<Vec<_>>(),
            vec![Position { x: 6, y: 5 }, Position { x: 5, y: 5 }]
        );
        assert_eq!(state.score(), 10);
        assert!(!state.foods.is_empty());
        for food in state.foods.items() {
            assert_ne!(food.position, Position { x: 6, y: 5 });
            assert_ne!(food.position, Position { x: 5, y: 5 });
            assert!(state.bounds().is_interior(food.position));
        }
        assert_eq!(state.status, GameStatus::Playing);
    }
}

#[test]
fn streak_scoring_pays_for_matching_color() {
    let mut state = started(config(ScoringRule::default(), FoodPolicy::Single), 7);
    let red = state.config().palette[0].snake;
    state.foods = FoodSet::from_items(30, vec![FoodItem::new(Position { x: 6, y: 5 }, red)]);

    state.tick();

    assert_eq!(state.score(), 15);
    assert_eq!(state.snapshot().multiplier, 1);
}

#[test]
fn reversal_is_rejected_and_snake_keeps_moving() {
    let mut state = started(config(ScoringRule::Flat { points: 10 }, FoodPolicy::Single), 3);
    state.foods = FoodSet::new(30);
    state.snake = Snake::from_segments(
        vec![
            Position { x: 2, y: 2 },
            Position { x: 1, y: 2 },
            Position { x: 0, y: 2 },
        ],
        Direction::Right,
    );

    let flow = state.step([GameInput::Direction(Direction::Left)]);

    assert_eq!(flow, Flow::Continue);
    assert_eq!(state.snake.direction(), Direction::Right);
    assert_eq!(
        state.snake.segments().copied().collect::<Vec<_>>(),
        vec![
            Position { x: 3, y: 2 },
            Position { x: 2, y: 2 },
            Position { x: 1, y: 2 },
        ]
    );
}

#[test]
fn length_is_invariant_without_food() {
    let mut state = started(config(ScoringRule::Flat { points: 10 }, FoodPolicy::Single), 4);
    state.foods = FoodSet::new(30);
    state.snake = Snake::from_segments(
        vec![
            Position { x: 4, y: 3 },
            Position { x: 4, y: 4 },
            Position { x: 4, y: 5 },
        ],
        Direction::Up,
    );

    let turns = [Direction::Left, Direction::Up, Direction::Right];
    for direction in turns {
        let before: Vec<_> = state.snake.segments().copied().collect();
        state.step([GameInput::Direction(direction)]);
        let after: Vec<_> = state.snake.segments().copied().collect();

        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0].step(direction));
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }
}

#[test]
fn wall_hit_then_restart_resets_round() {
    let mut state = started(config(ScoringRule::Flat { points: 10 }, FoodPolicy::Single), 5);
    state.foods = FoodSet::from_items(
        30,
        vec![FoodItem::new(Position { x: 6, y: 5 }, Rgb(9, 9, 9))],
    );

    let mut ticks = 0;
    while state.status == GameStatus::Playing {
        state.step(std::iter::empty());
        ticks += 1;
        assert!(ticks <= 10, "snake should reach the right wall");
    }

    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.death_reason, Some(Collision::Wall));
    assert!(state.score() >= 10);
    assert!(collision::check(&state.snake, state.bounds()));

    // Inputs other than restart are ignored after death.
    state.apply_input(GameInput::Direction(Direction::Up));
    state.apply_input(GameInput::Pause);
    assert_eq!(state.status, GameStatus::GameOver);

    state.apply_input(GameInput::Restart);

    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.score(), 0);
    assert_eq!(state.snake.len(), 1);
    assert_eq!(state.snake.head(), Position { x: 5, y: 5 });
    assert_eq!(state.foods.len(), 1);
    assert!(!state.snake.occupies(state.foods.items()[0].position));
    assert_eq!(state.death_reason, None);
    assert_eq!(state.tick_count, 0);
}

#[test]
fn quit_is_honoured_from_every_state() {
    let mut state = GameState::new_with_seed(SimConfig::with_grid(10, 10), 6);
    assert_eq!(state.step([GameInput::Quit]), Flow::Quit);

    for status in [GameStatus::Playing, GameStatus::Paused, GameStatus::GameOver] {
        state.status = status;
        assert_eq!(state.apply_input(GameInput::Quit), Flow::Quit);
        assert_eq!(state.status, status);
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed| {
        let mut state = started(SimConfig::with_grid(12, 12), seed);
        let script = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        for direction in script.iter().cycle().take(40) {
            if state.status != GameStatus::Playing {
                break;
            }
            state.step([GameInput::Direction(*direction)]);
            state.step(std::iter::empty());
        }
        (
            state.score(),
            state.snake.segments().copied().collect::<Vec<_>>(),
            state
                .foods
                .items()
                .iter()
                .map(|food| food.position)
                .collect::<Vec<_>>(),
        )
    };

    assert_eq!(run(99), run(99));
}
