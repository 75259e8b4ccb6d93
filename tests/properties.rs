use glam::Vec2;
use proptest::prelude::*;

use silhouette_breaker::sim::{
    AlphaMask, Ball, BlockField, Character, Field, GameState, InputState, Rect, Scene,
    generate_blocks, tick,
};

fn game_state(field: Field, ball: Ball) -> GameState {
    let mut state = GameState::new(
        field,
        // A block pinned to the top-left corner so the field never clears by itself
        BlockField::new(vec![Rect::new(0.0, 0.0, 1.0, 1.0)]),
        Character::new(0.0, field.width, field.height),
        false,
    );
    state.scene = Scene::Game;
    state.ball = ball;
    state
}

proptest! {
    #[test]
    fn paddle_stays_in_field(
        width in 100.0f32..2000.0,
        cursor in -5000.0f32..5000.0,
        start in any::<bool>(),
    ) {
        let field = Field::new(width, 500.0);
        let mut state = game_state(field, Ball::new(Vec2::new(width / 2.0, 250.0)));
        if start {
            state.scene = Scene::Start;
        }
        let mut input = InputState::new(cursor);
        tick(&mut state, &mut input);

        prop_assert!(state.paddle.x >= 0.0);
        prop_assert!(state.paddle.x <= width - state.paddle.width);
    }

    #[test]
    fn free_flight_moves_by_velocity(
        x in 20.0f32..380.0,
        y in 20.0f32..200.0,
        angle in 0.0f32..360.0,
        speed in 0.0f32..10.0,
    ) {
        // Away from walls, blocks and the paddle: no reflection happens
        let field = Field::new(400.0, 400.0);
        let ball = Ball { pos: Vec2::new(x, y), size: 5.0, angle, speed };
        let mut state = game_state(field, ball);
        state.paddle.y = 10_000.0;
        prop_assume!(!Rect::new(0.0, 0.0, 1.0, 1.0).contains_point(ball.pos));

        tick(&mut state, &mut InputState::new(0.0));

        let expected = ball.pos + Vec2::from_angle(angle.to_radians()) * speed;
        prop_assert!((state.ball.pos - expected).length() < 1e-3);
        prop_assert_eq!(state.ball.angle, angle);
        prop_assert_eq!(state.ball.speed, speed);
    }

    #[test]
    fn misses_and_speed_never_decrease(
        x in 0.0f32..400.0,
        y in 0.0f32..400.0,
        angle in 0.0f32..360.0,
        cursor in 0.0f32..400.0,
    ) {
        let field = Field::new(400.0, 400.0);
        let mut state = game_state(field, Ball { pos: Vec2::new(x, y), size: 5.0, angle, speed: 3.0 });
        let mut input = InputState::new(cursor);
        for _ in 0..200 {
            let (miss, speed, rank) = (state.miss_count, state.ball.speed, state.scene.rank());
            tick(&mut state, &mut input);
            prop_assert!(state.miss_count >= miss);
            prop_assert!(state.ball.speed >= speed);
            prop_assert!(state.scene.rank() >= rank);
        }
    }

    #[test]
    fn opaque_mask_block_count(width in 10u32..120, height in 1u32..120) {
        let mask = AlphaMask::from_rgba(width, height, vec![255; (width * height * 4) as usize]).unwrap();
        let cell = width / 10;
        let blocks = generate_blocks(&mask, Vec2::ZERO);
        prop_assert_eq!(blocks.len() as u32, (width / cell) * (height / cell));
    }
}
