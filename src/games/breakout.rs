//! Brick-clearing game
//!
//! One paddle on the bottom edge, three rows of bricks across the top. The
//! round ends when the last brick goes or the ball drops off the bottom.

use glam::Vec2;

use super::body_shape;
use crate::engine::{DisplayInfo, FrameInput, Game};
use crate::joystick_to_pixels;
use crate::platform::RandomSource;
use crate::renderer::{Primitive, RectStyle, rectangle, text};
use crate::sim::{
    Arena, Ball, Brick, Deflection, Paddle, Walls, advance, collides, reflect_off_paddle,
    reflect_off_wall, resolve_brick_contact,
};

pub const BRICK_W: f32 = 12.0;
pub const BRICK_H: f32 = 6.0;
/// Gap drawn on the top and left of each brick
pub const BRICK_BORDER: f32 = 4.0;
pub const BRICK_ROWS: u32 = 3;

pub const PADDLE_W: f32 = 16.0;
pub const PADDLE_H: f32 = 4.0;

pub const BALL_W: f32 = 3.0;
pub const BALL_H: f32 = 3.0;
pub const BALL_SPEED: f32 = 6.0;
/// Minimum horizontal speed after any bounce
pub const BALL_SPEED_BORDER: f32 = 0.5;

/// Lowest ball y at which bricks are checked
pub const BRICK_BAND: f32 = BRICK_ROWS as f32 * BRICK_H;

/// Number of 0.5 px/tick serve speeds to pick from (0.5 ..= 5.5)
const SERVE_STEPS: u32 = 11;

const DEFLECTION: Deflection = Deflection {
    speed: BALL_SPEED,
    border: BALL_SPEED_BORDER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title screen until the first click
    NotStarted,
    Active,
    /// Board cleared or ball lost
    Over,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakoutState {
    pub phase: Phase,
    pub input: FrameInput,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
}

impl BreakoutState {
    /// Power-on state: title screen, empty board
    pub fn not_started(display: DisplayInfo) -> Self {
        Self {
            phase: Phase::NotStarted,
            input: FrameInput::at_rest(display),
            paddle: Paddle::new(Vec2::ZERO, Vec2::new(PADDLE_W, PADDLE_H)),
            ball: Ball::new(Vec2::ZERO, Vec2::new(BALL_W, BALL_H), Vec2::ZERO),
            bricks: Vec::new(),
        }
    }

    /// Fresh round: full wall, centred paddle, ball served up and to the right
    pub fn deal(input: FrameInput, rng: &mut dyn RandomSource) -> Self {
        let w = input.display.width as f32;
        let h = input.display.height as f32;

        let vx = BALL_SPEED_BORDER + 0.5 * rng.below(SERVE_STEPS) as f32;
        let vy = -(BALL_SPEED * BALL_SPEED - vx * vx).sqrt();

        Self {
            phase: Phase::Active,
            input,
            paddle: Paddle::new(
                Vec2::new((w - PADDLE_W) / 2.0, h - PADDLE_H),
                Vec2::new(PADDLE_W, PADDLE_H),
            ),
            ball: Ball::new(
                Vec2::new((w - BALL_W) / 2.0, h - PADDLE_H * 2.0 - BALL_W),
                Vec2::new(BALL_W, BALL_H),
                Vec2::new(vx, vy),
            ),
            bricks: brick_wall(input.display.width),
        }
    }

    pub fn is_over(&self) -> bool {
        self.bricks.is_empty() || self.ball.pos.y > self.input.display.height as f32
    }
}

/// Rows of bricks spanning the display width, column by column
pub fn brick_wall(width: u32) -> Vec<Brick> {
    (0..width)
        .step_by(BRICK_W as usize)
        .flat_map(|x| {
            (0..BRICK_ROWS).map(move |row| {
                Brick::new(
                    Vec2::new(x as f32, row as f32 * BRICK_H),
                    Vec2::new(BRICK_W, BRICK_H),
                )
            })
        })
        .collect()
}

/// Advance an active round by one tick
fn play(mut state: BreakoutState) -> BreakoutState {
    let display = state.input.display;
    let arena = Arena {
        width: display.width as f32,
        height: display.height as f32,
        walls: Walls::OPEN_BOTTOM,
    };

    let delta = joystick_to_pixels(state.input.joystick.x);
    state.paddle = state.paddle.slide_horizontal(delta, arena.width);

    let mut ball = reflect_off_wall(advance(state.ball), &arena);

    // Only a falling ball can hit the paddle
    if ball.vel.y > 0.0 && collides(&ball, state.paddle.pos, state.paddle.size) {
        ball = reflect_off_paddle(ball, state.paddle.pos.x, state.paddle.size.x, DEFLECTION);
    }

    let (ball, hit) = resolve_brick_contact(ball, &mut state.bricks, BRICK_BAND, DEFLECTION);
    if let Some(brick) = hit {
        log::debug!(
            "Brick at ({}, {}) cleared, {} left",
            brick.pos.x,
            brick.pos.y,
            state.bricks.len()
        );
    }
    state.ball = ball;

    if state.is_over() {
        log::info!("Breakout over with {} bricks left", state.bricks.len());
        state.phase = Phase::Over;
    }
    state
}

fn splash(width: u32, height: u32) -> impl Iterator<Item = Primitive> {
    (0..width as i32)
        .step_by(20)
        .flat_map(move |x| rectangle(x, 0, 10, height, RectStyle::Filled, true))
        .chain(rectangle(0, 17, width, 30, RectStyle::Filled, false))
        .chain(rectangle(0, 17, width, 30, RectStyle::Outlined, true))
        .chain(text(0, 20, "BREAKOUT", 3, 1))
}

fn brick_shape(brick: Brick) -> impl Iterator<Item = Primitive> {
    body_shape(
        brick.pos + Vec2::splat(BRICK_BORDER),
        brick.size - Vec2::splat(BRICK_BORDER),
    )
}

fn deck(state: &BreakoutState) -> impl Iterator<Item = Primitive> + '_ {
    state
        .bricks
        .iter()
        .copied()
        .flat_map(brick_shape)
        .chain(body_shape(state.paddle.pos, state.paddle.size))
        .chain(body_shape(state.ball.pos, state.ball.size))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Breakout;

impl Game for Breakout {
    type State = BreakoutState;

    fn name(&self) -> &'static str {
        "breakout"
    }

    fn initial_state(&self, display: DisplayInfo) -> BreakoutState {
        BreakoutState::not_started(display)
    }

    fn controller(
        &self,
        mut state: BreakoutState,
        input: FrameInput,
        rng: &mut dyn RandomSource,
    ) -> BreakoutState {
        state.input = input;
        match state.phase {
            Phase::NotStarted | Phase::Over => {
                if input.joystick.clicked {
                    log::info!("Breakout round started");
                    BreakoutState::deal(input, rng)
                } else {
                    state
                }
            }
            Phase::Active => play(state),
        }
    }

    fn view<'a>(&self, state: &'a BreakoutState) -> impl Iterator<Item = Primitive> + 'a {
        let display = state.input.display;
        let title =
            (state.phase == Phase::NotStarted).then(|| splash(display.width, display.height));
        let board = (state.phase != Phase::NotStarted).then(|| deck(state));
        let overlay = (state.phase == Phase::Over).then(|| text(0, 20, "GAMEOVER", 3, 1));

        title
            .into_iter()
            .flatten()
            .chain(board.into_iter().flatten())
            .chain(overlay.into_iter().flatten())
    }
}
