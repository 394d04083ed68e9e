//! Two-paddle game against the computer
//!
//! The player's paddle runs along the left edge on the joystick's vertical
//! axis; the computer's paddle on the right chases the ball at a limited
//! speed. Top and bottom walls bounce, the sides do not: the ball leaving on
//! the left loses the round, on the right wins it.

use glam::Vec2;

use super::body_shape;
use crate::engine::{DisplayInfo, FrameInput, Game};
use crate::joystick_to_pixels;
use crate::platform::RandomSource;
use crate::renderer::{Primitive, RectStyle, point, rectangle, text};
use crate::sim::{
    AngledDeflection, Arena, Ball, Paddle, Walls, advance, collides, reflect_off_paddle_vertical,
    reflect_off_wall,
};

pub const PADDLE_W: f32 = 3.0;
pub const PADDLE_H: f32 = 15.0;
/// Gap between each paddle and its side of the screen
pub const PADDLE_MARGIN: f32 = 3.0;

pub const BALL_SIZE: f32 = 5.0;
pub const BALL_SPEED: f32 = 4.0;
/// Steepest bounce off a paddle, degrees from horizontal
pub const MAX_BOUNCE_DEG: f32 = 60.0;
/// Steepest serve, degrees either side of horizontal
pub const MAX_SERVE_DEG: u32 = 45;

/// Most the computer paddle moves in one tick
pub const OPPONENT_STEP: f32 = 2.0;

/// Spacing of the dotted centre line
const NET_GAP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Active,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PongState {
    pub phase: Phase,
    pub input: FrameInput,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
}

fn deflection() -> AngledDeflection {
    AngledDeflection {
        speed: BALL_SPEED,
        max_angle: MAX_BOUNCE_DEG.to_radians(),
    }
}

impl PongState {
    pub fn not_started(display: DisplayInfo) -> Self {
        let paddle = Paddle::new(Vec2::ZERO, Vec2::new(PADDLE_W, PADDLE_H));
        Self {
            phase: Phase::NotStarted,
            input: FrameInput::at_rest(display),
            player: paddle,
            opponent: paddle,
            ball: Ball::new(Vec2::ZERO, Vec2::splat(BALL_SIZE), Vec2::ZERO),
        }
    }

    /// Fresh round: paddles centred, ball served from mid-court towards the
    /// computer at a random angle
    pub fn deal(input: FrameInput, rng: &mut dyn RandomSource) -> Self {
        let w = input.display.width as f32;
        let h = input.display.height as f32;
        let paddle_y = (h - PADDLE_H) / 2.0;

        let degrees = rng.below(2 * MAX_SERVE_DEG + 1) as f32 - MAX_SERVE_DEG as f32;
        let angle = degrees.to_radians();

        Self {
            phase: Phase::Active,
            input,
            player: Paddle::new(
                Vec2::new(PADDLE_MARGIN, paddle_y),
                Vec2::new(PADDLE_W, PADDLE_H),
            ),
            opponent: Paddle::new(
                Vec2::new(w - PADDLE_MARGIN - PADDLE_W, paddle_y),
                Vec2::new(PADDLE_W, PADDLE_H),
            ),
            ball: Ball::new(
                Vec2::new((w - BALL_SIZE) / 2.0, (h - BALL_SIZE) / 2.0),
                Vec2::splat(BALL_SIZE),
                Vec2::new(angle.cos(), angle.sin()) * BALL_SPEED,
            ),
        }
    }
}

/// Phase implied by the ball's horizontal position
pub fn judge(ball: &Ball, display: DisplayInfo) -> Phase {
    if ball.pos.x < 0.0 {
        Phase::Lost
    } else if ball.pos.x > display.width as f32 {
        Phase::Won
    } else {
        Phase::Active
    }
}

/// Move the computer paddle towards the ball's centre, at most one step
fn chase(paddle: Paddle, ball: &Ball, track_len: f32) -> Paddle {
    let gap = ball.center().y - paddle.center().y;
    paddle.slide_vertical(gap.clamp(-OPPONENT_STEP, OPPONENT_STEP), track_len)
}

fn play(mut state: PongState) -> PongState {
    let display = state.input.display;
    let arena = Arena {
        width: display.width as f32,
        height: display.height as f32,
        walls: Walls::OPEN_SIDES,
    };

    let delta = joystick_to_pixels(state.input.joystick.y);
    state.player = state.player.slide_vertical(delta, arena.height);
    state.opponent = chase(state.opponent, &state.ball, arena.height);

    let mut ball = reflect_off_wall(advance(state.ball), &arena);
    let paddle = if ball.vel.x < 0.0 {
        &state.player
    } else {
        &state.opponent
    };
    if collides(&ball, paddle.pos, paddle.size) {
        ball = reflect_off_paddle_vertical(ball, paddle, deflection());
    }
    state.ball = ball;

    state.phase = judge(&state.ball, display);
    match state.phase {
        Phase::Won => log::info!("Pong round won"),
        Phase::Lost => log::info!("Pong round lost"),
        _ => {}
    }
    state
}

fn net(width: u32, height: u32) -> impl Iterator<Item = Primitive> {
    let x = (width / 2) as i32;
    (0..height as i32)
        .step_by(NET_GAP)
        .flat_map(move |y| point(x, y, true))
}

fn splash(width: u32, height: u32) -> impl Iterator<Item = Primitive> {
    rectangle(0, 0, width, height, RectStyle::Outlined, true)
        .chain(net(width, height))
        .chain(rectangle(1, 17, width.saturating_sub(2), 30, RectStyle::Filled, false))
        .chain(text(16, 20, "PONG", 3, 1))
}

fn court(state: &PongState) -> impl Iterator<Item = Primitive> + '_ {
    let display = state.input.display;
    net(display.width, display.height)
        .chain(body_shape(state.player.pos, state.player.size))
        .chain(body_shape(state.opponent.pos, state.opponent.size))
        .chain(body_shape(state.ball.pos, state.ball.size))
}

fn banner(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Won => Some("YOU WIN"),
        Phase::Lost => Some("YOU LOSE"),
        Phase::NotStarted | Phase::Active => None,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pong;

impl Game for Pong {
    type State = PongState;

    fn name(&self) -> &'static str {
        "pong"
    }

    fn initial_state(&self, display: DisplayInfo) -> PongState {
        PongState::not_started(display)
    }

    fn controller(
        &self,
        mut state: PongState,
        input: FrameInput,
        rng: &mut dyn RandomSource,
    ) -> PongState {
        state.input = input;
        match state.phase {
            Phase::Active => play(state),
            Phase::NotStarted | Phase::Won | Phase::Lost => {
                if input.joystick.clicked {
                    log::info!("Pong round started");
                    PongState::deal(input, rng)
                } else {
                    state
                }
            }
        }
    }

    fn view<'a>(&self, state: &'a PongState) -> impl Iterator<Item = Primitive> + 'a {
        let display = state.input.display;
        let title =
            (state.phase == Phase::NotStarted).then(|| splash(display.width, display.height));
        let field = (state.phase != Phase::NotStarted).then(|| court(state));
        let overlay = banner(state.phase).map(|label| text(8, 20, label, 2, 1));

        title
            .into_iter()
            .flatten()
            .chain(field.into_iter().flatten())
            .chain(overlay.into_iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{JoystickState, PcgRandom};

    fn display() -> DisplayInfo {
        DisplayInfo::new(128, 64)
    }

    fn input(y: f32, clicked: bool) -> FrameInput {
        FrameInput::new(display(), JoystickState { x: 0.0, y, clicked })
    }

    fn active() -> PongState {
        PongState::deal(input(0.0, true), &mut PcgRandom::seeded(5))
    }

    #[test]
    fn test_deal_layout() {
        let state = active();
        assert_eq!(state.player.pos, Vec2::new(3.0, 24.5));
        assert_eq!(state.opponent.pos, Vec2::new(122.0, 24.5));
        assert_eq!(state.ball.pos, Vec2::new(61.5, 29.5));
        assert!(state.ball.vel.x > 0.0);
        assert!((state.ball.speed() - BALL_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_serve_angle_within_limit() {
        let mut rng = PcgRandom::seeded(9);
        let limit = (MAX_SERVE_DEG as f32).to_radians() + 1e-4;
        for _ in 0..100 {
            let state = PongState::deal(input(0.0, true), &mut rng);
            let angle = state.ball.vel.y.atan2(state.ball.vel.x);
            assert!(angle.abs() <= limit);
        }
    }

    #[test]
    fn test_opponent_step_is_bounded() {
        let mut rng = PcgRandom::seeded(1);
        let mut state = active();
        state.opponent.pos.y = 0.0;
        state.ball.pos = Vec2::new(60.0, 55.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, 0.0);
        let state = Pong.controller(state, input(0.0, false), &mut rng);
        assert_eq!(state.opponent.pos.y, OPPONENT_STEP);
    }

    #[test]
    fn test_opponent_settles_on_ball() {
        let paddle = Paddle::new(Vec2::new(122.0, 20.0), Vec2::new(PADDLE_W, PADDLE_H));
        let ball = Ball::new(Vec2::new(60.0, 26.0), Vec2::splat(BALL_SIZE), Vec2::ZERO);
        // Centres are 1 px apart
        let moved = chase(paddle, &ball, 64.0);
        assert_eq!(moved.pos.y, 21.0);
    }

    #[test]
    fn test_player_follows_vertical_axis() {
        let mut rng = PcgRandom::seeded(1);
        let state = Pong.controller(active(), input(-55.0, false), &mut rng);
        assert_eq!(state.player.pos.y, 19.5);
        let state = Pong.controller(state, input(900.0, false), &mut rng);
        assert_eq!(state.player.pos.y, 64.0 - PADDLE_H);
    }

    #[test]
    fn test_player_paddle_returns_ball() {
        let mut rng = PcgRandom::seeded(1);
        let mut state = active();
        state.ball.pos = Vec2::new(9.0, 30.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, 0.0);
        let state = Pong.controller(state, input(0.0, false), &mut rng);
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.phase, Phase::Active);
    }

    #[test]
    fn test_judge_boundaries() {
        let narrow = DisplayInfo::new(127, 64);
        let ball = |x| Ball::new(Vec2::new(x, 30.0), Vec2::splat(BALL_SIZE), Vec2::ZERO);
        assert_eq!(judge(&ball(-1.0), narrow), Phase::Lost);
        assert_eq!(judge(&ball(128.0), narrow), Phase::Won);
        assert_eq!(judge(&ball(64.0), narrow), Phase::Active);
    }

    #[test]
    fn test_missed_ball_loses() {
        let mut rng = PcgRandom::seeded(1);
        let mut state = active();
        state.player.pos.y = 0.0;
        state.ball.pos = Vec2::new(2.0, 50.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, 0.0);
        let state = Pong.controller(state, input(0.0, false), &mut rng);
        assert_eq!(state.phase, Phase::Lost);
    }

    #[test]
    fn test_result_banner() {
        let mut state = active();
        state.phase = Phase::Won;
        let labels: Vec<_> = Pong
            .view(&state)
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["YOU WIN".to_string()]);
    }

    #[test]
    fn test_terminal_waits_for_click() {
        let mut rng = PcgRandom::seeded(1);
        let mut state = active();
        state.phase = Phase::Lost;
        let state = Pong.controller(state, input(0.0, false), &mut rng);
        assert_eq!(state.phase, Phase::Lost);
        let state = Pong.controller(state, input(0.0, true), &mut rng);
        assert_eq!(state.phase, Phase::Active);
    }
}
