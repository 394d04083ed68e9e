//! Ball motion and collision response
//!
//! Every function takes the ball by value and returns the updated ball; the
//! only collection touched is the brick list handed to
//! [`resolve_brick_contact`]. Deflections keep the ball at its configured speed:
//! they pick a new direction and rebuild the velocity at exactly that length.
//! Between deflections velocity is never renormalized.

use glam::Vec2;

use super::body::{Ball, Brick, Paddle};

/// Which edges of the arena bounce the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Walls {
    /// Brick game: the ball escapes through the bottom
    pub const OPEN_BOTTOM: Walls = Walls {
        left: true,
        right: true,
        top: true,
        bottom: false,
    };

    /// Two-paddle game: the ball escapes through either side
    pub const OPEN_SIDES: Walls = Walls {
        left: false,
        right: false,
        top: true,
        bottom: true,
    };
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub walls: Walls,
}

/// Contact-position deflection for horizontal paddles and bricks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflection {
    /// Ball speed restored by every bounce
    pub speed: f32,
    /// Minimum |vx| after a bounce so the ball never travels straight up
    pub border: f32,
}

/// Angle-capped deflection for vertical paddles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngledDeflection {
    pub speed: f32,
    /// Largest angle from the horizontal, in radians
    pub max_angle: f32,
}

/// Move the ball one tick along its velocity
///
/// Single first-order step: a fast ball can skip over an obstacle thinner
/// than its per-tick travel.
#[inline]
pub fn advance(ball: Ball) -> Ball {
    Ball {
        pos: ball.pos + ball.vel,
        ..ball
    }
}

/// Flip the velocity component that points into a wall the ball has reached
pub fn reflect_off_wall(ball: Ball, arena: &Arena) -> Ball {
    let Ball { pos, size, mut vel } = ball;
    let walls = arena.walls;

    if (walls.left && pos.x <= 0.0 && vel.x < 0.0)
        || (walls.right && pos.x + size.x >= arena.width && vel.x > 0.0)
    {
        vel.x = -vel.x;
    }
    if (walls.top && pos.y <= 0.0 && vel.y < 0.0)
        || (walls.bottom && pos.y + size.y >= arena.height && vel.y > 0.0)
    {
        vel.y = -vel.y;
    }

    Ball { pos, size, vel }
}

/// Corner test: is the ball's top-left corner strictly inside the target
/// rectangle grown by the ball's size on its near (top and left) edges?
///
/// Only the ball's corner is tested, never its far edges, and touching edges
/// do not count. Combined with single-step motion the outcome depends on
/// where the corner lands each tick, so a ball can clip a corner or pass a
/// thin target without contact.
pub fn collides(ball: &Ball, target_pos: Vec2, target_size: Vec2) -> bool {
    target_pos.x - ball.size.x < ball.pos.x
        && ball.pos.x < target_pos.x + target_size.x
        && target_pos.y - ball.size.y < ball.pos.y
        && ball.pos.y < target_pos.y + target_size.y
}

/// Bounce off a horizontal surface spanning `[x, x + w]`
///
/// Contact near the right end pushes the ball left, near the left end pushes
/// it right. The vertical direction always reverses.
pub fn reflect_off_paddle(ball: Ball, x: f32, w: f32, deflection: Deflection) -> Ball {
    let Deflection { speed, border } = deflection;
    debug_assert!(speed > border, "border {} must be below speed {}", border, speed);

    let contact = (x + w - ball.pos.x) / w;
    let vx = (ball.vel.x + speed * (0.5 - contact)).clamp(border - speed, speed - border);
    let vy = (speed * speed - vx * vx).max(0.0).sqrt();
    let vy = if ball.vel.y > 0.0 { -vy } else { vy };

    Ball {
        vel: Vec2::new(vx, vy),
        ..ball
    }
}

/// Bounce off a vertical paddle
///
/// The outgoing angle grows with the distance between ball centre and paddle
/// centre and never exceeds `max_angle`. Horizontal travel reverses.
pub fn reflect_off_paddle_vertical(
    ball: Ball,
    paddle: &Paddle,
    deflection: AngledDeflection,
) -> Ball {
    let AngledDeflection { speed, max_angle } = deflection;

    let reach = (paddle.size.y + ball.size.y) / 2.0;
    let offset = ball.center().y - paddle.center().y;
    let angle = (offset / reach).clamp(-1.0, 1.0) * max_angle;
    let direction = if ball.vel.x > 0.0 { -1.0 } else { 1.0 };

    Ball {
        vel: Vec2::new(direction * speed * angle.cos(), speed * angle.sin()),
        ..ball
    }
}

/// Deflect off and remove the first brick the ball touches
///
/// Bricks are only scanned while the ball is within the brick band
/// (`pos.y <= band_bottom`). At most one brick is removed per call; it is
/// returned so callers can react to it.
pub fn resolve_brick_contact(
    ball: Ball,
    bricks: &mut Vec<Brick>,
    band_bottom: f32,
    deflection: Deflection,
) -> (Ball, Option<Brick>) {
    if ball.pos.y > band_bottom {
        return (ball, None);
    }

    match bricks.iter().position(|b| collides(&ball, b.pos, b.size)) {
        Some(index) => {
            let brick = bricks.remove(index);
            let ball = reflect_off_paddle(ball, brick.pos.x, brick.size.x, deflection);
            (ball, Some(brick))
        }
        None => (ball, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFLECT: Deflection = Deflection {
        speed: 6.0,
        border: 0.5,
    };

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(3.0, 3.0), Vec2::new(vx, vy))
    }

    fn arena() -> Arena {
        Arena {
            width: 128.0,
            height: 64.0,
            walls: Walls::OPEN_BOTTOM,
        }
    }

    #[test]
    fn test_advance_single_step() {
        let b = advance(ball_at(10.0, 10.0, 3.0, -4.0));
        assert_eq!(b.pos, Vec2::new(13.0, 6.0));
        assert_eq!(b.vel, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_wall_left_and_top() {
        let b = reflect_off_wall(ball_at(-1.0, -2.0, -3.0, -4.0), &arena());
        assert_eq!(b.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_wall_right_uses_ball_edge() {
        let b = reflect_off_wall(ball_at(125.5, 30.0, 3.0, 1.0), &arena());
        assert_eq!(b.vel, Vec2::new(-3.0, 1.0));
        let b = reflect_off_wall(ball_at(124.0, 30.0, 3.0, 1.0), &arena());
        assert_eq!(b.vel, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_wall_only_flips_when_heading_in() {
        // Already moving away from the left wall: leave it alone
        let b = reflect_off_wall(ball_at(-1.0, 30.0, 2.0, 1.0), &arena());
        assert_eq!(b.vel, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_open_bottom_lets_ball_through() {
        let b = reflect_off_wall(ball_at(50.0, 70.0, 1.0, 5.0), &arena());
        assert_eq!(b.vel, Vec2::new(1.0, 5.0));

        let closed = Arena {
            walls: Walls::OPEN_SIDES,
            ..arena()
        };
        let b = reflect_off_wall(ball_at(50.0, 62.0, 1.0, 5.0), &closed);
        assert_eq!(b.vel, Vec2::new(1.0, -5.0));
        let b = reflect_off_wall(ball_at(-5.0, 30.0, -1.0, 5.0), &closed);
        assert_eq!(b.vel.x, -1.0);
    }

    #[test]
    fn test_collides_corner_test() {
        let target = Vec2::new(56.0, 60.0);
        let size = Vec2::new(16.0, 4.0);
        assert!(collides(&ball_at(60.0, 58.0, 0.0, 0.0), target, size));
        // Strict inequalities on both bounds
        assert!(!collides(&ball_at(53.0, 58.0, 0.0, 0.0), target, size));
        assert!(!collides(&ball_at(72.0, 58.0, 0.0, 0.0), target, size));
        assert!(!collides(&ball_at(60.0, 64.0, 0.0, 0.0), target, size));
    }

    #[test]
    fn test_collides_touching_edges_miss() {
        let target = Vec2::new(10.0, 10.0);
        let size = Vec2::new(10.0, 10.0);
        // Ball box [7, 10] only touches the target's left edge
        assert!(!collides(&ball_at(7.0, 12.0, 0.0, 0.0), target, size));
        assert!(collides(&ball_at(7.5, 12.0, 0.0, 0.0), target, size));
        assert!(!collides(&ball_at(20.0, 12.0, 0.0, 0.0), target, size));
        assert!(collides(&ball_at(19.5, 12.0, 0.0, 0.0), target, size));
    }

    #[test]
    fn test_fast_ball_skips_thin_target() {
        // One tick carries the corner from above the paddle to below it
        let paddle_pos = Vec2::new(56.0, 60.0);
        let paddle_size = Vec2::new(16.0, 4.0);
        let before = ball_at(60.0, 56.0, 0.0, 9.0);
        let after = advance(before);
        assert!(!collides(&before, paddle_pos, paddle_size));
        assert!(!collides(&after, paddle_pos, paddle_size));
    }

    #[test]
    fn test_paddle_centre_hit_keeps_vx() {
        // Ball corner exactly at the paddle midpoint
        let b = reflect_off_paddle(ball_at(64.0, 58.0, 2.0, 4.0), 56.0, 16.0, DEFLECT);
        assert!((b.vel.x - 2.0).abs() < 1e-5);
        assert!(b.vel.y < 0.0);
        assert!((b.speed() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_edges_steer() {
        let left = reflect_off_paddle(ball_at(54.0, 58.0, 0.0, 6.0), 56.0, 16.0, DEFLECT);
        let right = reflect_off_paddle(ball_at(71.0, 58.0, 0.0, 6.0), 56.0, 16.0, DEFLECT);
        assert!(left.vel.x < 0.0);
        assert!(right.vel.x > 0.0);
    }

    #[test]
    fn test_paddle_clamp_keeps_sideways_floor() {
        let b = reflect_off_paddle(ball_at(90.0, 58.0, 5.9, 1.0), 56.0, 16.0, DEFLECT);
        assert!((b.vel.x - 5.5).abs() < 1e-5);
        assert!(b.vel.y < 0.0);
        assert!((b.speed() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_upward_ball_is_sent_down() {
        let b = reflect_off_paddle(ball_at(64.0, 10.0, 1.0, -5.0), 56.0, 16.0, DEFLECT);
        assert!(b.vel.y > 0.0);
    }

    #[test]
    fn test_vertical_paddle_centre_is_flat() {
        let paddle = Paddle::new(Vec2::new(3.0, 20.0), Vec2::new(3.0, 15.0));
        let ball = Ball::new(Vec2::new(5.0, 25.0), Vec2::new(5.0, 5.0), Vec2::new(-4.0, 1.0));
        let d = AngledDeflection {
            speed: 4.0,
            max_angle: 60f32.to_radians(),
        };
        let b = reflect_off_paddle_vertical(ball, &paddle, d);
        assert!((b.vel.x - 4.0).abs() < 1e-5);
        assert!(b.vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_vertical_paddle_angle_is_capped() {
        let paddle = Paddle::new(Vec2::new(120.0, 20.0), Vec2::new(3.0, 15.0));
        let ball = Ball::new(Vec2::new(118.0, 60.0), Vec2::new(5.0, 5.0), Vec2::new(4.0, 0.0));
        let max_angle = 60f32.to_radians();
        let d = AngledDeflection {
            speed: 4.0,
            max_angle,
        };
        let b = reflect_off_paddle_vertical(ball, &paddle, d);
        assert!(b.vel.x < 0.0);
        assert!(b.vel.y > 0.0);
        let angle = (b.vel.y / b.vel.x.abs()).atan();
        assert!((angle - max_angle).abs() < 1e-4);
    }

    #[test]
    fn test_brick_band_early_exit() {
        let mut bricks = vec![Brick::new(Vec2::new(48.0, 12.0), Vec2::new(12.0, 6.0))];
        let ball = ball_at(50.0, 15.0, 3.0, -5.196);
        let (out, hit) = resolve_brick_contact(ball, &mut bricks, 10.0, DEFLECT);
        assert!(hit.is_none());
        assert_eq!(out, ball);
        assert_eq!(bricks.len(), 1);
    }

    #[test]
    fn test_brick_first_hit_only() {
        let mut bricks = vec![
            Brick::new(Vec2::new(48.0, 6.0), Vec2::new(12.0, 6.0)),
            Brick::new(Vec2::new(48.0, 12.0), Vec2::new(12.0, 6.0)),
        ];
        let ball = ball_at(53.0, 11.0, 3.0, -5.196);
        let (out, hit) = resolve_brick_contact(ball, &mut bricks, 18.0, DEFLECT);
        assert_eq!(hit.map(|b| b.pos), Some(Vec2::new(48.0, 6.0)));
        assert_eq!(bricks.len(), 1);
        assert_eq!(bricks[0].pos, Vec2::new(48.0, 12.0));
        assert!(out.vel.y > 0.0);
    }
}
