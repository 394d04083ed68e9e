//! Moving bodies: ball, paddles, bricks
//!
//! Positions are sub-pixel `f32` and are only truncated when a view turns them
//! into primitives.

use glam::Vec2;

/// The ball, the only body with a velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A player- or computer-controlled paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move along the x axis within `[0, track_len - width]`
    pub fn slide_horizontal(self, delta: f32, track_len: f32) -> Self {
        let x = slide_along_track(self.pos.x, delta, track_len, self.size.x);
        Self {
            pos: Vec2::new(x, self.pos.y),
            ..self
        }
    }

    /// Move along the y axis within `[0, track_len - height]`
    pub fn slide_vertical(self, delta: f32, track_len: f32) -> Self {
        let y = slide_along_track(self.pos.y, delta, track_len, self.size.y);
        Self {
            pos: Vec2::new(self.pos.x, y),
            ..self
        }
    }
}

/// A destructible brick; it exists until the ball touches it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }
}

/// Offset a paddle coordinate and clamp it so the paddle stays on its track
///
/// A non-finite delta is ignored. Panics if the paddle does not fit.
pub fn slide_along_track(pos: f32, delta: f32, track_len: f32, paddle_len: f32) -> f32 {
    assert!(
        track_len >= paddle_len,
        "paddle of length {} does not fit a track of {}",
        paddle_len,
        track_len
    );
    let delta = if delta.is_finite() { delta } else { 0.0 };
    (pos + delta).clamp(0.0, track_len - paddle_len)
}
