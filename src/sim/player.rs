//! Player controller
//!
//! Held keys -> normalized direction -> velocity -> axis-separated move ->
//! clamp into the floor -> footstep cadence.

use glam::Vec2;

use super::collision::slide_move;
use super::geometry::{Rect, normalize_or_keep};
use super::input::{Direction, InputState};
use super::map::MapDef;
use crate::clamp;
use crate::tuning::Tuning;

/// Horizontal facing, used to mirror the sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Recomputed from input every tick, never integrated
    pub vel: Vec2,
    /// Collision box half-extents
    pub half: Vec2,
    pub facing: Facing,
    step_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2, half: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half,
            facing: Facing::Right,
            step_timer: 0.0,
        }
    }

    /// Teleport (map change, retreat, restored save). Keeps facing.
    pub fn set_spawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.step_timer = 0.0;
    }

    pub fn aabb(&self) -> Rect {
        Rect::centered(self.pos, self.half)
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    /// Movement direction from held keys: zero or unit length
    pub fn input_direction(input: &InputState) -> Vec2 {
        let axis = |pos: Direction, neg: Direction| {
            (input.direction_held(pos) as i32 - input.direction_held(neg) as i32) as f32
        };
        let dir = Vec2::new(
            axis(Direction::Right, Direction::Left),
            axis(Direction::Down, Direction::Up),
        );
        normalize_or_keep(dir)
    }

    /// Legal range for the player's center on `map`
    pub fn bounds(&self, map: &MapDef, inset: f32) -> (Vec2, Vec2) {
        let floor = map.floor();
        let min = Vec2::new(self.half.x, floor.y + self.half.y + inset);
        let max = Vec2::new(
            map.width - self.half.x,
            floor.bottom() - self.half.y - inset,
        );
        (min, max)
    }

    pub fn clamp_into(&mut self, map: &MapDef, inset: f32) {
        let (min, max) = self.bounds(map, inset);
        self.pos.x = clamp(self.pos.x, min.x, max.x);
        self.pos.y = clamp(self.pos.y, min.y, max.y);
    }

    /// Advance one fixed tick. Returns true when a footstep should sound.
    pub fn update(&mut self, dt: f32, input: &InputState, map: &MapDef, tuning: &Tuning) -> bool {
        let dir = Self::input_direction(input);
        if dir.x < 0.0 {
            self.facing = Facing::Left;
        } else if dir.x > 0.0 {
            self.facing = Facing::Right;
        }

        self.vel = dir * tuning.player_speed;
        self.pos = slide_move(self.pos, self.half, self.vel * dt, &map.obstacles);
        self.clamp_into(map, tuning.bounds_inset);

        if !self.is_moving() {
            self.step_timer = 0.0;
            return false;
        }

        self.step_timer -= dt;
        if self.step_timer <= 0.0 {
            self.step_timer = tuning.step_interval;
            return true;
        }
        false
    }
}
