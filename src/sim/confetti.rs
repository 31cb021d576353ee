//! Confetti bursts for level-clear feedback
//!
//! Particles live in an arena; `active` and `free` hold indices into it, so
//! bursts after warm-up never allocate.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Downward acceleration (world units/s^2)
const GRAVITY: f32 = 520.0;
/// Number of palette entries particles pick from
pub const PALETTE_LEN: u8 = 5;

#[derive(Debug, Clone, Default)]
pub struct ConfettiParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub rot: f32,
    pub spin: f32,
    /// Seconds alive
    pub life: f32,
    pub life_max: f32,
    pub size: f32,
    /// Palette index, resolved to a color by the renderer
    pub color: u8,
    pub active: bool,
}

impl ConfettiParticle {
    /// 1.0 when fresh, 0.0 when expired
    pub fn opacity(&self) -> f32 {
        if self.life_max <= 0.0 {
            return 0.0;
        }
        (1.0 - self.life / self.life_max).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ConfettiSystem {
    particles: Vec<ConfettiParticle>,
    active: Vec<usize>,
    free: Vec<usize>,
    rng: Pcg32,
}

impl ConfettiSystem {
    pub fn new(prewarm: usize, seed: u64) -> Self {
        Self {
            particles: vec![ConfettiParticle::default(); prewarm],
            active: Vec::with_capacity(prewarm),
            free: (0..prewarm).rev().collect(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Take a particle slot, growing the arena only when nothing is free
    fn acquire(&mut self) -> usize {
        self.free.pop().unwrap_or_else(|| {
            self.particles.push(ConfettiParticle::default());
            self.particles.len() - 1
        })
    }

    /// Spawn `count` particles at (x, y), thrown mostly upward
    pub fn burst(&mut self, x: f32, y: f32, count: u32) {
        for _ in 0..count {
            let idx = self.acquire();
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 80.0 + self.rng.random::<f32>() * 220.0;
            let p = ConfettiParticle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed - 120.0,
                rot: self.rng.random::<f32>() * std::f32::consts::TAU,
                spin: (self.rng.random::<f32>() - 0.5) * 10.0,
                life: 0.0,
                life_max: 0.8 + self.rng.random::<f32>(),
                size: 3.0 + self.rng.random::<f32>() * 5.0,
                color: self.rng.random_range(0..PALETTE_LEN),
                active: true,
            };
            self.particles[idx] = p;
            self.active.push(idx);
        }
    }

    pub fn update(&mut self, dt: f32) {
        let drag = (1.0 - 0.8 * dt).clamp(0.85, 1.0);
        let mut i = self.active.len();
        while i > 0 {
            i -= 1;
            let idx = self.active[i];
            let p = &mut self.particles[idx];
            p.life += dt;
            if p.life >= p.life_max {
                p.active = false;
                self.active.swap_remove(i);
                self.free.push(idx);
                continue;
            }
            p.vy += GRAVITY * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.rot += p.spin * dt;
            p.vx *= drag;
        }
    }

    /// Return every live particle to the pool
    pub fn clear(&mut self) {
        for idx in self.active.drain(..) {
            self.particles[idx].active = false;
            self.free.push(idx);
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &ConfettiParticle> {
        self.active.iter().map(|&i| &self.particles[i])
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total particles ever allocated
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }
}
