//! Canvas-style 2D rendering
//!
//! The scene pipeline only talks to a [`Surface`]: a small set of immediate
//! mode drawing primitives. The browser backend wraps a
//! `CanvasRenderingContext2d`; tests and the native demo use the
//! [`RecordingSurface`], which just records the calls.

pub mod camera;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod headless;
pub mod scene;

use glam::Vec2;

use crate::sim::Rect;

pub use camera::Camera;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use headless::{DrawCmd, RecordingSurface};
pub use scene::{SceneParams, draw_scene};

/// RGBA color, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string accepted by canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// Confetti colors, indexed by `ConfettiParticle::color`
pub const CONFETTI_PALETTE: [Color; 5] = [
    Color::rgb(0xff, 0x4d, 0x4d),
    Color::rgb(0xff, 0xd1, 0x66),
    Color::rgb(0x06, 0xd6, 0xa0),
    Color::rgb(0x11, 0x8a, 0xb2),
    Color::rgb(0xc7, 0x7d, 0xff),
];

pub fn palette_color(index: u8) -> Color {
    CONFETTI_PALETTE[index as usize % CONFETTI_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// CSS-pixel viewport plus the device pixel ratio of the backing buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Backing buffer size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round().max(1.0) as u32,
            (self.height * self.dpr).round().max(1.0) as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
            dpr: 1.0,
        }
    }
}

/// Drawing capability the scene renders through.
///
/// Coordinates are CSS pixels after `begin_frame`; transforms stack with
/// `save`/`restore` the way canvas 2D does.
pub trait Surface {
    /// Resize the backing buffer
    fn resize(&mut self, viewport: &Viewport);
    /// Reset the transform to the DPR scale and clear alpha
    fn begin_frame(&mut self, viewport: &Viewport);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color, align: TextAlign);

    /// Draw the image at `src` into `rect`. Returns false (drawing nothing)
    /// while the image is not loaded yet, so the caller can draw a fallback.
    fn draw_image(&mut self, src: &str, rect: Rect) -> bool;

    /// Radial darkening toward the corners of a `width` x `height` screen
    fn vignette(&mut self, width: f32, height: f32, strength: f32);
}
