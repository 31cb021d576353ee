//! Recording surface for tests and the native demo

use std::collections::HashSet;

use glam::Vec2;

use super::{Color, Surface, TextAlign, Viewport};
use crate::sim::Rect;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Resize(u32, u32),
    BeginFrame,
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Scale(f32, f32),
    Alpha(f32),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color),
    RoundRect(Rect, Color),
    Circle(Vec2, f32, Color),
    Ellipse(Vec2, Vec2, Color),
    Line(Vec2, Vec2, Color),
    Text(String, Vec2, TextAlign),
    Image(String, Rect),
    Vignette,
}

/// Records the calls of the current frame (`begin_frame` starts a new
/// list). Images listed in `ready_images` draw; all others report "not loaded".
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
    pub ready_images: HashSet<String>,
    pub frames: u32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&mut self, src: &str) {
        self.ready_images.insert(src.to_string());
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn in the current frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(s, _, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.backing_size();
        self.commands.push(DrawCmd::Resize(w, h));
    }

    fn begin_frame(&mut self, _viewport: &Viewport) {
        self.frames += 1;
        self.commands.clear();
        self.commands.push(DrawCmd::BeginFrame);
    }

    fn save(&mut self) {
        self.commands.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCmd::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCmd::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCmd::Rotate(radians));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCmd::Scale(sx, sy));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCmd::Alpha(alpha));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _width: f32) {
        self.commands.push(DrawCmd::StrokeRect(rect, color));
    }

    fn fill_round_rect(&mut self, rect: Rect, _radius: f32, color: Color) {
        self.commands.push(DrawCmd::RoundRect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCmd::Circle(center, radius, color));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.commands.push(DrawCmd::Ellipse(center, radii, color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, _width: f32) {
        self.commands.push(DrawCmd::Line(from, to, color));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, _font: &str, _color: Color, align: TextAlign) {
        self.commands.push(DrawCmd::Text(text.to_string(), pos, align));
    }

    fn draw_image(&mut self, src: &str, rect: Rect) -> bool {
        if !self.ready_images.contains(src) {
            return false;
        }
        self.commands.push(DrawCmd::Image(src.to_string(), rect));
        true
    }

    fn vignette(&mut self, _width: f32, _height: f32, _strength: f32) {
        self.commands.push(DrawCmd::Vignette);
    }
}
