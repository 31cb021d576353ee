//! Browser backend: Canvas 2D

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Surface, TextAlign, Viewport};
use crate::GameError;
use crate::sim::Rect;

/// Canvas 2D surface with a lazily filled image cache
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    /// Fails when the canvas won't hand out a 2D context
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, GameError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(GameError::MissingContext)?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    /// Start loading `src` on first use; ready once decoded with a real size
    fn image(&mut self, src: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(src) {
            let img = HtmlImageElement::new().ok()?;
            img.set_src(src);
            self.images.insert(src.to_string(), img);
        }
        self.images
            .get(src)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    fn round_rect_path(&self, r: Rect, radius: f32) {
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);
        let rad = (radius as f64).min(w * 0.5).min(h * 0.5).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + rad, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, rad);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, rad);
        let _ = ctx.arc_to(x, y + h, x, y, rad);
        let _ = ctx.arc_to(x, y, x + w, y, rad);
        ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
    }

    fn begin_frame(&mut self, viewport: &Viewport) {
        let dpr = viewport.dpr as f64;
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        let _ = self.ctx.scale(sx as f64, sy as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.round_rect_path(rect, radius);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x.max(0.0) as f64,
            radii.y.max(0.0) as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color, align: TextAlign) {
        self.ctx.set_font(font);
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline("alphabetic");
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    fn draw_image(&mut self, src: &str, rect: Rect) -> bool {
        let Some(img) = self.image(src).cloned() else {
            return false;
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &img,
                rect.x as f64,
                rect.y as f64,
                rect.w as f64,
                rect.h as f64,
            )
            .is_ok()
    }

    fn vignette(&mut self, width: f32, height: f32, strength: f32) {
        let (w, h) = (width as f64, height as f64);
        let (cx, cy) = (w * 0.5, h * 0.5);
        let inner = w.min(h) * 0.35;
        let outer = (cx * cx + cy * cy).sqrt();
        let Ok(gradient) = self.ctx.create_radial_gradient(cx, cy, inner, cx, cy, outer) else {
            return;
        };
        let edge = Color::rgba(0, 0, 0, strength.clamp(0.0, 1.0)).to_css();
        let _ = gradient.add_color_stop(0.0, "rgba(0,0,0,0)");
        let _ = gradient.add_color_stop(1.0, &edge);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }
}
