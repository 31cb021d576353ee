//! Per-frame scene pipeline
//!
//! Draw order: backdrop, world (walls and floor, wall frames, interactables,
//! player, confetti) under the camera transform, then vignette and HUD in
//! screen space.

use glam::Vec2;

use super::camera::Camera;
use super::{Color, Surface, TextAlign, Viewport, palette_color};
use crate::consts::TILE;
use crate::sim::{Facing, InteractKind, Interactable, MapDef, Rect, Session};

/// Player sprite; drawn procedurally until it loads
pub const PLAYER_SPRITE: &str = "/assets/player.png";

/// Radians per second of the nearest-object pulse
const PULSE_RATE: f32 = 6.0;

const BACKDROP: Color = Color::rgb(0x14, 0x12, 0x10);
const WALL: Color = Color::rgb(0x5a, 0x3e, 0x2b);
const WALL_TRIM: Color = Color::rgb(0xc9, 0xa2, 0x27);
const FLOOR: Color = Color::rgb(0xe8, 0xdc, 0xc4);
const FLOOR_LINE: Color = Color::rgba(0x8c, 0x7a, 0x5b, 0.25);
const CARPET: Color = Color::rgb(0x9b, 0x1d, 0x20);
const PEDESTAL: Color = Color::rgb(0xb8, 0xad, 0x9a);
const GLASS: Color = Color::rgba(0xd6, 0xec, 0xf3, 0.85);
const DOOR: Color = Color::rgb(0x6b, 0x42, 0x26);
const STAGE: Color = Color::rgb(0xb0, 0x2a, 0x2a);
const FRAME_BORDER: Color = Color::rgb(0xa6, 0x7c, 0x2e);
const FRAME_FALLBACK: Color = Color::rgb(0x3d, 0x4a, 0x5c);
const HIGHLIGHT: Color = Color::rgb(0xff, 0xd1, 0x66);
const BODY: Color = Color::rgb(0x1f, 0x4e, 0x8c);
const SKIN: Color = Color::rgb(0xf1, 0xc2, 0x7d);
const SHADOW: Color = Color::rgba(0, 0, 0, 0.25);
const HUD_TEXT: Color = Color::WHITE;
const HUD_PANEL: Color = Color::rgba(0, 0, 0, 0.55);

const TITLE_FONT: &str = "bold 18px sans-serif";
const SMALL_FONT: &str = "13px sans-serif";
const BANNER_FONT: &str = "bold 16px sans-serif";
const PAUSE_FONT: &str = "bold 42px sans-serif";

pub const CONTROLS_TEXT: &str = "WASD / Arrows: move   E: interact   Esc: pause";
pub const PAUSE_TEXT: &str = "PAUSED";

/// Everything one frame needs to draw
pub struct SceneParams<'a> {
    pub map: &'a MapDef,
    pub session: &'a Session,
    pub viewport: Viewport,
    /// Seconds since the loop started, drives the pulse
    pub time: f32,
    pub reduced_motion: bool,
}

/// Hint banner text for an interactable
pub fn hint_text(it: &Interactable) -> String {
    format!("{}: {}", it.title, it.hint)
}

/// Pulse factor in 0..=1; constant when motion is reduced
fn pulse(time: f32, reduced_motion: bool) -> f32 {
    if reduced_motion {
        1.0
    } else {
        0.5 + 0.5 * (time * PULSE_RATE).sin()
    }
}

pub fn draw_scene<S: Surface>(surface: &mut S, params: &SceneParams) {
    let vp = params.viewport;
    let session = params.session;
    let map = params.map;

    surface.begin_frame(&vp);
    surface.fill_rect(Rect::new(0.0, 0.0, vp.width, vp.height), BACKDROP);

    let camera = Camera::follow(
        session.player.pos,
        vp.size(),
        Vec2::new(map.width, map.height),
    );

    surface.save();
    surface.translate(-camera.offset.x, -camera.offset.y);
    draw_museum(surface, map);
    draw_wall_frames(surface, map);
    let glow = pulse(params.time, params.reduced_motion);
    for (i, it) in map.interactables.iter().enumerate() {
        draw_interactable(surface, it, session.nearest == Some(i), glow);
    }
    draw_player(surface, session);
    draw_confetti(surface, session);
    surface.restore();

    surface.vignette(vp.width, vp.height, 0.45);
    draw_hud(surface, params);
}

fn draw_museum<S: Surface>(surface: &mut S, map: &MapDef) {
    let full = Rect::new(0.0, 0.0, map.width, map.height);
    let floor = map.floor();

    let has_art = map
        .background
        .as_deref()
        .is_some_and(|src| surface.draw_image(src, full));

    if !has_art {
        surface.fill_rect(floor, FLOOR);
        let mut x = TILE;
        while x < map.width {
            surface.line(
                Vec2::new(x, floor.y),
                Vec2::new(x, floor.bottom()),
                FLOOR_LINE,
                1.0,
            );
            x += TILE;
        }
        let center = floor.center().y;
        surface.fill_rect(Rect::new(0.0, center - 40.0, map.width, 80.0), CARPET);
    }

    surface.fill_rect(Rect::new(0.0, 0.0, map.width, map.wall_top), WALL);
    surface.fill_rect(
        Rect::new(0.0, map.height - map.wall_bottom, map.width, map.wall_bottom),
        WALL,
    );
    surface.line(
        Vec2::new(0.0, map.wall_top),
        Vec2::new(map.width, map.wall_top),
        WALL_TRIM,
        3.0,
    );
}

fn draw_wall_frames<S: Surface>(surface: &mut S, map: &MapDef) {
    for frame in &map.wall_frames {
        surface.fill_rect(frame.rect.expanded(6.0, 6.0), FRAME_BORDER);
        let drawn = frame
            .image
            .as_deref()
            .is_some_and(|src| surface.draw_image(src, frame.rect));
        if !drawn {
            surface.fill_rect(frame.rect, FRAME_FALLBACK);
        }
    }
}

fn draw_interactable<S: Surface>(surface: &mut S, it: &Interactable, nearest: bool, glow: f32) {
    let r = it.rect;
    match &it.kind {
        InteractKind::Exhibit { .. } => {
            surface.fill_round_rect(r.expanded(10.0, 10.0), 6.0, PEDESTAL);
            surface.fill_rect(r, GLASS);
            surface.stroke_rect(r, Color::WHITE, 2.0);
        }
        InteractKind::Door { .. } => {
            surface.fill_rect(r, DOOR);
            surface.stroke_rect(r, WALL_TRIM, 2.0);
            surface.fill_circle(Vec2::new(r.x + 14.0, r.center().y), 4.0, WALL_TRIM);
        }
        InteractKind::Stage { .. } => {
            surface.fill_round_rect(r, 10.0, STAGE);
            surface.stroke_rect(r, WALL_TRIM, 3.0);
        }
        // Frame art is drawn with the wall decoration
        InteractKind::Frame { .. } => {}
    }

    if nearest {
        let grow = 4.0 + 4.0 * glow;
        surface.stroke_rect(
            r.expanded(grow, grow),
            HIGHLIGHT.with_alpha(0.5 + 0.5 * glow),
            3.0,
        );
    }
}

fn draw_player<S: Surface>(surface: &mut S, session: &Session) {
    let player = &session.player;
    let pos = player.pos;
    let half = player.half;

    surface.fill_ellipse(
        Vec2::new(pos.x, pos.y + half.y),
        Vec2::new(half.x + 2.0, 5.0),
        SHADOW,
    );

    surface.save();
    if player.facing == Facing::Left {
        // Mirror around the player's vertical axis
        surface.translate(pos.x, 0.0);
        surface.scale(-1.0, 1.0);
        surface.translate(-pos.x, 0.0);
    }

    let sprite = Rect::new(pos.x - half.x * 1.6, pos.y - half.y * 2.2, half.x * 3.2, half.y * 3.2);
    if !surface.draw_image(PLAYER_SPRITE, sprite) {
        let body = Rect::new(pos.x - half.x, pos.y - half.y, half.x * 2.0, half.y * 2.0);
        surface.fill_round_rect(body, 8.0, BODY);
        let head = Vec2::new(pos.x, pos.y - half.y - 8.0);
        surface.fill_circle(head, 10.0, SKIN);
        surface.fill_circle(head + Vec2::new(4.0, -1.0), 1.8, Color::BLACK);
    }
    surface.restore();
}

fn draw_confetti<S: Surface>(surface: &mut S, session: &Session) {
    for p in session.confetti.active() {
        surface.save();
        surface.translate(p.x, p.y);
        surface.rotate(p.rot);
        surface.set_alpha(p.opacity());
        let s = p.size;
        surface.fill_rect(Rect::new(-s * 0.5, -s * 0.5, s, s), palette_color(p.color));
        surface.restore();
    }
}

fn draw_hud<S: Surface>(surface: &mut S, params: &SceneParams) {
    let vp = params.viewport;
    let session = params.session;

    surface.fill_round_rect(Rect::new(10.0, 10.0, 420.0, 52.0), 8.0, HUD_PANEL);
    surface.fill_text(
        &params.map.title,
        Vec2::new(20.0, 32.0),
        TITLE_FONT,
        HUD_TEXT,
        TextAlign::Left,
    );
    surface.fill_text(
        CONTROLS_TEXT,
        Vec2::new(20.0, 52.0),
        SMALL_FONT,
        HUD_TEXT.with_alpha(0.8),
        TextAlign::Left,
    );

    if let Some(it) = session.nearest.and_then(|i| params.map.interactable(i)) {
        let w = (vp.width - 40.0).clamp(0.0, 560.0);
        let banner = Rect::new((vp.width - w) * 0.5, vp.height - 64.0, w, 40.0);
        surface.fill_round_rect(banner, 10.0, HUD_PANEL);
        surface.fill_text(
            &hint_text(it),
            Vec2::new(vp.width * 0.5, banner.y + 26.0),
            BANNER_FONT,
            HIGHLIGHT,
            TextAlign::Center,
        );
    }

    if session.hard_paused {
        surface.fill_rect(Rect::new(0.0, 0.0, vp.width, vp.height), Color::rgba(0, 0, 0, 0.5));
        surface.fill_text(
            PAUSE_TEXT,
            Vec2::new(vp.width * 0.5, vp.height * 0.5),
            PAUSE_FONT,
            HUD_TEXT,
            TextAlign::Center,
        );
    }
}
