//! Static map definitions
//!
//! Three hand-placed museum halls. Geometry is built once per session and
//! never mutates; only the player's position and the current map change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::GameError;
use crate::consts::*;

/// Map identifier. Progression is strictly 1 -> 2 -> 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MapId {
    One = 1,
    Two = 2,
    Three = 3,
}

impl MapId {
    pub fn next(self) -> Option<MapId> {
        match self {
            MapId::One => Some(MapId::Two),
            MapId::Two => Some(MapId::Three),
            MapId::Three => None,
        }
    }

    pub fn prev(self) -> Option<MapId> {
        match self {
            MapId::One => None,
            MapId::Two => Some(MapId::One),
            MapId::Three => Some(MapId::Two),
        }
    }

    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for MapId {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MapId::One),
            2 => Ok(MapId::Two),
            3 => Ok(MapId::Three),
            other => Err(GameError::InvalidMapId(other)),
        }
    }
}

impl From<MapId> for u8 {
    fn from(id: MapId) -> Self {
        id as u8
    }
}

/// Quiz guarding a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizId {
    Map1,
    Map2,
    Final,
}

impl QuizId {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizId::Map1 => "map1",
            QuizId::Map2 => "map2",
            QuizId::Final => "final",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "map1" => Some(QuizId::Map1),
            "map2" => Some(QuizId::Map2),
            "final" => Some(QuizId::Final),
            _ => None,
        }
    }
}

/// What an interactable does when triggered; each variant carries exactly the payload it needs
#[derive(Debug, Clone, PartialEq)]
pub enum InteractKind {
    /// Opens a flipbook panel
    Exhibit { flipbook_id: String },
    /// Mid-level gate
    Door { quiz_id: QuizId },
    /// Final gate
    Stage { quiz_id: QuizId },
    /// Enlargeable wall image, informational only
    Frame { image: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interactable {
    pub id: String,
    pub title: String,
    pub hint: String,
    /// World-space rect the interact probe is tested against
    pub rect: Rect,
    pub kind: InteractKind,
}

impl Interactable {
    pub fn exhibit(id: &str, x: f32, y: f32, title: &str, flipbook_id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            hint: "Press E to open the flipbook".to_string(),
            rect: Rect::new(x, y, EXHIBIT_W, EXHIBIT_H),
            kind: InteractKind::Exhibit {
                flipbook_id: flipbook_id.to_string(),
            },
        }
    }

    pub fn door(id: &str, rect: Rect, title: &str, quiz_id: QuizId) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            hint: "Press E to take the quiz".to_string(),
            rect,
            kind: InteractKind::Door { quiz_id },
        }
    }

    pub fn stage(id: &str, rect: Rect, title: &str, quiz_id: QuizId) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            hint: "Press E to take the final quiz".to_string(),
            rect,
            kind: InteractKind::Stage { quiz_id },
        }
    }

    pub fn frame(frame: &WallFrame) -> Self {
        Self {
            id: frame.id.clone(),
            title: frame.title.clone(),
            hint: "Press E to enlarge the frame".to_string(),
            rect: frame.rect,
            kind: InteractKind::Frame {
                image: frame.image.clone(),
            },
        }
    }

    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InteractKind::Door { .. } | InteractKind::Stage { .. })
    }
}

/// Large decorative frame hung on the top wall
#[derive(Debug, Clone, PartialEq)]
pub struct WallFrame {
    pub id: String,
    pub rect: Rect,
    pub title: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapDef {
    pub id: MapId,
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Heights of the top and bottom wall bands
    pub wall_top: f32,
    pub wall_bottom: f32,
    pub obstacles: Vec<Rect>,
    pub interactables: Vec<Interactable>,
    pub wall_frames: Vec<WallFrame>,
    /// Spawn used when this map is entered going forward
    pub entry: Vec2,
    /// Spawn used when the player retreats onto this map (near its gate)
    pub return_point: Vec2,
    /// Optional floor art; drawn procedurally until it loads
    pub background: Option<String>,
}

impl MapDef {
    /// A map with the standard size and wall bands and nothing else in it
    pub fn blank(id: MapId, title: &str) -> Self {
        let mut map = Self {
            id,
            title: title.to_string(),
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            wall_top: WALL_TOP_H,
            wall_bottom: WALL_BOTTOM_H,
            obstacles: Vec::new(),
            interactables: Vec::new(),
            wall_frames: Vec::new(),
            entry: Vec2::new(ENTRY_X, ENTRY_Y),
            return_point: Vec2::new(RETURN_X, WORLD_HEIGHT * 0.5),
            background: None,
        };
        map.obstacles
            .push(Rect::new(0.0, 0.0, map.width, map.wall_top));
        map.obstacles.push(Rect::new(
            0.0,
            map.height - map.wall_bottom,
            map.width,
            map.wall_bottom,
        ));
        map
    }

    /// Floor area between the wall bands
    pub fn floor(&self) -> Rect {
        Rect::new(
            0.0,
            self.wall_top,
            self.width,
            self.height - self.wall_top - self.wall_bottom,
        )
    }

    pub fn with_interactable(mut self, it: Interactable) -> Self {
        self.interactables.push(it);
        self
    }

    /// Add an exhibit and its pedestal, which is larger than the display case
    /// so the player can stand close enough to trigger it but never inside it
    pub fn with_exhibit(mut self, exhibit: Interactable) -> Self {
        self.obstacles
            .push(exhibit.rect.expanded(PEDESTAL_PAD, PEDESTAL_PAD));
        self.interactables.push(exhibit);
        self
    }

    /// Add a door or stage; the gate itself is solid
    pub fn with_gate(mut self, gate: Interactable) -> Self {
        self.obstacles.push(gate.rect);
        self.interactables.push(gate);
        self
    }

    /// Add a wall frame: decoration, obstacle and `frame` interactable at once
    pub fn with_wall_frame(mut self, frame: WallFrame) -> Self {
        self.obstacles.push(frame.rect.expanded(FRAME_PAD, FRAME_PAD));
        self.interactables.push(Interactable::frame(&frame));
        self.wall_frames.push(frame);
        self
    }

    pub fn interactable(&self, index: usize) -> Option<&Interactable> {
        self.interactables.get(index)
    }
}

/// All three maps, indexed by `MapId`
#[derive(Debug, Clone)]
pub struct Maps {
    maps: [MapDef; 3],
}

impl Maps {
    pub fn new(one: MapDef, two: MapDef, three: MapDef) -> Self {
        debug_assert_eq!(one.id, MapId::One);
        debug_assert_eq!(two.id, MapId::Two);
        debug_assert_eq!(three.id, MapId::Three);
        Self {
            maps: [one, two, three],
        }
    }

    pub fn get(&self, id: MapId) -> &MapDef {
        &self.maps[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapDef> {
        self.maps.iter()
    }
}

impl Default for Maps {
    fn default() -> Self {
        build_maps()
    }
}

fn gate_rect() -> Rect {
    Rect::new(GATE_X, GATE_Y, GATE_W, GATE_H)
}

/// Frame art shown when a wall frame is enlarged
const FRAME_IMAGE: &str = "/assets/image1.jpg";

/// Build the three museum halls. Deterministic.
pub fn build_maps() -> Maps {
    // Exhibits alternate between a top row (tucked under the top wall) and a
    // bottom row, leaving the carpet through the middle clear.
    let top_row = WALL_TOP_H + 30.0;
    let bottom_row = WORLD_HEIGHT - WALL_BOTTOM_H - EXHIBIT_H - 54.0;

    let one = MapDef::blank(MapId::One, "Hall 1: The socialist state")
        .with_exhibit(Interactable::exhibit(
            "m1-e1",
            420.0,
            top_row,
            "Power belongs to the people",
            "m1-trung-tam-quyen-luc",
        ))
        .with_exhibit(Interactable::exhibit(
            "m1-e2",
            1000.0,
            bottom_row,
            "Functions of the state",
            "m1-chuc-nang",
        ))
        .with_exhibit(Interactable::exhibit(
            "m1-e3",
            1500.0,
            top_row,
            "Law and its supremacy",
            "m1-phap-luat",
        ))
        .with_exhibit(Interactable::exhibit(
            "m1-e4",
            1880.0,
            bottom_row,
            "Organisation of the apparatus",
            "m1-to-chuc",
        ))
        .with_gate(Interactable::door(
            "m1-door",
            gate_rect(),
            "Door to hall 2",
            QuizId::Map1,
        ));

    let two = MapDef::blank(MapId::Two, "Hall 2: Socialist democracy and the rule-of-law state")
        .with_exhibit(Interactable::exhibit(
            "m2-e1",
            470.0,
            top_row,
            "Socialist democracy",
            "m2-dan-chu",
        ))
        .with_exhibit(Interactable::exhibit(
            "m2-e2",
            1180.0,
            bottom_row,
            "The rule-of-law state",
            "m2-phap-quyen",
        ))
        .with_exhibit(Interactable::exhibit(
            "m2-e3",
            1820.0,
            top_row,
            "Promoting democracy",
            "m2-phat-huy",
        ))
        .with_gate(Interactable::door(
            "m2-door",
            gate_rect(),
            "Door to hall 3",
            QuizId::Map2,
        ));

    // Hall 3 keeps its top wall for the two big frames, so every exhibit sits on the bottom row
    let mut three = MapDef::blank(MapId::Three, "Hall 3: Review room");
    for (i, x) in [350.0, 870.0, 1380.0, 1880.0].into_iter().enumerate() {
        three = three.with_exhibit(Interactable::exhibit(
            &format!("m3-e{}", i + 1),
            x,
            bottom_row,
            "Quick review",
            "m3-tong-ket",
        ));
    }
    let three = three
        .with_wall_frame(WallFrame {
            id: "m3-f1".to_string(),
            rect: Rect::new(720.0, 90.0, 420.0, 190.0),
            title: "Frame 1: Socialist democracy".to_string(),
            image: Some(FRAME_IMAGE.to_string()),
        })
        .with_wall_frame(WallFrame {
            id: "m3-f2".to_string(),
            rect: Rect::new(1320.0, 90.0, 420.0, 190.0),
            title: "Frame 2: The rule-of-law state".to_string(),
            image: Some(FRAME_IMAGE.to_string()),
        })
        .with_gate(Interactable::stage(
            "m3-stage",
            gate_rect(),
            "Closing stage",
            QuizId::Final,
        ));

    Maps::new(one, two, three)
}
