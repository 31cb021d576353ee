//! Keyboard input mapper
//!
//! Tracks held keys and "just pressed" edges for the fixed key set. Keys are
//! identified by their DOM `KeyboardEvent.code`, so layouts don't matter.

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Interact,
    Escape,
}

const KEY_COUNT: usize = 10;

impl Key {
    /// Map a DOM `code` to a tracked key. Everything else is ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyW" => Some(Key::W),
            "KeyA" => Some(Key::A),
            "KeyS" => Some(Key::S),
            "KeyD" => Some(Key::D),
            "KeyE" => Some(Key::Interact),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Logical movement directions; each has an arrow and a WASD binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn bindings(self) -> [Key; 2] {
        match self {
            Direction::Up => [Key::W, Key::ArrowUp],
            Direction::Down => [Key::S, Key::ArrowDown],
            Direction::Left => [Key::A, Key::ArrowLeft],
            Direction::Right => [Key::D, Key::ArrowRight],
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    down: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
    enabled: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            down: [false; KEY_COUNT],
            pressed: [false; KEY_COUNT],
            enabled: true,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disabling drops every held and pressed key
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.down = [false; KEY_COUNT];
            self.pressed = [false; KEY_COUNT];
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Handle a DOM keydown. Auto-repeat keydowns don't produce new edges.
    pub fn key_down(&mut self, code: &str) {
        if !self.enabled {
            return;
        }
        let Some(key) = Key::from_code(code) else {
            return;
        };
        let i = key.index();
        if !self.down[i] {
            self.pressed[i] = true;
        }
        self.down[i] = true;
    }

    pub fn key_up(&mut self, code: &str) {
        if !self.enabled {
            return;
        }
        if let Some(key) = Key::from_code(code) {
            self.down[key.index()] = false;
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Read and clear an edge, so it fires once even if several fixed
    /// updates run in the same frame
    pub fn take_pressed(&mut self, key: Key) -> bool {
        std::mem::replace(&mut self.pressed[key.index()], false)
    }

    /// Either binding of a logical direction is held
    pub fn direction_held(&self, dir: Direction) -> bool {
        dir.bindings().iter().any(|k| self.is_down(*k))
    }

    /// Clear all edges (called once per animation frame)
    pub fn end_frame(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_and_hold() {
        let mut input = InputState::new();
        input.key_down("KeyE");
        assert!(input.is_down(Key::Interact));
        assert!(input.was_pressed(Key::Interact));

        input.end_frame();
        assert!(input.is_down(Key::Interact));
        assert!(!input.was_pressed(Key::Interact));

        // Auto-repeat while held: no new edge
        input.key_down("KeyE");
        assert!(!input.was_pressed(Key::Interact));

        input.key_up("KeyE");
        input.key_down("KeyE");
        assert!(input.was_pressed(Key::Interact));
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let mut input = InputState::new();
        input.key_down("KeyQ");
        input.key_down("Space");
        input.key_up("Enter");
        assert!(Key::from_code("KeyQ").is_none());
        for key in [Key::ArrowUp, Key::W, Key::Interact, Key::Escape] {
            assert!(!input.is_down(key));
        }
    }

    #[test]
    fn test_take_pressed_consumes_once() {
        let mut input = InputState::new();
        input.key_down("Escape");
        assert!(input.take_pressed(Key::Escape));
        assert!(!input.take_pressed(Key::Escape));
        assert!(input.is_down(Key::Escape));
    }

    #[test]
    fn test_disable_clears_state() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.key_down("KeyD");
        input.set_enabled(false);
        assert!(!input.is_down(Key::ArrowLeft));
        assert!(!input.was_pressed(Key::D));

        // Ignored while disabled
        input.key_down("KeyW");
        assert!(!input.is_down(Key::W));

        input.set_enabled(true);
        input.key_down("KeyW");
        assert!(input.direction_held(Direction::Up));
    }

    #[test]
    fn test_both_bindings_map_to_direction() {
        let mut input = InputState::new();
        input.key_down("ArrowRight");
        assert!(input.direction_held(Direction::Right));
        input.key_up("ArrowRight");
        input.key_down("KeyD");
        assert!(input.direction_held(Direction::Right));
        assert!(!input.direction_held(Direction::Left));
    }
}
