//! Platform-agnostic keyboard handling for the player controller

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard events, tagged with a `KeyboardEvent.code`-style identifier
    KeyDown(String),
    KeyUp(String),

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
}

impl InputEvent {
    pub fn key(code: impl Into<String>, is_down: bool) -> Self {
        if is_down {
            InputEvent::KeyDown(code.into())
        } else {
            InputEvent::KeyUp(code.into())
        }
    }
}

/// The four movement directions the controller listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Held flag per direction
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn any_held(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn clear_keys(&mut self) {
        *self = Self::default();
    }

    /// Apply an event to the held flags. Unbound keys are ignored.
    pub fn process_event(&mut self, event: &InputEvent, bindings: &KeyBindings) {
        match event {
            InputEvent::KeyDown(code) => {
                if let Some(direction) = bindings.direction_for(code) {
                    self.set(direction, true);
                }
            }
            InputEvent::KeyUp(code) => {
                if let Some(direction) = bindings.direction_for(code) {
                    self.set(direction, false);
                }
            }
            InputEvent::FocusLost | InputEvent::VisibilityChanged { .. } => {
                self.clear_keys();
            }
        }
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = |list: &[&str]| list.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        Self {
            up: codes(&["ArrowUp", "KeyW"]),
            down: codes(&["ArrowDown", "KeyS"]),
            left: codes(&["ArrowLeft", "KeyA"]),
            right: codes(&["ArrowRight", "KeyD"]),
            jump: codes(&["Space"]),
        }
    }
}

impl KeyBindings {
    pub fn direction_for(&self, code: &str) -> Option<Direction> {
        let bound = |list: &[String]| list.iter().any(|c| c == code);
        if bound(&self.up) {
            Some(Direction::Up)
        } else if bound(&self.down) {
            Some(Direction::Down)
        } else if bound(&self.left) {
            Some(Direction::Left)
        } else if bound(&self.right) {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn is_jump(&self, code: &str) -> bool {
        self.jump.iter().any(|c| c == code)
    }

    /// Keys the host should keep from scrolling the page
    pub fn is_bound(&self, code: &str) -> bool {
        self.is_jump(code) || self.direction_for(code).is_some()
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::KeyboardEvent;

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        InputEvent::key(e.code(), is_down)
    }
}
