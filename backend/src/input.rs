use super::glutils::PolygonMode;

/// Keys the program reacts to. Everything else arrives as `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Num1,
    Num2,
    Num3,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Window events drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// New framebuffer size in pixels.
    Resized { width: i32, height: i32 },
    Key {
        key: Key,
        state: KeyState,
        /// True when generated by key auto-repeat.
        repeat: bool,
    },
    Error { code: i32, description: String },
    CloseRequested,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Close,
    SetPolygonMode(PolygonMode),
}

/// Maps a key event to an action, on the press edge only.
pub fn key_action(key: Key, state: KeyState, repeat: bool) -> Option<Action> {
    if state != KeyState::Pressed || repeat {
        return None;
    }
    match key {
        Key::Escape => Some(Action::Close),
        Key::Num1 => Some(Action::SetPolygonMode(PolygonMode::Line)),
        Key::Num2 => Some(Action::SetPolygonMode(PolygonMode::Fill)),
        Key::Num3 => Some(Action::SetPolygonMode(PolygonMode::Point)),
        Key::Other => None,
    }
}
