// GlTutor
// copyright gl_tutor developers 2024～2025

//! Input events.
//!
//! Native winit events are converted here to a small set of `WindowSignal`s. The window
//! queues them while pumping the OS event loop and applies them to `InputState`, which keeps
//! a fixed-size table of key states indexed by `Key` and answers level (`key_pressed`) and
//! edge (`key_pressed_once`) queries.

use winit::{
    event::{ElementState, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Physical keys known to the tutorials. The discriminant is the index in the key table.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    NumpadAdd,
    NumpadSubtract,
}

/// Size of the key table
pub const KEY_COUNT: usize = Key::NumpadSubtract as usize + 1;

impl Key {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_winit(code: KeyCode) -> Option<Key> {
        let key = match code {
            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,
            KeyCode::Digit0 => Key::Digit0,
            KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2,
            KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4,
            KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6,
            KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8,
            KeyCode::Digit9 => Key::Digit9,
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::Space => Key::Space,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Escape => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::ShiftLeft => Key::LeftShift,
            KeyCode::ShiftRight => Key::RightShift,
            KeyCode::ControlLeft => Key::LeftControl,
            KeyCode::ControlRight => Key::RightControl,
            KeyCode::AltLeft => Key::LeftAlt,
            KeyCode::AltRight => Key::RightAlt,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::NumpadAdd => Key::NumpadAdd,
            KeyCode::NumpadSubtract => Key::NumpadSubtract,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// What the window cares about from the OS event stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSignal {
    Key { key: Key, pressed: bool },
    MouseButton { button: MouseButton, pressed: bool },
    CursorMoved { x: f64, y: f64 },
    Scroll { dx: f64, dy: f64 },
    Resized { width: u32, height: u32 },
    FocusLost,
    CloseRequested,
}

/// pixels of a touchpad scroll counted as one wheel line
const PIXELS_PER_LINE: f64 = 40.0;

/// Convert winit window events to window signals
pub fn signal_from_winit(event: &WindowEvent) -> Option<WindowSignal> {
    match event {
        WindowEvent::CloseRequested => Some(WindowSignal::CloseRequested),
        WindowEvent::Resized(size) => Some(WindowSignal::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::Focused(false) => Some(WindowSignal::FocusLost),
        WindowEvent::KeyboardInput { event, .. } => {
            if let PhysicalKey::Code(code) = event.physical_key {
                Key::from_winit(code).map(|key| WindowSignal::Key {
                    key,
                    pressed: event.state == ElementState::Pressed,
                })
            } else {
                None
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(WindowSignal::CursorMoved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = match button {
                winit::event::MouseButton::Left => MouseButton::Left,
                winit::event::MouseButton::Right => MouseButton::Right,
                winit::event::MouseButton::Middle => MouseButton::Middle,
                _ => return None,
            };
            Some(WindowSignal::MouseButton {
                button,
                pressed: *state == ElementState::Pressed,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x as f64, *y as f64),
                MouseScrollDelta::PixelDelta(p) => (p.x / PIXELS_PER_LINE, p.y / PIXELS_PER_LINE),
            };
            Some(WindowSignal::Scroll { dx, dy })
        }
        _ => None,
    }
}

/// Keyboard and mouse state as last reported by the OS
pub struct InputState {
    keys_down: [bool; KEY_COUNT],
    keys_was_pressed: [bool; KEY_COUNT],
    buttons_down: [bool; 3],
    cursor: (f64, f64),
    frame_start_cursor: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: [false; KEY_COUNT],
            keys_was_pressed: [false; KEY_COUNT],
            buttons_down: [false; 3],
            cursor: (0.0, 0.0),
            frame_start_cursor: (0.0, 0.0),
        }
    }

    /// Applies the input part of a signal; window level signals are ignored here
    pub fn handle(&mut self, signal: &WindowSignal) {
        match *signal {
            WindowSignal::Key { key, pressed } => self.keys_down[key.index()] = pressed,
            WindowSignal::MouseButton { button, pressed } => {
                self.buttons_down[button.index()] = pressed
            }
            WindowSignal::CursorMoved { x, y } => self.cursor = (x, y),
            WindowSignal::FocusLost => {
                self.keys_down = [false; KEY_COUNT];
                self.buttons_down = [false; 3];
            }
            _ => {}
        }
    }

    /// Marks the start of a new frame for cursor delta tracking
    pub fn begin_frame(&mut self) {
        self.frame_start_cursor = self.cursor;
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_down[key.index()]
    }

    /// True only on the released -> pressed transition.
    ///
    /// Only the last-known state is stored, so this must be polled every frame:
    /// a release and a new press between two polls is seen as one long hold.
    pub fn key_pressed_once(&mut self, key: Key) -> bool {
        let idx = key.index();
        if self.keys_down[idx] {
            let first = !self.keys_was_pressed[idx];
            self.keys_was_pressed[idx] = true;
            first
        } else {
            self.keys_was_pressed[idx] = false;
            false
        }
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down[button.index()]
    }

    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    /// Cursor movement since `begin_frame`
    pub fn cursor_delta(&self) -> (f64, f64) {
        (
            self.cursor.0 - self.frame_start_cursor.0,
            self.cursor.1 - self.frame_start_cursor.1,
        )
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
