//! Per-frame input snapshots
//!
//! Browser listeners never touch game state. They translate DOM events into
//! [`InputEvent`]s and fold them into a pending snapshot; the frame callback
//! takes that snapshot once per frame and hands it to the world.

use glam::Vec2;

/// Keys the games care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Shift,
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` string
    pub fn from_dom(key: &str) -> Self {
        match key {
            " " => Key::Space,
            "Enter" => Key::Enter,
            "Shift" => Key::Shift,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// A raw platform event, in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    TouchStart(Vec2),
    KeyDown(Key),
    KeyUp(Key),
}

/// Input accumulated between two frames
pub trait InputSnapshot: Default {
    fn record(&mut self, event: &InputEvent);
}

/// Flappy frame input (all one-shot)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlappyInput {
    pub flap: bool,
    pub charge: bool,
    pub restart: bool,
    pub toggle_debug: bool,
}

impl InputSnapshot for FlappyInput {
    fn record(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(_) | InputEvent::TouchStart(_) => self.flap = true,
            InputEvent::KeyDown(Key::Space | Key::Enter) => self.flap = true,
            InputEvent::KeyDown(Key::Shift | Key::Char('c')) => self.charge = true,
            InputEvent::KeyDown(Key::Char('r')) => self.restart = true,
            InputEvent::KeyDown(Key::Char('d')) => self.toggle_debug = !self.toggle_debug,
            _ => {}
        }
    }
}

/// Defence frame input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefenceInput {
    /// Latest pointer position seen this frame
    pub pointer: Option<Vec2>,
    /// Shots requested this frame
    pub shots: u32,
    pub restart: bool,
    pub toggle_debug: bool,
}

impl InputSnapshot for DefenceInput {
    fn record(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove(pos) => self.pointer = Some(pos),
            InputEvent::PointerDown(pos) | InputEvent::TouchStart(pos) => {
                self.pointer = Some(pos);
                self.shots += 1;
            }
            InputEvent::KeyUp(Key::Char('1')) => self.shots += 1,
            InputEvent::KeyUp(Key::Char('d')) => self.toggle_debug = !self.toggle_debug,
            InputEvent::KeyDown(Key::Char('r')) => self.restart = true,
            _ => {}
        }
    }
}
