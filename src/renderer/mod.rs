//! Drawing surface abstraction
//!
//! The games never talk to a canvas directly. Each frame they emit
//! [`DrawCommand`]s into a [`Surface`]; the browser build executes them on a
//! 2D canvas context, tests and the native runner record them.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recorder;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recorder::RecordingSurface;

use glam::Vec2;

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    /// Source rectangle of cell (`col`, `row`) in a sprite sheet of equal cells
    pub fn sheet_cell(col: u32, row: u32, cell: Vec2) -> Self {
        Self {
            pos: Vec2::new(col as f32 * cell.x, row as f32 * cell.y),
            size: cell,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Preloaded sprite images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// Flappy scrolling background
    Background,
    /// Flappy player sheet (4 rows: idle, down, up, charge)
    Flyer,
    /// Flappy obstacle sheet (4 columns)
    Gears,
    /// Defence planet
    Planet,
    /// Defence turret
    Turret,
    /// Defence asteroid sheet (8 death frames x 4 variants)
    Asteroid,
}

impl SpriteId {
    /// DOM id of the `<img>` element holding this sprite
    pub fn element_id(self) -> &'static str {
        match self {
            SpriteId::Background => "background",
            SpriteId::Flyer => "player",
            SpriteId::Gears => "smallGears",
            SpriteId::Planet => "planet",
            SpriteId::Turret => "player",
            SpriteId::Asteroid => "asteroid",
        }
    }
}

/// Fill colors used by the games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Gold,
    Red,
    OrangeRed,
}

impl Color {
    pub fn as_css(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Gold => "gold",
            Color::Red => "red",
            Color::OrangeRed => "orangered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Blit `src` of a sprite into `dest`, rotated by `rotation` radians
    /// around the center of `dest`. `src: None` draws the whole image.
    Sprite {
        sprite: SpriteId,
        src: Option<Rect>,
        dest: Rect,
        rotation: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Debug outline (collision circles)
    StrokeCircle { center: Vec2, radius: f32 },
    FillRect { rect: Rect, color: Color },
    Text {
        text: String,
        pos: Vec2,
        align: TextAlign,
        size: f32,
        color: Color,
    },
}

/// Anything that can receive draw calls
pub trait Surface {
    fn draw(&mut self, command: DrawCommand);

    fn sprite(&mut self, sprite: SpriteId, src: Option<Rect>, dest: Rect) {
        self.draw(DrawCommand::Sprite {
            sprite,
            src,
            dest,
            rotation: 0.0,
        });
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, align: TextAlign, size: f32) {
        self.draw(DrawCommand::Text {
            text: text.into(),
            pos,
            align,
            size,
            color: Color::White,
        });
    }
}
