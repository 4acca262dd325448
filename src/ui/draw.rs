use glam::Vec2;

/// UI color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const YELLOW: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Hit test, half-open: a point exactly on the right or bottom edge is
    /// outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One abstract draw directive
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    RectOutline {
        rect: Rect,
        color: Color,
        border_width: f32,
    },
    /// Blit the sprite identified by `icon` (an asset key) into `rect`
    Sprite {
        icon: String,
        rect: Rect,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        color: Color,
    },
}

/// Retained list of draw directives for one frame.
///
/// The crate never talks to a window or a GPU; a host renderer drains this
/// list each frame and interprets the commands however it likes.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    pub fn draw_rect_outline(&mut self, rect: Rect, color: Color, border_width: f32) {
        self.commands.push(DrawCommand::RectOutline {
            rect,
            color,
            border_width,
        });
    }

    pub fn draw_sprite(&mut self, icon: &str, rect: Rect) {
        self.commands.push(DrawCommand::Sprite {
            icon: icon.to_string(),
            rect,
        });
    }

    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position: Vec2::new(x, y),
            size,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(29.9, 29.9)));
        assert!(!rect.contains(Vec2::new(30.0, 20.0)));
        assert!(!rect.contains(Vec2::new(20.0, 30.0)));
        assert!(!rect.contains(Vec2::new(9.9, 20.0)));
    }

    #[test]
    fn test_draw_list_frame_reset() {
        let mut list = DrawList::new();
        list.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        list.draw_text("hi", 0.0, 0.0, 12.0, Color::WHITE);
        assert_eq!(list.len(), 2);

        list.begin_frame();
        assert!(list.is_empty());
    }
}
