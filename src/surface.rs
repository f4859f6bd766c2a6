//! Drawing surfaces
//!
//! Shapes draw through the minimal immediate-mode [`Surface`] capability.
//! Origin translation is only ever applied through [`Translated`], which
//! undoes it on drop, so an early return or a panic inside a container's
//! children cannot leave the surface shifted.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::types::{Color, Offset};

/// A 2D immediate-mode drawing target
pub trait Surface {
    /// Color used by subsequent draw calls
    fn set_paint(&mut self, color: Color);

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    fn draw_oval(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draw `text` anchored at its center point
    fn draw_string(&mut self, text: &str, x: i32, y: i32);

    /// Shift the origin of all subsequent draw calls
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Scoped origin translation: translates on creation, translates back on drop
pub struct Translated<'a> {
    surface: &'a mut dyn Surface,
    offset: Offset,
}

impl<'a> Translated<'a> {
    pub fn new(surface: &'a mut dyn Surface, offset: Offset) -> Self {
        surface.translate(offset.dx, offset.dy);
        Self { surface, offset }
    }
}

impl Drop for Translated<'_> {
    fn drop(&mut self) {
        self.surface.translate(-self.offset.dx, -self.offset.dy);
    }
}

impl<'a> Deref for Translated<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl DerefMut for Translated<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    SetPaint(Color),
    Rect { x: i32, y: i32, w: i32, h: i32 },
    Oval { x: i32, y: i32, w: i32, h: i32 },
    Text { text: String, x: i32, y: i32 },
    Translate { dx: i32, dy: i32 },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::SetPaint(c) => write!(f, "paint {c}"),
            DrawCommand::Rect { x, y, w, h } => write!(f, "rect {x} {y} {w} {h}"),
            DrawCommand::Oval { x, y, w, h } => write!(f, "oval {x} {y} {w} {h}"),
            DrawCommand::Text { text, x, y } => write!(f, "text {text:?} {x} {y}"),
            DrawCommand::Translate { dx, dy } => write!(f, "translate {dx} {dy}"),
        }
    }
}

/// A headless surface that records every call, for tests and debugging
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    origin: Offset,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current accumulated translation; zero whenever drawing is balanced
    pub fn origin(&self) -> Offset {
        self.origin
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.origin = Offset::ZERO;
    }

    /// One command per line
    pub fn log(&self) -> String {
        self.commands
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for RecordingSurface {
    fn set_paint(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetPaint(color));
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn draw_oval(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.commands.push(DrawCommand::Oval { x, y, w, h });
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.origin += Offset::new(dx, dy);
        self.commands.push(DrawCommand::Translate { dx, dy });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_is_restored_on_drop() {
        let mut surface = RecordingSurface::new();
        {
            let mut inner = Translated::new(&mut surface, Offset::new(10, 20));
            inner.draw_rect(0, 0, 5, 5);
        }
        assert_eq!(surface.origin(), Offset::ZERO);
        insta::assert_snapshot!(surface.log(), @r"
        translate 10 20
        rect 0 0 5 5
        translate -10 -20
        ");
    }

    #[test]
    fn nested_translations_unwind_in_order() {
        let mut surface = RecordingSurface::new();
        {
            let mut outer = Translated::new(&mut surface, Offset::new(1, 1));
            {
                let mut inner = Translated::new(&mut *outer, Offset::new(2, 3));
                inner.draw_oval(0, 0, 1, 1);
            }
            outer.draw_rect(0, 0, 1, 1);
        }
        assert_eq!(surface.origin(), Offset::ZERO);
        insta::assert_snapshot!(surface.log(), @r"
        translate 1 1
        translate 2 3
        oval 0 0 1 1
        translate -2 -3
        rect 0 0 1 1
        translate -1 -1
        ");
    }

    #[test]
    fn translation_is_restored_on_panic() {
        let mut surface = RecordingSurface::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = Translated::new(&mut surface, Offset::new(7, 7));
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert_eq!(surface.origin(), Offset::ZERO);
    }
}
