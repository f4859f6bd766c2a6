//! Default sizes and settings (all in pixels)

use std::time::Duration;

use crate::types::{Color, Size};

pub const CANVAS_SIZE: Size = Size::new(600, 400);
pub const SHAPE_SIZE: Size = Size::new(100, 50);
pub const SHAPE_COLOR: Color = Color::ORANGE;
pub const SHAPE_TEXT: &str = "Hello";
/// Containers outline in this color regardless of their own color
pub const OUTLINE_COLOR: Color = Color::BLACK;
pub const LABEL_COLOR: Color = Color::BLACK;
pub const HANDLE_COLOR: Color = Color::BLACK;
/// Side of the square selection handles drawn on each corner
pub const HANDLE_SIZE: i32 = 4;
pub const TICK_PERIOD: Duration = Duration::from_millis(30);
/// Largest absolute velocity component picked for a new bounce path
pub const MAX_SPEED: i32 = 10;
