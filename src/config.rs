//! Scene configuration

use std::time::Duration;

use crate::defaults;
use crate::path::PathKind;
use crate::shapes::ShapeKind;
use crate::types::{Color, Size};

/// Everything a [`Scene`](crate::scene::Scene) needs at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    /// Canvas size; the root container takes this size
    pub canvas: Size,
    /// Size given to shapes created by clicks
    pub shape_size: Size,
    pub color: Color,
    pub text: String,
    pub shape_kind: ShapeKind,
    pub path_kind: PathKind,
    /// Sleep between animation ticks
    pub tick_period: Duration,
    /// Fixed seed for initial velocities; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: defaults::CANVAS_SIZE,
            shape_size: defaults::SHAPE_SIZE,
            color: defaults::SHAPE_COLOR,
            text: defaults::SHAPE_TEXT.to_string(),
            shape_kind: ShapeKind::default(),
            path_kind: PathKind::default(),
            tick_period: defaults::TICK_PERIOD,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(mut self, w: i32, h: i32) -> Self {
        self.canvas = Size::new(w, h);
        self
    }

    pub fn with_shape_size(mut self, w: i32, h: i32) -> Self {
        self.shape_size = Size::new(w, h);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_shape_kind(mut self, kind: ShapeKind) -> Self {
        self.shape_kind = kind;
        self
    }

    pub fn with_path_kind(mut self, kind: PathKind) -> Self {
        self.path_kind = kind;
        self
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
