//! Path strategies: per-shape movement policies
//!
//! A strategy is asked once per tick for the next top-left position of a
//! shape, given the shape's current position and size and the margin it must
//! stay inside. The contract is stateless; each instance carries its own
//! velocity.

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::IVec2;
use rand::Rng;

use crate::defaults;
use crate::errors::SceneError;
use crate::types::{Point, Size};

/// Tag selecting a path strategy at shape-creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathKind {
    #[default]
    Bounce,
}

impl PathKind {
    pub const ALL: [PathKind; 1] = [PathKind::Bounce];

    pub fn tag(self) -> u8 {
        match self {
            PathKind::Bounce => 0,
        }
    }
}

impl TryFrom<u8> for PathKind {
    type Error = SceneError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(PathKind::Bounce),
            _ => Err(SceneError::UnknownPathKind { tag }),
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::Bounce => write!(f, "bounce"),
        }
    }
}

/// Movement policy contract
#[enum_dispatch]
pub trait PathStrategy {
    /// Next top-left position. `margin` is the box the whole shape must stay in.
    fn advance(&mut self, position: Point, size: Size, margin: Size) -> Point;

    /// The tag this strategy was created from
    fn kind(&self) -> PathKind;
}

/// Travel along a fixed velocity, reflecting off the margin edges.
///
/// Reflection clamps: a step that would leave `[0, margin - size]` on an axis
/// lands exactly on the boundary and flips that velocity component, so the
/// shape never overshoots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BouncePath {
    velocity: IVec2,
}

impl BouncePath {
    pub fn with_velocity(velocity: IVec2) -> Self {
        Self { velocity }
    }

    /// Random velocity with both components non-zero and at most `MAX_SPEED` in magnitude
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let dx = random_component(rng);
        let dy = random_component(rng);
        Self::with_velocity(IVec2::new(dx, dy))
    }

    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }
}

fn random_component<R: Rng>(rng: &mut R) -> i32 {
    let speed = rng.random_range(1..=defaults::MAX_SPEED);
    if rng.random_bool(0.5) { speed } else { -speed }
}

/// Step one axis: returns the new coordinate and updates the velocity on a bounce
fn reflect(coord: i32, velocity: &mut i32, max: i32) -> i32 {
    let next = coord.saturating_add(*velocity);
    if next < 0 {
        *velocity = velocity.abs();
        0
    } else if next > max {
        *velocity = -velocity.abs();
        max
    } else {
        next
    }
}

impl PathStrategy for BouncePath {
    fn advance(&mut self, position: Point, size: Size, margin: Size) -> Point {
        // A margin smaller than the shape pins that axis at 0
        let max_x = (margin.width() - size.width()).max(0);
        let max_y = (margin.height() - size.height()).max(0);

        let before = self.velocity;
        let x = reflect(position.x, &mut self.velocity.x, max_x);
        let y = reflect(position.y, &mut self.velocity.y, max_y);
        if before != self.velocity {
            crate::log::trace!(?before, after = ?self.velocity, x, y, "bounce");
        }

        Point::new(x, y)
    }

    fn kind(&self) -> PathKind {
        PathKind::Bounce
    }
}

/// A shape's owned path strategy
#[enum_dispatch(PathStrategy)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
    Bounce(BouncePath),
}

impl Path {
    /// Build the strategy for `kind` with a pseudo-random initial state
    pub fn new<R: Rng>(kind: PathKind, rng: &mut R) -> Self {
        match kind {
            PathKind::Bounce => BouncePath::random(rng).into(),
        }
    }
}
