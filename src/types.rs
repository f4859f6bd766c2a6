//! Strongly-typed geometry primitives for shapenest.
//!
//! All canvas geometry is in integer pixels:
//! - `Point` is an absolute position in some coordinate frame
//! - `Offset` is a displacement; Point + Offset = Point
//! - `Size` is always non-negative (negative inputs clamp to zero)
//!
//! Point/offset and edge arithmetic saturates at the `i32` range.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use glam::IVec2;

/// A position in pixels (top-left origin, y grows downwards)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Displacement from the origin to this point
    pub fn to_offset(self) -> Offset {
        Offset::new(self.x, self.y)
    }
}

impl From<IVec2> for Point {
    fn from(v: IVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for IVec2 {
    fn from(p: Point) -> Self {
        IVec2::new(p.x, p.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement/offset vector (not an absolute position)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Offset { dx, dy }
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy)
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

/// Add an offset to a point to get a new point
impl Add<Offset> for Point {
    type Output = Point;
    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

/// Subtract an offset from a point (moves into a child frame)
impl Sub<Offset> for Point {
    type Output = Point;
    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_sub(rhs.dx), self.y.saturating_sub(rhs.dy))
    }
}

/// Subtract two points to get an offset
impl Sub<Point> for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in pixels, never negative
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Size {
    w: i32,
    h: i32,
}

impl Size {
    pub const ZERO: Size = Size { w: 0, h: 0 };

    /// Create a size, clamping negative dimensions to zero
    pub const fn new(w: i32, h: i32) -> Self {
        Size {
            w: if w < 0 { 0 } else { w },
            h: if h < 0 { 0 } else { h },
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.w
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.h
    }

    /// Same height, new width (clamped)
    pub fn with_width(self, w: i32) -> Self {
        Size::new(w, self.h)
    }

    /// Same width, new height (clamped)
    pub fn with_height(self, h: i32) -> Self {
        Size::new(self.w, h)
    }

    /// Both dimensions halved, rounding towards zero
    pub fn half(self) -> Self {
        Size::new(self.w / 2, self.h / 2)
    }

    /// True when either dimension is zero
    pub fn is_degenerate(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Axis-aligned bounding box: top-left corner plus size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub fn new(origin: Point, size: Size) -> Self {
        Bounds { origin, size }
    }

    pub fn x(&self) -> i32 {
        self.origin.x
    }

    pub fn y(&self) -> i32 {
        self.origin.y
    }

    pub fn width(&self) -> i32 {
        self.size.width()
    }

    pub fn height(&self) -> i32 {
        self.size.height()
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width())
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height())
    }

    /// Center point, rounding towards the origin
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x.saturating_add(self.size.width() / 2),
            self.origin.y.saturating_add(self.size.height() / 2),
        )
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            Point::new(self.right(), self.y()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x(), self.bottom()),
        ]
    }

    /// Half-open containment test: `[x, x+w) × [y, y+h)`.
    /// Degenerate bounds contain nothing.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x() && p.x < self.right() && p.y >= self.y() && p.y < self.bottom()
    }
}

/// An opaque RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Unpack from 0xRRGGBB
    pub const fn from_u32(rgb: u32) -> Self {
        Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Pack as 0xRRGGBB
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
