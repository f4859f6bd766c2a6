//! Shape nodes
//!
//! Every node in the tree is a [`Shape`]: common geometry and style plus a
//! [`ShapeVariant`] that decides how the outline is drawn. The variant set is
//! closed: rectangle, oval, and the nested container that owns children.
//!
//! Shapes are never built loose. They are created by
//! [`ShapeTree::create_inner_shape`](crate::tree::ShapeTree::create_inner_shape),
//! which is why the constructors here are crate-private.

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::defaults;
use crate::errors::SceneError;
use crate::path::{Path, PathKind, PathStrategy};
use crate::surface::Surface;
use crate::types::{Bounds, Color, Point, Size};

slotmap::new_key_type! {
    /// Handle to a shape stored in a [`ShapeTree`](crate::tree::ShapeTree)
    pub struct ShapeId;
}

/// Tag selecting the shape variant at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Oval,
    Nested,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Oval, ShapeKind::Nested];

    pub fn tag(self) -> u8 {
        match self {
            ShapeKind::Rectangle => 0,
            ShapeKind::Oval => 1,
            ShapeKind::Nested => 2,
        }
    }
}

impl TryFrom<u8> for ShapeKind {
    type Error = SceneError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ShapeKind::Rectangle),
            1 => Ok(ShapeKind::Oval),
            2 => Ok(ShapeKind::Nested),
            _ => Err(SceneError::UnknownShapeKind { tag }),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => write!(f, "rectangle"),
            ShapeKind::Oval => write!(f, "oval"),
            ShapeKind::Nested => write!(f, "nested"),
        }
    }
}

/// Variant-specific drawing behavior
#[enum_dispatch]
pub trait Outline {
    fn kind(&self) -> ShapeKind;

    /// Draw the variant's outline for the given bounds
    fn draw_outline(&self, bounds: Bounds, color: Color, surface: &mut dyn Surface);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectangleShape;

impl Outline for RectangleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn draw_outline(&self, bounds: Bounds, color: Color, surface: &mut dyn Surface) {
        surface.set_paint(color);
        surface.draw_rect(bounds.x(), bounds.y(), bounds.width(), bounds.height());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OvalShape;

impl Outline for OvalShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Oval
    }

    fn draw_outline(&self, bounds: Bounds, color: Color, surface: &mut dyn Surface) {
        surface.set_paint(color);
        surface.draw_oval(bounds.x(), bounds.y(), bounds.width(), bounds.height());
    }
}

/// Container variant: owns an ordered list of child handles.
///
/// Order is z-order: children draw and hit-test in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestedShape {
    children: Vec<ShapeId>,
}

impl NestedShape {
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.children.iter().position(|&c| c == id)
    }

    pub(crate) fn push(&mut self, id: ShapeId) {
        self.children.push(id);
    }

    /// Remove `id`, returning the index it occupied
    pub(crate) fn remove(&mut self, id: ShapeId) -> Option<usize> {
        let index = self.index_of(id)?;
        self.children.remove(index);
        Some(index)
    }
}

impl Outline for NestedShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Nested
    }

    fn draw_outline(&self, bounds: Bounds, _color: Color, surface: &mut dyn Surface) {
        surface.set_paint(defaults::OUTLINE_COLOR);
        surface.draw_rect(bounds.x(), bounds.y(), bounds.width(), bounds.height());
    }
}

/// The closed set of shape variants
#[enum_dispatch(Outline)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeVariant {
    Rectangle(RectangleShape),
    Oval(OvalShape),
    Nested(NestedShape),
}

impl ShapeVariant {
    pub fn new(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => RectangleShape.into(),
            ShapeKind::Oval => OvalShape.into(),
            ShapeKind::Nested => NestedShape::default().into(),
        }
    }

    pub fn as_nested(&self) -> Option<&NestedShape> {
        match self {
            ShapeVariant::Nested(n) => Some(n),
            _ => None,
        }
    }

    pub(crate) fn as_nested_mut(&mut self) -> Option<&mut NestedShape> {
        match self {
            ShapeVariant::Nested(n) => Some(n),
            _ => None,
        }
    }
}

/// Attributes of a shape to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub path: PathKind,
    pub position: Point,
    pub size: Size,
    pub color: Color,
    pub text: String,
}

impl Default for ShapeSpec {
    fn default() -> Self {
        Self {
            kind: ShapeKind::default(),
            path: PathKind::default(),
            position: Point::ORIGIN,
            size: defaults::SHAPE_SIZE,
            color: defaults::SHAPE_COLOR,
            text: defaults::SHAPE_TEXT.to_string(),
        }
    }
}

impl ShapeSpec {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn sized(mut self, w: i32, h: i32) -> Self {
        self.size = Size::new(w, h);
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

    pub fn with_path(mut self, path: PathKind) -> Self {
        self.path = path;
        self
    }
}

/// A node of the shape tree
#[derive(Debug, Clone)]
pub struct Shape {
    position: Point,
    size: Size,
    /// Box the path keeps this shape inside; the enclosing container's size
    margin: Size,
    color: Color,
    text: String,
    selected: bool,
    path: Path,
    /// Non-owning back-reference; `None` for the root and for detached shapes
    parent: Option<ShapeId>,
    variant: ShapeVariant,
}

impl Shape {
    pub(crate) fn new(spec: ShapeSpec, margin: Size, path: Path) -> Self {
        Self {
            position: spec.position,
            size: spec.size,
            margin,
            color: spec.color,
            text: spec.text,
            selected: false,
            path,
            parent: None,
            variant: ShapeVariant::new(spec.kind),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.width()
    }

    pub fn height(&self) -> i32 {
        self.size.height()
    }

    pub fn margin(&self) -> Size {
        self.margin
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn kind(&self) -> ShapeKind {
        self.variant.kind()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_kind(&self) -> PathKind {
        self.path.kind()
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn variant(&self) -> &ShapeVariant {
        &self.variant
    }

    pub fn is_container(&self) -> bool {
        self.variant.as_nested().is_some()
    }

    /// Children in z-order; empty for leaves
    pub fn children(&self) -> &[ShapeId] {
        match self.variant.as_nested() {
            Some(nested) => nested.children(),
            None => &[],
        }
    }

    /// Bounding box in the parent's coordinate frame
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.size)
    }

    /// Point-in-bounding-box test; `p` must be in the parent's coordinate frame
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Own width only; negative values clamp to zero
    pub(crate) fn set_width(&mut self, w: i32) {
        self.size = self.size.with_width(w);
    }

    /// Own height only; negative values clamp to zero
    pub(crate) fn set_height(&mut self, h: i32) {
        self.size = self.size.with_height(h);
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn set_margin_size(&mut self, w: i32, h: i32) {
        self.margin = Size::new(w, h);
    }

    /// Swap the path strategy, e.g. to pin a known velocity
    pub fn set_path(&mut self, path: impl Into<Path>) {
        self.path = path.into();
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ShapeId>) {
        self.parent = parent;
    }

    pub(crate) fn nested_mut(&mut self) -> Option<&mut NestedShape> {
        self.variant.as_nested_mut()
    }

    /// Advance this shape alone by one tick
    pub(crate) fn step(&mut self) {
        self.position = self.path.advance(self.position, self.size, self.margin);
    }

    /// Draw outline, selection handles and label. Children are drawn by the tree.
    pub(crate) fn draw_self(&self, surface: &mut dyn Surface) {
        let bounds = self.bounds();
        self.variant.draw_outline(bounds, self.color, surface);

        if self.selected {
            draw_handles(bounds, surface);
        }

        if !self.text.is_empty() {
            let center = bounds.center();
            surface.set_paint(defaults::LABEL_COLOR);
            surface.draw_string(&self.text, center.x, center.y);
        }
    }
}

/// A small square centred on each corner of `bounds`
fn draw_handles(bounds: Bounds, surface: &mut dyn Surface) {
    let half = defaults::HANDLE_SIZE / 2;
    surface.set_paint(defaults::HANDLE_COLOR);
    for corner in bounds.corners() {
        surface.draw_rect(
            corner.x - half,
            corner.y - half,
            defaults::HANDLE_SIZE,
            defaults::HANDLE_SIZE,
        );
    }
}
