//! The shape tree
//!
//! All shapes live in one arena keyed by [`ShapeId`]. Containers hold ordered
//! child handles and every shape holds a non-owning handle to its parent, so
//! the tree has no reference cycles and no self-referential values. Only
//! shapes reachable from the root take part in move, draw and hit-test
//! traversals; a shape detached with [`ShapeTree::remove`] is invisible until
//! it is added somewhere again.

use std::ops::Index;

use rand::SeedableRng;
use rand::rngs::StdRng;
use slotmap::SlotMap;

use crate::errors::SceneError;
use crate::path::{Path, PathKind};
use crate::shapes::{NestedShape, Shape, ShapeId, ShapeKind, ShapeSpec};
use crate::surface::{Surface, Translated};
use crate::types::{Bounds, Color, Offset, Point, Size};

/// Arena of shapes rooted at a canvas-sized container
#[derive(Debug, Clone)]
pub struct ShapeTree {
    shapes: SlotMap<ShapeId, Shape>,
    root: ShapeId,
    /// Source of initial path velocities
    rng: StdRng,
}

impl ShapeTree {
    /// A tree whose velocities are seeded from the OS
    pub fn new(canvas: Size) -> Self {
        Self::with_rng(canvas, StdRng::from_os_rng())
    }

    /// A tree whose velocities are reproducible
    pub fn with_seed(canvas: Size, seed: u64) -> Self {
        Self::with_rng(canvas, StdRng::seed_from_u64(seed))
    }

    fn with_rng(canvas: Size, mut rng: StdRng) -> Self {
        let spec = ShapeSpec {
            kind: ShapeKind::Nested,
            path: PathKind::Bounce,
            position: Point::ORIGIN,
            size: canvas,
            color: Color::BLACK,
            text: String::new(),
        };
        let path = Path::new(spec.path, &mut rng);
        let mut shapes = SlotMap::with_key();
        let root = shapes.insert(Shape::new(spec, canvas, path));

        Self { shapes, root, rng }
    }

    pub fn root(&self) -> ShapeId {
        self.root
    }

    pub fn is_root(&self, id: ShapeId) -> bool {
        id == self.root
    }

    /// Number of shapes in the arena, including the root and detached shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Selection and path access to a single shape. Geometry, color, text and
    /// structure go through the tree so containers can propagate.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    fn shape(&self, id: ShapeId) -> Result<&Shape, SceneError> {
        self.shapes.get(id).ok_or(SceneError::UnknownShape { id })
    }

    fn shape_mut(&mut self, id: ShapeId) -> Result<&mut Shape, SceneError> {
        self.shapes.get_mut(id).ok_or(SceneError::UnknownShape { id })
    }

    fn container_mut(&mut self, id: ShapeId) -> Result<&mut NestedShape, SceneError> {
        self.shape_mut(id)?
            .nested_mut()
            .ok_or(SceneError::NotAContainer { id })
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Create a shape inside `parent` and append it to the child list.
    ///
    /// The new shape's margin is the container's current size. A nested
    /// container starts with one rectangle of half its size, in its own color
    /// and text.
    pub fn create_inner_shape(
        &mut self,
        parent: ShapeId,
        spec: ShapeSpec,
    ) -> Result<ShapeId, SceneError> {
        let container = self.shape(parent)?;
        if !container.is_container() {
            return Err(SceneError::NotAContainer { id: parent });
        }
        let margin = container.size();

        let kind = spec.kind;
        let inner = (kind == ShapeKind::Nested).then(|| ShapeSpec {
            kind: ShapeKind::Rectangle,
            path: PathKind::Bounce,
            position: Point::ORIGIN,
            size: spec.size.half(),
            color: spec.color,
            text: spec.text.clone(),
        });

        let path = Path::new(spec.path, &mut self.rng);
        let mut shape = Shape::new(spec, margin, path);
        shape.set_parent(Some(parent));
        let id = self.shapes.insert(shape);
        self.container_mut(parent)?.push(id);

        crate::log::debug!(?id, ?parent, %kind, "created shape");

        if let Some(inner) = inner {
            self.create_inner_shape(id, inner)?;
        }

        Ok(id)
    }

    /// Attach a detached shape as the last child of `parent`.
    ///
    /// The shape's margin becomes the new container's size.
    pub fn add(&mut self, parent: ShapeId, id: ShapeId) -> Result<(), SceneError> {
        if self.shape(id)?.parent().is_some() {
            return Err(SceneError::AlreadyAttached { id });
        }
        if self.is_ancestor(id, parent) {
            return Err(SceneError::Cycle { id });
        }

        let margin = self.shape(parent)?.size();
        self.container_mut(parent)?.push(id);
        let shape = self.shape_mut(id)?;
        shape.set_parent(Some(parent));
        shape.set_margin_size(margin.width(), margin.height());

        crate::log::debug!(?id, ?parent, "attached shape");
        Ok(())
    }

    /// Detach `id` from `parent`, returning the index it occupied.
    ///
    /// The shape stays in the arena but leaves every traversal.
    pub fn remove(&mut self, parent: ShapeId, id: ShapeId) -> Result<usize, SceneError> {
        match self.shape(id)?.parent() {
            None => {
                crate::log::warn!(?id, "remove of a shape with no parent");
                return Err(SceneError::Detached { id });
            }
            Some(p) if p != parent => return Err(SceneError::NotAChild { id, parent }),
            Some(_) => {}
        }

        let index = self
            .container_mut(parent)?
            .remove(id)
            .ok_or(SceneError::NotAChild { id, parent })?;
        self.shape_mut(id)?.set_parent(None);

        crate::log::debug!(?id, ?parent, index, "detached shape");
        Ok(index)
    }

    /// Detach `id` if attached, then free it and its whole subtree
    pub fn delete(&mut self, id: ShapeId) -> Result<(), SceneError> {
        if self.is_root(id) {
            crate::log::warn!("delete of the root shape");
            return Err(SceneError::RootRemoval);
        }
        if let Some(parent) = self.shape(id)?.parent() {
            self.remove(parent, id)?;
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(shape) = self.shapes.remove(next) {
                stack.extend_from_slice(shape.children());
            }
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Children of `id` in z-order; empty for leaves and unknown handles
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        self.shapes.get(id).map(Shape::children).unwrap_or_default()
    }

    pub fn child_count(&self, id: ShapeId) -> usize {
        self.children(id).len()
    }

    pub fn child_at(&self, parent: ShapeId, index: usize) -> Option<ShapeId> {
        self.children(parent).get(index).copied()
    }

    pub fn index_of(&self, parent: ShapeId, child: ShapeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Leaves are everything that cannot own children
    pub fn is_leaf(&self, id: ShapeId) -> bool {
        self.shapes.get(id).is_none_or(|s| !s.is_container())
    }

    /// Handles from the topmost ancestor down to `id`, inclusive
    pub fn path(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut path = Vec::new();
        let mut cursor = self.shapes.get(id).map(|_| id);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.shapes.get(current).and_then(Shape::parent);
        }
        path.reverse();
        path
    }

    /// True when `ancestor` is `id` or encloses it
    pub fn is_ancestor(&self, ancestor: ShapeId, id: ShapeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.shapes.get(current).and_then(Shape::parent);
        }
        false
    }

    /// Every shape below the root, depth-first in z-order
    pub fn flatten(&self) -> Vec<ShapeId> {
        self.flatten_with_origins()
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// Every shape below the root with the absolute origin of its parent's frame
    pub fn flatten_with_origins(&self) -> Vec<(ShapeId, Offset)> {
        let mut out = Vec::new();
        let root_frame = self.shapes[self.root].position().to_offset();
        let mut stack: Vec<(ShapeId, Offset)> = self
            .children(self.root)
            .iter()
            .rev()
            .map(|&c| (c, root_frame))
            .collect();

        while let Some((id, frame)) = stack.pop() {
            out.push((id, frame));
            let Some(shape) = self.shapes.get(id) else {
                continue;
            };
            let inner = frame + shape.position().to_offset();
            stack.extend(shape.children().iter().rev().map(|&c| (c, inner)));
        }
        out
    }

    /// Bounds of `id` in canvas coordinates
    pub fn absolute_bounds(&self, id: ShapeId) -> Option<Bounds> {
        let shape = self.shapes.get(id)?;
        let mut frame = Offset::ZERO;
        let mut cursor = shape.parent();
        while let Some(parent) = cursor {
            let p = self.shapes.get(parent)?;
            frame += p.position().to_offset();
            cursor = p.parent();
        }
        Some(Bounds::new(shape.position() + frame, shape.size()))
    }

    /// The topmost shape under `p` (canvas coordinates), if any.
    ///
    /// Later shapes in the flattened order are drawn on top, so the last
    /// match wins. The root is never hit.
    pub fn hit_test(&self, p: Point) -> Option<ShapeId> {
        self.flatten_with_origins()
            .into_iter()
            .rev()
            .find(|&(id, frame)| self.shapes[id].contains(p - frame))
            .map(|(id, _)| id)
    }

    /// Selected shapes anywhere in the tree, depth-first
    pub fn selected(&self) -> Vec<ShapeId> {
        self.flatten()
            .into_iter()
            .filter(|&id| self.shapes[id].is_selected())
            .collect()
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    fn for_each_child(&mut self, id: ShapeId, mut f: impl FnMut(&mut Shape)) {
        let children = self.children(id).to_vec();
        for child in children {
            if let Some(shape) = self.shapes.get_mut(child) {
                f(shape);
            }
        }
    }

    /// Set the width; a container also hands it to direct children as margin width
    pub fn set_width(&mut self, id: ShapeId, w: i32) -> Result<(), SceneError> {
        let shape = self.shape_mut(id)?;
        shape.set_width(w);
        let w = shape.width();
        self.for_each_child(id, |child| {
            child.set_margin_size(w, child.margin().height());
        });
        Ok(())
    }

    /// Set the height; a container also hands it to direct children as margin height
    pub fn set_height(&mut self, id: ShapeId, h: i32) -> Result<(), SceneError> {
        let shape = self.shape_mut(id)?;
        shape.set_height(h);
        let h = shape.height();
        self.for_each_child(id, |child| {
            child.set_margin_size(child.margin().width(), h);
        });
        Ok(())
    }

    /// Set the color; a container also recolors its direct children
    pub fn set_color(&mut self, id: ShapeId, color: Color) -> Result<(), SceneError> {
        self.shape_mut(id)?.set_color(color);
        self.for_each_child(id, |child| child.set_color(color));
        Ok(())
    }

    /// Set the text; a container also relabels its direct children
    pub fn set_text(&mut self, id: ShapeId, text: &str) -> Result<(), SceneError> {
        self.shape_mut(id)?.set_text(text);
        self.for_each_child(id, |child| child.set_text(text));
        Ok(())
    }

    /// Place `id` in its parent's frame; the next tick clamps it into the margin
    pub fn set_position(&mut self, id: ShapeId, position: Point) -> Result<(), SceneError> {
        self.shape_mut(id)?.set_position(position);
        Ok(())
    }

    pub fn set_selected(&mut self, id: ShapeId, selected: bool) -> Result<(), SceneError> {
        self.shape_mut(id)?.set_selected(selected);
        Ok(())
    }

    /// Flip the selection of `id`, returning the new state
    pub fn toggle_selected(&mut self, id: ShapeId) -> Result<bool, SceneError> {
        let shape = self.shape_mut(id)?;
        let selected = !shape.is_selected();
        shape.set_selected(selected);
        Ok(selected)
    }

    /// Give the root and every reachable shape the same margin
    pub fn set_all_margins(&mut self, margin: Size) {
        let mut ids = self.flatten();
        ids.push(self.root);
        for id in ids {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.set_margin_size(margin.width(), margin.height());
            }
        }
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Advance every shape below the root by one tick. The root never moves.
    pub fn move_all(&mut self) {
        for child in self.children(self.root).to_vec() {
            self.move_from(child);
        }
    }

    /// Advance `id` then, recursively, all of its descendants
    pub fn move_subtree(&mut self, id: ShapeId) -> Result<(), SceneError> {
        self.shape(id)?;
        self.move_from(id);
        Ok(())
    }

    fn move_from(&mut self, id: ShapeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(shape) = self.shapes.get_mut(next) else {
                continue;
            };
            shape.step();
            stack.extend(shape.children().iter().rev());
        }
    }

    /// Draw the whole tree, starting at the root
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.draw_shape(self.root, surface);
    }

    /// Draw `id` and its descendants in the caller's frame
    pub fn draw_subtree(&self, id: ShapeId, surface: &mut dyn Surface) -> Result<(), SceneError> {
        self.shape(id)?;
        self.draw_shape(id, surface);
        Ok(())
    }

    fn draw_shape(&self, id: ShapeId, surface: &mut dyn Surface) {
        let Some(shape) = self.shapes.get(id) else {
            return;
        };
        shape.draw_self(surface);

        if shape.is_container() {
            let mut inner = Translated::new(surface, shape.position().to_offset());
            for &child in shape.children() {
                self.draw_shape(child, &mut *inner);
            }
        }
    }
}

impl Index<ShapeId> for ShapeTree {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.shapes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::BouncePath;
    use crate::surface::RecordingSurface;
    use glam::IVec2;

    fn tree() -> ShapeTree {
        ShapeTree::with_seed(Size::new(400, 300), 1)
    }

    fn rect(x: i32, y: i32, w: i32, h: i32) -> ShapeSpec {
        ShapeSpec::new(ShapeKind::Rectangle).at(x, y).sized(w, h)
    }

    #[test]
    fn create_appends_one_child_with_container_margin() {
        let mut t = tree();
        let root = t.root();
        let a = t.create_inner_shape(root, rect(0, 0, 20, 20)).unwrap();
        assert_eq!(t.child_count(root), 1);
        assert_eq!(t[a].margin(), Size::new(400, 300));
        assert_eq!(t[a].parent(), Some(root));
        assert_eq!(t.child_at(root, 0), Some(a));
        assert_eq!(t.index_of(root, a), Some(0));
    }

    #[test]
    fn nested_container_starts_with_half_size_rectangle() {
        let mut t = tree();
        let spec = ShapeSpec::new(ShapeKind::Nested)
            .at(10, 10)
            .sized(101, 60)
            .with_color(Color::BLUE)
            .with_text("box");
        let n = t.create_inner_shape(t.root(), spec).unwrap();
        assert_eq!(t.child_count(t.root()), 1);
        assert_eq!(t.child_count(n), 1);

        let inner = t.child_at(n, 0).unwrap();
        let inner = &t[inner];
        assert_eq!(inner.kind(), ShapeKind::Rectangle);
        assert_eq!(inner.size(), Size::new(50, 30));
        assert_eq!(inner.margin(), Size::new(101, 60));
        assert_eq!(inner.position(), Point::ORIGIN);
        assert_eq!(inner.color(), Color::BLUE);
        assert_eq!(inner.text(), "box");
    }

    #[test]
    fn leaves_cannot_own_children() {
        let mut t = tree();
        let a = t.create_inner_shape(t.root(), rect(0, 0, 5, 5)).unwrap();
        assert_eq!(
            t.create_inner_shape(a, rect(0, 0, 1, 1)),
            Err(SceneError::NotAContainer { id: a })
        );
        assert!(t.is_leaf(a));
        assert!(!t.is_leaf(t.root()));
    }

    #[test]
    fn remove_detaches_and_rejects_second_remove() {
        let mut t = tree();
        let root = t.root();
        let a = t.create_inner_shape(root, rect(0, 0, 5, 5)).unwrap();
        let b = t.create_inner_shape(root, rect(0, 0, 5, 5)).unwrap();

        assert_eq!(t.remove(root, a), Ok(0));
        assert_eq!(t.child_count(root), 1);
        assert_eq!(t[a].parent(), None);
        assert_eq!(t.index_of(root, b), Some(0));
        assert_eq!(t.remove(root, a), Err(SceneError::Detached { id: a }));

        // Detached shapes leave every traversal
        assert_eq!(t.flatten(), vec![b]);
    }

    #[test]
    fn remove_from_wrong_parent() {
        let mut t = tree();
        let root = t.root();
        let n = t.create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested)).unwrap();
        let a = t.create_inner_shape(root, rect(0, 0, 5, 5)).unwrap();
        assert_eq!(
            t.remove(n, a),
            Err(SceneError::NotAChild { id: a, parent: n })
        );
    }

    #[test]
    fn add_relocates_and_resets_margin() {
        let mut t = tree();
        let root = t.root();
        let n = t
            .create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested).sized(80, 40))
            .unwrap();
        let a = t.create_inner_shape(root, rect(0, 0, 5, 5)).unwrap();

        assert_eq!(t.add(n, a), Err(SceneError::AlreadyAttached { id: a }));
        t.remove(root, a).unwrap();
        t.add(n, a).unwrap();

        assert_eq!(t[a].parent(), Some(n));
        assert_eq!(t[a].margin(), Size::new(80, 40));
        assert_eq!(t.index_of(n, a), Some(1));
        assert_eq!(t.path(a), vec![root, n, a]);
    }

    #[test]
    fn add_refuses_cycles() {
        let mut t = tree();
        let root = t.root();
        let outer = t.create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested)).unwrap();
        let inner = t.create_inner_shape(outer, ShapeSpec::new(ShapeKind::Nested)).unwrap();
        t.remove(root, outer).unwrap();
        assert_eq!(t.add(inner, outer), Err(SceneError::Cycle { id: outer }));
        assert_eq!(t.add(outer, outer), Err(SceneError::Cycle { id: outer }));
    }

    #[test]
    fn delete_frees_subtree_and_never_the_root() {
        let mut t = tree();
        let root = t.root();
        let n = t.create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested)).unwrap();
        let inner = t.child_at(n, 0).unwrap();
        assert_eq!(t.shape_count(), 3);

        t.delete(n).unwrap();
        assert_eq!(t.shape_count(), 1);
        assert!(!t.contains_shape(inner));
        assert_eq!(t.child_count(root), 0);
        assert_eq!(t.delete(n), Err(SceneError::UnknownShape { id: n }));
        assert_eq!(t.delete(root), Err(SceneError::RootRemoval));
    }

    #[test]
    fn container_setters_reach_children_but_not_grandchildren() {
        let mut t = tree();
        let root = t.root();
        let outer = t
            .create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested).sized(200, 100))
            .unwrap();
        let leaf = t.create_inner_shape(outer, rect(0, 0, 10, 10)).unwrap();
        let inner = t
            .create_inner_shape(outer, ShapeSpec::new(ShapeKind::Nested).sized(60, 60))
            .unwrap();
        let grandchild = t.child_at(inner, 0).unwrap();
        let before = t[grandchild].clone();

        t.set_color(outer, Color::RED).unwrap();
        t.set_text(outer, "x").unwrap();
        t.set_width(outer, 150).unwrap();
        t.set_height(outer, 90).unwrap();

        assert_eq!(t[outer].size(), Size::new(150, 90));
        for child in [leaf, inner] {
            assert_eq!(t[child].color(), Color::RED);
            assert_eq!(t[child].text(), "x");
            assert_eq!(t[child].margin(), Size::new(150, 90));
        }
        assert_eq!(t[grandchild].color(), before.color());
        assert_eq!(t[grandchild].text(), before.text());
        assert_eq!(t[grandchild].margin(), before.margin());
    }

    #[test]
    fn leaf_setters_touch_only_the_leaf() {
        let mut t = tree();
        let a = t.create_inner_shape(t.root(), rect(0, 0, 10, 10)).unwrap();
        t.set_width(a, -3).unwrap();
        assert_eq!(t[a].width(), 0);
        t.set_color(a, Color::GREEN).unwrap();
        assert_eq!(t[t.root()].color(), Color::BLACK);
    }

    #[test]
    fn moves_stay_inside_margins_at_every_level() {
        let mut t = ShapeTree::with_seed(Size::new(400, 300), 99);
        let root = t.root();
        let outer = t
            .create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested).at(30, 30).sized(120, 80))
            .unwrap();
        t.create_inner_shape(outer, ShapeSpec::new(ShapeKind::Oval).sized(30, 20))
            .unwrap();
        t.create_inner_shape(root, rect(100, 100, 20, 20)).unwrap();

        for _ in 0..500 {
            t.move_all();
            for id in t.flatten() {
                let s = &t[id];
                let max_x = (s.margin().width() - s.width()).max(0);
                let max_y = (s.margin().height() - s.height()).max(0);
                assert!((0..=max_x).contains(&s.position().x));
                assert!((0..=max_y).contains(&s.position().y));
            }
        }
        assert_eq!(t[root].position(), Point::ORIGIN);
    }

    #[test]
    fn root_stays_put_after_resize() {
        let mut t = tree();
        let root = t.root();
        let a = t.create_inner_shape(root, rect(10, 10, 20, 20)).unwrap();
        t.get_mut(root)
            .unwrap()
            .set_path(BouncePath::with_velocity(IVec2::new(7, 7)));
        t.set_width(root, 100).unwrap();
        t.set_height(root, 80).unwrap();

        for _ in 0..5 {
            t.move_all();
        }
        assert_eq!(t[root].position(), Point::ORIGIN);
        assert_eq!(t[a].margin(), Size::new(100, 80));
        assert!(t[a].position().x <= 80 && t[a].position().y <= 60);
    }

    #[test]
    fn move_subtree_only_moves_that_branch() {
        let mut t = tree();
        let root = t.root();
        let a = t.create_inner_shape(root, rect(50, 50, 10, 10)).unwrap();
        let b = t.create_inner_shape(root, rect(50, 50, 10, 10)).unwrap();
        t.get_mut(a).unwrap().set_path(BouncePath::with_velocity(IVec2::new(2, 2)));

        t.move_subtree(a).unwrap();
        assert_eq!(t[a].position(), Point::new(52, 52));
        assert_eq!(t[b].position(), Point::new(50, 50));
    }

    #[test]
    fn hit_test_uses_absolute_frames_and_topmost_wins() {
        let mut t = tree();
        let root = t.root();
        let outer = t
            .create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested).at(100, 100).sized(100, 100))
            .unwrap();
        let first_inner = t.child_at(outer, 0).unwrap();
        let inner = t.create_inner_shape(outer, rect(10, 10, 20, 20)).unwrap();
        let late = t.create_inner_shape(root, rect(150, 150, 100, 100)).unwrap();

        // (115, 115) is inside outer, its 50x50 default child and `inner`
        assert_eq!(t.hit_test(Point::new(115, 115)), Some(inner));
        assert_eq!(t.hit_test(Point::new(140, 140)), Some(first_inner));
        assert_eq!(t.hit_test(Point::new(160, 160)), Some(late));
        assert_eq!(t.hit_test(Point::new(105, 190)), Some(outer));
        assert_eq!(t.hit_test(Point::new(5, 5)), None);

        assert_eq!(
            t.absolute_bounds(inner),
            Some(Bounds::new(Point::new(110, 110), Size::new(20, 20)))
        );
    }

    #[test]
    fn global_margins_cover_every_level() {
        let mut t = tree();
        let n = t.create_inner_shape(t.root(), ShapeSpec::new(ShapeKind::Nested)).unwrap();
        let inner = t.child_at(n, 0).unwrap();
        t.set_all_margins(Size::new(640, 480));
        for id in [t.root(), n, inner] {
            assert_eq!(t[id].margin(), Size::new(640, 480));
        }
    }

    #[test]
    fn draw_translates_into_container_frames() {
        let mut t = ShapeTree::with_seed(Size::new(400, 300), 3);
        let root = t.root();
        let n = t
            .create_inner_shape(
                root,
                ShapeSpec::new(ShapeKind::Nested).at(10, 20).sized(40, 20).with_text(""),
            )
            .unwrap();
        t.set_selected(n, true).unwrap();
        t.create_inner_shape(root, ShapeSpec::new(ShapeKind::Oval).at(5, 5).sized(8, 8).with_text("o"))
            .unwrap();

        let mut surface = RecordingSurface::new();
        t.draw(&mut surface);
        assert_eq!(surface.origin(), Offset::ZERO);
        insta::assert_snapshot!(surface.log(), @r#"
        paint #000000
        rect 0 0 400 300
        translate 0 0
        paint #000000
        rect 10 20 40 20
        paint #000000
        rect 8 18 4 4
        rect 48 18 4 4
        rect 48 38 4 4
        rect 8 38 4 4
        translate 10 20
        paint #ffc800
        rect 0 0 20 10
        translate -10 -20
        paint #ffc800
        oval 5 5 8 8
        paint #000000
        text "o" 9 9
        translate 0 0
        "#);
    }

    #[test]
    fn path_and_ancestry() {
        let mut t = tree();
        let root = t.root();
        let n = t.create_inner_shape(root, ShapeSpec::new(ShapeKind::Nested)).unwrap();
        let inner = t.child_at(n, 0).unwrap();
        assert_eq!(t.path(inner), vec![root, n, inner]);
        assert_eq!(t.path(root), vec![root]);
        assert!(t.is_ancestor(root, inner));
        assert!(!t.is_ancestor(inner, n));
    }
}
