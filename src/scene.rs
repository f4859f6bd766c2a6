//! Scene orchestration
//!
//! The [`Scene`] owns the shape tree and the "current" creation defaults,
//! turns pointer clicks into selection toggles or new shapes, applies bulk
//! attribute changes to the selection, and tells subscribed tree listeners
//! about every structural edit it performs.

use std::time::Duration;

use crate::config::SceneConfig;
use crate::errors::SceneError;
use crate::events::{ListenerId, Listeners, TreeEvent, TreeListener};
use crate::path::PathKind;
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeSpec};
use crate::surface::Surface;
use crate::tree::ShapeTree;
use crate::types::{Color, Point, Size};

/// What a pointer click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An existing shape was hit and its selection flipped
    Toggled { id: ShapeId, selected: bool },
    /// Nothing was hit; a new shape was created under the root
    Created(ShapeId),
}

/// The animated canvas: shape tree, creation defaults and tree listeners
#[derive(Debug)]
pub struct Scene {
    tree: ShapeTree,
    shape_size: Size,
    color: Color,
    text: String,
    shape_kind: ShapeKind,
    path_kind: PathKind,
    tick_period: Duration,
    ticks: u64,
    listeners: Listeners,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let tree = match config.seed {
            Some(seed) => ShapeTree::with_seed(config.canvas, seed),
            None => ShapeTree::new(config.canvas),
        };

        Self {
            tree,
            shape_size: config.shape_size,
            color: config.color,
            text: config.text,
            shape_kind: config.shape_kind,
            path_kind: config.path_kind,
            tick_period: config.tick_period,
            ticks: 0,
            listeners: Listeners::new(),
        }
    }

    pub fn tree(&self) -> &ShapeTree {
        &self.tree
    }

    pub fn root(&self) -> ShapeId {
        self.tree.root()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.tree.get(id)
    }

    /// Selection and path access to one shape; does not notify listeners.
    ///
    /// Geometry, color and text go through the `set_shape_*` methods so that
    /// containers hand the change on to their children.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.tree.get_mut(id)
    }

    pub fn canvas(&self) -> Size {
        self.tree[self.tree.root()].size()
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Ticks run since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Advance every shape by one step
    pub fn tick(&mut self) {
        self.tree.move_all();
        self.ticks += 1;
        crate::log::trace!(ticks = self.ticks, "tick");
    }

    /// Draw the whole tree; never mutates the scene
    pub fn render(&self, surface: &mut dyn Surface) {
        self.tree.draw(surface);
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Toggle the topmost shape under `(x, y)`, or create a default shape there
    pub fn click(&mut self, x: i32, y: i32) -> Result<ClickOutcome, SceneError> {
        if let Some(id) = self.tree.hit_test(Point::new(x, y)) {
            let selected = self.tree.toggle_selected(id)?;
            crate::log::debug!(?id, selected, "toggled selection");
            return Ok(ClickOutcome::Toggled { id, selected });
        }

        let root = self.tree.root();
        let spec = self.current_spec(self.shape_size).at(x, y);
        let id = self.create_and_notify(root, spec)?;
        Ok(ClickOutcome::Created(id))
    }

    // ========================================================================
    // Structural edits
    // ========================================================================

    /// Create a shape of the current kind at `(0, 0)` inside `parent`.
    ///
    /// Directly under the root it gets the current size; deeper it gets half.
    pub fn add_shape_node(&mut self, parent: ShapeId) -> Result<ShapeId, SceneError> {
        let size = if self.tree.is_root(parent) {
            self.shape_size
        } else {
            self.shape_size.half()
        };
        let spec = self.current_spec(size);
        self.create_and_notify(parent, spec)
    }

    /// Remove `id` and its subtree from the tree
    pub fn remove_node(&mut self, id: ShapeId) -> Result<(), SceneError> {
        if self.tree.is_root(id) {
            crate::log::warn!("remove of the root shape");
            return Err(SceneError::RootRemoval);
        }
        let parent = self
            .tree
            .get(id)
            .ok_or(SceneError::UnknownShape { id })?
            .parent();
        let Some(parent) = parent else {
            crate::log::warn!(?id, "remove of a shape with no parent");
            return Err(SceneError::Detached { id });
        };

        let path = self.tree.path(parent);
        let index = self.tree.remove(parent, id)?;
        crate::log::debug!(?id, ?parent, index, "removed node");

        // Listeners can still read the detached subtree; it is freed afterwards
        self.listeners
            .notify_removed(&TreeEvent::single(path, index, id));
        self.tree.delete(id)
    }

    fn current_spec(&self, size: Size) -> ShapeSpec {
        ShapeSpec {
            kind: self.shape_kind,
            path: self.path_kind,
            position: Point::ORIGIN,
            size,
            color: self.color,
            text: self.text.clone(),
        }
    }

    fn create_and_notify(&mut self, parent: ShapeId, spec: ShapeSpec) -> Result<ShapeId, SceneError> {
        let id = self.tree.create_inner_shape(parent, spec)?;
        // Just appended, so it is the last child
        let index = self.tree.child_count(parent) - 1;
        let event = TreeEvent::single(self.tree.path(parent), index, id);
        self.listeners.notify_inserted(&event);
        Ok(id)
    }

    // ========================================================================
    // Selection and bulk attributes
    // ========================================================================

    pub fn set_selected(&mut self, id: ShapeId, selected: bool) -> Result<(), SceneError> {
        self.tree.set_selected(id, selected)
    }

    /// Selected shapes at every nesting level
    pub fn selected(&self) -> Vec<ShapeId> {
        self.tree.selected()
    }

    pub fn set_shape_position(&mut self, id: ShapeId, x: i32, y: i32) -> Result<(), SceneError> {
        self.tree.set_position(id, Point::new(x, y))
    }

    /// Width of one shape; a container re-margins its direct children
    pub fn set_shape_width(&mut self, id: ShapeId, w: i32) -> Result<(), SceneError> {
        self.tree.set_width(id, w)
    }

    /// Height of one shape; a container re-margins its direct children
    pub fn set_shape_height(&mut self, id: ShapeId, h: i32) -> Result<(), SceneError> {
        self.tree.set_height(id, h)
    }

    pub fn set_shape_color(&mut self, id: ShapeId, color: Color) -> Result<(), SceneError> {
        self.tree.set_color(id, color)
    }

    pub fn set_shape_text(&mut self, id: ShapeId, text: &str) -> Result<(), SceneError> {
        self.tree.set_text(id, text)
    }

    fn apply_to_selected(
        &mut self,
        mut apply: impl FnMut(&mut ShapeTree, ShapeId) -> Result<(), SceneError>,
    ) -> Result<(), SceneError> {
        for id in self.tree.selected() {
            apply(&mut self.tree, id)?;
        }
        Ok(())
    }

    /// New default width, also applied to every selected shape
    pub fn set_current_width(&mut self, w: i32) -> Result<(), SceneError> {
        self.shape_size = self.shape_size.with_width(w);
        let w = self.shape_size.width();
        self.apply_to_selected(|tree, id| tree.set_width(id, w))
    }

    /// New default height, also applied to every selected shape
    pub fn set_current_height(&mut self, h: i32) -> Result<(), SceneError> {
        self.shape_size = self.shape_size.with_height(h);
        let h = self.shape_size.height();
        self.apply_to_selected(|tree, id| tree.set_height(id, h))
    }

    /// New default color, also applied to every selected shape
    pub fn set_current_color(&mut self, color: Color) -> Result<(), SceneError> {
        self.color = color;
        self.apply_to_selected(|tree, id| tree.set_color(id, color))
    }

    /// New default text, also applied to every selected shape
    pub fn set_current_text(&mut self, text: impl Into<String>) -> Result<(), SceneError> {
        self.text = text.into();
        let text = self.text.clone();
        self.apply_to_selected(|tree, id| tree.set_text(id, &text))
    }

    pub fn current_width(&self) -> i32 {
        self.shape_size.width()
    }

    pub fn current_height(&self) -> i32 {
        self.shape_size.height()
    }

    pub fn current_color(&self) -> Color {
        self.color
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    pub fn current_shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    pub fn set_current_shape_kind(&mut self, kind: ShapeKind) {
        self.shape_kind = kind;
    }

    /// Decode a UI-supplied shape tag; unknown tags leave the current kind alone
    pub fn set_current_shape_kind_tag(&mut self, tag: u8) -> Result<(), SceneError> {
        self.shape_kind = ShapeKind::try_from(tag).inspect_err(|_err| {
            crate::log::warn!(tag, "unknown shape kind tag");
        })?;
        Ok(())
    }

    pub fn current_path_kind(&self) -> PathKind {
        self.path_kind
    }

    pub fn set_current_path_kind(&mut self, kind: PathKind) {
        self.path_kind = kind;
    }

    /// Decode a UI-supplied path tag; unknown tags leave the current kind alone
    pub fn set_current_path_kind_tag(&mut self, tag: u8) -> Result<(), SceneError> {
        self.path_kind = PathKind::try_from(tag).inspect_err(|_err| {
            crate::log::warn!(tag, "unknown path kind tag");
        })?;
        Ok(())
    }

    // ========================================================================
    // Canvas
    // ========================================================================

    /// The canvas changed size: resize the root and re-margin every shape to it
    pub fn resize(&mut self, w: i32, h: i32) -> Result<(), SceneError> {
        let root = self.tree.root();
        self.tree.set_width(root, w)?;
        self.tree.set_height(root, h)?;
        let canvas = self.canvas();
        self.tree.set_all_margins(canvas);
        crate::log::debug!(%canvas, "resized canvas");
        Ok(())
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    pub fn subscribe(&mut self, listener: impl TreeListener + Send + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::BouncePath;
    use crate::surface::RecordingSurface;
    use glam::IVec2;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Seen {
        Inserted(TreeEvent),
        Removed(TreeEvent),
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Seen>>>);

    impl Recorder {
        fn take(&self) -> Vec<Seen> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl TreeListener for Recorder {
        fn nodes_inserted(&mut self, event: &TreeEvent) {
            self.0.lock().unwrap().push(Seen::Inserted(event.clone()));
        }

        fn nodes_removed(&mut self, event: &TreeEvent) {
            self.0.lock().unwrap().push(Seen::Removed(event.clone()));
        }
    }

    fn scene() -> Scene {
        Scene::new(SceneConfig::new().with_canvas(400, 300).with_seed(11))
    }

    #[test]
    fn click_on_empty_canvas_creates_and_notifies() {
        let mut scene = scene();
        let recorder = Recorder::default();
        scene.subscribe(recorder.clone());

        let ClickOutcome::Created(id) = scene.click(50, 50).unwrap() else {
            panic!("expected a new shape");
        };
        let root = scene.root();
        let shape = scene.shape(id).unwrap();
        assert_eq!(shape.position(), Point::new(50, 50));
        assert_eq!(shape.size(), Size::new(100, 50));
        assert_eq!(shape.kind(), ShapeKind::Rectangle);
        assert_eq!(
            recorder.take(),
            vec![Seen::Inserted(TreeEvent::single(vec![root], 0, id))]
        );
    }

    #[test]
    fn click_on_shape_toggles_without_creating() {
        let mut scene = scene();
        let recorder = Recorder::default();
        let ClickOutcome::Created(id) = scene.click(50, 50).unwrap() else {
            panic!("expected a new shape");
        };
        scene.subscribe(recorder.clone());

        assert_eq!(
            scene.click(60, 60).unwrap(),
            ClickOutcome::Toggled { id, selected: true }
        );
        assert_eq!(
            scene.click(60, 60).unwrap(),
            ClickOutcome::Toggled { id, selected: false }
        );
        assert_eq!(scene.tree().child_count(scene.root()), 1);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn bulk_setters_reach_selection_at_any_depth() {
        let mut scene = scene();
        let root = scene.root();
        scene.set_current_shape_kind(ShapeKind::Nested);
        let outer = scene.add_shape_node(root).unwrap();
        scene.set_current_shape_kind(ShapeKind::Oval);
        let deep = scene.add_shape_node(outer).unwrap();
        let other = scene.add_shape_node(root).unwrap();
        scene.set_selected(deep, true).unwrap();

        scene.set_current_color(Color::RED).unwrap();
        scene.set_current_text("deep").unwrap();
        scene.set_current_width(12).unwrap();

        let deep_shape = scene.shape(deep).unwrap();
        assert_eq!(deep_shape.color(), Color::RED);
        assert_eq!(deep_shape.text(), "deep");
        assert_eq!(deep_shape.width(), 12);
        assert_eq!(scene.shape(other).unwrap().color(), Color::ORANGE);
        assert_eq!(scene.current_color(), Color::RED);
        assert_eq!(scene.current_width(), 12);
    }

    #[test]
    fn selected_container_propagates_one_level() {
        let mut scene = scene();
        let root = scene.root();
        scene.set_current_shape_kind(ShapeKind::Nested);
        let outer = scene.add_shape_node(root).unwrap();
        let inner = scene.add_shape_node(outer).unwrap();
        let grandchild = scene.tree().child_at(inner, 0).unwrap();
        scene.set_selected(outer, true).unwrap();

        scene.set_current_height(70).unwrap();
        assert_eq!(scene.shape(outer).unwrap().height(), 70);
        assert_eq!(scene.shape(inner).unwrap().margin().height(), 70);
        assert_eq!(scene.shape(grandchild).unwrap().margin().height(), 25);
    }

    #[test]
    fn add_shape_node_halves_size_below_root() {
        let mut scene = scene();
        let root = scene.root();
        let recorder = Recorder::default();
        scene.subscribe(recorder.clone());

        scene.set_current_shape_kind_tag(2).unwrap();
        let outer = scene.add_shape_node(root).unwrap();
        scene.set_current_shape_kind_tag(0).unwrap();
        let child = scene.add_shape_node(outer).unwrap();

        assert_eq!(scene.shape(outer).unwrap().size(), Size::new(100, 50));
        assert_eq!(scene.shape(outer).unwrap().position(), Point::ORIGIN);
        assert_eq!(scene.shape(child).unwrap().size(), Size::new(50, 25));
        assert_eq!(
            recorder.take(),
            vec![
                Seen::Inserted(TreeEvent::single(vec![root], 0, outer)),
                // index 1: the container already holds its default rectangle
                Seen::Inserted(TreeEvent::single(vec![root, outer], 1, child)),
            ]
        );
    }

    #[test]
    fn unknown_tags_fail_fast_and_keep_current_kind() {
        let mut scene = scene();
        scene.set_current_shape_kind(ShapeKind::Oval);
        assert_eq!(
            scene.set_current_shape_kind_tag(7),
            Err(SceneError::UnknownShapeKind { tag: 7 })
        );
        assert_eq!(scene.current_shape_kind(), ShapeKind::Oval);
        assert_eq!(
            scene.set_current_path_kind_tag(1),
            Err(SceneError::UnknownPathKind { tag: 1 })
        );
        assert_eq!(scene.current_path_kind(), PathKind::Bounce);
    }

    #[test]
    fn remove_node_notifies_with_former_index() {
        let mut scene = scene();
        let root = scene.root();
        let a = scene.add_shape_node(root).unwrap();
        let b = scene.add_shape_node(root).unwrap();
        let recorder = Recorder::default();
        let listener = scene.subscribe(recorder.clone());

        scene.remove_node(a).unwrap();
        assert_eq!(
            recorder.take(),
            vec![Seen::Removed(TreeEvent::single(vec![root], 0, a))]
        );
        assert_eq!(scene.tree().children(root), &[b]);
        assert!(scene.shape(a).is_none());
        assert_eq!(scene.remove_node(a), Err(SceneError::UnknownShape { id: a }));
        assert_eq!(scene.remove_node(root), Err(SceneError::RootRemoval));

        assert!(scene.unsubscribe(listener));
        scene.remove_node(b).unwrap();
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn resizing_a_container_remargins_its_children() {
        let mut scene = scene();
        let root = scene.root();
        scene.set_current_shape_kind(ShapeKind::Nested);
        let outer = scene.add_shape_node(root).unwrap();
        let inner = scene.tree().child_at(outer, 0).unwrap();

        scene.set_shape_width(outer, 30).unwrap();
        scene.set_shape_height(outer, 40).unwrap();
        scene.set_shape_color(outer, Color::BLUE).unwrap();
        assert_eq!(scene.shape(outer).unwrap().size(), Size::new(30, 40));
        assert_eq!(scene.shape(inner).unwrap().margin(), Size::new(30, 40));
        assert_eq!(scene.shape(inner).unwrap().color(), Color::BLUE);

        scene.set_shape_position(inner, 500, 500).unwrap();
        scene.tick();
        let max = scene.shape(inner).unwrap().margin().width() - scene.shape(inner).unwrap().width();
        assert_eq!(scene.shape(inner).unwrap().position().x, max.max(0));
    }

    #[test]
    fn removal_notification_carries_the_detached_subtree() {
        let mut scene = scene();
        let root = scene.root();
        scene.set_current_shape_kind(ShapeKind::Nested);
        let outer = scene.add_shape_node(root).unwrap();
        let inner = scene.tree().child_at(outer, 0).unwrap();
        let recorder = Recorder::default();
        scene.subscribe(recorder.clone());

        scene.remove_node(outer).unwrap();
        assert_eq!(
            recorder.take(),
            vec![Seen::Removed(TreeEvent::single(vec![root], 0, outer))]
        );
        assert!(scene.shape(outer).is_none());
        assert!(scene.shape(inner).is_none());
        assert_eq!(scene.tree().shape_count(), 1);
    }

    #[test]
    fn resize_remargins_every_level() {
        let mut scene = scene();
        let root = scene.root();
        scene.set_current_shape_kind(ShapeKind::Nested);
        let outer = scene.add_shape_node(root).unwrap();
        let inner = scene.tree().child_at(outer, 0).unwrap();

        scene.resize(800, 600).unwrap();
        assert_eq!(scene.canvas(), Size::new(800, 600));
        for id in [root, outer, inner] {
            assert_eq!(scene.shape(id).unwrap().margin(), Size::new(800, 600));
        }
    }

    #[test]
    fn tick_moves_and_render_balances_translation() {
        let mut scene = scene();
        let ClickOutcome::Created(id) = scene.click(50, 50).unwrap() else {
            panic!("expected a new shape");
        };
        scene
            .shape_mut(id)
            .unwrap()
            .set_path(BouncePath::with_velocity(IVec2::new(3, -2)));
        scene.tick();
        assert_eq!(scene.shape(id).unwrap().position(), Point::new(53, 48));
        assert_eq!(scene.ticks(), 1);

        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);
        assert_eq!(surface.origin(), crate::types::Offset::ZERO);
        assert!(!surface.commands().is_empty());
    }
}
