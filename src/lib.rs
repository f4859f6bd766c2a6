//! Nested-shape animation canvas.
//!
//! A [`Scene`] owns a tree of shapes rooted at a canvas-sized container.
//! Every shape moves along its own [`Path`] each tick, bouncing inside the
//! frame of its parent; containers translate the drawing origin for their
//! children so nesting composes. Rendering goes through the [`Surface`]
//! capability, and tree views stay in sync through [`TreeListener`].
//!
//! ```
//! use shapenest::{ClickOutcome, RecordingSurface, Scene, SceneConfig};
//!
//! let mut scene = Scene::new(SceneConfig::new().with_canvas(400, 300).with_seed(7));
//! let ClickOutcome::Created(id) = scene.click(50, 50)? else { unreachable!() };
//! scene.tick();
//!
//! let mut surface = RecordingSurface::new();
//! scene.render(&mut surface);
//! assert!(scene.shape(id).is_some());
//! # Ok::<(), shapenest::SceneError>(())
//! ```

pub mod animation;
pub mod config;
pub mod defaults;
pub mod errors;
pub mod events;
pub mod log;
pub mod path;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod tree;
pub mod types;

pub use animation::{Animator, SharedScene, StopHandle, Ticker};
pub use config::SceneConfig;
pub use errors::SceneError;
pub use events::{ListenerId, TreeEvent, TreeListener};
pub use path::{BouncePath, Path, PathKind, PathStrategy};
pub use scene::{ClickOutcome, Scene};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeSpec};
pub use surface::{DrawCommand, RecordingSurface, Surface, Translated};
pub use tree::ShapeTree;
pub use types::{Bounds, Color, Offset, Point, Size};
