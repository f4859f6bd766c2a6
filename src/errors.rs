//! Error types with diagnostics using miette
//!
//! Every variant describes a broken caller contract: a stale handle, an
//! unknown creation tag, or a structural edit the tree cannot honor.

use miette::Diagnostic;
use thiserror::Error;

use crate::shapes::ShapeId;

/// Errors raised by the shape tree and the scene
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown shape kind tag: {tag}")]
    #[diagnostic(
        code(shapenest::create::unknown_shape_kind),
        help("valid tags are 0 (rectangle), 1 (oval) and 2 (nested)")
    )]
    UnknownShapeKind { tag: u8 },

    #[error("unknown path kind tag: {tag}")]
    #[diagnostic(
        code(shapenest::create::unknown_path_kind),
        help("valid tags are 0 (bounce)")
    )]
    UnknownPathKind { tag: u8 },

    #[error("shape {id:?} is not in the tree")]
    #[diagnostic(code(shapenest::tree::unknown_shape))]
    UnknownShape { id: ShapeId },

    #[error("shape {id:?} is not a container")]
    #[diagnostic(
        code(shapenest::tree::not_a_container),
        help("only nested shapes can own children")
    )]
    NotAContainer { id: ShapeId },

    #[error("shape {id:?} has no parent")]
    #[diagnostic(
        code(shapenest::tree::detached),
        help("a shape can only be removed once; it was already removed or never attached")
    )]
    Detached { id: ShapeId },

    #[error("shape {id:?} is not a child of {parent:?}")]
    #[diagnostic(code(shapenest::tree::not_a_child))]
    NotAChild { id: ShapeId, parent: ShapeId },

    #[error("shape {id:?} already has a parent")]
    #[diagnostic(
        code(shapenest::tree::already_attached),
        help("remove it from its current container before adding it elsewhere")
    )]
    AlreadyAttached { id: ShapeId },

    #[error("the root shape cannot be removed")]
    #[diagnostic(code(shapenest::tree::root_removal))]
    RootRemoval,

    #[error("adding {id:?} here would make it its own ancestor")]
    #[diagnostic(code(shapenest::tree::cycle))]
    Cycle { id: ShapeId },
}
