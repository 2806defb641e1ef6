use crate::view::ViewId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by view tree operations and resource loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("no such view: {0}")]
    NoSuchView(ViewId),

    #[error("view {0} already has a superview")]
    AlreadyAttached(ViewId),

    #[error("adding {child} to {parent} would create a cycle")]
    Cycle { parent: ViewId, child: ViewId },

    #[error("{child} is not a subview of {parent}")]
    NotAChild { parent: ViewId, child: ViewId },

    #[error("view {0} has no layout and cannot hold subviews")]
    NotAContainer(ViewId),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("invalid measure spec: {0:#010x}")]
    InvalidMeasureSpec(u32),
}
