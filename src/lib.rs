//! Retained-mode view toolkit.
//!
//! # Conceptual overview
//! Roost is a tree of views that measures, lays out, draws and routes pointer input, in the
//! style of the Android view system.
//!
//! ## Views
//! Every view lives in a [`ViewTree`] and is addressed by a [`ViewId`]. A view carries geometry,
//! padding, layout params, a background drawable, listeners and interaction state. It becomes a
//! container by carrying a [`Layout`](layout::Layout), and draws content by carrying a
//! [`Widget`](widgets::Widget). Views created with [`ViewTree::create`] start out detached; they
//! are attached once they are connected to the tree root, at which point attach listeners fire.
//!
//! ## Layout
//! Layout happens in two top-down passes. In the measure pass, a superview offers each subview a
//! [`MeasureSpec`] per axis: an exact size, an upper bound, or no constraint, derived from the
//! superview's own spec, its padding, the subview's margins and the subview's requested
//! [`Dimension`](params::Dimension). In the layout pass, the superview assigns each subview its
//! bounds, in the superview's coordinate system. [`LinearLayout`](layout::LinearLayout) stacks
//! subviews along an axis and shares leftover space by weight; [`FrameLayout`](layout::FrameLayout)
//! overlaps them at one of nine alignments.
//!
//! Changing a view requests a layout or a redraw. Requests bubble up to the root and are picked up
//! by the [`Host`], which performs at most one layout and one draw per poll.
//!
//! ## Events
//! Pointer events enter at the root in root coordinates. Containers may intercept an event; if
//! none does, it goes to the topmost subview under the pointer, recursively, and the deepest view
//! that consumes it wins. The view that consumes a press captures the pointer until release.
//!
//! Clickable views run a small state machine: press, then release inside to click. Holding past
//! the long-press timeout fires the long-click listener instead. Listeners cannot borrow the tree;
//! they use a [`Poster`] to queue changes that run on the next tick.
//!
//! ## Coordinate System
//! The origin is at the top left corner of the surface and positive y points down. Render
//! transforms (translation, rotation, scale and opacity) apply on top of layout bounds and do not
//! affect layout.

pub mod activity;
pub mod animation;
pub mod canvas;
pub mod color;
mod config;
mod dispatch;
pub mod drawable;
mod error;
pub mod events;
pub mod fragment;
mod host;
pub mod layout;
pub mod measure;
pub mod params;
mod rect;
pub mod resources;
pub mod text;
pub mod timer;
mod tree;
mod view;
pub mod widgets;

pub use config::ViewConfig;
pub use error::{Error, Result};
pub use host::{Frame, Host, SurfaceEvent};
pub use measure::{MeasureMode, MeasureSpec};
pub use rect::{Insets, Rect};
pub use tree::{Poster, Requests, ViewTree};
pub use view::{Transform, View, ViewId, Visibility};
