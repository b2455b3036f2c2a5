//! Ports (trait boundaries) between the game core and its collaborators.
//!
//! The game driver only knows how to ask a [`MoveSelector`] for a move, and
//! the batch runner only knows how to notify an [`Observer`]. Search engines,
//! progress bars and exporters are adapters that implement these traits.

pub mod observer;
pub mod selector;

pub use observer::Observer;
pub use selector::MoveSelector;
