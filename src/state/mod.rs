//! Snapshot-based undo.
//!
//! A mutating command captures the whole store into the [`UndoSlot`] right
//! before it changes anything. Undo swaps the captured collections back in.
//! Only one level is kept.

mod snapshot;
mod undo;

pub use snapshot::Snapshot;
pub use undo::UndoSlot;
