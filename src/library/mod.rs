//! Footprint library presentation
//!
//! # Submodules
//! - `lib_id` - `nickname:item` identifiers
//! - `tree` - Library tree model fed by a `LibTreeAdapter`
//! - `pane` - Footprint tree pane talking to its frame over a channel

mod lib_id;
mod tree;
mod pane;

pub use lib_id::{LibId, LibIdError};

pub use tree::{LibTree, LibTreeAdapter, LibraryEntry};

pub use pane::{FocusSource, FootprintTreePane, FrameMessage};
