//! Footprint tree pane bound to an editor frame by messages
//!
//! The pane owns its tree and talks to the frame through a channel: it
//! publishes the item to load when the user picks one, and asks a
//! `FocusSource` whether the canvas has focus during UI updates.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::lib_id::LibId;
use super::tree::{LibTree, LibTreeAdapter};

/// Messages the pane sends to its frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameMessage {
    /// Open this footprint in the editor
    LoadFootprint(LibId),
}

/// Answers whether the drawing canvas currently has keyboard focus
pub trait FocusSource {
    fn canvas_has_focus(&self) -> bool;
}

pub struct FootprintTreePane {
    tree: LibTree,
    adapter: Arc<dyn LibTreeAdapter + Send + Sync>,
    frame: Sender<FrameMessage>,
}

impl FootprintTreePane {
    pub fn new(adapter: Arc<dyn LibTreeAdapter + Send + Sync>, frame: Sender<FrameMessage>) -> Self {
        let mut tree = LibTree::new();
        tree.regenerate(adapter.as_ref(), false);
        Self { tree, adapter, frame }
    }

    pub fn tree(&self) -> &LibTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LibTree {
        &mut self.tree
    }

    /// Reload the tree from the adapter, keeping search text and selection
    pub fn regenerate(&mut self) {
        self.tree.regenerate(self.adapter.as_ref(), true);
    }

    /// Select `id` in the tree and handle it as a user pick
    pub fn select(&mut self, id: &LibId) -> bool {
        self.tree.select(id) && self.on_component_selected()
    }

    /// Ask the frame to load the selected item, then drop the tree highlight
    /// so it does not compete with the item being edited on the canvas
    ///
    /// Returns true if a message was delivered.
    pub fn on_component_selected(&mut self) -> bool {
        let Some(id) = self.tree.selected_lib_id().cloned() else {
            return false;
        };
        let delivered = match self.frame.send(FrameMessage::LoadFootprint(id.clone())) {
            Ok(()) => {
                tracing::debug!(%id, "footprint selected");
                true
            }
            Err(_) => {
                tracing::warn!(%id, "frame is gone; footprint selection dropped");
                false
            }
        };
        self.tree.unselect();
        delivered
    }

    /// No tree selection may be shown while the canvas has focus
    pub fn on_update_ui(&mut self, focus: &dyn FocusSource) {
        if focus.canvas_has_focus() {
            self.tree.unselect();
        }
    }
}
