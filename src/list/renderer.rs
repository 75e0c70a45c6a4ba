//! Renderer notifications emitted by the list synchronizer.

use crate::list::diff::ListDiff;
use tokio::sync::mpsc::UnboundedSender;

/// Receives the minimal redraw instructions for the pack list.
pub trait ListRenderer: Send {
    /// The whole list was replaced; `diff` says which rows actually changed
    fn list_updated(&mut self, diff: &ListDiff);

    /// A single row's selected state flipped
    fn item_changed(&mut self, index: usize);
}

/// Owned form of a renderer notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Updated(ListDiff),
    ItemChanged(usize),
}

/// Forwards notifications onto a channel drained by the render loop.
///
/// Sends never block; if the receiving side is gone the notification is dropped.
pub struct ChannelRenderer {
    tx: UnboundedSender<ListEvent>,
}

impl ChannelRenderer {
    pub fn new(tx: UnboundedSender<ListEvent>) -> Self {
        Self { tx }
    }
}

impl ListRenderer for ChannelRenderer {
    fn list_updated(&mut self, diff: &ListDiff) {
        let _ = self.tx.send(ListEvent::Updated(diff.clone()));
    }

    fn item_changed(&mut self, index: usize) {
        let _ = self.tx.send(ListEvent::ItemChanged(index));
    }
}
