//! Change notifications pushed by the companion

use serde::{Deserialize, Serialize};

use crate::data::DataItem;

/// What happened to a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataEventKind {
    /// Item was created or its map replaced
    Changed,
    /// Item was removed; the map carries whatever was last known
    Deleted,
}

/// One entry of a change batch from the companion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub item: DataItem,
}

impl DataEvent {
    pub fn changed(item: DataItem) -> Self {
        Self {
            kind: DataEventKind::Changed,
            item,
        }
    }

    pub fn deleted(item: DataItem) -> Self {
        Self {
            kind: DataEventKind::Deleted,
            item,
        }
    }

    /// True for a change (not a delete) on `path`
    pub fn is_change_at(&self, path: &str) -> bool {
        self.kind == DataEventKind::Changed && self.item.path == path
    }
}
