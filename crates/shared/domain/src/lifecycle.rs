//! Soft-delete lifecycle shared by every aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an entity is live or has been soft deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted { deleted_at: DateTime<Utc> },
}

impl Lifecycle {
    /// Build from the nullable `deleted_at` column used by stores.
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(deleted_at) => Lifecycle::Deleted { deleted_at },
            None => Lifecycle::Active,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { deleted_at } => Some(*deleted_at),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Lifecycle::Deleted { .. })
    }

    /// Visible to a read that does or does not include deleted entities.
    pub fn is_visible(&self, include_deleted: bool) -> bool {
        include_deleted || !self.is_deleted()
    }
}

/// Entities that are never physically removed.
pub trait SoftDelete {
    fn lifecycle(&self) -> Lifecycle;

    fn set_lifecycle(&mut self, lifecycle: Lifecycle);

    fn is_deleted(&self) -> bool {
        self.lifecycle().is_deleted()
    }

    fn is_visible(&self, include_deleted: bool) -> bool {
        self.lifecycle().is_visible(include_deleted)
    }

    /// Mark deleted. A second call keeps the first deletion time.
    fn soft_delete(&mut self) {
        if !self.is_deleted() {
            self.set_lifecycle(Lifecycle::Deleted {
                deleted_at: Utc::now(),
            });
        }
    }
}
