//! # Cart Badge
//!
//! [`DerivedBadgeCount`] mirrors [`CartStore::item_count`] and memoizes it
//! against [`CartStore::revision`]. It recomputes synchronously the first
//! time it is read after the revision moves; there is no timer involved.
//!
//! The count is always the true integer. Capping at "99+" is a display rule
//! and lives in [`badge_label`], for the rendering layer to apply.

use crate::collaborators::CartStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Largest count shown literally on the badge.
pub const BADGE_CAP: usize = 99;

#[derive(Debug, Clone, Copy)]
struct Memo {
    revision: u64,
    count: usize,
}

pub struct DerivedBadgeCount {
    source: Arc<dyn CartStore>,
    memo: Mutex<Option<Memo>>,
    recomputations: AtomicU64,
}

impl DerivedBadgeCount {
    pub fn new(source: Arc<dyn CartStore>) -> Self {
        Self {
            source,
            memo: Mutex::new(None),
            recomputations: AtomicU64::new(0),
        }
    }

    /// The cart's current item count.
    pub fn value(&self) -> usize {
        let revision = self.source.revision();
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        match *memo {
            Some(cached) if cached.revision == revision => cached.count,
            _ => {
                let count = self.source.item_count();
                *memo = Some(Memo { revision, count });
                self.recomputations.fetch_add(1, Ordering::Relaxed);
                trace!(revision, count, "Badge recomputed");
                count
            }
        }
    }

    /// How many times the count was actually read from the source.
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}

/// Badge text: hidden at zero, capped at `99+`.
pub fn badge_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{BADGE_CAP}+")),
        n => Some(n.to_string()),
    }
}

/// Accessible label for the cart link.
pub fn aria_label(count: usize) -> String {
    format!("Shopping cart with {count} items")
}
