// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// How pages are grouped into slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PageArrangement {
    /// One page per slot, centered.
    #[default]
    Single,
    /// Two pages per slot, side by side.
    Double {
        /// `true` for true two-page spreads: each page hugs the spine.
        ///
        /// `false` places each page off-center within its half, leaving more
        /// room on the outer edge.
        spread: bool,
    },
}

impl PageArrangement {
    /// Number of pages a full slot holds.
    #[must_use]
    pub const fn pages_per_slot(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double { .. } => 2,
        }
    }

    /// Number of slots needed for `page_count` pages.
    #[must_use]
    pub const fn slot_count(self, page_count: usize) -> usize {
        page_count.div_ceil(self.pages_per_slot())
    }

    /// Slot that holds page `page`.
    #[must_use]
    pub const fn slot_of_page(self, page: usize) -> usize {
        page / self.pages_per_slot()
    }

    /// Page indices held by slot `slot` in a document of `page_count` pages.
    ///
    /// The range is empty for slots past the end of the document.
    #[must_use]
    pub fn page_range(self, slot: usize, page_count: usize) -> Range<usize> {
        let per_slot = self.pages_per_slot();
        let start = slot.saturating_mul(per_slot).min(page_count);
        let end = start.saturating_add(per_slot).min(page_count);
        start..end
    }
}
