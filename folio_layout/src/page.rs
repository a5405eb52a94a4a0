// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts between the layout engine and the host's page content.

use std::rc::Rc;
use std::sync::Arc;

use kurbo::Size;

/// A page as seen by the layout engine: an index and an intrinsic size.
///
/// Layouts store whatever handle type the host hands out and never look at
/// content. Use a cheap handle (an id, an [`Rc`], an [`Arc`]) so that pages are
/// referenced rather than copied.
pub trait Page {
    /// Zero-based index of the page in the document.
    fn index(&self) -> usize;

    /// Intrinsic page size in content units.
    fn size(&self) -> Size;
}

impl<P: Page + ?Sized> Page for Rc<P> {
    fn index(&self) -> usize {
        (**self).index()
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}

impl<P: Page + ?Sized> Page for Arc<P> {
    fn index(&self) -> usize {
        (**self).index()
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}

/// Source of pages for a document.
///
/// [`PageProvider::page`] may return `None` for a page whose content is not
/// ready yet; the slot holding it stays unfilled and is asked again on the
/// next visibility pass. A page that never becomes ready simply never fills
/// its slot.
pub trait PageProvider {
    /// Page handle type.
    type Page: Page;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Returns page `index`, or `None` if it is out of range or not ready.
    fn page(&mut self, index: usize) -> Option<Self::Page>;
}

/// A plain page handle: an index and a size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizedPage {
    /// Zero-based page index.
    pub index: usize,
    /// Intrinsic page size.
    pub size: Size,
}

impl SizedPage {
    /// Creates a page handle.
    #[must_use]
    pub const fn new(index: usize, size: Size) -> Self {
        Self { index, size }
    }
}

impl Page for SizedPage {
    fn index(&self) -> usize {
        self.index
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// A document of `count` pages that all share one size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPages {
    count: usize,
    size: Size,
}

impl FixedPages {
    /// Creates a uniform document.
    #[must_use]
    pub const fn new(count: usize, size: Size) -> Self {
        Self { count, size }
    }
}

impl PageProvider for FixedPages {
    type Page = SizedPage;

    fn page_count(&self) -> usize {
        self.count
    }

    fn page(&mut self, index: usize) -> Option<SizedPage> {
        (index < self.count).then_some(SizedPage::new(index, self.size))
    }
}

impl<P: Page + Clone> PageProvider for Vec<P> {
    type Page = P;

    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&mut self, index: usize) -> Option<P> {
        self.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use kurbo::Size;

    use super::{FixedPages, Page, PageProvider, SizedPage};

    #[test]
    fn fixed_pages_are_bounded() {
        let mut doc = FixedPages::new(3, Size::new(10.0, 20.0));
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.page(2), Some(SizedPage::new(2, Size::new(10.0, 20.0))));
        assert_eq!(doc.page(3), None);
    }

    #[test]
    fn shared_handles_forward_to_the_page() {
        let page = Rc::new(SizedPage::new(7, Size::new(1.0, 2.0)));
        let mut doc = vec![Rc::clone(&page)];
        let handle = doc.page(0).unwrap();
        assert!(Rc::ptr_eq(&handle, &page));
        assert_eq!(handle.index(), 7);
        assert_eq!(handle.size(), Size::new(1.0, 2.0));
    }
}
