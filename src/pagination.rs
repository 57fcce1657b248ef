//! Paginated response envelope shared by every collection endpoint.

use serde::Serialize;

/// Default page size applied when the caller does not send `size`.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Upper bound for the `size` query parameter.
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination metadata carried by every collection envelope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageMetadata {
    /// Zero-based page number.
    pub number: usize,
    /// Requested page size.
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

/// Collection envelope: a page of items plus pagination metadata.
///
/// Zero results is a well-formed envelope, never an error.
#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub page: PageMetadata,
}

impl<T> PageEnvelope<T> {
    pub fn new(items: Vec<T>, number: usize, size: usize, total_elements: usize) -> Self {
        let size = size.max(1);
        let total_pages = total_elements.div_ceil(size);
        Self {
            items,
            page: PageMetadata {
                number,
                size,
                total_elements,
                total_pages,
            },
        }
    }

    /// Empty envelope for a query that matched nothing.
    pub fn empty(size: usize) -> Self {
        Self::new(Vec::new(), 0, size, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_total_pages() {
        let envelope = PageEnvelope::new(vec![1, 2, 3], 0, 3, 7);
        assert_eq!(envelope.page.total_pages, 3);
        assert_eq!(envelope.page.total_elements, 7);
        assert_eq!(envelope.page.number, 0);
    }

    #[test]
    fn empty_envelope_is_well_formed() {
        let envelope = PageEnvelope::<i32>::empty(20);
        assert!(envelope.items.is_empty());
        assert_eq!(envelope.page.total_elements, 0);
        assert_eq!(envelope.page.total_pages, 0);
        assert_eq!(envelope.page.size, 20);
    }
}
