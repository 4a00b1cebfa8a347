//! One-based paging shared by activity and schedule searches.

/// Upper bound on any requested page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Normalized page request with a one-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page_index: u64,
    /// Items per page, between 1 and `MAX_PAGE_SIZE`.
    pub page_size: u64,
}

impl PageRequest {
    /// Normalizes raw query values.
    ///
    /// Missing or zero page indexes become 1. Missing sizes use `default_size`, and
    /// every size is clamped into `1..=MAX_PAGE_SIZE`.
    ///
    /// # Arguments
    /// - `page_index` - Requested one-based page, if any
    /// - `page_size` - Requested page size, if any
    /// - `default_size` - Size used when none is requested
    pub fn new(page_index: Option<u64>, page_size: Option<u64>, default_size: u64) -> Self {
        Self {
            page_index: page_index.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Zero-based page number for SeaORM's paginator.
    pub fn zero_based(&self) -> u64 {
        self.page_index - 1
    }
}

/// A page of results with the counts needed for navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_index: u64,
    pub page_size: u64,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page_index: request.page_index,
            page_size: request.page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size.max(1))
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages()
    }
}
