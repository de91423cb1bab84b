use serde::{Deserialize, Serialize};

use crate::PageError;

/// 0-based page index plus page size.
#[cfg_attr(feature = "with-utoipa", derive(utoipa::ToSchema))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    pub fn of(page: u64, size: u64) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip in the underlying ordered result set.
    /// Capped at `i64::MAX`, the largest offset SQL stores accept.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(i64::MAX as u64)
    }
}

#[cfg_attr(feature = "with-utoipa", derive(utoipa::ToSchema))]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 0-based index of this page.
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page for `request`. `content` is truncated to the page size so the
    /// `content.len() <= size` invariant holds even for a sloppy store.
    pub fn new(mut content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        content.truncate(request.size as usize);
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(request.size),
        }
    }

    /// Create an empty page for the given request
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    /// Map items while preserving totals (Domain->DTO mapping convenience)
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
