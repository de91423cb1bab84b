//! Offset pagination primitives shared by the clinic modules.
//!
//! A [`PageRequest`] addresses a 0-based page of a fixed size; a [`Page`] is the
//! slice returned for it together with the totals of the whole result set.

mod page;

pub use page::{Page, PageRequest};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
