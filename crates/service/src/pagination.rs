//! Pagination utilities for service layer
//!
//! Offset-based windows: `position` is the 0-based index of the first item,
//! `size` the maximum number of items returned.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based offset
    pub position: usize,
    /// items per page
    pub size: usize,
}

impl Pagination {
    pub fn new(position: usize, size: usize) -> Self { Self { position, size } }

    /// Copy the `[position, position + size)` window out of `items`.
    /// Out-of-range windows produce a shorter or empty result.
    pub fn window<T: Clone>(self, items: &[T]) -> Vec<T> {
        items.iter().skip(self.position).take(self.size).cloned().collect()
    }
}
