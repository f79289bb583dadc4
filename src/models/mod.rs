//! Data models for ShareIt entities

pub mod booking;
pub mod comment;
pub mod item;
pub mod request;
pub mod user;

use crate::error::{AppError, AppResult};

/// Offset/size pagination as exposed by the list endpoints.
///
/// `from` is a zero-based offset and `size` a page length; together they
/// select the page with index `from / size`.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    page: i64,
    size: i64,
}

impl Pagination {
    pub fn new(from: i64, size: i64) -> AppResult<Self> {
        if from < 0 {
            return Err(AppError::Validation("from must be >= 0".to_string()));
        }
        if size <= 0 {
            return Err(AppError::Validation("size must be > 0".to_string()));
        }
        Ok(Self {
            page: from / size,
            size,
        })
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Page a slice of already-loaded rows.
    pub fn slice<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        rows.iter()
            .skip(self.offset() as usize)
            .take(self.size as usize)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_from_is_rejected() {
        assert!(matches!(
            Pagination::new(-1, 5),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Pagination::new(0, 0),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn offset_snaps_to_page_boundary() {
        // from=5, size=10 falls inside page 0
        let p = Pagination::new(5, 10).unwrap();
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);

        let p = Pagination::new(20, 10).unwrap();
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn slice_returns_requested_page() {
        let rows: Vec<i32> = (0..25).collect();
        let p = Pagination::new(10, 10).unwrap();
        assert_eq!(p.slice(&rows), (10..20).collect::<Vec<_>>());

        let p = Pagination::new(20, 10).unwrap();
        assert_eq!(p.slice(&rows), (20..25).collect::<Vec<_>>());
    }

    #[test]
    fn slice_of_empty_rows_is_empty() {
        let rows: Vec<i32> = Vec::new();
        let p = Pagination::new(0, 10).unwrap();
        assert!(p.slice(&rows).is_empty());
    }
}
