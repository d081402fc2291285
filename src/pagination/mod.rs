//! Pagination and search-state utilities shared by every list view.
//!
//! Two flavours live here: [`Paginator`] windows an in-memory collection on
//! the client side, while [`PaginationDescriptor`] describes a window in the
//! offset-based shape a paginated list API returns. [`ListQuery`] keeps a
//! search condition and a page request in sync for the remote-style lists.

pub mod descriptor;
pub mod paginator;
pub mod query;
pub mod search;

pub use descriptor::*;
pub use paginator::*;
pub use query::*;
pub use search::*;

/// Page size used when nothing else has been configured
pub const DEFAULT_PER_PAGE: usize = 10;

/// Number of pages needed to show `total` items, never less than one
pub fn total_pages(total: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    if total == 0 {
        1
    } else {
        (total - 1) / per_page + 1
    }
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, total: usize, per_page: usize) -> usize {
    page.clamp(1, total_pages(total, per_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_never_zero() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(57, 10), 6);
    }

    #[test]
    fn test_total_pages_matches_ceiling_for_many_sizes() {
        for per_page in 1..=13 {
            for len in 0..=60 {
                let expected = std::cmp::max(1, (len as f64 / per_page as f64).ceil() as usize);
                assert_eq!(total_pages(len, per_page), expected, "len={len} per_page={per_page}");
            }
        }
    }

    #[test]
    fn test_clamp_page_snaps_to_nearest_bound() {
        assert_eq!(clamp_page(0, 57, 10), 1);
        assert_eq!(clamp_page(3, 57, 10), 3);
        assert_eq!(clamp_page(99, 57, 10), 6);
        assert_eq!(clamp_page(5, 0, 10), 1);
    }

    #[test]
    fn test_huge_page_size_is_a_single_page() {
        assert_eq!(total_pages(57, usize::MAX), 1);
        assert_eq!(total_pages(usize::MAX, usize::MAX), 1);
        assert_eq!(total_pages(usize::MAX, 1), usize::MAX);
        assert_eq!(clamp_page(3, 57, usize::MAX), 1);
    }
}
