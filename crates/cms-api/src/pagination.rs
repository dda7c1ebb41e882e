use serde::{Deserialize, Serialize};

/// Page metadata derived from a total count and the requested window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u64,
    pub per_page: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

/// Computes page metadata for an offset window.
///
/// `current_page` follows the offset even past the last page, where the
/// caller gets an empty page with `has_next == false` instead of an error.
pub fn paginate(total_count: u64, limit: u32, offset: u64) -> PaginationInfo {
    let per_page = u64::from(limit.max(1));
    let current_page = (offset / per_page).saturating_add(1);
    let total_pages = total_count.div_ceil(per_page);

    let has_prev = current_page > 1;
    let has_next = current_page < total_pages;

    PaginationInfo {
        current_page,
        per_page: limit,
        total_count,
        total_pages,
        has_prev,
        has_next,
        prev_page: has_prev.then(|| current_page - 1),
        next_page: has_next.then(|| current_page + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page() {
        let info = paginate(45, 20, 40);

        assert_eq!(info.current_page, 3);
        assert_eq!(info.total_pages, 3);
        assert!(!info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.prev_page, Some(2));
        assert_eq!(info.next_page, None);
        assert_eq!(info.per_page, 20);
        assert_eq!(info.total_count, 45);
    }

    #[test]
    fn test_offset_beyond_data_is_not_clamped() {
        let info = paginate(5, 20, 1000);

        assert_eq!(info.current_page, 51);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.prev_page, Some(50));
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let info = paginate(0, 20, 0);

        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_prev);
        assert!(!info.has_next);
        assert_eq!(info.prev_page, None);
        assert_eq!(info.next_page, None);
    }

    #[test]
    fn test_first_of_many_pages() {
        let info = paginate(100, 10, 0);

        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_pages, 10);
        assert!(info.has_next);
        assert_eq!(info.next_page, Some(2));
        assert!(!info.has_prev);
    }

    #[test]
    fn test_unaligned_offset_rounds_down() {
        let info = paginate(100, 10, 15);
        assert_eq!(info.current_page, 2);
        assert_eq!(info.prev_page, Some(1));
        assert_eq!(info.next_page, Some(3));
    }

    #[test]
    fn test_extreme_offset_does_not_overflow() {
        let info = paginate(1, 1, u64::MAX);
        assert_eq!(info.current_page, u64::MAX);
        assert!(!info.has_next);
    }

    #[test]
    fn test_serializes_booleans_and_null_pages() {
        let value = serde_json::to_value(paginate(45, 20, 40)).unwrap();

        assert_eq!(value["hasNext"], serde_json::json!(false));
        assert_eq!(value["hasPrev"], serde_json::json!(true));
        assert_eq!(value["nextPage"], serde_json::Value::Null);
        assert_eq!(value["currentPage"], serde_json::json!(3));
    }
}
