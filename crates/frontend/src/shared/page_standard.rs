//! Page categories for pages rendered inside a tab.
//!
//! Each page root carries an `id` of the form `{entity}--{category}`
//! (e.g. `"a001_k3_program--wizard"`) and a `data-page-category` value.

/// Detail view of a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Multi-step form that builds or edits a record.
pub const PAGE_CAT_WIZARD: &str = "wizard";

/// Periodic checklist entry.
pub const PAGE_CAT_CHECKLIST: &str = "checklist";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_DETAIL, PAGE_CAT_WIZARD, PAGE_CAT_CHECKLIST];

/// `{entity}--{category}` with both halves non-empty
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_k3_program--wizard"));
        assert!(!is_valid_page_id("a001_k3_program"));
        assert!(!is_valid_page_id("--wizard"));
        assert!(is_known_category(PAGE_CAT_CHECKLIST));
        assert!(!is_known_category("dashboard"));
    }
}
