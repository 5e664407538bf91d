//! PageFrame: root wrapper for every page rendered inside a tab.

use super::page_standard::*;
use leptos::prelude::*;

/// Sets `id`, `data-page-category` and the BEM modifier class on the page root.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a002_inspection--checklist"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {}", page_id);
    if !is_known_category(category) {
        log::warn!("PageFrame {}: unknown category '{}'", page_id, category);
    }

    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_WIZARD => "page page--wizard",
        PAGE_CAT_CHECKLIST => "page page--checklist",
        _ => "page",
    };
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
