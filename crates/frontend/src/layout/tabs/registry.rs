//! Tab content registry: the single place mapping tab.key → View.

use crate::domain::a001_k3_program::ui::details::ProgramDetails;
use crate::domain::a001_k3_program::ui::wizard::ProgramWizard;
use crate::domain::a002_inspection::ui::checklist::InspectionChecklistPage;
use crate::layout::global_context::AppGlobalContext;
use contracts::domain::a002_inspection::InspectionKind;
use leptos::prelude::*;

pub const K3_PROGRAM_NEW: &str = "a001_k3_program_new";
const K3_PROGRAM_EDIT: &str = "a001_k3_program_edit_";
const K3_PROGRAM_DETAILS: &str = "a001_k3_program_details_";
const INSPECTION: &str = "a002_inspection_";

pub fn k3_program_edit_key(id: i64) -> String {
    format!("{}{}", K3_PROGRAM_EDIT, id)
}

pub fn k3_program_details_key(id: i64) -> String {
    format!("{}{}", K3_PROGRAM_DETAILS, id)
}

pub fn inspection_key(kind: InspectionKind) -> String {
    format!("{}{}", INSPECTION, kind.slug())
}

fn parse_id(key: &str, prefix: &str) -> Option<i64> {
    key.strip_prefix(prefix).and_then(|rest| rest.parse().ok())
}

fn parse_inspection(key: &str) -> Option<InspectionKind> {
    let slug = key.strip_prefix(INSPECTION)?;
    InspectionKind::ALL.into_iter().find(|k| k.slug() == slug)
}

/// Tab caption for a key, used when a tab is restored from the URL
pub fn tab_title(key: &str) -> String {
    if key == K3_PROGRAM_NEW {
        return "Program K3 baru".to_string();
    }
    if let Some(id) = parse_id(key, K3_PROGRAM_EDIT) {
        return format!("Ubah Program K3 #{}", id);
    }
    if let Some(id) = parse_id(key, K3_PROGRAM_DETAILS) {
        return format!("Program K3 #{}", id);
    }
    if let Some(kind) = parse_inspection(key) {
        return format!("Inspeksi {}", kind.label());
    }
    key.to_string()
}

/// Render tab content by key.
///
/// Unknown keys get a placeholder instead of failing.
pub fn render_tab_content(key: &str, ctx: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();

    if key == K3_PROGRAM_NEW {
        return view! {
            <ProgramWizard
                id=None
                on_created=Callback::new(move |id: i64| {
                    ctx.replace_tab(
                        K3_PROGRAM_NEW,
                        &k3_program_details_key(id),
                        &format!("Program K3 #{}", id),
                    );
                })
                on_close=Callback::new(move |_: ()| ctx.close_tab(K3_PROGRAM_NEW))
            />
        }
        .into_any();
    }

    if let Some(id) = parse_id(key, K3_PROGRAM_EDIT) {
        return view! {
            <ProgramWizard
                id=Some(id)
                on_created=Callback::new(|_: i64| {})
                on_close=Callback::new(move |_: ()| ctx.close_tab(&key_for_close))
            />
        }
        .into_any();
    }

    if let Some(id) = parse_id(key, K3_PROGRAM_DETAILS) {
        return view! {
            <ProgramDetails
                id=id
                on_edit=Callback::new(move |id: i64| {
                    ctx.open_tab(&k3_program_edit_key(id), &format!("Ubah Program K3 #{}", id));
                })
                on_close=Callback::new(move |_: ()| ctx.close_tab(&key_for_close))
            />
        }
        .into_any();
    }

    if let Some(kind) = parse_inspection(key) {
        return view! {
            <InspectionChecklistPage
                kind=kind
                on_close=Callback::new(move |_: ()| ctx.close_tab(&key_for_close))
            />
        }
        .into_any();
    }

    log::warn!("Unknown tab key: {}", key);
    view! { <div class="placeholder">{format!("Halaman tidak dikenal: {}", key)}</div> }.into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        assert_eq!(parse_id(&k3_program_edit_key(12), K3_PROGRAM_EDIT), Some(12));
        assert_eq!(parse_id(&k3_program_details_key(7), K3_PROGRAM_EDIT), None);
        assert_eq!(
            parse_inspection(&inspection_key(InspectionKind::Generator)),
            Some(InspectionKind::Generator)
        );
    }

    #[test]
    fn test_tab_title() {
        assert_eq!(tab_title(K3_PROGRAM_NEW), "Program K3 baru");
        assert_eq!(tab_title("a001_k3_program_details_3"), "Program K3 #3");
        assert_eq!(tab_title("a002_inspection_ppe"), "Inspeksi APD");
        assert_eq!(tab_title("zzz"), "zzz");
    }
}
