//! Sidebar menu: program actions and inspection kinds

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::{
    inspection_key, k3_program_details_key, k3_program_edit_key, tab_title, K3_PROGRAM_NEW,
};
use crate::shared::icons::icon;
use contracts::domain::a002_inspection::InspectionKind;
use leptos::prelude::*;

#[component]
fn MenuItem(key: String, icon_name: &'static str) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let title = tab_title(&key);
    let key_active = key.clone();
    let title_click = title.clone();

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=move || {
                ctx.active.with(|a| a.as_deref() == Some(key_active.as_str()))
            }
            on:click={
                let title = title_click;
                move |_| ctx.open_tab(&key, &title)
            }
        >
            <div class="app-sidebar__item-content">
                {icon(icon_name)}
                <span>{title}</span>
            </div>
        </div>
    }
}

/// Open an existing program by its numeric id
#[component]
fn OpenProgram() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let raw_id = RwSignal::new(String::new());
    let parsed = Memo::new(move |_| raw_id.with(|r| r.trim().parse::<i64>().ok()));

    let open = move |key_for: fn(i64) -> String| {
        if let Some(id) = parsed.get_untracked() {
            let key = key_for(id);
            ctx.open_tab(&key, &tab_title(&key));
        }
    };

    view! {
        <div class="app-sidebar__open">
            <input
                class="form__input"
                type="number"
                placeholder="ID program"
                prop:value=move || raw_id.get()
                on:input=move |ev| raw_id.set(event_target_value(&ev))
            />
            <button
                class="app-sidebar__button"
                disabled=move || parsed.get().is_none()
                on:click=move |_| open(k3_program_details_key)
            >
                "Detail"
            </button>
            <button
                class="app-sidebar__button"
                disabled=move || parsed.get().is_none()
                on:click=move |_| open(k3_program_edit_key)
            >
                "Ubah"
            </button>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__group">"Program K3"</div>
            <MenuItem key=K3_PROGRAM_NEW.to_string() icon_name="plus" />
            <OpenProgram />

            <div class="app-sidebar__group">"Inspeksi"</div>
            {InspectionKind::ALL
                .into_iter()
                .map(|kind| view! { <MenuItem key=inspection_key(kind) icon_name="clipboard" /> })
                .collect_view()}
        </div>
    }
}
