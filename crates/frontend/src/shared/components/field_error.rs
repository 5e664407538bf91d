use leptos::prelude::*;

/// Inline validation message under an input; renders nothing when `None`.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|m| view! { <div class="form__error">{m}</div> })
    }
}
