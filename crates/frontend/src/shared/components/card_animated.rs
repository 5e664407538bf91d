//! Thaw `Card` with the `card-appear` entry animation from `layout.css`.

use leptos::prelude::*;
use thaw::Card;

/// `delay_ms` staggers neighbouring cards (0, 80, 160, ...).
#[component]
pub fn CardAnimated(
    #[prop(optional)] delay_ms: u32,
    /// Extra inline style appended after the animation
    #[prop(optional, into)]
    style: String,
    children: Children,
) -> impl IntoView {
    let animation = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);
    let full_style = if style.is_empty() {
        animation
    } else {
        format!("{} {}", animation, style)
    };

    view! {
        <Card attr:style=full_style>
            {children()}
        </Card>
    }
}
