//! Twelve-month checkbox strip with optional quarter shortcuts.

use contracts::domain::a001_k3_program::month_vector::{MONTHS, MONTH_LABELS, QUARTERS};
use contracts::domain::a001_k3_program::MonthVector;
use leptos::prelude::*;

#[component]
pub fn MonthGrid(
    #[prop(into)] value: Signal<MonthVector>,
    /// Month index 0..=11
    #[prop(optional)]
    on_toggle: Option<Callback<usize>>,
    /// Quarter index 0..=3; the quarter row is hidden when absent
    #[prop(optional)]
    on_quarter: Option<Callback<usize>>,
    #[prop(optional)] readonly: bool,
    /// Extra modifier, e.g. `"month-grid--actual"`
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let disabled = readonly || on_toggle.is_none();

    let quarter_row = on_quarter.filter(|_| !disabled).map(|on_quarter| {
        view! {
            <div class="month-grid__quarters">
                {QUARTERS
                    .iter()
                    .enumerate()
                    .map(|(q, months)| {
                        let months = *months;
                        view! {
                            <button
                                type="button"
                                class="month-grid__quarter"
                                class:month-grid__quarter--full=move || {
                                    value.with(|v| v.quarter_is_full(&months))
                                }
                                on:click=move |_| on_quarter.run(q)
                            >
                                {format!("Q{}", q + 1)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    view! {
        <div class=format!("month-grid {}", class)>
            <div class="month-grid__months">
                {(0..MONTHS)
                    .map(|m| {
                        view! {
                            <label class="month-grid__cell">
                                <span class="month-grid__label">{MONTH_LABELS[m]}</span>
                                <input
                                    type="checkbox"
                                    disabled=disabled
                                    prop:checked=move || value.with(|v| v.is_set(m))
                                    on:change=move |_| {
                                        if let Some(cb) = on_toggle {
                                            cb.run(m);
                                        }
                                    }
                                />
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
            {quarter_row}
        </div>
    }
}
