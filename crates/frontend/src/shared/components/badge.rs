use contracts::domain::a001_k3_program::approval::Stage;
use leptos::prelude::*;

fn stage_class(stage: Stage) -> &'static str {
    match stage {
        Stage::Draft => "badge badge--neutral",
        Stage::Verification => "badge badge--warning",
        Stage::Approved => "badge badge--success",
        Stage::Rejected => "badge badge--error",
        Stage::Unknown => "badge badge--neutral",
    }
}

/// Workflow stage of a program as a coloured pill
#[component]
pub fn StageBadge(#[prop(into)] stage: Signal<Stage>) -> impl IntoView {
    view! {
        <span class=move || stage_class(stage.get())>{move || stage.get().label()}</span>
    }
}
