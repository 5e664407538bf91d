use leptos::prelude::*;

/// Step indicator. Purely visual: navigation goes through the wizard buttons.
#[component]
pub fn StepperBar(
    labels: &'static [&'static str],
    /// 1-based current step
    #[prop(into)]
    current: Signal<usize>,
) -> impl IntoView {
    view! {
        <ol class="stepper">
            {labels
                .iter()
                .enumerate()
                .map(|(idx, label)| {
                    let step = idx + 1;
                    view! {
                        <li
                            class="stepper__step"
                            class:stepper__step--active=move || { current.get() == step }
                            class:stepper__step--done=move || { current.get() > step }
                        >
                            <span class="stepper__number">{step}</span>
                            <span class="stepper__label">{*label}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
