//! Main page component for the K3 program wizard

use super::steps::{DocsStep, HeaderStep, ItemsStep, MonthlyStep, ReviewStep, TargetsStep};
use super::view_model::ProgramWizardVm;
use crate::shared::components::stepper_bar::StepperBar;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_WIZARD;
use contracts::domain::a001_k3_program::wizard::{
    STEP_DOCS, STEP_HEADER, STEP_ITEMS, STEP_MONTHLY, STEP_TARGETS,
};
use contracts::domain::a001_k3_program::WizardMode;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProgramWizard(
    /// `None` starts a new program; `Some(id)` edits an existing one
    id: Option<i64>,
    #[prop(into)] on_created: Callback<i64>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProgramWizardVm::new(id);
    let labels = vm.state.with_untracked(|s| s.stepper.labels());

    view! {
        <PageFrame page_id="a001_k3_program--wizard" category=PAGE_CAT_WIZARD>
            <Header vm=vm on_close=on_close />
            <div class="page__content">
                <StepperBar labels=labels current=vm.step() />
                <Messages vm=vm />
                <Show
                    when=move || !vm.loading.get()
                    fallback=|| view! { <div class="page__loading">"Memuat program..."</div> }
                >
                    <StepContent vm=vm />
                </Show>
                <Footer vm=vm on_created=on_created />
            </div>
        </PageFrame>
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

#[component]
fn Header(vm: ProgramWizardVm, on_close: Callback<()>) -> impl IntoView {
    let mode = vm.mode();
    let title = move || {
        let id = vm.state.with(|s| s.draft.id);
        match (mode.get(), id) {
            (WizardMode::Create, _) => "Program K3 baru".to_string(),
            (WizardMode::Edit, Some(id)) => format!("Ubah Program K3 #{}", id),
            (WizardMode::Edit, None) => "Ubah Program K3".to_string(),
        }
    };
    let step = vm.step();
    let can_save_header =
        Signal::derive(move || mode.get() == WizardMode::Edit && step.get() == STEP_HEADER);
    let is_busy = vm.is_busy();

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
            </div>
            <div class="page__header-right">
                <Show when=move || can_save_header.get()>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save_header()
                        disabled=is_busy
                    >
                        {icon("save")} " Simpan Header"
                    </Button>
                </Show>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                >
                    {icon("x")} " Tutup"
                </Button>
            </div>
        </div>
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

#[component]
fn Messages(vm: ProgramWizardVm) -> impl IntoView {
    let error = vm.error;
    let success = vm.success;

    view! {
        {move || error.get().map(|e| view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{e}</span>
            </div>
        })}
        {move || success.get().map(|m| view! {
            <div class="warning-box warning-box--success">
                <span class="warning-box__icon">{icon("check")}</span>
                <span class="warning-box__text">{m}</span>
            </div>
        })}
    }
}

// ── Step content ──────────────────────────────────────────────────────────────

#[component]
fn StepContent(vm: ProgramWizardVm) -> impl IntoView {
    let step = vm.step();

    move || match step.get() {
        STEP_HEADER => view! { <HeaderStep vm=vm /> }.into_any(),
        STEP_TARGETS => view! { <TargetsStep vm=vm /> }.into_any(),
        STEP_ITEMS => view! { <ItemsStep vm=vm /> }.into_any(),
        STEP_MONTHLY => view! { <MonthlyStep vm=vm /> }.into_any(),
        STEP_DOCS => view! { <DocsStep vm=vm /> }.into_any(),
        _ => view! { <ReviewStep vm=vm /> }.into_any(),
    }
}

// ── Footer navigation ─────────────────────────────────────────────────────────

#[component]
fn Footer(vm: ProgramWizardVm, on_created: Callback<i64>) -> impl IntoView {
    let mode = vm.mode();
    let is_first = vm.is_first_step();
    let is_last = vm.is_last_step();
    let is_busy = vm.is_busy();
    let back_disabled = Signal::derive(move || is_first.get() || is_busy.get());

    view! {
        <div class="wizard__footer">
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| vm.back()
                disabled=back_disabled
            >
                {icon("chevron-left")} " Kembali"
            </Button>
            <Show
                when=move || is_last.get()
                fallback=move || view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.next()
                        disabled=is_busy
                    >
                        "Lanjut " {icon("chevron-right")}
                    </Button>
                }
            >
                <Show when=move || mode.get() == WizardMode::Create>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit_create(on_created)
                        disabled=is_busy
                    >
                        {icon("save")} " Simpan Program"
                    </Button>
                </Show>
            </Show>
        </div>
    }
}
