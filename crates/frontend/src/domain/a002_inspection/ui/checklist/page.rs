use super::view_model::InspectionChecklistVm;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CHECKLIST;
use contracts::domain::a001_k3_program::month_vector::MONTH_LABELS;
use contracts::domain::a002_inspection::{Condition, FollowUp, InspectionKind};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn InspectionChecklistPage(
    kind: InspectionKind,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = InspectionChecklistVm::new(kind);
    let saving = vm.saving;

    view! {
        <PageFrame page_id="a002_inspection--checklist" category=PAGE_CAT_CHECKLIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{format!("Inspeksi {}", kind.label())}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit()
                        disabled=Signal::derive(move || saving.get())
                    >
                        {icon("save")} " Simpan"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        {icon("x")} " Tutup"
                    </Button>
                </div>
            </div>
            <div class="page__content">
                {move || vm.error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
                {move || vm.success.get().map(|m| view! {
                    <div class="warning-box warning-box--success">
                        <span class="warning-box__icon">{icon("check")}</span>
                        <span class="warning-box__text">{m}</span>
                    </div>
                })}
                <Meta vm=vm />
                <SummaryBar vm=vm />
                <Rows vm=vm />
            </div>
        </PageFrame>
    }
}

#[component]
fn Meta(vm: InspectionChecklistVm) -> impl IntoView {
    let checklist = vm.checklist;

    view! {
        <CardAnimated delay_ms=0>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Tahun"</label>
                    <span>{move || checklist.with(|c| c.year)}</span>
                </div>
                <div class="form__group">
                    <label class="form__label">"Bulan"</label>
                    <select
                        class="form__select"
                        prop:value=move || checklist.with(|c| c.month.to_string())
                        on:change=move |ev| vm.set_month(event_target_value(&ev))
                    >
                        {MONTH_LABELS
                            .iter()
                            .enumerate()
                            .map(|(idx, label)| view! { <option value={(idx + 1).to_string()}>{*label}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Lokasi *"</label>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || checklist.with(|c| c.location.clone())
                        on:input=move |ev| vm.set_location(event_target_value(&ev))
                    />
                </div>
            </div>
        </CardAnimated>
    }
}

#[component]
fn SummaryBar(vm: InspectionChecklistVm) -> impl IntoView {
    let summary = vm.summary();

    view! {
        <div class="inspection__summary">
            {move || {
                let s = summary.get();
                let good = s
                    .good_pct
                    .map(|p| format!("{:.0}%", p))
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "Baik {} · Rusak {} · Belum dicek {} · Kondisi baik {}",
                    s.good, s.broken, s.unchecked, good
                )
            }}
        </div>
    }
}

#[component]
fn ChoiceRadio<T>(
    name: String,
    label: &'static str,
    value: T,
    #[prop(into)] current: Signal<T>,
    on_pick: Callback<T>,
) -> impl IntoView
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    view! {
        <label class="inspection__choice">
            <input
                type="radio"
                name=name
                prop:checked=move || current.get() == value
                on:change=move |_| on_pick.run(value)
            />
            " " {label}
        </label>
    }
}

#[component]
fn Row(vm: InspectionChecklistVm, row: usize) -> impl IntoView {
    let label = vm
        .checklist
        .with_untracked(|c| c.rows.get(row).map(|r| r.label.clone()).unwrap_or_default());
    let condition = vm.condition(row);
    let follow_up = vm.follow_up(row);
    let on_condition = Callback::new(move |c: Condition| vm.set_condition(row, c));
    let on_follow_up = Callback::new(move |f: FollowUp| vm.set_follow_up(row, f));
    let condition_name = format!("condition-{}", row);
    let follow_up_name = format!("follow-up-{}", row);

    view! {
        <tr>
            <td>{row + 1}</td>
            <td>{label}</td>
            <td>
                <ChoiceRadio name=condition_name.clone() label="Baik" value=Condition::Good current=condition on_pick=on_condition />
                <ChoiceRadio name=condition_name label="Rusak" value=Condition::Broken current=condition on_pick=on_condition />
            </td>
            <td>
                // Follow-up only applies to broken points
                <Show when=move || condition.get() == Condition::Broken fallback=|| "-">
                    <ChoiceRadio name=follow_up_name.clone() label="Perbaikan" value=FollowUp::Repair current=follow_up on_pick=on_follow_up />
                    <ChoiceRadio name=follow_up_name.clone() label="Perawatan" value=FollowUp::Maintenance current=follow_up on_pick=on_follow_up />
                </Show>
            </td>
            <td>
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || vm.checklist.with(|c| c.rows.get(row).and_then(|r| r.note.clone()).unwrap_or_default())
                    on:input=move |ev| vm.set_note(row, event_target_value(&ev))
                />
            </td>
        </tr>
    }
}

#[component]
fn Rows(vm: InspectionChecklistVm) -> impl IntoView {
    let count = vm.row_count();

    view! {
        <CardAnimated delay_ms=80>
            <table class="table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Titik periksa"</th>
                        <th>"Kondisi"</th>
                        <th>"Tindak lanjut"</th>
                        <th>"Catatan"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || (0..count.get()).map(|row| view! { <Row vm=vm row=row /> }).collect_view()}
                </tbody>
            </table>
        </CardAnimated>
    }
}
