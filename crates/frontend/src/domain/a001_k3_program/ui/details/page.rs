//! Read-only program view with realisation figures and the validator panel

use super::view_model::ProgramDetailsVm;
use crate::shared::components::badge::StageBadge;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::month_grid::MonthGrid;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a001_k3_program::approval::ApprovalStatus;
use contracts::domain::a001_k3_program::{ItemDraft, SectionDraft};
use contracts::shared::coerce::coerce_f64;
use leptos::prelude::*;
use thaw::*;

fn pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}%", v))
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn ProgramDetails(
    id: i64,
    #[prop(into)] on_edit: Callback<i64>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProgramDetailsVm::new(id);
    let can_verify = vm.can_verify();

    view! {
        <PageFrame page_id="a001_k3_program--detail" category=PAGE_CAT_DETAIL>
            <Header vm=vm on_edit=on_edit on_close=on_close />
            <div class="page__content">
                <Messages vm=vm />
                <Show
                    when=move || vm.program.with(Option::is_some)
                    fallback=move || view! {
                        <Show when=move || vm.loading.get()>
                            <div class="page__loading">"Memuat program..."</div>
                        </Show>
                    }
                >
                    <Summary vm=vm />
                    <Show when=move || can_verify.get()>
                        <VerifyPanel vm=vm />
                    </Show>
                    <Sections vm=vm />
                </Show>
            </div>
        </PageFrame>
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

#[component]
fn Header(vm: ProgramDetailsVm, on_edit: Callback<i64>, on_close: Callback<()>) -> impl IntoView {
    let can_edit = vm.can_edit();
    let id = vm.id;

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{format!("Program K3 #{}", id)}</h1>
                <StageBadge stage=vm.stage() />
            </div>
            <div class="page__header-right">
                <Show when=move || can_edit.get()>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_edit.run(id)
                    >
                        {icon("edit")} " Ubah"
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

#[component]
fn Messages(vm: ProgramDetailsVm) -> impl IntoView {
    view! {
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
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

#[component]
fn Summary(vm: ProgramDetailsVm) -> impl IntoView {
    move || {
        vm.program.with(|p| {
            p.as_ref().map(|loaded| {
                let d = &loaded.draft;
                let planned: usize = d
                    .sections
                    .iter()
                    .flat_map(|s| s.items.iter())
                    .map(|i| i.plan.count())
                    .sum();
                let realised: usize = d
                    .sections
                    .iter()
                    .flat_map(|s| s.items.iter())
                    .map(|i| (0..12).filter(|&m| i.plan.is_set(m) && i.actual.is_set(m)).count())
                    .sum();
                let overall = (planned > 0).then(|| realised as f64 * 100.0 / planned as f64);
                let d = d.clone();
                let note_validator = loaded.note_validator.clone();
                view! {
                    <CardAnimated delay_ms=0>
                        <dl class="details-list">
                            <dt>"Tahun"</dt><dd>{d.year}</dd>
                            <dt>"Entitas / Plant"</dt>
                            <dd>{format!("{} / {}", d.entity_code, d.plant_code)}</dd>
                            <dt>"Uraian target"</dt>
                            <dd>{d.target_description.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Realisasi"</dt>
                            <dd>{format!("{} dari {} bulan rencana ({})", realised, planned, pct(overall))}</dd>
                            {note_validator.map(|note| view! {
                                <dt>"Catatan validator"</dt><dd>{note}</dd>
                            })}
                        </dl>
                    </CardAnimated>
                }
            })
        })
    }
}

// ── Validator panel ───────────────────────────────────────────────────────────

#[component]
fn VerifyPanel(vm: ProgramDetailsVm) -> impl IntoView {
    let verifying = vm.verifying;
    let disabled = Signal::derive(move || verifying.get());

    view! {
        <CardAnimated delay_ms=80>
            <h4 class="details-section__title">{icon("shield")} " Verifikasi"</h4>
            <div class="form__group">
                <label class="form__label">"Catatan"</label>
                <textarea
                    class="form__textarea"
                    rows=3
                    prop:value=move || vm.verify_note.get()
                    on:input=move |ev| vm.verify_note.set(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="wizard__evidence-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.verify(ApprovalStatus::Approved)
                    disabled=disabled
                >
                    {icon("check")} " Setujui"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.verify(ApprovalStatus::Rejected)
                    disabled=disabled
                >
                    {icon("x")} " Tolak"
                </Button>
            </div>
        </CardAnimated>
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn item_row(item: &ItemDraft) -> impl IntoView {
    let plan = item.plan;
    let actual = item.actual;
    view! {
        <tr>
            <td>{item.title.clone()}</td>
            <td>{if item.pic.trim().is_empty() { "-".to_string() } else { item.pic.clone() }}</td>
            <td>
                <MonthGrid value=Signal::stored(plan) readonly=true />
                <MonthGrid value=Signal::stored(actual) readonly=true class="month-grid--actual" />
            </td>
            <td>{pct(item.realization_pct())}</td>
            <td>{item.docs.len()}</td>
        </tr>
    }
}

fn section_table(index: usize, section: &SectionDraft) -> impl IntoView {
    let section = section.clone();
    view! {
        <CardAnimated delay_ms={(index as u32 + 2) * 80}>
            <h4 class="details-section__title">
                {format!(
                    "{}. {} (target {}%, realisasi {})",
                    index + 1,
                    section.title,
                    coerce_f64(&section.target_pct),
                    pct(section.realization_pct())
                )}
            </h4>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Program kerja"</th>
                        <th>"PIC"</th>
                        <th>"Rencana / Realisasi"</th>
                        <th>"Realisasi"</th>
                        <th>"Bukti"</th>
                    </tr>
                </thead>
                <tbody>{section.items.iter().map(item_row).collect_view()}</tbody>
            </table>
        </CardAnimated>
    }
}

#[component]
fn Sections(vm: ProgramDetailsVm) -> impl IntoView {
    move || {
        vm.program.with(|p| {
            p.as_ref().map(|loaded| {
                loaded
                    .draft
                    .sections
                    .iter()
                    .enumerate()
                    .map(|(idx, section)| section_table(idx, section))
                    .collect_view()
            })
        })
    }
}
