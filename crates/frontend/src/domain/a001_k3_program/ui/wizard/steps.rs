//! One component per wizard step. Every list is addressed by index and
//! rebuilt only when its length changes.

use super::view_model::{EvidenceDraft, ProgramWizardVm};
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::field_error::FieldError;
use crate::shared::components::month_grid::MonthGrid;
use crate::shared::icons::icon;
use contracts::domain::a001_k3_program::month_vector::MONTH_LABELS;
use contracts::domain::a001_k3_program::payload::EvidenceMode;
use contracts::domain::a001_k3_program::{MonthVector, WizardMode};
use contracts::shared::coerce::coerce_f64;
use leptos::prelude::*;
use thaw::*;

#[component]
fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] readonly: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                class:form__input--invalid=move || error.with(Option::is_some)
                type=input_type.unwrap_or("text")
                placeholder=placeholder
                disabled=readonly
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError message=error />
        </div>
    }
}

#[component]
fn MonthSelect(#[prop(into)] value: Signal<Option<u8>>, on_change: Callback<String>) -> impl IntoView {
    view! {
        <select
            class="form__select"
            prop:value=move || value.get().map(|m| m.to_string()).unwrap_or_default()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="">"- Bulan -"</option>
            {MONTH_LABELS
                .iter()
                .enumerate()
                .map(|(idx, label)| view! { <option value={(idx + 1).to_string()}>{*label}</option> })
                .collect_view()}
        </select>
    }
}

fn item_caption(vm: ProgramWizardVm, s: usize, i: usize) -> Signal<String> {
    vm.read(move |d| {
        d.item(s, i)
            .ok()
            .map(|item| item.title.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Program kerja {}", i + 1))
    })
}

/// Shown instead of the add/remove controls once the program exists
fn locked_notice() -> impl IntoView {
    view! {
        <div class="warning-box">
            <span class="warning-box__icon">"ℹ"</span>
            <span class="warning-box__text">
                "Sasaran dan program kerja tidak dapat diubah setelah program disimpan."
            </span>
        </div>
    }
}

fn section_caption(vm: ProgramWizardVm, s: usize) -> Signal<String> {
    vm.read(move |d| {
        d.section(s)
            .ok()
            .map(|sec| sec.title.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Sasaran {}", s + 1))
    })
}

// ── Step 1: Header ────────────────────────────────────────────────────────────

#[component]
pub fn HeaderStep(vm: ProgramWizardVm) -> impl IntoView {
    view! {
        <CardAnimated delay_ms=0>
            <h4 class="details-section__title">"Data Program"</h4>
            <div class="details-grid--3col">
                <TextField
                    label="Tahun *"
                    input_type="number"
                    value=vm.read(|d| d.year.to_string())
                    on_input=Callback::new(move |v| vm.set_year(v))
                    error=vm.header_error("year")
                />
                <TextField
                    label="Entitas *"
                    placeholder="Kode entitas"
                    value=vm.read(|d| d.entity_code.clone())
                    on_input=Callback::new(move |v| vm.set_entity_code(v))
                    error=vm.header_error("entity_code")
                />
                <TextField
                    label="Plant *"
                    placeholder="Kode plant"
                    value=vm.read(|d| d.plant_code.clone())
                    on_input=Callback::new(move |v| vm.set_plant_code(v))
                    error=vm.header_error("plant_code")
                />
            </div>
            <div class="form__group">
                <label class="form__label">"Uraian target"</label>
                <textarea
                    class="form__textarea"
                    rows=3
                    prop:value=move || vm.state.with(|s| s.draft.target_description.clone().unwrap_or_default())
                    on:input=move |ev| vm.set_target_description(event_target_value(&ev))
                ></textarea>
                <FieldError message=vm.header_error("target_description") />
            </div>
        </CardAnimated>
    }
}

// ── Step 2: Sasaran ───────────────────────────────────────────────────────────

#[component]
pub fn TargetsStep(vm: ProgramWizardVm) -> impl IntoView {
    let count = vm.section_count();
    let can_remove = vm.can_remove_section();
    let editable = vm.structure_editable();

    view! {
        <div class="wizard__list">
            {(!editable).then(locked_notice)}
            {move || (0..count.get()).map(|s| view! {
                <CardAnimated delay_ms={(s as u32) * 80}>
                    <div class="wizard__card-header">
                        <h4 class="details-section__title">{format!("Sasaran {}", s + 1)}</h4>
                        <Show when=move || can_remove.get()>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| vm.remove_section(s)
                            >
                                {icon("trash")} " Hapus"
                            </Button>
                        </Show>
                    </div>
                    <div class="details-grid--2col">
                        <TextField
                            label="Sasaran *"
                            value=vm.read(move |d| d.section(s).map(|x| x.title.clone()).unwrap_or_default())
                            on_input=Callback::new(move |v| vm.set_section_title(s, v))
                            error=vm.section_error(s, "title")
                            readonly={!editable}
                        />
                        <TextField
                            label="Target (%)"
                            value=vm.read(move |d| d.section(s).map(|x| x.target_pct.clone()).unwrap_or_default())
                            on_input=Callback::new(move |v| vm.set_section_target(s, v))
                            error=vm.section_error(s, "target_pct")
                            readonly={!editable}
                        />
                    </div>
                </CardAnimated>
            }).collect_view()}
            {editable.then(|| view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_section()>
                    {icon("plus")} " Tambah Sasaran"
                </Button>
            })}
        </div>
    }
}

// ── Step 3: Program Kerja ─────────────────────────────────────────────────────

#[component]
fn SectionItems(vm: ProgramWizardVm, s: usize) -> impl IntoView {
    let count = vm.item_count(s);
    let editable = vm.structure_editable();

    view! {
        <CardAnimated delay_ms={(s as u32) * 80}>
            <h4 class="details-section__title">{section_caption(vm, s)}</h4>
            {move || (0..count.get()).map(|i| view! {
                <div class="wizard__row">
                    <span class="wizard__row-number">{i + 1}</span>
                    <TextField
                        label="Program kerja *"
                        value=vm.read(move |d| d.item(s, i).map(|x| x.title.clone()).unwrap_or_default())
                        on_input=Callback::new(move |v| vm.set_item_title(s, i, v))
                        error=vm.item_error(s, i, "title")
                        readonly={!editable}
                    />
                    <TextField
                        label="PIC"
                        value=vm.read(move |d| d.item(s, i).map(|x| x.pic.clone()).unwrap_or_default())
                        on_input=Callback::new(move |v| vm.set_item_pic(s, i, v))
                        error=vm.item_error(s, i, "pic")
                        readonly={!editable}
                    />
                    {editable.then(|| view! {
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.remove_item(s, i)>
                            {icon("trash")}
                        </Button>
                    })}
                </div>
            }).collect_view()}
            {editable.then(|| view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_item(s)>
                    {icon("plus")} " Tambah Program Kerja"
                </Button>
            })}
        </CardAnimated>
    }
}

#[component]
pub fn ItemsStep(vm: ProgramWizardVm) -> impl IntoView {
    let count = vm.section_count();
    let editable = vm.structure_editable();

    view! {
        <div class="wizard__list">
            {(!editable).then(locked_notice)}
            {move || (0..count.get()).map(|s| view! { <SectionItems vm=vm s=s /> }).collect_view()}
        </div>
    }
}

// ── Step 4: Rencana Bulanan / Rencana & Realisasi ─────────────────────────────

#[component]
fn ItemMonths(vm: ProgramWizardVm, s: usize, i: usize, is_edit: bool) -> impl IntoView {
    let plan = vm.read(move |d| d.item(s, i).map(|x| x.plan).unwrap_or_default());
    let actual = vm.read(move |d| d.item(s, i).map(|x| x.actual).unwrap_or_default());
    let realization = vm.read(move |d| d.item(s, i).ok().and_then(|x| x.realization_pct()));

    view! {
        <div class="wizard__months">
            <div class="wizard__months-header">
                <span class="wizard__months-title">{item_caption(vm, s, i)}</span>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.set_all_plan(s, i, true)>
                    "Semua bulan"
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.set_all_plan(s, i, false)>
                    "Kosongkan"
                </Button>
            </div>
            <span class="form__label">"Rencana"</span>
            <MonthGrid
                value=plan
                on_toggle=Callback::new(move |m| vm.toggle_plan(s, i, m))
                on_quarter=Callback::new(move |q| vm.toggle_quarter(s, i, q))
            />
            <FieldError message=vm.item_error(s, i, "plan") />
            {is_edit.then(|| view! {
                <span class="form__label">"Realisasi"</span>
                <MonthGrid
                    value=actual
                    on_toggle=Callback::new(move |m| vm.toggle_actual(s, i, m))
                    class="month-grid--actual"
                />
                <FieldError message=vm.item_error(s, i, "actual") />
                <div class="wizard__realization">
                    {move || match realization.get() {
                        Some(pct) => format!("Realisasi {:.0}%", pct),
                        None => "Belum ada rencana".to_string(),
                    }}
                </div>
            })}
        </div>
    }
}

#[component]
pub fn MonthlyStep(vm: ProgramWizardVm) -> impl IntoView {
    let sections = vm.section_count();
    let is_edit = vm.state.with_untracked(|s| s.mode == WizardMode::Edit);

    view! {
        <div class="wizard__list">
            {move || (0..sections.get()).map(|s| {
                let items = vm.item_count(s);
                view! {
                    <CardAnimated delay_ms={(s as u32) * 80}>
                        <h4 class="details-section__title">{section_caption(vm, s)}</h4>
                        {move || (0..items.get())
                            .map(|i| view! { <ItemMonths vm=vm s=s i=i is_edit=is_edit /> })
                            .collect_view()}
                    </CardAnimated>
                }
            }).collect_view()}
        </div>
    }
}

// ── Step 5: Dokumentasi ───────────────────────────────────────────────────────

#[component]
fn DocRowEditor(vm: ProgramWizardVm, s: usize, i: usize, d: usize) -> impl IntoView {
    let month = vm.read(move |dr| dr.item(s, i).ok().and_then(|x| x.docs.get(d)).map(|doc| doc.month));

    view! {
        <div class="wizard__row">
            <MonthSelect value=month on_change=Callback::new(move |v| vm.set_doc_month(s, i, d, v)) />
            <TextField
                label="Rencana dokumentasi"
                value=vm.read(move |dr| {
                    dr.item(s, i).ok().and_then(|x| x.docs.get(d)).and_then(|doc| doc.plan_note.clone()).unwrap_or_default()
                })
                on_input=Callback::new(move |v| vm.set_doc_plan_note(s, i, d, v))
                error=vm.doc_error(s, i, d, "plan_note")
            />
            <TextField
                label="Bukti (tautan)"
                value=vm.read(move |dr| {
                    dr.item(s, i).ok().and_then(|x| x.docs.get(d)).and_then(|doc| doc.evidence.clone()).unwrap_or_default()
                })
                on_input=Callback::new(move |v| vm.set_doc_evidence(s, i, d, v))
                error=vm.doc_error(s, i, d, "evidence")
            />
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.remove_doc(s, i, d)>
                {icon("trash")}
            </Button>
        </div>
    }
}

#[component]
fn DocRowView(vm: ProgramWizardVm, s: usize, i: usize, d: usize) -> impl IntoView {
    let text = vm.read(move |dr| {
        dr.item(s, i)
            .ok()
            .and_then(|x| x.docs.get(d))
            .map(|doc| {
                let month = MONTH_LABELS[usize::from(doc.month.clamp(1, 12)) - 1];
                let evidence = doc.evidence.clone().unwrap_or_else(|| "-".to_string());
                match &doc.actual_note {
                    Some(note) => format!("{}: {} ({})", month, evidence, note),
                    None => format!("{}: {}", month, evidence),
                }
            })
            .unwrap_or_default()
    });

    view! { <li class="wizard__doc">{icon("file-text")} " " {move || text.get()}</li> }
}

#[component]
fn ItemDocs(vm: ProgramWizardVm, s: usize, i: usize, is_edit: bool) -> impl IntoView {
    let docs = vm.doc_count(s, i);

    view! {
        <div class="wizard__docs">
            <span class="wizard__months-title">{item_caption(vm, s, i)}</span>
            {if is_edit {
                view! {
                    <ul class="wizard__doc-list">
                        {move || (0..docs.get()).map(|d| view! { <DocRowView vm=vm s=s i=i d=d /> }).collect_view()}
                    </ul>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.open_evidence(s, i)>
                        {icon("upload")} " Tambah Bukti"
                    </Button>
                }
                .into_any()
            } else {
                view! {
                    {move || (0..docs.get()).map(|d| view! { <DocRowEditor vm=vm s=s i=i d=d /> }).collect_view()}
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_doc(s, i)>
                        {icon("plus")} " Tambah Dokumen"
                    </Button>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn EvidencePanel(vm: ProgramWizardVm) -> impl IntoView {
    let evidence = vm.evidence;
    let mode = Memo::new(move |_| evidence.with(|e| e.mode));
    let title = Signal::derive(move || {
        let target = evidence.with(|e| e.target);
        vm.state.with(|st| match target {
            Some((s, i)) => st
                .draft
                .item(s, i)
                .map(|item| item.title.clone())
                .unwrap_or_default(),
            None => String::new(),
        })
    });
    let update = move |f: fn(&mut EvidenceDraft, String), value: String| {
        evidence.update(|e| f(e, value));
    };

    view! {
        <div class="wizard__evidence">
            <h4 class="details-section__title">"Bukti realisasi: " {move || title.get()}</h4>
            <div class="details-grid--2col">
                <div class="form__group">
                    <label class="form__label">"Bulan *"</label>
                    <MonthSelect
                        value=Signal::derive(move || evidence.with(|e| e.month))
                        on_change=Callback::new(move |v: String| evidence.update(|e| e.month = v.parse().ok()))
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Jenis bukti"</label>
                    <label>
                        <input
                            type="radio"
                            name="evidence-mode"
                            prop:checked=move || mode.get() == EvidenceMode::Link
                            on:change=move |_| evidence.update(|e| e.mode = EvidenceMode::Link)
                        />
                        " Tautan"
                    </label>
                    <label>
                        <input
                            type="radio"
                            name="evidence-mode"
                            prop:checked=move || mode.get() == EvidenceMode::File
                            on:change=move |_| evidence.update(|e| e.mode = EvidenceMode::File)
                        />
                        " Berkas"
                    </label>
                </div>
            </div>
            // Both inputs stay mounted so the file NodeRef is valid at submit time
            <div class="form__group" class:hidden=move || mode.get() != EvidenceMode::Link>
                <label class="form__label">"Tautan *"</label>
                <input
                    class="form__input"
                    type="url"
                    placeholder="https://"
                    prop:value=move || evidence.with(|e| e.link_url.clone())
                    on:input=move |ev| update(|e, v| e.link_url = v, event_target_value(&ev))
                />
            </div>
            <div class="form__group" class:hidden=move || mode.get() != EvidenceMode::File>
                <label class="form__label">"Berkas *"</label>
                <input class="form__input" type="file" node_ref=vm.evidence_file />
            </div>
            <div class="form__group">
                <label class="form__label">"Catatan"</label>
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || evidence.with(|e| e.note.clone())
                    on:input=move |ev| update(|e, v| e.note = v, event_target_value(&ev))
                />
            </div>
            <div class="wizard__evidence-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit_evidence()
                    disabled=vm.is_busy()
                >
                    {icon("upload")} " Unggah"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.close_evidence()>
                    "Batal"
                </Button>
            </div>
        </div>
    }
}

#[component]
pub fn DocsStep(vm: ProgramWizardVm) -> impl IntoView {
    let sections = vm.section_count();
    let is_edit = vm.state.with_untracked(|s| s.mode == WizardMode::Edit);
    let panel_open = Memo::new(move |_| vm.evidence.with(|e| e.target.is_some()));

    view! {
        <div class="wizard__list">
            {move || (0..sections.get()).map(|s| {
                let items = vm.item_count(s);
                view! {
                    <CardAnimated delay_ms={(s as u32) * 80}>
                        <h4 class="details-section__title">{section_caption(vm, s)}</h4>
                        {move || (0..items.get())
                            .map(|i| view! { <ItemDocs vm=vm s=s i=i is_edit=is_edit /> })
                            .collect_view()}
                    </CardAnimated>
                }
            }).collect_view()}
            <Show when=move || is_edit && panel_open.get()>
                <EvidencePanel vm=vm />
            </Show>
        </div>
    }
}

// ── Step 6: Review ────────────────────────────────────────────────────────────

fn plan_summary(plan: MonthVector) -> String {
    if plan.all_false() {
        return "-".to_string();
    }
    (0..12)
        .filter(|&m| plan.is_set(m))
        .map(|m| MONTH_LABELS[m])
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn ReviewStep(vm: ProgramWizardVm) -> impl IntoView {
    let draft = vm.state;

    view! {
        <CardAnimated delay_ms=0>
            <h4 class="details-section__title">"Ringkasan"</h4>
            {move || draft.with(|st| {
                let d = &st.draft;
                view! {
                    <dl class="details-list">
                        <dt>"Tahun"</dt><dd>{d.year}</dd>
                        <dt>"Entitas"</dt><dd>{d.entity_code.clone()}</dd>
                        <dt>"Plant"</dt><dd>{d.plant_code.clone()}</dd>
                        <dt>"Uraian target"</dt>
                        <dd>{d.target_description.clone().unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Jumlah program kerja"</dt><dd>{d.item_count()}</dd>
                    </dl>
                    {d.sections.iter().enumerate().map(|(s, section)| view! {
                        <table class="table review-table">
                            <thead>
                                <tr>
                                    <th colspan="3">
                                        {format!(
                                            "{}. {} (target {}%)",
                                            s + 1,
                                            section.title,
                                            coerce_f64(&section.target_pct)
                                        )}
                                    </th>
                                </tr>
                            </thead>
                            <tbody>
                                {section.items.iter().map(|item| view! {
                                    <tr>
                                        <td>{item.title.clone()}</td>
                                        <td>{if item.pic.trim().is_empty() { "-".to_string() } else { item.pic.clone() }}</td>
                                        <td>{plan_summary(item.plan)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }).collect_view()}
                }
            })}
        </CardAnimated>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_summary() {
        assert_eq!(plan_summary(MonthVector::empty()), "-");
        let plan = MonthVector::empty().set_range(&[0, 11], true);
        assert_eq!(plan_summary(plan), format!("{}, {}", MONTH_LABELS[0], MONTH_LABELS[11]));
    }
}
