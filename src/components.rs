//! Form widgets shared by every section view.
//!
//! Widgets are plain render functions: they read the form state they are
//! given and turn DOM events into [`EditorAction::Edit`]s through the lens.

use reaction_editor::api;
use reaction_editor::enums::OptionalBool;
use reaction_editor::form::{
    Lens, MetricFields, OptionalBoolSelector, SectionId, SectionKey, SectionList, Selector,
    TextField,
};
use reaction_editor::sections::{AmountForm, AmountKind, DataForm, DataKind, TypedFields};
use reaction_editor::tracking::ChangeKind;
use reaction_editor::validation::{ValidationReport, ValidationStatus};
use reaction_editor::{EditorAction, ReactionForm};
use std::collections::BTreeMap;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub type FormLens<T> = Lens<ReactionForm, T>;

/// What every view needs besides its own slice of the form.
#[derive(Clone, PartialEq, Default)]
pub struct EditorContext {
    pub dispatch: Callback<EditorAction>,
    pub frozen: bool,
}

impl EditorContext {
    pub fn edit<T: 'static>(
        &self,
        lens: &FormLens<T>,
        change: ChangeKind,
        f: impl Fn(&mut T) + 'static,
    ) {
        self.dispatch.emit(EditorAction::Edit(lens.edit(change, f)));
    }
}

pub fn text_input(ctx: &EditorContext, label: &str, lens: FormLens<TextField>, field: &TextField) -> Html {
    let class = classes!(field.name(), "edittext", field.is_invalid().then_some("invalid"));
    let oninput = {
        let ctx = ctx.clone();
        let lens = lens.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            ctx.edit(&lens, ChangeKind::Input, move |f| f.set_text(value.clone()));
        })
    };
    let onblur = {
        let ctx = ctx.clone();
        Callback::from(move |_: FocusEvent| ctx.edit(&lens, ChangeKind::Blur, TextField::blur))
    };
    html! {
        <label class="field">
            <span class="field_label">{ label }</span>
            <input type="text" {class} value={field.text().to_string()}
                disabled={ctx.frozen} {oninput} {onblur} />
        </label>
    }
}

/// Multi-line free text.
pub fn text_area(ctx: &EditorContext, label: &str, lens: FormLens<TextField>, field: &TextField) -> Html {
    let oninput = {
        let ctx = ctx.clone();
        let lens = lens.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            ctx.edit(&lens, ChangeKind::Input, move |f| f.set_text(value.clone()));
        })
    };
    let onblur = {
        let ctx = ctx.clone();
        Callback::from(move |_: FocusEvent| ctx.edit(&lens, ChangeKind::Blur, TextField::blur))
    };
    html! {
        <label class="field">
            <span class="field_label">{ label }</span>
            <textarea class={classes!(field.name(), "edittext")} value={field.text().to_string()}
                disabled={ctx.frozen} {oninput} {onblur} />
        </label>
    }
}

/// Copies the text of a local file into `lens` through `apply`.
pub fn text_upload<T: 'static>(
    ctx: &EditorContext,
    lens: FormLens<T>,
    apply: fn(&mut T, String),
) -> Html {
    if ctx.frozen {
        return html! {};
    }
    let onchange = {
        let ctx = ctx.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let ctx = ctx.clone();
            let lens = lens.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::read_file_text(file).await {
                    Ok(text) => ctx.edit(&lens, ChangeKind::Change, move |t| apply(t, text.clone())),
                    Err(e) => log::warn!("upload failed: {}", e),
                }
            });
        })
    };
    html! { <input type="file" class="text_upload" {onchange} /> }
}

pub fn selector_input(ctx: &EditorContext, label: &str, lens: FormLens<Selector>, selector: &Selector) -> Html {
    let onchange = {
        let ctx = ctx.clone();
        Callback::from(move |e: Event| {
            let name = e.target_unchecked_into::<HtmlSelectElement>().value();
            ctx.edit(&lens, ChangeKind::Change, move |s| s.set_text(&name));
        })
    };
    let current = selector.get();
    html! {
        <label class="field">
            <span class="field_label">{ label }</span>
            <select class="selector" disabled={ctx.frozen} {onchange}>
                { for selector.options().map(|(name, code)| html! {
                    <option value={name} selected={code == current}>{ name }</option>
                }) }
            </select>
        </label>
    }
}

pub fn optional_bool_input(
    ctx: &EditorContext,
    label: &str,
    lens: FormLens<OptionalBoolSelector>,
    value: &OptionalBoolSelector,
) -> Html {
    let onchange = {
        let ctx = ctx.clone();
        Callback::from(move |e: Event| {
            let choice = OptionalBool::parse(&e.target_unchecked_into::<HtmlSelectElement>().value());
            ctx.edit(&lens, ChangeKind::Change, move |s| s.select(choice));
        })
    };
    let current = value.selected();
    html! {
        <label class="field">
            <span class="field_label">{ label }</span>
            <select class="optional_bool" disabled={ctx.frozen} {onchange}>
                { for OptionalBool::ALL.iter().map(|choice| html! {
                    <option value={choice.as_str()} selected={*choice == current}>{ choice.as_str() }</option>
                }) }
            </select>
        </label>
    }
}

/// Value, units and precision of one metric group.
pub fn metric_input(ctx: &EditorContext, label: &str, lens: FormLens<MetricFields>, fields: &MetricFields) -> Html {
    html! {
        <div class="metric">
            { text_input(ctx, label, lens.field(|m: &mut MetricFields| &mut m.value), &fields.value) }
            if let Some(units) = &fields.units {
                { selector_input(ctx, "units", lens.focus(|m: &mut MetricFields| m.units.as_mut()), units) }
            }
            { text_input(ctx, "±", lens.field(|m: &mut MetricFields| &mut m.precision), &fields.precision) }
        </div>
    }
}

pub fn typed_input(ctx: &EditorContext, label: &str, lens: FormLens<TypedFields>, fields: &TypedFields) -> Html {
    html! {
        <div class="typed">
            { selector_input(ctx, label, lens.field(|t: &mut TypedFields| &mut t.kind), &fields.kind) }
            { text_input(ctx, "details", lens.field(|t: &mut TypedFields| &mut t.details), &fields.details) }
        </div>
    }
}

/// A radio group. `group` must be unique on the page.
pub fn radio_group<T, K>(
    ctx: &EditorContext,
    group: String,
    lens: FormLens<T>,
    choices: &[K],
    current: Option<K>,
    label: fn(K) -> &'static str,
    select: fn(&mut T, K),
) -> Html
where
    T: 'static,
    K: Copy + PartialEq + 'static,
{
    html! {
        <span class="radios">
            { for choices.iter().map(|&choice| {
                let onchange = {
                    let ctx = ctx.clone();
                    let lens = lens.clone();
                    Callback::from(move |_: Event| {
                        ctx.edit(&lens, ChangeKind::Change, move |t| select(t, choice))
                    })
                };
                html! {
                    <label>
                        <input type="radio" name={group.clone()} checked={current == Some(choice)}
                            disabled={ctx.frozen} {onchange} />
                        { label(choice) }
                    </label>
                }
            }) }
        </span>
    }
}

pub fn amount_input(ctx: &EditorContext, group: String, lens: FormLens<AmountForm>, amount: &AmountForm) -> Html {
    html! {
        <div class="amount">
            { radio_group(ctx, group, lens.clone(), &AmountKind::ALL, amount.kind, AmountKind::label,
                |a: &mut AmountForm, kind| a.kind = Some(kind)) }
            { text_input(ctx, "amount", lens.field(|a: &mut AmountForm| &mut a.value), &amount.value) }
            if let Some(units) = amount.units() {
                { selector_input(ctx, "units", lens.focus(|a: &mut AmountForm| a.units_mut()), units) }
            }
            { text_input(ctx, "±", lens.field(|a: &mut AmountForm| &mut a.precision), &amount.precision) }
            if amount.kind == Some(AmountKind::Volume) {
                { optional_bool_input(ctx, "includes solutes",
                    lens.field(|a: &mut AmountForm| &mut a.includes_solutes), &amount.includes_solutes) }
            }
        </div>
    }
}

pub fn data_input(ctx: &EditorContext, group: String, lens: FormLens<DataForm>, data: &DataForm) -> Html {
    html! {
        <div class="data">
            { radio_group(ctx, group, lens.clone(), &DataKind::ALL, data.kind(), DataKind::label,
                |d: &mut DataForm, kind| d.set_kind(kind)) }
            { text_area(ctx, "value", lens.field(|d: &mut DataForm| &mut d.value), &data.value) }
            { text_upload(ctx, lens.clone(), DataForm::upload_text) }
            if data.has_bytes() {
                <span class="note">{ "binary value attached" }</span>
            }
            { text_input(ctx, "description", lens.field(|d: &mut DataForm| &mut d.description), &data.description) }
            { text_input(ctx, "format", lens.field(|d: &mut DataForm| &mut d.format), &data.format) }
        </div>
    }
}

pub fn add_button<T: Default + 'static>(
    ctx: &EditorContext,
    label: &str,
    lens: FormLens<SectionList<T>>,
) -> Html {
    if ctx.frozen {
        return html! {};
    }
    let onclick = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            let edit = lens.edit_with_ids(ChangeKind::Click, |list: &mut SectionList<T>, ids| {
                list.add(ids);
            });
            ctx.dispatch.emit(EditorAction::Edit(edit));
        })
    };
    html! { <button class="add" {onclick}>{ format!("add {}", label) }</button> }
}

pub fn remove_button(ctx: &EditorContext, id: SectionId) -> Html {
    if ctx.frozen {
        return html! {};
    }
    let dispatch = ctx.dispatch.clone();
    let onclick = Callback::from(move |_: MouseEvent| dispatch.emit(EditorAction::Remove(id)));
    html! { <button class="remove" {onclick}>{ "remove" }</button> }
}

#[derive(Properties, PartialEq)]
pub struct ValidateBoxProps {
    pub section: SectionKey,
    pub report: Option<ValidationReport>,
}

/// Status indicator, error list and warnings for one section.
#[function_component(ValidateBox)]
fn validate_box_view(props: &ValidateBoxProps) -> Html {
    let ctx = use_context::<EditorContext>().unwrap_or_default();
    if ctx.frozen {
        return html! {};
    }
    let onclick = {
        let dispatch = ctx.dispatch.clone();
        let section = props.section;
        Callback::from(move |_: MouseEvent| dispatch.emit(EditorAction::Validate(section)))
    };
    let report = props.report.clone().unwrap_or_default();
    let status_class = match &report.status {
        ValidationStatus::Pending => "pending",
        ValidationStatus::Passed => "passed",
        ValidationStatus::Failed(_) => "failed",
        ValidationStatus::Unavailable(_) => "unavailable",
    };
    html! {
        <div class="validate">
            <button class="validate_button" {onclick}>{ "validate" }</button>
            <span class={classes!("validate_status", status_class)}>{ report.summary() }</span>
            if let ValidationStatus::Unavailable(message) = &report.status {
                <div class="validate_message">{ message }</div>
            }
            if !report.errors.is_empty() {
                <ul class="validate_message">
                    { for report.errors.iter().map(|e| html! { <li>{ e }</li> }) }
                </ul>
            }
            if report.show_warnings() {
                <ul class="validate_warning">
                    { for report.warnings.iter().map(|w| html! { <li>{ w }</li> }) }
                </ul>
            }
        </div>
    }
}

pub type Reports = BTreeMap<SectionKey, ValidationReport>;

pub fn validate_box(reports: &Reports, section: SectionKey) -> Html {
    html! { <ValidateBox {section} report={reports.get(&section).cloned()} /> }
}
