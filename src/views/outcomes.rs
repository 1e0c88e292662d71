use crate::components::*;
use reaction_editor::form::{SectionId, SectionKey};
use reaction_editor::sections::{
    AnalysisForm, MeasurementValueKind, NamedDataForm, OutcomeForm, ProductForm,
    ProductMeasurementForm,
};
use reaction_editor::tracking::ChangeKind;
use reaction_editor::ReactionForm;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub fn render_outcomes(
    ctx: &EditorContext,
    reports: &Reports,
    root: &FormLens<ReactionForm>,
    form: &ReactionForm,
) -> Html {
    html! {
        <div id="section_outcomes" class="section">
            <h2>{ "Outcomes" }</h2>
            { for form.outcomes.live().map(|(id, outcome)| {
                let key = SectionKey::Outcome(id);
                let lens = root.section(key, move |f: &mut ReactionForm| f.outcomes.get_mut(id));
                html! {
                    <div id={key.anchor()} class="outcome">
                        { validate_box(reports, key) }
                        { metric_input(ctx, "time", lens.field(|o: &mut OutcomeForm| &mut o.time), &outcome.time) }
                        { metric_input(ctx, "conversion", lens.field(|o: &mut OutcomeForm| &mut o.conversion), &outcome.conversion) }
                        <h3>{ "Analyses" }</h3>
                        { for outcome.analyses.live().map(|(aid, analysis)| {
                            render_analysis(ctx, reports, &lens, aid, analysis)
                        }) }
                        { add_button(ctx, "analysis", lens.field(|o: &mut OutcomeForm| &mut o.analyses)) }
                        <h3>{ "Products" }</h3>
                        { for outcome.products.live().map(|(pid, product)| {
                            render_product(ctx, reports, &lens, outcome, pid, product)
                        }) }
                        { add_button(ctx, "product", lens.field(|o: &mut OutcomeForm| &mut o.products)) }
                        { remove_button(ctx, id) }
                    </div>
                }
            }) }
            { add_button(ctx, "outcome", root.field(|f: &mut ReactionForm| &mut f.outcomes)) }
        </div>
    }
}

/// The analysis name is left uncontrolled while typing. Committing it on blur
/// goes through the outcome so measurements keyed by the old name let go.
fn analysis_name_input(
    ctx: &EditorContext,
    outcome: &FormLens<OutcomeForm>,
    id: SectionId,
    analysis: &AnalysisForm,
) -> Html {
    let scoped = outcome.section(SectionKey::Analysis(id), |o: &mut OutcomeForm| Some(o));
    let onblur = {
        let ctx = ctx.clone();
        Callback::from(move |e: FocusEvent| {
            let name = e.target_unchecked_into::<HtmlInputElement>().value();
            ctx.edit(&scoped, ChangeKind::Blur, move |o| o.rename_analysis(id, name.trim()));
        })
    };
    html! {
        <label class="field">
            <span class="field_label">{ "name" }</span>
            <input type="text" class={classes!(analysis.name.name(), "edittext")}
                value={analysis.name.text().to_string()} disabled={ctx.frozen} {onblur} />
        </label>
    }
}

fn render_analysis(
    ctx: &EditorContext,
    reports: &Reports,
    outcome: &FormLens<OutcomeForm>,
    id: SectionId,
    analysis: &AnalysisForm,
) -> Html {
    let key = SectionKey::Analysis(id);
    let lens = outcome.section(key, move |o: &mut OutcomeForm| o.analyses.get_mut(id));
    html! {
        <div id={key.anchor()} class="analysis">
            { validate_box(reports, key) }
            { analysis_name_input(ctx, outcome, id, analysis) }
            { typed_input(ctx, "type", lens.field(|a: &mut AnalysisForm| &mut a.kind), &analysis.kind) }
            { text_input(ctx, "CHMO id", lens.field(|a: &mut AnalysisForm| &mut a.chmo_id), &analysis.chmo_id) }
            { for analysis.data.live().map(|(did, data)| {
                let lens = lens.focus(move |a: &mut AnalysisForm| a.data.get_mut(did));
                html! {
                    <div class="analysis_data">
                        { text_input(ctx, "key", lens.field(|d: &mut NamedDataForm| &mut d.name), &data.name) }
                        { data_input(ctx, format!("analysis_data_{}", did),
                            lens.field(|d: &mut NamedDataForm| &mut d.data), &data.data) }
                        { remove_button(ctx, did) }
                    </div>
                }
            }) }
            { add_button(ctx, "data", lens.field(|a: &mut AnalysisForm| &mut a.data)) }
            { text_input(ctx, "instrument manufacturer", lens.field(|a: &mut AnalysisForm| &mut a.manufacturer), &analysis.manufacturer) }
            { text_input(ctx, "last calibrated", lens.field(|a: &mut AnalysisForm| &mut a.calibrated), &analysis.calibrated) }
            { optional_bool_input(ctx, "of isolated species",
                lens.field(|a: &mut AnalysisForm| &mut a.isolated_species), &analysis.isolated_species) }
            { remove_button(ctx, id) }
        </div>
    }
}

fn render_product(
    ctx: &EditorContext,
    reports: &Reports,
    outcome_lens: &FormLens<OutcomeForm>,
    outcome: &OutcomeForm,
    id: SectionId,
    product: &ProductForm,
) -> Html {
    let key = SectionKey::Product(id);
    let lens = outcome_lens.section(key, move |o: &mut OutcomeForm| o.products.get_mut(id));
    let analysis_names = outcome.analysis_names();
    html! {
        <div id={key.anchor()} class="product">
            { validate_box(reports, key) }
            { optional_bool_input(ctx, "desired product", lens.field(|p: &mut ProductForm| &mut p.desired), &product.desired) }
            { text_input(ctx, "color", lens.field(|p: &mut ProductForm| &mut p.color), &product.color) }
            { typed_input(ctx, "texture", lens.field(|p: &mut ProductForm| &mut p.texture), &product.texture) }
            <h4>{ "Measurements" }</h4>
            { for product.measurements.live().map(|(mid, measurement)| {
                render_measurement(ctx, reports, &lens, &analysis_names, mid, measurement)
            }) }
            { add_button(ctx, "measurement", lens.field(|p: &mut ProductForm| &mut p.measurements)) }
            { remove_button(ctx, id) }
        </div>
    }
}

fn analysis_key_input(
    ctx: &EditorContext,
    lens: &FormLens<ProductMeasurementForm>,
    names: &[String],
    current: &str,
) -> Html {
    let onchange = {
        let ctx = ctx.clone();
        let lens = lens.clone();
        Callback::from(move |e: Event| {
            let name = e.target_unchecked_into::<HtmlSelectElement>().value();
            ctx.edit(&lens, ChangeKind::Change, move |m| m.analysis_key = name.clone());
        })
    };
    let mut options: Vec<&str> = std::iter::once("").chain(names.iter().map(String::as_str)).collect();
    if !options.contains(&current) {
        options.push(current);
    }
    html! {
        <label class="field">
            <span class="field_label">{ "analysis" }</span>
            <select class="analysis_key" disabled={ctx.frozen} {onchange}>
                { for options.into_iter().map(|name| html! {
                    <option value={name.to_string()} selected={name == current}>{ name }</option>
                }) }
            </select>
        </label>
    }
}

fn render_measurement(
    ctx: &EditorContext,
    reports: &Reports,
    product: &FormLens<ProductForm>,
    analysis_names: &[String],
    id: SectionId,
    m: &ProductMeasurementForm,
) -> Html {
    let key = SectionKey::ProductMeasurement(id);
    let lens = product.section(key, move |p: &mut ProductForm| p.measurements.get_mut(id));
    let value_kind = m.value_kind();
    html! {
        <div id={key.anchor()} class="product_measurement">
            { validate_box(reports, key) }
            { analysis_key_input(ctx, &lens, analysis_names, &m.analysis_key) }
            { typed_input(ctx, "type", lens.field(|m: &mut ProductMeasurementForm| &mut m.kind), &m.kind) }
            { optional_bool_input(ctx, "internal standard",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.uses_internal_standard), &m.uses_internal_standard) }
            { optional_bool_input(ctx, "normalized",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.is_normalized), &m.is_normalized) }
            { optional_bool_input(ctx, "authentic standard",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.uses_authentic_standard), &m.uses_authentic_standard) }
            { radio_group(ctx, format!("product_measurement_value_{}", id), lens.clone(),
                &MeasurementValueKind::ALL, value_kind, MeasurementValueKind::label,
                |m: &mut ProductMeasurementForm, kind| m.set_value_kind(kind)) }
            if value_kind == Some(MeasurementValueKind::Amount) {
                { amount_input(ctx, format!("product_measurement_amount_{}", id),
                    lens.field(|m: &mut ProductMeasurementForm| &mut m.amount), &m.amount) }
            } else if value_kind.is_some() {
                { text_input(ctx, "value", lens.field(|m: &mut ProductMeasurementForm| &mut m.value), &m.value) }
                if value_kind != Some(MeasurementValueKind::String) {
                    { text_input(ctx, "±", lens.field(|m: &mut ProductMeasurementForm| &mut m.precision), &m.precision) }
                }
            }
            { metric_input(ctx, "retention time",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.retention_time), &m.retention_time) }
            { typed_input(ctx, "mass spec", lens.field(|m: &mut ProductMeasurementForm| &mut m.mass_spec), &m.mass_spec) }
            { text_input(ctx, "TIC minimum m/z",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.tic_minimum_mz), &m.tic_minimum_mz) }
            { text_input(ctx, "TIC maximum m/z",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.tic_maximum_mz), &m.tic_maximum_mz) }
            { typed_input(ctx, "selectivity", lens.field(|m: &mut ProductMeasurementForm| &mut m.selectivity), &m.selectivity) }
            { metric_input(ctx, "wavelength",
                lens.field(|m: &mut ProductMeasurementForm| &mut m.wavelength), &m.wavelength) }
            { remove_button(ctx, id) }
        </div>
    }
}
