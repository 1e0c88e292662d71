use super::conditions::{stirring_fields, temperature_fields};
use crate::components::*;
use reaction_editor::form::SectionKey;
use reaction_editor::sections::WorkupForm;
use reaction_editor::ReactionForm;
use yew::prelude::*;

pub fn render_workups(
    ctx: &EditorContext,
    reports: &Reports,
    root: &FormLens<ReactionForm>,
    form: &ReactionForm,
) -> Html {
    html! {
        <div id="section_workups" class="section">
            <h2>{ "Workups" }</h2>
            { for form.workups.live().map(|(id, workup)| {
                let key = SectionKey::Workup(id);
                let lens = root.section(key, move |f: &mut ReactionForm| f.workups.get_mut(id));
                html! {
                    <div id={key.anchor()} class="workup">
                        { validate_box(reports, key) }
                        { typed_input(ctx, "type", lens.field(|w: &mut WorkupForm| &mut w.kind), &workup.kind) }
                        { metric_input(ctx, "duration", lens.field(|w: &mut WorkupForm| &mut w.duration), &workup.duration) }
                        { amount_input(ctx, format!("workup_amount_{}", id),
                            lens.field(|w: &mut WorkupForm| &mut w.amount), &workup.amount) }
                        <fieldset>
                            <legend>{ "temperature" }</legend>
                            { temperature_fields(ctx, lens.field(|w: &mut WorkupForm| &mut w.temperature), &workup.temperature) }
                        </fieldset>
                        { text_input(ctx, "keep phase", lens.field(|w: &mut WorkupForm| &mut w.keep_phase), &workup.keep_phase) }
                        <fieldset>
                            <legend>{ "stirring" }</legend>
                            { stirring_fields(ctx, lens.field(|w: &mut WorkupForm| &mut w.stirring), &workup.stirring) }
                        </fieldset>
                        { text_input(ctx, "target pH", lens.field(|w: &mut WorkupForm| &mut w.target_ph), &workup.target_ph) }
                        { optional_bool_input(ctx, "automated", lens.field(|w: &mut WorkupForm| &mut w.automated), &workup.automated) }
                        { remove_button(ctx, id) }
                    </div>
                }
            }) }
            { add_button(ctx, "workup", root.field(|f: &mut ReactionForm| &mut f.workups)) }
        </div>
    }
}
