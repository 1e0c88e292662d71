use crate::components::*;
use reaction_editor::form::SectionKey;
use reaction_editor::sections::ObservationForm;
use reaction_editor::ReactionForm;
use yew::prelude::*;

pub fn render_observations(
    ctx: &EditorContext,
    reports: &Reports,
    root: &FormLens<ReactionForm>,
    form: &ReactionForm,
) -> Html {
    html! {
        <div id="section_observations" class="section">
            <h2>{ "Observations" }</h2>
            { for form.observations.live().map(|(id, observation)| {
                let key = SectionKey::Observation(id);
                let lens = root.section(key, move |f: &mut ReactionForm| f.observations.get_mut(id));
                html! {
                    <div id={key.anchor()} class="observation">
                        { validate_box(reports, key) }
                        { metric_input(ctx, "time", lens.field(|o: &mut ObservationForm| &mut o.time), &observation.time) }
                        { text_area(ctx, "comment", lens.field(|o: &mut ObservationForm| &mut o.comment), &observation.comment) }
                        <h4>{ "image" }</h4>
                        { data_input(ctx, format!("observation_image_{}", id),
                            lens.field(|o: &mut ObservationForm| &mut o.image), &observation.image) }
                        { remove_button(ctx, id) }
                    </div>
                }
            }) }
            { add_button(ctx, "observation", root.field(|f: &mut ReactionForm| &mut f.observations)) }
        </div>
    }
}
