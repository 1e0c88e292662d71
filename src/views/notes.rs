use crate::components::*;
use reaction_editor::form::SectionKey;
use reaction_editor::sections::NotesForm;
use reaction_editor::ReactionForm;
use yew::prelude::*;

pub fn render_notes(ctx: &EditorContext, reports: &Reports, root: &FormLens<ReactionForm>, notes: &NotesForm) -> Html {
    let lens = root.section(SectionKey::Notes, |f: &mut ReactionForm| Some(&mut f.notes));
    html! {
        <div id={SectionKey::Notes.anchor()} class="section">
            <h2>{ "Notes" }</h2>
            { validate_box(reports, SectionKey::Notes) }
            { optional_bool_input(ctx, "heterogeneous", lens.field(|n: &mut NotesForm| &mut n.heterogeneous), &notes.heterogeneous) }
            { optional_bool_input(ctx, "forms precipitate", lens.field(|n: &mut NotesForm| &mut n.precipitate), &notes.precipitate) }
            { optional_bool_input(ctx, "exothermic", lens.field(|n: &mut NotesForm| &mut n.exothermic), &notes.exothermic) }
            { optional_bool_input(ctx, "offgasses", lens.field(|n: &mut NotesForm| &mut n.offgas), &notes.offgas) }
            { optional_bool_input(ctx, "moisture sensitive", lens.field(|n: &mut NotesForm| &mut n.moisture), &notes.moisture) }
            { optional_bool_input(ctx, "oxygen sensitive", lens.field(|n: &mut NotesForm| &mut n.oxygen), &notes.oxygen) }
            { optional_bool_input(ctx, "light sensitive", lens.field(|n: &mut NotesForm| &mut n.light), &notes.light) }
            { text_area(ctx, "safety notes", lens.field(|n: &mut NotesForm| &mut n.safety), &notes.safety) }
            { text_area(ctx, "procedure details", lens.field(|n: &mut NotesForm| &mut n.details), &notes.details) }
        </div>
    }
}
