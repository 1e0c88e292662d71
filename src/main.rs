//! Reaction editor page.
//! Wires the editor state machine to the DOM and runs its queued jobs.

use log::{info, warn, LevelFilter};
use reaction_editor::config::EditTarget;
use reaction_editor::form::{Lens, SectionKey};
use reaction_editor::{api, harness, logger, EditorAction, EditorState, Job};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod views;

use components::{validate_box, EditorContext, FormLens};
use hooks::{use_autosave, use_section_observer};

// ──────────────────────────────────────────────────────────────────────────────
// State

#[derive(Clone)]
struct Store(EditorState);

impl Reducible for Store {
    type Action = EditorAction;

    fn reduce(self: Rc<Self>, action: EditorAction) -> Rc<Self> {
        let mut store = self;
        Rc::make_mut(&mut store).0.apply(action);
        store
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Side effects

fn load(target: EditTarget, dispatch: Callback<EditorAction>) {
    spawn_local(async move {
        let action = match &target {
            EditTarget::Dataset { name, .. } => match api::fetch_dataset(name).await {
                Ok(dataset) => EditorAction::DatasetLoaded(dataset),
                Err(e) => EditorAction::LoadFailed(e.to_string()),
            },
            EditTarget::ReactionId(id) => match api::fetch_reaction(id).await {
                Ok(reaction) => EditorAction::ReactionLoaded(reaction),
                Err(e) => EditorAction::LoadFailed(e.to_string()),
            },
        };
        dispatch.emit(action);
    });
}

fn run_job(state: &EditorState, job: Job, dispatch: Callback<EditorAction>) {
    match job {
        Job::Validate { key, request_id } => match state.form.validation_request(key) {
            None => {}
            Some(Err(e)) => dispatch.emit(EditorAction::ValidationFinished {
                key,
                request_id,
                invalid_fields: Vec::new(),
                result: Err(e.to_string()),
            }),
            Some(Ok(request)) => spawn_local(async move {
                let result = api::validate(request.type_name, &request.body)
                    .await
                    .map_err(|e| e.to_string());
                dispatch.emit(EditorAction::ValidationFinished {
                    key,
                    request_id,
                    invalid_fields: request.invalid_fields,
                    result,
                });
            }),
        },
        Job::Render => {
            let reaction = state.reaction();
            spawn_local(async move {
                let result = api::render_reaction(&reaction)
                    .await
                    .map_err(|e| e.to_string());
                dispatch.emit(EditorAction::Rendered(result));
            });
        }
        Job::Save { name, dataset } => spawn_local(async move {
            let result = api::put_dataset(&name, &dataset)
                .await
                .map_err(|e| e.to_string());
            if result.is_ok() {
                info!("saved dataset '{}'", name);
            }
            dispatch.emit(EditorAction::SaveFinished(result));
        }),
    }
}

/// Start every job queued since the last call. `handled` is the sequence
/// number of the last job already started.
fn run_jobs(state: &EditorState, handled: &RefCell<u64>, dispatch: &Callback<EditorAction>) {
    let after = *handled.borrow();
    let mut last = after;
    for (seq, job) in state.jobs_after(after) {
        last = *seq;
        run_job(state, job.clone(), dispatch.clone());
    }
    if last > after {
        *handled.borrow_mut() = last;
        dispatch.emit(EditorAction::JobsTaken(last));
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Components

#[derive(Properties, PartialEq)]
struct EditorProps {
    target: EditTarget,
}

#[function_component(Editor)]
fn editor(props: &EditorProps) -> Html {
    let target = props.target.clone();
    let store = use_reducer(move || Store(EditorState::new(target)));
    let dispatch = {
        let dispatcher = store.dispatcher();
        Callback::from(move |action: EditorAction| dispatcher.dispatch(action))
    };
    let handled = use_mut_ref(|| 0u64);
    let state = &store.0;
    let ready = state.session.is_ready();

    // Fetch the record on mount
    {
        let target = props.target.clone();
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| load(target, dispatch));
    }

    // Publish and drain the job queue after every render
    {
        let store = store.clone();
        let dispatch = dispatch.clone();
        use_effect(move || {
            harness::publish(&store.0);
            run_jobs(&store.0, &handled, &dispatch);
            || ()
        });
    }

    use_effect_with(ready, |ready| {
        if *ready {
            if let Err(e) = api::mark_body_ready() {
                warn!("{}", e);
            }
        }
    });

    use_autosave(dispatch.clone());

    let entries = state.form.sidebar_entries();
    let anchors = if ready {
        entries.iter().map(|entry| entry.anchor.clone()).collect()
    } else {
        Vec::new()
    };
    use_section_observer(anchors, dispatch.clone());

    let ctx = EditorContext {
        dispatch: dispatch.clone(),
        frozen: state.session.is_frozen(),
    };
    let root: FormLens<_> = Lens::root();

    let on_save = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(EditorAction::Save))
    };
    let on_download = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let reaction = store.0.reaction();
            spawn_local(async move {
                if let Err(e) = api::download_reaction(&reaction).await {
                    warn!("download failed: {}", e);
                }
            });
        })
    };
    let on_autosave = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(EditorAction::ToggleAutosave))
    };
    let on_undo = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(EditorAction::Undo))
    };
    let on_freeze = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(EditorAction::Freeze))
    };

    let session = &state.session;
    let reports = &state.reports;
    html! {
        <ContextProvider<EditorContext> context={ctx.clone()}>
            <div id="header">
                if !session.is_frozen() {
                    if session.save_visible() {
                        <button id="save" disabled={session.is_saving()} onclick={on_save}>
                            { session.save_label() }
                        </button>
                    }
                    <button id="autosave" onclick={on_autosave}>
                        { if session.autosave_enabled() { "autosave: on" } else { "autosave: off" } }
                    </button>
                    if state.can_undo() {
                        <button id="undo" onclick={on_undo}>{ "undo" }</button>
                    }
                    <button id="freeze" onclick={on_freeze}>{ "freeze" }</button>
                }
                <button id="download" disabled={!ready} onclick={on_download}>{ "download" }</button>
            </div>

            <div id="sidebar">
                { for entries.iter().map(|entry| html! {
                    <a href={entry.href()}
                        class={classes!(
                            entry.nested.then_some("nested"),
                            state.sidebar.is_highlighted(&entry.anchor).then_some("highlighted")
                        )}>
                        { &entry.label }
                    </a>
                }) }
            </div>

            <div id="editor">
                if let Some(error) = &state.load_error {
                    <div class="load_error">{ error }</div>
                }
                if ready {
                    <div id={SectionKey::Reaction.anchor()} class="section">
                        { validate_box(reports, SectionKey::Reaction) }
                        if let Some(preview) = &state.preview {
                            <div class="preview">
                                { Html::from_html_unchecked(AttrValue::from(preview.clone())) }
                            </div>
                        }
                    </div>
                    { views::render_conditions(&ctx, reports, &root, &state.form) }
                    { views::render_notes(&ctx, reports, &root, &state.form.notes) }
                    { views::render_observations(&ctx, reports, &root, &state.form) }
                    { views::render_workups(&ctx, reports, &root, &state.form) }
                    { views::render_outcomes(&ctx, reports, &root, &state.form) }
                } else if state.load_error.is_none() {
                    <div class="loading">{ "loading…" }</div>
                }
            </div>
        </ContextProvider<EditorContext>>
    }
}

/// Resolves the edit target from the query string before mounting the editor.
#[function_component]
fn App() -> Html {
    match api::resolve_target() {
        Ok(target) => html! { <Editor {target} /> },
        Err(e) => {
            warn!("{}", e);
            html! { <div class="load_error">{ e.to_string() }</div> }
        }
    }
}

fn main() {
    logger::init(LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
