//! Read-only hooks for external test drivers.
//!
//! The app publishes its state here after every render. Drivers poll
//! `editor_ready()` and read the current record back without going through
//! the DOM.

use crate::api;
use crate::config::EditTarget;
use crate::editor::EditorState;
use crate::form::SectionForm;
use crate::reaction::ReactionForm;
use crate::record::{Dataset, Reaction};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Form state as of the last render. The record is only unloaded when a
/// driver asks for it.
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    target: EditTarget,
    form: ReactionForm,
    dataset: Option<Rc<Dataset>>,
}

impl Snapshot {
    fn reaction(&self) -> Reaction {
        self.form.unload()
    }

    /// The dataset as a commit would write it.
    fn committed_dataset(&self) -> Option<(String, Dataset)> {
        let EditTarget::Dataset { name, index } = &self.target else {
            return None;
        };
        let mut dataset = Dataset::clone(self.dataset.as_ref()?);
        *dataset.reactions.get_mut(*index)? = self.reaction();
        Some((name.clone(), dataset))
    }
}

thread_local! {
    static READY: Cell<bool> = const { Cell::new(false) };
    static SNAPSHOT: RefCell<Option<Snapshot>> = const { RefCell::new(None) };
}

pub fn publish(state: &EditorState) {
    if !state.session.is_ready() {
        return;
    }
    let snapshot = Snapshot {
        target: state.session.target().clone(),
        form: state.form.clone(),
        dataset: state.session.dataset().cloned(),
    };
    SNAPSHOT.with(|s| *s.borrow_mut() = Some(snapshot));
    READY.with(|r| r.set(true));
}

fn with_snapshot<T>(f: impl FnOnce(&Snapshot) -> T) -> Option<T> {
    SNAPSHOT.with(|s| s.borrow().as_ref().map(f))
}

#[wasm_bindgen]
pub fn editor_ready() -> bool {
    READY.with(Cell::get)
}

/// The current record in its JSON mapping, or `null` before load.
#[wasm_bindgen]
pub fn editor_reaction() -> Result<JsValue, JsValue> {
    match with_snapshot(Snapshot::reaction) {
        Some(reaction) => serde_wasm_bindgen::to_value(&reaction).map_err(JsValue::from),
        None => Ok(JsValue::NULL),
    }
}

/// Ask the server whether its stored dataset matches what a commit would write.
#[wasm_bindgen]
pub async fn editor_compare_dataset() -> Result<bool, JsValue> {
    let Some((name, dataset)) = with_snapshot(Snapshot::committed_dataset).flatten() else {
        return Err(JsValue::from_str("no dataset loaded"));
    };
    api::compare_dataset(&name, &dataset)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
