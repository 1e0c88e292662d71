use gloo_timers::callback::Interval;
use reaction_editor::config::AUTOSAVE_INTERVAL_MS;
use reaction_editor::EditorAction;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

/// Poll for autosave every interval. Whether a tick saves is decided by the
/// session, so toggling autosave never touches the timer.
#[hook]
pub fn use_autosave(dispatch: Callback<EditorAction>) {
    use_effect_with((), move |_| {
        let interval = Interval::new(AUTOSAVE_INTERVAL_MS, move || {
            dispatch.emit(EditorAction::AutosaveTick)
        });
        move || drop(interval)
    });
}

/// Report which of `anchors` intersect the viewport below the page header.
/// The anchors must already be rendered when the list changes.
#[hook]
pub fn use_section_observer(anchors: Vec<String>, dispatch: Callback<EditorAction>) {
    use_effect_with(anchors, move |anchors| {
        let observer = observe(anchors, dispatch);
        move || {
            if let Some((observer, _callback)) = observer {
                observer.disconnect();
            }
        }
    });
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

fn observe(
    anchors: &[String],
    dispatch: Callback<EditorAction>,
) -> Option<(IntersectionObserver, ObserverCallback)> {
    let document = web_sys::window()?.document()?;
    let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            dispatch.emit(EditorAction::SectionVisibility {
                anchor: entry.target().id(),
                visible: entry.is_intersecting(),
            });
        }
    });

    let header_height = document
        .get_element_by_id("header")
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|e| e.offset_height())
        .unwrap_or(0);
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&format!("-{}px 0px 0px 0px", header_height));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("intersection observer unavailable: {:?}", e);
                return None;
            }
        };
    for anchor in anchors {
        if let Some(element) = document.get_element_by_id(anchor) {
            observer.observe(&element);
        }
    }
    Some((observer, callback))
}
