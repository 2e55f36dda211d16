//! Application root: page layout plus the system color-scheme observer.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, MediaQueryListEvent};
use yew::prelude::*;

use super::{eyes::Eyes, faq::Faq};
use crate::model::{Theme, ThemeChange};
use crate::state::{SchemeSource, ThemeState};

const SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

fn apply_document_theme(document: &Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Republish the preference as a `themechange` event on the document, detail
/// `{"theme": "light"|"dark"}`.
fn broadcast_theme(document: &Document, theme: Theme) {
    let Ok(payload) = serde_json::to_string(&ThemeChange { theme }) else {
        return;
    };
    let Ok(detail) = js_sys::JSON::parse(&payload) else {
        return;
    };
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict("themechange", &init) {
        let _ = document.dispatch_event(&event);
    }
}

#[function_component(App)]
pub fn app() -> Html {
    use_effect_with((), move |_| {
        let window = web_sys::window().expect("no global `window` exists");
        let document = window.document().expect("should have a document on window");

        // Probe the preference-query capability exactly once.
        let query = window.match_media(SCHEME_QUERY).ok().flatten();
        let source = match &query {
            Some(mq) => SchemeSource::Observable {
                prefers_dark: mq.matches(),
            },
            None => SchemeSource::StaticFallback,
        };
        let theme = Rc::new(RefCell::new(ThemeState::new(source)));
        apply_document_theme(&document, theme.borrow().current());

        let change_cb = query.as_ref().map(|mq| {
            let theme = theme.clone();
            let document = document.clone();
            let cb = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
                let next = theme.borrow_mut().preference_changed(e.matches());
                apply_document_theme(&document, next);
                broadcast_theme(&document, next);
            }) as Box<dyn FnMut(_)>);
            let _ = mq.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
            cb
        });

        move || {
            if let (Some(mq), Some(cb)) = (&query, &change_cb) {
                let _ =
                    mq.remove_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
            }
        }
    });

    html! {
        <div class="page">
            <header class="hero">
                <Eyes />
                <h1>{"We see your cursor"}</h1>
                <p class="tagline">{"Move the pointer (or your finger) around and watch the pupils keep up."}</p>
            </header>
            <main>
                <Faq />
            </main>
        </div>
    }
}
