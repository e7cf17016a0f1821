// Thin helpers over web-sys. Missing elements are `None`, never errors.

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget};

pub fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(err) = result {
        log::debug!("could not update class {class}: {}", js_error(&err));
    }
}

/// Adds an event listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F)
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new(target, event, handler).forget();
}

/// Runs `f` once the DOM is parsed: right away if that already happened,
/// otherwise on `DOMContentLoaded`.
pub fn on_ready<F>(document: &Document, f: F)
where
    F: FnOnce(Document) + 'static,
{
    if document.ready_state() != "loading" {
        f(document.clone());
        return;
    }

    let doc = document.clone();
    EventListener::once(document, "DOMContentLoaded", move |_| f(doc)).forget();
}
