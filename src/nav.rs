// Keyboard prev/next navigation between guide pages.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::dom;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(NavDirection::Previous),
            "ArrowRight" | "d" | "D" => Some(NavDirection::Next),
            _ => None,
        }
    }

    /// Matches only enabled controls.
    pub fn selector(self) -> &'static str {
        match self {
            NavDirection::Previous => ".nav-btn.prev:not(.disabled)",
            NavDirection::Next => ".nav-btn.next:not(.disabled)",
        }
    }
}

/// Keys typed into these elements belong to the user, not to navigation.
pub fn is_typing_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_uppercase().as_str(),
            "INPUT" | "TEXTAREA" | "SELECT"
        )
}

fn typing_into(target: &Element) -> bool {
    let editable = target
        .dyn_ref::<HtmlElement>()
        .map(|el| el.is_content_editable())
        .unwrap_or(false);
    is_typing_target(&target.tag_name(), editable)
}

pub fn bind(document: &Document) {
    let doc = document.clone();
    dom::listen(document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };

        if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
            if typing_into(&target) {
                return;
            }
        }

        let Some(direction) = NavDirection::from_key(&key_event.key()) else {
            return;
        };

        let Some(control) = dom::query(&doc, direction.selector())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        event.prevent_default();
        log::debug!("keyboard navigation: {direction:?}");
        control.click();
    });
}
