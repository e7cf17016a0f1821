use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlLinkElement, Window};
use yew::Callback;

use crate::config::GuideConfig;
use crate::dom::{self, js_error};
use crate::theme::store::{BrowserStore, ThemePreference};
use crate::theme::toggle::{ThemeToggle, ThemeToggleProps};
use crate::theme::{Theme, ToggleFace, BODY_CLASS, MODERN_STYLESHEET_ID, TOGGLE_BUTTON_ID};

struct Inner {
    document: Document,
    prefs: ThemePreference<BrowserStore>,
    transition_ms: u32,
    /// A toggle button that came with the page markup.
    page_button: RefCell<Option<HtmlElement>>,
    mounted: Cell<bool>,
    subscribers: RefCell<Vec<(usize, Callback<Theme>)>>,
    next_subscriber: Cell<usize>,
}

/// The page's single theme controller. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ThemeController {
    inner: Rc<Inner>,
}

impl ThemeController {
    pub fn new(document: Document, config: &GuideConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                prefs: ThemePreference::new(BrowserStore::new(config.theme_storage_key.clone())),
                transition_ms: config.theme_transition_ms,
                page_button: RefCell::new(None),
                mounted: Cell::new(false),
                subscribers: RefCell::new(Vec::new()),
                next_subscriber: Cell::new(0),
            }),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn current(&self) -> Theme {
        self.inner.prefs.get()
    }

    pub fn set(&self, theme: Theme) {
        self.inner.prefs.set(theme);
        self.apply(theme);
    }

    pub fn apply_current(&self) {
        self.apply(self.current());
    }

    pub fn apply(&self, theme: Theme) {
        let document = &self.inner.document;
        if let Some(body) = document.body() {
            dom::set_class(&body, BODY_CLASS, theme == Theme::Modern);
        }

        if let Some(link) = document
            .get_element_by_id(MODERN_STYLESHEET_ID)
            .and_then(|el| el.dyn_into::<HtmlLinkElement>().ok())
        {
            link.set_disabled(theme != Theme::Modern);
        }

        if let Some(button) = self.inner.page_button.borrow().as_ref() {
            paint_button(button, theme);
        }

        let subscribers: Vec<Callback<Theme>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in subscribers {
            cb.emit(theme);
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        log::info!("theme switched to {next}");

        if let Some(body) = self.inner.document.body() {
            let style = body.style();
            let transition = format!("all {}ms ease", self.inner.transition_ms);
            if style.set_property("transition", &transition).is_ok() {
                Timeout::new(self.inner.transition_ms, move || {
                    let _ = body.style().remove_property("transition");
                })
                .forget();
            }
        }
        next
    }

    pub fn subscribe(&self, callback: Callback<Theme>) -> usize {
        let id = self.inner.next_subscriber.get();
        self.inner.next_subscriber.set(id + 1);
        self.inner.subscribers.borrow_mut().push((id, callback));
        id
    }

    pub fn unsubscribe(&self, id: usize) {
        self.inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// Binds the page's `#theme-toggle-btn` if it has one, otherwise mounts
    /// a `ThemeToggle` at the end of `<body>`. Safe to call repeatedly.
    pub fn ensure_toggle(&self) {
        if self.inner.mounted.get() {
            return;
        }
        let document = &self.inner.document;
        let existing = document
            .get_element_by_id(TOGGLE_BUTTON_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        if let Some(button) = existing {
            let controller = self.clone();
            let onclick = Closure::<dyn FnMut()>::new(move || {
                controller.toggle();
            });
            // Replaces any previous handler instead of stacking listeners.
            button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
            onclick.forget();

            paint_button(&button, self.current());
            *self.inner.page_button.borrow_mut() = Some(button);
            return;
        }

        let Some(body) = document.body() else {
            return;
        };
        let host = match document.create_element("div") {
            Ok(host) => host,
            Err(e) => {
                log::warn!("could not create theme toggle host: {}", js_error(&e));
                return;
            }
        };
        if let Err(e) = body.append_child(&host) {
            log::warn!("could not insert theme toggle: {}", js_error(&e));
            return;
        }

        self.inner.mounted.set(true);
        yew::Renderer::<ThemeToggle>::with_root_and_props(
            host,
            ThemeToggleProps {
                controller: self.clone(),
            },
        )
        .render();
    }

    /// `window.themeToggle = { get, set, toggle }` for other page scripts.
    pub fn export(&self, window: &Window) {
        let api = Object::new();

        let controller = self.clone();
        let get = Closure::<dyn Fn() -> String>::new(move || controller.current().as_str().to_string());

        let controller = self.clone();
        let set = Closure::<dyn Fn(String)>::new(move |name: String| match name.parse::<Theme>() {
            Ok(theme) => controller.set(theme),
            Err(e) => log::warn!("themeToggle.set: {e}"),
        });

        let controller = self.clone();
        let toggle = Closure::<dyn Fn() -> String>::new(move || controller.toggle().as_str().to_string());

        for (name, f) in [
            ("get", get.into_js_value()),
            ("set", set.into_js_value()),
            ("toggle", toggle.into_js_value()),
        ] {
            let _ = Reflect::set(&api, &JsValue::from_str(name), &f);
        }

        if let Err(e) = Reflect::set(window, &JsValue::from_str("themeToggle"), &api) {
            log::warn!("could not export themeToggle: {}", js_error(&e));
        }
    }
}

fn paint_button(button: &HtmlElement, theme: Theme) {
    let face = ToggleFace::for_theme(theme);
    button.set_text_content(Some(face.icon));
    button.set_title(face.title);
}
