// Functions exposed on `window` for inline handlers in the guide templates.

use std::rc::Rc;

use js_sys::{Array, Number, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ScrollBehavior, ScrollToOptions, Window};

use crate::api::AnswerSubmission;
use crate::dom::js_error;
use crate::quiz::QuizWidget;

fn export(window: &Window, name: &str, f: JsValue) {
    if let Err(e) = Reflect::set(window, &JsValue::from_str(name), &f) {
        log::warn!("could not export {name}: {}", js_error(&e));
    }
}

/// Ids go on the wire as strings. A numeric id is printed the way JS
/// prints it (`3.10` in a template is already the number `3.1`).
fn id_arg(value: &JsValue) -> Option<String> {
    if let Some(id) = value.as_string() {
        return Some(id);
    }
    let number = value.dyn_ref::<Number>()?;
    let id = String::from(number.to_string(10).ok()?);
    log::warn!("submitQuizAnswer got numeric id {id}; pass ids as strings");
    Some(id)
}

fn index_arg(value: &JsValue) -> Option<usize> {
    let n = value.as_f64()?;
    (n.is_finite() && n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
}

fn order_arg(value: &JsValue) -> Option<Vec<String>> {
    if Array::is_array(value) {
        return value.unchecked_ref::<Array>().iter().map(|v| v.as_string()).collect();
    }
    let raw = value.as_string()?;
    serde_json::from_str(&raw).ok()
}

/// Builds a submission from the loosely typed arguments of an inline
/// handler. `None` when any argument is unusable.
pub fn submission_from_args(
    module_id: &JsValue,
    question_id: &JsValue,
    selected: &JsValue,
    order: &JsValue,
) -> Option<AnswerSubmission> {
    Some(AnswerSubmission {
        module_id: id_arg(module_id)?,
        question_id: id_arg(question_id)?,
        selected_index: index_arg(selected)?,
        answer_order: order_arg(order)?,
    })
}

/// `window.submitQuizAnswer(moduleId, questionId, selectedIndex, answerOrder)`
pub fn export_submit(window: &Window, widget: Rc<QuizWidget>) {
    let submit = Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue)>::new(
        move |module_id: JsValue, question_id: JsValue, selected: JsValue, order: JsValue| {
            match submission_from_args(&module_id, &question_id, &selected, &order) {
                Some(submission) => widget.submit(submission),
                None => log::warn!("submitQuizAnswer called with unusable arguments"),
            }
        },
    );
    export(window, "submitQuizAnswer", submit.into_js_value());
}

pub fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// `window.scrollToTop()`
pub fn export_scroll(window: &Window) {
    let f = Closure::<dyn Fn()>::new(scroll_to_top);
    export(window, "scrollToTop", f.into_js_value());
}
