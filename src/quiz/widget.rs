use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::api::{self, AnswerSubmission, Feedback};
use crate::config::GuideConfig;
use crate::dom;
use crate::error::QuizError;
use crate::quiz::state::{OptionMarks, QuizPhase, QuizState};
use crate::quiz::view::{FeedbackView, OptionView, QuizView, SubmitControl, Verdict};

/// Which question the form belongs to, read from the form's `data-*` attributes.
#[derive(Clone, PartialEq, Debug)]
pub struct QuestionContext {
    pub module_id: String,
    pub question_id: String,
    pub answer_order: Vec<String>,
}

impl QuestionContext {
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let module_id = lookup("data-module-id")?;
        let question_id = lookup("data-question-id")?;
        let answer_order = match lookup("data-answer-order") {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(order) => order,
                Err(e) => {
                    log::warn!("ignoring malformed data-answer-order {raw:?}: {e}");
                    return None;
                }
            },
        };
        Some(Self {
            module_id,
            question_id,
            answer_order,
        })
    }

    pub fn submission(&self, selected_index: usize) -> AnswerSubmission {
        AnswerSubmission {
            module_id: self.module_id.clone(),
            question_id: self.question_id.clone(),
            selected_index,
            answer_order: self.answer_order.clone(),
        }
    }
}

struct FeedbackPanel {
    panel: Element,
    title: Option<Element>,
    content: Option<Element>,
}

struct QuizOption {
    element: HtmlElement,
    radio: Option<HtmlInputElement>,
}

impl QuizOption {
    fn marks(&self) -> OptionMarks {
        let classes = self.element.class_list();
        let verdict = if classes.contains(Verdict::Correct.class_name()) {
            Some(Verdict::Correct)
        } else if classes.contains(Verdict::Incorrect.class_name()) {
            Some(Verdict::Incorrect)
        } else {
            None
        };
        OptionMarks {
            selected: classes.contains("selected"),
            checked: self.radio.as_ref().map(|r| r.checked()).unwrap_or(false),
            verdict,
        }
    }
}

/// One quiz question on the page: the `.quiz-form` markup plus its state.
pub struct QuizWidget {
    document: Document,
    options: Vec<QuizOption>,
    submit_button: Option<HtmlButtonElement>,
    feedback: Option<FeedbackPanel>,
    csrf_token: Option<String>,
    context: Option<QuestionContext>,
    endpoint: String,
    state: RefCell<QuizState>,
}

impl QuizWidget {
    pub fn attach(document: &Document, config: &GuideConfig) -> Option<Rc<Self>> {
        let Some(form) = dom::query(document, ".quiz-form") else {
            log::debug!("no quiz on this page");
            return None;
        };

        let options: Vec<QuizOption> = dom::query_all_in(&form, ".quiz-option")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|element| {
                let radio = dom::query_in(&element, r#"input[type="radio"]"#)
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
                QuizOption { element, radio }
            })
            .collect();

        let submit_button = dom::query_in(&form, ".quiz-submit-btn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

        let feedback = dom::query_in(&form, ".quiz-feedback")
            .or_else(|| dom::query(document, ".quiz-feedback"))
            .map(|panel| FeedbackPanel {
                title: dom::query_in(&panel, ".quiz-feedback-title"),
                content: dom::query_in(&panel, ".quiz-feedback-content"),
                panel,
            });

        let csrf_token = dom::query_in(&form, r#"input[name="csrf_token"]"#)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .filter(|v| !v.is_empty());

        let context = QuestionContext::from_attributes(|name| form.get_attribute(name));
        let marks: Vec<OptionMarks> = options.iter().map(QuizOption::marks).collect();

        let widget = Rc::new(Self {
            document: document.clone(),
            state: RefCell::new(QuizState::from_marks(&marks)),
            options,
            submit_button,
            feedback,
            csrf_token,
            context,
            endpoint: config.submit_endpoint.clone(),
        });

        widget.bind();
        // Server markup stays as rendered; only a restored choice needs the
        // submit button switched on.
        if matches!(widget.phase(), QuizPhase::Selected { .. }) {
            widget.apply_submit(SubmitControl::Enabled);
        }
        log::debug!(
            "quiz attached with {} options, {}",
            widget.options.len(),
            widget.phase().name()
        );
        Some(widget)
    }

    fn bind(self: &Rc<Self>) {
        for (index, option) in self.options.iter().enumerate() {
            let widget = Rc::clone(self);
            dom::listen(&option.element, "click", move |_| widget.select_option(index));
        }

        // Without question context the page drives submission through
        // `window.submitQuizAnswer`.
        if let (Some(button), Some(_)) = (&self.submit_button, &self.context) {
            let widget = Rc::clone(self);
            dom::listen(button, "click", move |event| {
                event.prevent_default();
                widget.submit_selected();
            });
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.state.borrow().phase().clone()
    }

    pub fn select_option(&self, index: usize) {
        let result = self.state.borrow_mut().select(index);
        match result {
            Ok(()) => self.render(),
            Err(e) => log::debug!("option click ignored: {e}"),
        }
    }

    fn submit_selected(self: &Rc<Self>) {
        let (Some(context), Some(index)) = (&self.context, self.state.borrow().selected_index())
        else {
            return;
        };
        self.submit(context.submission(index));
    }

    /// Selected → Submitted, then renders. Split out from `submit` so the
    /// network step can be driven separately.
    pub fn begin_submit(&self, index: usize) -> Result<(), QuizError> {
        self.state.borrow_mut().begin_submit(index)?;
        self.render();
        Ok(())
    }

    pub fn submit(self: &Rc<Self>, submission: AnswerSubmission) {
        if let Err(e) = self.begin_submit(submission.selected_index) {
            log::warn!("quiz answer not submitted: {e}");
            return;
        }

        let widget = Rc::clone(self);
        spawn_local(async move {
            let result =
                api::submit_answer(&widget.endpoint, widget.csrf_token.as_deref(), &submission)
                    .await;
            match result {
                Ok(feedback) => widget.render_feedback(feedback),
                Err(e) => {
                    log::error!("error submitting quiz answer: {e}");
                    let reverted = widget.state.borrow_mut().abandon_submission();
                    if let Err(e) = reverted {
                        log::debug!("submission not reverted: {e}");
                    }
                    widget.render();
                }
            }
        });
    }

    pub fn render_feedback(&self, feedback: Feedback) {
        let verdict = Verdict::from_correct(feedback.is_correct);
        let result = self
            .state
            .borrow_mut()
            .resolve(verdict, feedback.explanation.unwrap_or_default());
        match result {
            Ok(_) => self.render(),
            Err(e) => log::warn!("feedback ignored: {e}"),
        }
    }

    // --- Rendering ----------------------------------------------------------

    fn render(&self) {
        let view = self.state.borrow().view();
        self.apply(&view);
    }

    fn apply(&self, view: &QuizView) {
        for (option, option_view) in self.options.iter().zip(&view.options) {
            apply_option(option, option_view);
        }

        self.apply_submit(view.submit);

        if let (Some(panel), Some(feedback)) = (&self.feedback, &view.feedback) {
            self.apply_feedback(panel, feedback);
        }
    }

    fn apply_submit(&self, control: SubmitControl) {
        let Some(button) = &self.submit_button else {
            return;
        };
        match control {
            SubmitControl::Disabled => button.set_disabled(true),
            SubmitControl::Enabled => button.set_disabled(false),
            SubmitControl::Hidden => {
                let _ = button.style().set_property("display", "none");
            }
        }
    }

    fn apply_feedback(&self, panel: &FeedbackPanel, feedback: &FeedbackView) {
        let verdict = feedback.verdict;
        dom::set_class(&panel.panel, "hidden", false);
        dom::set_class(&panel.panel, Verdict::Correct.class_name(), verdict == Verdict::Correct);
        dom::set_class(&panel.panel, Verdict::Incorrect.class_name(), verdict == Verdict::Incorrect);

        if let Some(title) = &panel.title {
            title.set_text_content(None);
            if let Ok(mark) = self.document.create_element("span") {
                mark.set_text_content(Some(verdict.mark()));
                let _ = title.append_child(&mark);
            }
            let text = self.document.create_text_node(&format!(" {}", verdict.title()));
            let _ = title.append_child(&text);
        }

        // Text only, never markup.
        if let Some(content) = &panel.content {
            if !feedback.explanation.is_empty() {
                content.set_text_content(Some(&feedback.explanation));
            }
        }
    }
}

fn apply_option(option: &QuizOption, view: &OptionView) {
    let element: &Element = &option.element;
    dom::set_class(element, "selected", view.selected);
    dom::set_class(element, "correct", view.verdict == Some(Verdict::Correct));
    dom::set_class(element, "incorrect", view.verdict == Some(Verdict::Incorrect));

    if view.selected {
        if let Some(radio) = &option.radio {
            radio.set_checked(true);
        }
    }

    let style = option.element.style();
    if view.interactive {
        let _ = style.remove_property("pointer-events");
    } else {
        let _ = style.set_property("pointer-events", "none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(attrs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let attrs: HashMap<String, String> = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| attrs.get(name).cloned()
    }

    #[test]
    fn context_needs_module_and_question() {
        assert_eq!(QuestionContext::from_attributes(lookup(&[("data-module-id", "1.2")])), None);
    }

    #[test]
    fn context_builds_the_exact_submission() {
        let context = QuestionContext::from_attributes(lookup(&[
            ("data-module-id", "3.1"),
            ("data-question-id", "q3_1_1"),
            ("data-answer-order", r#"["c","a","d","b"]"#),
        ]))
        .unwrap();

        assert_eq!(
            context.submission(2),
            AnswerSubmission {
                module_id: "3.1".into(),
                question_id: "q3_1_1".into(),
                selected_index: 2,
                answer_order: vec!["c".into(), "a".into(), "d".into(), "b".into()],
            }
        );
    }

    #[test]
    fn malformed_answer_order_drops_the_context() {
        let context = QuestionContext::from_attributes(lookup(&[
            ("data-module-id", "3.1"),
            ("data-question-id", "q3_1_1"),
            ("data-answer-order", "c,a,d,b"),
        ]));
        assert_eq!(context, None);
    }
}
