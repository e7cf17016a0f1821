use crate::error::QuizError;
use crate::quiz::view::{FeedbackView, OptionView, QuizView, SubmitControl, Verdict};

/// Lifecycle of one question instance. Nothing leaves `Answered`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum QuizPhase {
    Unanswered,
    Selected {
        index: usize,
    },
    Submitted {
        index: usize,
    },
    Answered {
        index: usize,
        verdict: Verdict,
        explanation: String,
    },
}

impl QuizPhase {
    pub fn name(&self) -> &'static str {
        match self {
            QuizPhase::Unanswered => "unanswered",
            QuizPhase::Selected { .. } => "selected",
            QuizPhase::Submitted { .. } => "submitted",
            QuizPhase::Answered { .. } => "answered",
        }
    }
}

/// What an option looked like in the page markup before any script ran.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct OptionMarks {
    pub selected: bool,
    pub checked: bool,
    pub verdict: Option<Verdict>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QuizState {
    option_count: usize,
    phase: QuizPhase,
}

impl QuizState {
    pub fn new(option_count: usize) -> Self {
        Self {
            option_count,
            phase: QuizPhase::Unanswered,
        }
    }

    /// Picks up where server-rendered markup left off: a verdict mark means
    /// the question was already answered, a selected or checked option means
    /// a choice is in progress.
    pub fn from_marks(marks: &[OptionMarks]) -> Self {
        let option_count = marks.len();
        let answered = marks
            .iter()
            .enumerate()
            .find_map(|(index, m)| m.verdict.map(|verdict| (index, verdict)));
        let phase = if let Some((index, verdict)) = answered {
            QuizPhase::Answered {
                index,
                verdict,
                explanation: String::new(),
            }
        } else if let Some(index) = marks.iter().position(|m| m.selected || m.checked) {
            QuizPhase::Selected { index }
        } else {
            QuizPhase::Unanswered
        };
        Self {
            option_count,
            phase,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::Unanswered => None,
            QuizPhase::Selected { index }
            | QuizPhase::Submitted { index }
            | QuizPhase::Answered { index, .. } => Some(index),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), QuizError> {
        if index < self.option_count {
            Ok(())
        } else {
            Err(QuizError::OptionOutOfRange {
                index,
                count: self.option_count,
            })
        }
    }

    fn reject(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }

    /// Unanswered/Selected → Selected. Re-selecting the same option is a no-op.
    pub fn select(&mut self, index: usize) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Unanswered | QuizPhase::Selected { .. } => {
                self.check_index(index)?;
                self.phase = QuizPhase::Selected { index };
                Ok(())
            }
            _ => Err(self.reject("select an option")),
        }
    }

    /// Selected → Submitted. `index` is the index that goes on the wire.
    pub fn begin_submit(&mut self, index: usize) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Selected { .. } => {
                self.check_index(index)?;
                self.phase = QuizPhase::Submitted { index };
                Ok(())
            }
            _ => Err(self.reject("submit")),
        }
    }

    /// Submitted → Answered. Returns the index that received the verdict.
    pub fn resolve(&mut self, verdict: Verdict, explanation: String) -> Result<usize, QuizError> {
        match self.phase {
            QuizPhase::Submitted { index } => {
                self.phase = QuizPhase::Answered {
                    index,
                    verdict,
                    explanation,
                };
                Ok(index)
            }
            _ => Err(self.reject("show feedback")),
        }
    }

    /// Submitted → Selected, after the request failed.
    pub fn abandon_submission(&mut self) -> Result<usize, QuizError> {
        match self.phase {
            QuizPhase::Submitted { index } => {
                self.phase = QuizPhase::Selected { index };
                Ok(index)
            }
            _ => Err(self.reject("abandon a submission")),
        }
    }

    pub fn view(&self) -> QuizView {
        let selected = self.selected_index();
        let (verdict, locked) = match &self.phase {
            QuizPhase::Answered { verdict, .. } => (Some(*verdict), true),
            _ => (None, false),
        };

        let options = (0..self.option_count)
            .map(|i| {
                let is_selected = selected == Some(i);
                OptionView {
                    selected: is_selected,
                    verdict: if is_selected { verdict } else { None },
                    interactive: !locked,
                }
            })
            .collect();

        let submit = match self.phase {
            QuizPhase::Selected { .. } => SubmitControl::Enabled,
            QuizPhase::Unanswered | QuizPhase::Submitted { .. } => SubmitControl::Disabled,
            QuizPhase::Answered { .. } => SubmitControl::Hidden,
        };

        let feedback = match &self.phase {
            QuizPhase::Answered {
                verdict,
                explanation,
                ..
            } => Some(FeedbackView {
                verdict: *verdict,
                explanation: explanation.clone(),
            }),
            _ => None,
        };

        QuizView {
            options,
            submit,
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(count: usize, index: usize, verdict: Verdict) -> QuizState {
        let mut state = QuizState::new(count);
        state.select(index).unwrap();
        state.begin_submit(index).unwrap();
        state.resolve(verdict, "because".into()).unwrap();
        state
    }

    #[test]
    fn unmarked_markup_starts_unanswered() {
        let state = QuizState::from_marks(&[OptionMarks::default(); 4]);
        assert_eq!(state, QuizState::new(4));
    }

    #[test]
    fn restored_radio_starts_selected() {
        let mut marks = [OptionMarks::default(); 4];
        marks[1].checked = true;
        let state = QuizState::from_marks(&marks);
        assert_eq!(state.phase(), &QuizPhase::Selected { index: 1 });
        assert_eq!(state.view().submit, SubmitControl::Enabled);
    }

    #[test]
    fn rendered_verdict_starts_answered() {
        let mut marks = [OptionMarks::default(); 4];
        marks[2] = OptionMarks {
            selected: true,
            checked: true,
            verdict: Some(Verdict::Incorrect),
        };
        let mut state = QuizState::from_marks(&marks);
        assert!(matches!(
            state.phase(),
            QuizPhase::Answered { index: 2, verdict: Verdict::Incorrect, .. }
        ));
        assert!(state.select(0).is_err());
    }

    #[test]
    fn fresh_question_has_nothing_selected_and_submit_disabled() {
        let view = QuizState::new(4).view();
        assert_eq!(view.selected_count(), 0);
        assert_eq!(view.submit, SubmitControl::Disabled);
        assert!(view.feedback.is_none());
        assert!(view.options.iter().all(|o| o.interactive));
    }

    #[test]
    fn clicking_any_option_leaves_exactly_that_one_selected() {
        for prior in [None, Some(0), Some(3), Some(1)] {
            for clicked in 0..4 {
                let mut state = QuizState::new(4);
                if let Some(p) = prior {
                    state.select(p).unwrap();
                }
                state.select(clicked).unwrap();

                let view = state.view();
                assert_eq!(view.selected_count(), 1);
                assert!(view.options[clicked].selected);
                assert_eq!(view.submit, SubmitControl::Enabled);
            }
        }
    }

    #[test]
    fn reselecting_the_same_option_is_a_no_op() {
        let mut state = QuizState::new(3);
        state.select(1).unwrap();
        let before = state.clone();
        state.select(1).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn out_of_range_selection_is_rejected_without_changing_state() {
        let mut state = QuizState::new(2);
        state.select(0).unwrap();
        assert_eq!(
            state.select(5),
            Err(QuizError::OptionOutOfRange { index: 5, count: 2 })
        );
        assert_eq!(state.phase(), &QuizPhase::Selected { index: 0 });
    }

    #[test]
    fn submit_requires_a_selection() {
        let mut state = QuizState::new(4);
        assert!(matches!(
            state.begin_submit(0),
            Err(QuizError::InvalidTransition { phase: "unanswered", .. })
        ));

        state.select(2).unwrap();
        state.begin_submit(2).unwrap();
        assert_eq!(state.phase(), &QuizPhase::Submitted { index: 2 });
        assert_eq!(state.view().submit, SubmitControl::Disabled);

        assert!(state.begin_submit(2).is_err());
    }

    #[test]
    fn selection_is_frozen_while_a_request_is_pending() {
        let mut state = QuizState::new(4);
        state.select(1).unwrap();
        state.begin_submit(1).unwrap();
        assert!(state.select(3).is_err());
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn feedback_locks_options_and_hides_submit_for_both_verdicts() {
        for verdict in [Verdict::Correct, Verdict::Incorrect] {
            let view = answered(4, 1, verdict).view();
            assert!(view.options.iter().all(|o| !o.interactive));
            assert_eq!(view.submit, SubmitControl::Hidden);
            assert_eq!(view.feedback.as_ref().map(|f| f.verdict), Some(verdict));
        }
    }

    #[test]
    fn incorrect_verdict_marks_only_the_submitted_option() {
        let view = answered(4, 2, Verdict::Incorrect).view();
        for (i, option) in view.options.iter().enumerate() {
            if i == 2 {
                assert_eq!(option.verdict, Some(Verdict::Incorrect));
            } else {
                assert_eq!(option.verdict, None);
            }
        }
        let feedback = view.feedback.unwrap();
        assert_eq!(feedback.verdict.title(), "Incorrect");
        assert_eq!(feedback.explanation, "because");
    }

    #[test]
    fn nothing_leaves_answered() {
        let mut state = answered(3, 0, Verdict::Correct);
        let before = state.clone();
        assert!(state.select(1).is_err());
        assert!(state.begin_submit(0).is_err());
        assert!(state.resolve(Verdict::Incorrect, String::new()).is_err());
        assert!(state.abandon_submission().is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn failed_request_returns_to_selected() {
        let mut state = QuizState::new(4);
        state.select(3).unwrap();
        state.begin_submit(3).unwrap();
        assert_eq!(state.abandon_submission(), Ok(3));
        assert_eq!(state.phase(), &QuizPhase::Selected { index: 3 });
        assert_eq!(state.view().submit, SubmitControl::Enabled);
    }
}
