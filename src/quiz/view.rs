// --- Rendering intent ---------------------------------------------------------
//
// What the quiz should look like, independent of any DOM. The widget maps
// these values onto classes and attributes.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Incorrect => "incorrect",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct!",
            Verdict::Incorrect => "Incorrect",
        }
    }

    pub fn mark(self) -> &'static str {
        match self {
            Verdict::Correct => "✓",
            Verdict::Incorrect => "✗",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OptionView {
    pub selected: bool,
    pub verdict: Option<Verdict>,
    /// `false` once feedback is shown (`pointer-events: none`).
    pub interactive: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitControl {
    Disabled,
    Enabled,
    Hidden,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FeedbackView {
    pub verdict: Verdict,
    pub explanation: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QuizView {
    pub options: Vec<OptionView>,
    pub submit: SubmitControl,
    pub feedback: Option<FeedbackView>,
}

impl QuizView {
    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }
}
