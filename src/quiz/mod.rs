//! Multiple-choice quiz: a pure state machine (`state`), the rendering
//! intent derived from it (`view`), and the DOM binding (`widget`).

pub mod state;
pub mod view;
pub mod widget;

pub use state::{OptionMarks, QuizPhase, QuizState};
pub use view::{QuizView, SubmitControl, Verdict};
pub use widget::{QuestionContext, QuizWidget};
