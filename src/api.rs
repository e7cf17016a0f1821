use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Body of `POST /submit-quiz-answer`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AnswerSubmission {
    pub module_id: String,
    pub question_id: String,
    pub selected_index: usize,
    /// Shuffled choice keys as shown to this user, e.g. `["b", "d", "a", "c"]`.
    pub answer_order: Vec<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Feedback {
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Sends one answer. No retry and no timeout: a hung request stays pending.
pub async fn submit_answer(
    endpoint: &str,
    csrf_token: Option<&str>,
    submission: &AnswerSubmission,
) -> Result<Feedback, SubmitError> {
    let mut builder = Request::post(endpoint);
    if let Some(token) = csrf_token {
        builder = builder.header(CSRF_HEADER, token);
    }

    let request = builder.json(submission).map_err(SubmitError::Encode)?;
    let response = request.send().await.map_err(SubmitError::Network)?;

    if !response.ok() {
        return Err(SubmitError::Status(response.status()));
    }

    response.json::<Feedback>().await.map_err(SubmitError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_uses_wire_field_names() {
        let submission = AnswerSubmission {
            module_id: "3.1".into(),
            question_id: "q3_1_1".into(),
            selected_index: 2,
            answer_order: vec!["b".into(), "d".into(), "a".into(), "c".into()],
        };

        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "module_id": "3.1",
                "question_id": "q3_1_1",
                "selected_index": 2,
                "answer_order": ["b", "d", "a", "c"],
            })
        );
    }

    #[test]
    fn feedback_tolerates_missing_or_null_explanation() {
        let fb: Feedback = serde_json::from_str(r#"{"is_correct": true}"#).unwrap();
        assert!(fb.is_correct);
        assert_eq!(fb.explanation, None);

        let fb: Feedback =
            serde_json::from_str(r#"{"is_correct": false, "explanation": null}"#).unwrap();
        assert!(!fb.is_correct);
        assert_eq!(fb.explanation, None);
    }

    #[test]
    fn feedback_keeps_explanation_verbatim() {
        let fb: Feedback = serde_json::from_str(
            r#"{"is_correct": false, "explanation": "<b>Customers</b> come first."}"#,
        )
        .unwrap();
        assert_eq!(fb.explanation.as_deref(), Some("<b>Customers</b> come first."));
    }

    #[test]
    fn feedback_without_verdict_is_rejected() {
        assert!(serde_json::from_str::<Feedback>(r#"{"explanation": "x"}"#).is_err());
    }
}
