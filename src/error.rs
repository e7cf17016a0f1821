use thiserror::Error;

/// Rejected quiz state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("option {index} is out of range ({count} options)")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("cannot {action} while the question is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
}

/// Failures of the answer submission request.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not build submission request: {0}")]
    Encode(#[source] gloo_net::Error),

    #[error("could not reach quiz endpoint: {0}")]
    Network(#[source] gloo_net::Error),

    #[error("quiz endpoint answered with status {0}")]
    Status(u16),

    #[error("could not parse quiz feedback: {0}")]
    Decode(#[source] gloo_net::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,

    #[error("local storage access failed: {0}")]
    Access(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);
