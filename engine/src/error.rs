use thiserror::Error;

/// Failures that abort a running match. None of them are retried.
#[derive(Error, Debug)]
pub enum BattleError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} response malformed: {reason}")]
    MalformedResponse { service: &'static str, reason: String },

    #[error("missing credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("scripted completions exhausted after {0} replies")]
    ScriptExhausted(usize),
}

pub type Result<T> = std::result::Result<T, BattleError>;
