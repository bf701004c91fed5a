use thiserror::Error;

/// Target-position criteria config errors.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("number (n) of last experiences to check must be >= 1, but {0} was given; fix the target positions config and retry")]
    InvalidExperienceWindow(usize),

    #[error("location criteria must specify at least one country or city")]
    EmptyLocation,

    #[error("target position must specify at least one valid criteria")]
    NoValidCriteria,

    #[error("malformed `{criteria}` criteria: {source}")]
    MalformedCriteria {
        criteria: String,
        #[source]
        source: serde_json::Error,
    },
}
