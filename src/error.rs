use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("upstream request failed with HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("source not found on Fritz: {id}: {body}")]
    SourceNotFound { id: String, body: String },
    #[error("empty starlist returned for {id}")]
    EmptyStarlist { id: String },
    #[error("unknown slit width: {0} (expected one of Longslit0_75, Longslit1, Longslit1_25, Longslit1_5, Longslit5)")]
    UnknownSlitWidth(String),
    #[error("missing credentials: environment variable {0} is unset or empty")]
    MissingCredentials(&'static str),
    #[error("no ZTF photometry with a magnitude for {id}; pass --magnitude to submit anyway")]
    MagnitudeUnavailable { id: String },
    #[error("invalid observation request: {0}")]
    InvalidRequest(String),
    #[error("all {failed} sources failed")]
    BatchFailed { failed: usize },
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            AppError::EmptyStarlist { .. } => "EMPTY_STARLIST",
            AppError::UnknownSlitWidth(_) => "UNKNOWN_SLIT_WIDTH",
            AppError::MissingCredentials(_) => "MISSING_CREDENTIALS",
            AppError::MagnitudeUnavailable { .. } => "NO_MAGNITUDE",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::BatchFailed { .. } => "BATCH_FAILED",
        }
    }
}

/// Error body of the `--json` envelope.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub code: String,
    pub message: String,
}

impl From<&anyhow::Error> for ErrorOut {
    fn from(err: &anyhow::Error) -> Self {
        let code = err
            .downcast_ref::<AppError>()
            .map(AppError::code)
            .unwrap_or("INTERNAL_ERROR");
        Self {
            code: code.to_string(),
            message: format!("{:#}", err),
        }
    }
}
