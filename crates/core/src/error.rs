use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("document not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Remote(String),

    #[error("invalid response from completion service")]
    MalformedResponse,

    #[error("completion service not configured: {0}")]
    NotConfigured(String),
}
