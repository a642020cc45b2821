use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors from the rendering service boundary. Raw engine failures never
/// cross this line; callers see either a transport fault or an API fault.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("render service returned {status}: {message}")]
    Api { status: u16, message: String },
}
