use thiserror::Error;

#[derive(Error, Debug)]
pub enum FluxError {
    #[error("Unsupported configuration for {model}: '{option}'")]
    UnsupportedModelConfiguration { model: String, option: String },

    #[error(
        "No similar nucleus found with delta_A <= {max_delta_a} for A = {requested_a}, closest is A = {closest_a}"
    )]
    NoSimilarNucleus {
        requested_a: u32,
        closest_a: u32,
        max_delta_a: u32,
    },

    #[error("Data provider unavailable: {0}")]
    DataProviderUnavailable(String),

    #[error("Transition for nucleus {nucleus} not found after {iterations} iterations: {message}")]
    TransitionNotFound {
        nucleus: u32,
        iterations: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FluxResult<T> = Result<T, FluxError>;
