use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("Failed to load page at offset {offset}: {reason}")]
    PageLoad { offset: usize, reason: String },

    #[error("Failed to resolve {name}: {reason}")]
    ItemResolution { name: String, reason: String },

    #[error("Pokémon not found: {0}")]
    RecordNotFound(String),

    #[error("No description available for {0}")]
    DescriptionUnavailable(String),

    #[error("No evolution chain available for {0}")]
    ChainUnavailable(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("DexError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for DexError {
    fn from(error: std::io::Error) -> Self {
        DexError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for DexError {
    fn from(error: reqwest::Error) -> Self {
        DexError::Reqwest(Box::new(error))
    }
}
