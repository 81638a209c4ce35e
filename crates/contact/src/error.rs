#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("a submission is already in flight")]
    InFlight,

    #[error("submission already acknowledged")]
    Acknowledged,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("request body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}
