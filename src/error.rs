/// Failures talking to the remote authority or decoding what it sent.
///
/// Both kinds are absorbed by the controller: logged, no board change, no
/// automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed state: {0}")]
    MalformedState(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("invalid square format: {0:?}")]
    Format(String),

    #[error("invalid file: {0:?}")]
    File(char),

    #[error("invalid rank: {0:?}")]
    Rank(char),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting in {path}: {reason}")]
    Invalid { path: String, reason: &'static str },
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::MalformedState(err.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Transport(err.to_string())
    }
}
