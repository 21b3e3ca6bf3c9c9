//! Error types for chirp.
//!
//! Uses `thiserror` for a single structured error type that maps to exit
//! codes.
//!
//! ## Error Taxonomy
//!
//! - **Usage**: the user asked for help, supplied invalid arguments, or
//!   reached a command with no action. Help text has already been written to
//!   the diagnostic sink by the time this value is returned, so callers must
//!   not print it again.
//! - **Init**: a command's initializer hook failed. Signals an environment or
//!   configuration problem, not an argument problem.
//! - **Flag**: malformed flag syntax or an unknown flag, propagated unwrapped
//!   from the flag parser.
//! - Everything else is an application-level failure (config, auth, API,
//!   transport) reported by a run action and passed through unchanged.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChirpError>;

/// Main error type for chirp operations.
#[derive(Error, Debug)]
pub enum ChirpError {
    /// Help or usage text was requested and has already been rendered.
    ///
    /// This is a sentinel outcome, not an application failure: callers map it
    /// to exit code 2 and print nothing further.
    #[error("help or usage requested")]
    Usage,

    /// A command's initializer hook failed; the offending command's name is
    /// attached.
    #[error("{command}: {cause}")]
    Init {
        command: String,
        cause: anyhow::Error,
    },

    /// A flag parse failure, passed through from the flag layer unwrapped.
    #[error(transparent)]
    Flag(#[from] clap::Error),

    /// Configuration file problems (missing, unreadable, malformed).
    #[error("{0}")]
    Config(String),

    /// No usable credentials for the requested authentication mode.
    #[error("{0}")]
    Auth(String),

    /// An invalid argument detected by a run action.
    #[error("{0}")]
    Invalid(String),

    /// The API answered with a non-success status; `body` holds the raw
    /// response payload for the caller to surface.
    #[error("API error ({status})")]
    Api { status: u16, body: String },

    /// Transport-level HTTP failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ChirpError {
    /// Reports whether this is the usage sentinel.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage)
    }

    /// Process exit code for this error: 2 for the usage sentinel, 1 for
    /// everything else.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage => 2,
            _ => 1,
        }
    }
}
