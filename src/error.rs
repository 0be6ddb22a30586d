use thiserror::Error;

/// Errors raised while scraping course pages.
///
/// Date normalization never fails; malformed dates pass through verbatim
/// (see [`crate::dates::FormDate::Verbatim`]).
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No WebDriver session could be opened
    #[error("failed to connect to any WebDriver server (tried {tried})")]
    Connect { tried: String },

    /// A WebDriver command failed
    #[error("browser command failed while {context}: {source}")]
    Browser {
        context: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    /// A configured CSS selector did not parse
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// The configured course id pattern did not compile
    #[error("invalid course id pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The results listing could not be obtained or read
    #[error("listing unavailable: {0}")]
    Listing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Wraps a WebDriver command error with what was being attempted
    pub fn browser(context: impl Into<String>, source: fantoccini::error::CmdError) -> Self {
        Self::Browser {
            context: context.into(),
            source,
        }
    }

    /// Whether the WebDriver session itself is gone
    pub fn is_lost_session(&self) -> bool {
        match self {
            Self::Browser { source, .. } => source.to_string().contains("Unable to find session"),
            _ => false,
        }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
