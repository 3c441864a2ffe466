/// Typed error taxonomy for dashboard operations.
/// Local errors never touch the network; remote errors carry whatever the
/// backend or transport reported.
#[derive(Clone, Debug, thiserror::Error)]
pub enum DashboardError {
    // Local: resolved at the UI boundary, no network call was made
    #[error("{0}")]
    Validation(String),
    #[error("no content selected")]
    NoSelection,
    #[error("not found in catalog: {0}")]
    NotFound(String),

    // Remote
    #[error("network error: {0}")]
    Transport(String),
    #[error("{message}")]
    Backend { code: i64, message: String },
}

impl DashboardError {
    /// True when the error was produced without issuing a network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NoSelection | Self::NotFound(_)
        )
    }

    /// Short classification string for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NoSelection => "no_selection",
            Self::NotFound(_) => "not_found",
            Self::Transport(_) => "transport",
            Self::Backend { .. } => "backend",
        }
    }

    /// The operator-facing message for a notification. Backend messages are
    /// surfaced verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
