//! Unified error handling system
//!
//! Provides structured error types with context, user-facing messages and
//! proper error chaining for every failure the client can encounter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type JobportResult<T> = Result<T, JobportError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the jobport client
#[derive(Error, Debug)]
pub enum JobportError {
    /// The server explicitly refused the supplied credentials or request.
    /// The message is the server-supplied text and is safe to display.
    #[error("Authentication rejected: {message}")]
    AuthRejected {
        message: String,
        context: ErrorContext,
    },

    /// The server answered 2xx but the payload failed contract validation.
    /// Must never be presented to the user as a credential problem.
    #[error("Malformed server response: {message}")]
    MalformedResponse {
        message: String,
        context: ErrorContext,
    },

    /// No usable response at all: network unreachable, connection reset,
    /// or a non-2xx status without a structured error body.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    /// Hydration found unusable persisted data. Recovered silently by
    /// clearing storage; never surfaced to the user.
    #[error("Corrupt persisted session: {message}")]
    CorruptSession {
        message: String,
        context: ErrorContext,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("Resource not found: {resource}")]
    NotFound {
        resource: String,
        context: ErrorContext,
    },

    /// A portal CRUD endpoint returned an application-level error.
    #[error("Portal API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JobportError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            JobportError::AuthRejected { context, .. } => Some(context),
            JobportError::MalformedResponse { context, .. } => Some(context),
            JobportError::Transport { context, .. } => Some(context),
            JobportError::CorruptSession { context, .. } => Some(context),
            JobportError::Storage { context, .. } => Some(context),
            JobportError::Config { context, .. } => Some(context),
            JobportError::Validation { context, .. } => Some(context),
            JobportError::NotFound { context, .. } => Some(context),
            JobportError::Api { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Check if error is recoverable by retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(self, JobportError::Transport { .. })
    }

    /// User-facing text for this failure.
    ///
    /// `AuthRejected` carries the server message verbatim; transport and
    /// contract failures get generic text so they never read as "wrong
    /// password". `CorruptSession` is handled silently by the store and
    /// callers are not expected to display it.
    pub fn user_message(&self) -> String {
        match self {
            JobportError::AuthRejected { message, .. } => {
                if message.is_empty() {
                    "Sign-in failed. Please check your credentials.".to_string()
                } else {
                    message.clone()
                }
            }
            JobportError::MalformedResponse { .. } => {
                "The server returned an unexpected response. Please try again later.".to_string()
            }
            JobportError::Transport { .. } => {
                "Cannot reach the server. Check your connection and try again.".to_string()
            }
            JobportError::Validation { message, .. } => message.clone(),
            JobportError::NotFound { resource, .. } => format!("{} was not found", resource),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            JobportError::Transport { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Transport error (may be recoverable)"
                );
            }
            JobportError::CorruptSession { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Discarding corrupt persisted session"
                );
            }
            JobportError::AuthRejected { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Server rejected credentials"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }

    /// Create an `AuthRejected` error carrying the server message
    pub fn auth_rejected<S: Into<String>>(message: S, component: &str) -> Self {
        Self::AuthRejected {
            message: message.into(),
            context: ErrorContext::new(component),
        }
    }

    /// Create a `MalformedResponse` error
    pub fn malformed<S: Into<String>>(message: S, component: &str) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            context: ErrorContext::new(component)
                .with_suggestion("Check that the client and server versions are compatible"),
        }
    }

    /// Create a `Transport` error without a source
    pub fn transport<S: Into<String>>(message: S, component: &str) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
            context: ErrorContext::new(component)
                .with_suggestion("Check network connectivity and the configured API base URL"),
        }
    }

    /// Create a `Transport` error wrapping its cause
    pub fn transport_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
        component: &str,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source),
            context: ErrorContext::new(component)
                .with_suggestion("Check network connectivity and the configured API base URL"),
        }
    }

    /// Create a `CorruptSession` error
    pub fn corrupt_session<S: Into<String>>(message: S) -> Self {
        Self::CorruptSession {
            message: message.into(),
            context: ErrorContext::new("session_store").with_operation("hydrate"),
        }
    }

    /// Create a `Storage` error
    pub fn storage<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source,
            context: ErrorContext::new("credential_store"),
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        JobportError::Config {
            message: $msg.to_string(),
            source: None,
            context: ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'jobport config --init' to create a default config"),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        JobportError::Config {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: ErrorContext::new($component)
                .with_suggestion("Check your configuration file"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        JobportError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}

#[macro_export]
macro_rules! not_found_error {
    ($resource:expr, $component:expr) => {
        JobportError::NotFound {
            resource: $resource.to_string(),
            context: ErrorContext::new($component)
                .with_suggestion("Verify the identifier and try again"),
        }
    };
}
