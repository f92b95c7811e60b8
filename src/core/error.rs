//! Error handling for lockforge.
//!
//! Two main types cooperate here:
//! - [`LockforgeError`] - enumerated error types for every failure mode of
//!   the conversion pipeline
//! - [`ErrorContext`] - wrapper that adds user-friendly suggestions and
//!   details for CLI display
//!
//! Every error is fatal: the pipeline aborts on the first failure and
//! persists nothing. Common standard library errors convert automatically
//! ([`std::io::Error`] → [`LockforgeError::IoError`], [`serde_json::Error`]
//! → [`LockforgeError::JsonError`]); [`user_friendly_error`] turns any
//! [`anyhow::Error`] into a displayable context with suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lockforge::core::{LockforgeError, user_friendly_error};
//!
//! fn locate_something() -> Result<(), LockforgeError> {
//!     Err(LockforgeError::FileNotFoundUpward {
//!         file: "yarn.lock".to_string(),
//!         start: "/work/app".to_string(),
//!     })
//! }
//!
//! if let Err(e) = locate_something() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // colored error with suggestion on stderr
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for lockforge operations.
///
/// Each variant carries the context needed to tell the user exactly which
/// package, file, or directory broke the conversion. All variants are
/// fatal; there is no degraded mode.
#[derive(Error, Debug)]
pub enum LockforgeError {
    /// No `node_modules/<name>` directory with a manifest was found in the
    /// start directory or any of its ancestors.
    #[error("package '{name}' not found in any node_modules directory from {start} upward")]
    PackageDirNotFound {
        /// The package name that was being resolved
        name: String,
        /// The directory the upward walk started from
        start: String,
    },

    /// A file (typically `yarn.lock`) was not found in the start directory
    /// or any of its ancestors.
    #[error("file '{file}' not found in {start} or any parent directory")]
    FileNotFoundUpward {
        /// The file name that was searched for
        file: String,
        /// The directory the upward walk started from
        start: String,
    },

    /// An installed package's manifest names a different package than the
    /// one that was requested. The installation is corrupted or mislinked.
    #[error("package at {path} identifies itself as '{found}' but was resolved as '{requested}'")]
    PackageIdentityMismatch {
        /// The name the dependency was declared under
        requested: String,
        /// The name found in the installed manifest
        found: String,
        /// The installed package directory
        path: String,
    },

    /// A `package.json` file could not be parsed.
    #[error("invalid manifest file {file}: {reason}")]
    ManifestParseError {
        /// Path of the manifest file
        file: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A `yarn.lock` file could not be parsed.
    #[error("invalid lockfile {file}: {reason}")]
    LockfileParseError {
        /// Path of the lockfile
        file: String,
        /// Parser diagnostic
        reason: String,
    },

    /// IO operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Any other error.
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for LockforgeError {
    fn clone(&self) -> Self {
        match self {
            Self::PackageDirNotFound { name, start } => Self::PackageDirNotFound {
                name: name.clone(),
                start: start.clone(),
            },
            Self::FileNotFoundUpward { file, start } => Self::FileNotFoundUpward {
                file: file.clone(),
                start: start.clone(),
            },
            Self::PackageIdentityMismatch {
                requested,
                found,
                path,
            } => Self::PackageIdentityMismatch {
                requested: requested.clone(),
                found: found.clone(),
                path: path.clone(),
            },
            Self::ManifestParseError { file, reason } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::LockfileParseError { file, reason } => Self::LockfileParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            // IO and JSON errors are not Clone; preserve the message.
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Other { message } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// User-friendly error wrapper with optional suggestion and details.
///
/// Built by [`user_friendly_error`] from any error in the pipeline and
/// rendered to stderr by [`ErrorContext::display`] with the familiar
/// color coding: red error, yellow details, green suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LockforgeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: LockforgeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`LockforgeError`] variants and common IO errors and attaches
/// tailored suggestions; everything else gets the full error chain appended
/// so nothing is lost on the way to the terminal.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(lockforge_error) = error.downcast_ref::<LockforgeError>() {
        return create_error_context(lockforge_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(LockforgeError::Other {
                    message: format!("permission denied: {io_error}"),
                })
                .with_suggestion(
                    "Check file ownership, or re-run with the permissions the project directory requires",
                )
                .with_details("A file or directory in the project could not be read or written");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(LockforgeError::Other {
                    message: format!("file not found: {io_error}"),
                })
                .with_suggestion("Check that the path exists and is spelled correctly");
            }
            _ => {}
        }
    }

    // Generic error: include the full chain for diagnostics.
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(LockforgeError::Other { message })
}

/// Map each [`LockforgeError`] variant to a context with tailored guidance.
fn create_error_context(error: LockforgeError) -> ErrorContext {
    match &error {
        LockforgeError::PackageDirNotFound { name, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Run your package manager's install step so that '{name}' is present under node_modules"
            ))
            .with_details(
                "Every declared dependency must already be installed; resolution walks \
                node_modules directories upward from the package that requires it",
            ),

        LockforgeError::FileNotFoundUpward { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Generate {file} first, or point lockforge at a manifest inside the project that owns one"
            ))
            .with_details(format!(
                "{file} is searched for in the manifest's directory and every parent up to the filesystem root"
            )),

        LockforgeError::PackageIdentityMismatch { requested, .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Reinstall '{requested}'; its directory under node_modules contains a different package"
                ))
                .with_details(
                    "The installed tree is inconsistent. Converting it would produce a lockfile \
                    that does not describe what is actually installed",
                )
        }

        LockforgeError::ManifestParseError { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check the JSON syntax in {file}: unquoted keys, trailing commas, and comments are not valid"
            )),

        LockforgeError::LockfileParseError { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Regenerate {file} with your package manager; hand-edited entries often lose their version field"
            )),

        _ => ErrorContext::new(error.clone()),
    }
}
