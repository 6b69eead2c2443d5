//! Error types for loading the penalty workbook.
//!
//! Only the load path can fail. Value coercion failures, alias misses and
//! statistically underpowered populations are recovered where they happen and
//! never surface here.

use std::fmt;

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Structured context for load errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "read_sheet", "normalize")
    pub operation: Option<String>,
    /// Sheet (season) involved
    pub sheet: Option<String>,
    /// File path if applicable
    pub path: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the sheet name.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Set the file path.
    pub fn with_path(mut self, path: impl fmt::Display) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref sheet) = self.sheet {
            parts.push(format!("sheet={}", sheet));
        }
        if let Some(ref path) = self.path {
            parts.push(format!("path={}", path));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for workbook loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A sheet lacks one of the required columns. Fatal for the whole load.
    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// The source could not be read from disk.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },

    /// A sheet is not readable as CSV.
    #[error("CSV error: {message} {context}")]
    Csv {
        message: String,
        context: ErrorContext,
    },

    /// None of the allow-listed sheets exist in the source.
    #[error("No sheets loaded: {message} {context}")]
    NoSheets {
        message: String,
        context: ErrorContext,
    },

    /// Configuration file or environment is invalid.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl LoadError {
    /// Create a missing-column schema error.
    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Io {
            message: message.into(),
            context,
        }
    }

    /// Create a CSV error with context.
    pub fn csv(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Csv {
            message: message.into(),
            context,
        }
    }

    /// Create a no-sheets error with context.
    pub fn no_sheets(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NoSheets {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context if available.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::MissingColumn { .. } => None,
            Self::Io { context, .. }
            | Self::Csv { context, .. }
            | Self::NoSheets { context, .. }
            | Self::Configuration { context, .. } => Some(context),
        }
    }

    /// Sheet named by this error, if any.
    pub fn sheet(&self) -> Option<&str> {
        match self {
            Self::MissingColumn { sheet, .. } => Some(sheet),
            other => other.context().and_then(|c| c.sheet.as_deref()),
        }
    }
}
