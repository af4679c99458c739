//! Error types for prosegrade-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// A custom test in the configuration is invalid.
    #[error("invalid custom test '{name}': {reason}")]
    InvalidCustomTest {
        /// Name of the offending custom test.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while computing a readability test.
///
/// Failures are isolated per test: one test's error never aborts the
/// computation of the others. `LanguageIncompatible` and
/// `InsufficientData` are soft failures — the registry deactivates the
/// test instead of treating them as fatal. `NoScore` is not a failure
/// at all: graph-based tests legitimately fail to resolve a point and
/// callers must present that as "no score", never as an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestError {
    /// No test descriptor exists for the requested id.
    #[error("unknown test: {0}")]
    UnknownTest(String),

    /// The test does not support the document's language.
    #[error("test '{test}' does not support language '{language}'")]
    LanguageIncompatible {
        /// The test id.
        test: String,
        /// The unsupported language tag.
        language: String,
    },

    /// A minimum-data precondition failed (e.g. zero sentences).
    #[error("test '{test}' needs at least {required} {quantity}, document has {actual}")]
    InsufficientData {
        /// The test id.
        test: String,
        /// Name of the missing quantity ("words", "sentences", "sentence units").
        quantity: &'static str,
        /// How many the test requires.
        required: u64,
        /// How many the document has.
        actual: u64,
    },

    /// A custom formula failed to parse.
    #[error("formula syntax error at offset {offset}: {message}")]
    FormulaSyntax {
        /// Character offset of the first unmatched or unexpected token.
        offset: usize,
        /// What the parser expected.
        message: String,
    },

    /// A zero denominator or other arithmetic-domain failure reached a
    /// formula despite precondition checks.
    #[error("calculation failed for '{test}': {reason}")]
    ArithmeticDomain {
        /// The test id.
        test: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A graph-based test plotted a point outside every defined zone.
    /// Distinct from failure; callers render this as "no score".
    #[error("'{test}' could not resolve a score (point outside all graph zones)")]
    NoScore {
        /// The test id.
        test: String,
    },
}

impl TestError {
    /// Whether the registry should deactivate the test after this error.
    ///
    /// Applicability and precondition failures leave the test stale until
    /// the document changes, so the registry removes it from the active set.
    pub const fn deactivates(&self) -> bool {
        matches!(
            self,
            Self::LanguageIncompatible { .. } | Self::InsufficientData { .. }
        )
    }
}

/// Result type alias using [`TestError`].
pub type TestOutcome<T> = Result<T, TestError>;
