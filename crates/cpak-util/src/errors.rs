use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all cpak operations.
#[derive(Debug, Error, Diagnostic)]
pub enum CpakError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Cpak.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Cpak.toml for syntax errors"))]
    Manifest { message: String },

    /// A version requirement in the manifest could not be parsed.
    #[error("invalid version requirement `{requirement}`: {reason}")]
    InvalidRequirement { requirement: String, reason: String },

    /// The requirement parsed but combines comparators in an unsupported way.
    #[error("unsupported version requirement `{requirement}`")]
    #[diagnostic(help(
        "supported forms are an exact version, a single comparator, \
         or `<lower> and <upper>`"
    ))]
    UnsupportedRequirement { requirement: String },

    /// No published version of a package satisfies its requirement.
    #[error("`{name}: {requirement}` not found; no published version satisfies the requirement")]
    NoCompatibleVersion { name: String, requirement: String },

    /// Network or transport failure talking to the registry.
    #[error("registry unavailable: {message}")]
    RegistryUnavailable { message: String },

    /// The registry does not know the package.
    #[error("package `{name}` not found in registry")]
    UnknownPackage { name: String },

    /// The dependency requirements are mutually contradictory.
    #[error("dependency requirements are unsatisfiable")]
    #[diagnostic(help("two dependencies likely pin the same package to disjoint versions"))]
    Unsatisfiable,

    /// Lockfile carries a schema version this cpak does not understand.
    #[error("invalid lockfile version found: {found}")]
    InvalidLockfileVersion { found: i64 },

    /// Lockfile exists but could not be decoded.
    #[error("failed to read lockfile:\n{detail}")]
    MalformedLockfile { detail: String },

    /// Compilation or linking of C/C++ code failed.
    #[error("Compilation failed: {message}")]
    Compilation { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type CpakResult<T> = miette::Result<T>;
