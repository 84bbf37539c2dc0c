use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by the analysis core.
///
/// Soft conditions (unrecognized kinds, unresolved linker aliases, ambiguous
/// structural matches) are handled fail-open and never reach this type; a
/// run is cancel-or-complete, never partially corrupted.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The run was cancelled; no classification was produced.
    #[error("analysis cancelled")]
    #[diagnostic(code(deadmark::cancelled))]
    Cancelled,

    /// Configuration file with an extension no loader handles.
    #[error("unsupported config format: {0}")]
    #[diagnostic(
        code(deadmark::config::format),
        help("supported extensions are .yaml, .yml, and .toml")
    )]
    UnsupportedConfigFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
