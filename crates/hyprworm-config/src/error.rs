use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Line {line} is not a `key = value` pair")]
    #[diagnostic(
        code(hyprworm::config::syntax),
        help("Comments start with `#`; every other line needs an `=`")
    )]
    Syntax {
        line: usize,
        #[source_code]
        src: String,
        #[label("expected `key = value`")]
        span: miette::SourceSpan,
    },

    #[error("Invalid value {value:?} for `{key}` on line {line}")]
    #[diagnostic(code(hyprworm::config::invalid_value), help("expected {expected}"))]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
        line: usize,
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
    },

    #[error("Configuration file not found: {}", path.display())]
    #[diagnostic(code(hyprworm::config::not_found))]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(hyprworm::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
