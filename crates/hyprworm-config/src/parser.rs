//! Line-oriented `key = value` configuration parser

use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::location::default_config_path;
use crate::model::*;

/// Prefix of the repeatable workspace alias keys
const ALIAS_PREFIX: &str = "workspace_alias_";

/// One `key = value` line, with enough position data to report errors
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    line: usize,
    value_span: miette::SourceSpan,
}

impl Entry<'_> {
    fn invalid(&self, source: &str, expected: &'static str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.key.to_string(),
            value: self.value.to_string(),
            expected,
            line: self.line,
            src: source.to_string(),
            span: self.value_span,
        }
    }
}

/// Span of `part` inside `source`. `part` must be a subslice of `source`.
fn span_within(source: &str, part: &str) -> miette::SourceSpan {
    let offset = part.as_ptr() as usize - source.as_ptr() as usize;
    (offset, part.len()).into()
}

/// Strip one pair of enclosing double quotes
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Load configuration for this run
///
/// With an explicit path the file must exist. Without one, the default
/// location is used and a missing file (or an unresolvable home directory)
/// yields the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return parse_config(path);
    }

    let Some(path) = default_config_path() else {
        tracing::debug!("No home directory found, using default configuration");
        return Ok(Config::default());
    };

    match parse_config(&path) {
        Err(ConfigError::NotFound { path }) => {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Config::default())
        }
        other => other,
    }
}

/// Parse a configuration file from the given path
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line = index + 1;
        let without_comment = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let trimmed = without_comment.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ConfigError::Syntax {
                line,
                src: content.to_string(),
                span: span_within(content, trimmed),
            });
        };

        let value = strip_quotes(value.trim());
        let entry = Entry {
            key: key.trim(),
            value,
            line,
            value_span: span_within(content, value),
        };
        apply_entry(&mut config, &entry, content)?;
    }

    Ok(config)
}

fn apply_entry(config: &mut Config, entry: &Entry<'_>, source: &str) -> Result<(), ConfigError> {
    match entry.key {
        "launcher" => {
            config.launcher = entry
                .value
                .parse()
                .map_err(|_| entry.invalid(source, "a program followed by optional arguments"))?;
        }
        "show_title" => {
            config.show_title = parse_bool(entry.value)
                .ok_or_else(|| entry.invalid(source, "one of true/1/yes or false/0/no"))?;
        }
        "log_level" => {
            config.log_level = entry
                .value
                .parse()
                .map_err(|_| entry.invalid(source, "one of ERROR, WARNING, INFO, DEBUG"))?;
        }
        "log_file" => {
            config.log_file = if entry.value.is_empty() {
                None
            } else {
                Some(shellexpand::tilde(entry.value).into_owned().into())
            };
        }
        "sort_order" => {
            config.sort_order = entry
                .value
                .parse()
                .map_err(|_| entry.invalid(source, "one of workspace, application, title, none"))?;
        }
        "special_workspace_position" => {
            config.special_workspace_position = entry
                .value
                .parse()
                .map_err(|_| entry.invalid(source, "one of top, bottom, default"))?;
        }
        "ipc_timeout_ms" => {
            let ms: u64 = entry
                .value
                .parse()
                .map_err(|_| entry.invalid(source, "a whole number of milliseconds (0 disables)"))?;
            config.ipc_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        key if key.starts_with(ALIAS_PREFIX) => {
            let alias = &key[ALIAS_PREFIX.len()..];
            if alias.is_empty() {
                return Err(entry.invalid(source, "a workspace name after `workspace_alias_`"));
            }
            config.set_alias(alias, entry.value);
        }
        key => {
            tracing::warn!(line = entry.line, "Unknown config option: {}", key);
        }
    }

    Ok(())
}
