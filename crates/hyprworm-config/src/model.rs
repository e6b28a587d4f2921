//! Configuration data model

use std::path::PathBuf;
use std::time::Duration;

/// Default picker: fuzzel in dmenu mode
pub const DEFAULT_LAUNCHER: &str = "fuzzel --dmenu";

/// Default bound on a single compositor exchange
pub const DEFAULT_IPC_TIMEOUT: Duration = Duration::from_millis(2000);

/// Root configuration structure
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Picker executable and its arguments
    pub launcher: LauncherCommand,
    /// Append the window title to each rendered line
    pub show_title: bool,
    /// Workspace display aliases, in the order they appear in the file
    pub workspace_aliases: Vec<WorkspaceAlias>,
    pub sort_order: SortOrder,
    pub special_workspace_position: SpecialWorkspacePosition,
    pub log_level: LogLevel,
    /// Optional file that receives a copy of every log line
    pub log_file: Option<PathBuf>,
    /// Upper bound for one compositor exchange; `None` waits forever
    pub ipc_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launcher: LauncherCommand::default(),
            show_title: false,
            workspace_aliases: Vec::new(),
            sort_order: SortOrder::default(),
            special_workspace_position: SpecialWorkspacePosition::default(),
            log_level: LogLevel::default(),
            log_file: None,
            ipc_timeout: Some(DEFAULT_IPC_TIMEOUT),
        }
    }
}

impl Config {
    /// Insert or replace an alias. A replaced alias keeps its original position.
    pub fn set_alias(&mut self, key: &str, value: &str) {
        match self.workspace_aliases.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.value = value.to_string(),
            None => self.workspace_aliases.push(WorkspaceAlias {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// A workspace name (or name fragment) and the text shown in its place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceAlias {
    pub key: String,
    pub value: String,
}

/// Picker command line
///
/// Parsed with a plain whitespace split: quoting is not supported, so an
/// argument can never contain a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for LauncherCommand {
    fn default() -> Self {
        let mut words = DEFAULT_LAUNCHER.split_whitespace().map(str::to_string);
        Self {
            program: words.next().unwrap_or_default(),
            args: words.collect(),
        }
    }
}

impl std::str::FromStr for LauncherCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| "Launcher command is empty".to_string())?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }
}

impl std::fmt::Display for LauncherCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Workspace,
    Application,
    Title,
    /// Keep the order the compositor reported
    None,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workspace" => Ok(Self::Workspace),
            "application" => Ok(Self::Application),
            "title" => Ok(Self::Title),
            "none" => Ok(Self::None),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Where windows on special (non-numeric) workspaces end up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecialWorkspacePosition {
    Top,
    Bottom,
    /// Bottom when sorting by workspace, interleaved otherwise
    #[default]
    Default,
}

impl std::str::FromStr for SpecialWorkspacePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "default" => Ok(Self::Default),
            _ => Err(format!("Unknown special workspace position: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_whitespace_split() {
        let launcher: LauncherCommand = "  rofi   -dmenu -i ".parse().unwrap();
        assert_eq!(launcher.program, "rofi");
        assert_eq!(launcher.args, vec!["-dmenu", "-i"]);
        assert_eq!(launcher.to_string(), "rofi -dmenu -i");
    }

    #[test]
    fn test_launcher_quotes_are_not_interpreted() {
        // Known limitation: quoted arguments are split like anything else
        let launcher: LauncherCommand = r#"wofi --prompt "Pick one""#.parse().unwrap();
        assert_eq!(launcher.args, vec!["--prompt", "\"Pick", "one\""]);
    }

    #[test]
    fn test_empty_launcher_rejected() {
        assert!("   ".parse::<LauncherCommand>().is_err());
    }

    #[test]
    fn test_default_launcher_matches_constant() {
        let parsed: LauncherCommand = DEFAULT_LAUNCHER.parse().unwrap();
        assert_eq!(parsed, LauncherCommand::default());
        assert_eq!(parsed.program, "fuzzel");
        assert_eq!(parsed.args, vec!["--dmenu".to_string()]);
    }

    #[test]
    fn test_log_level_accepts_uppercase_and_warning() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_set_alias_replaces_in_place() {
        let mut config = Config::default();
        config.set_alias("1", "web");
        config.set_alias("2", "code");
        config.set_alias("1", "www");

        let keys: Vec<&str> = config.workspace_aliases.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2"]);
        assert_eq!(config.workspace_aliases[0].value, "www");
    }
}
