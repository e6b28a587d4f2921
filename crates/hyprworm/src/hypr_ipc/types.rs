//! Window records decoded from Hyprland's `j/clients` reply
//!
//! Decoding is lenient per element: a window without a usable title is not a
//! switch target and is skipped, and missing optional fields fall back to
//! defaults. Only a reply that is not a JSON array is an error.

use serde_json::Value;

use super::CatalogError;

/// Workspace name used when a window has no usable workspace object
pub const UNKNOWN_WORKSPACE: &str = "?";

/// One open window as reported by Hyprland
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    /// Opaque compositor handle, e.g. `0x55d1a2b3c4d0`
    pub address: String,

    /// Workspace name; numeric for ordinary workspaces
    pub workspace_name: String,

    /// Application class (e.g., "firefox", "kitty")
    pub class_name: String,

    /// Window title, never empty
    pub title: String,
}

impl WindowRecord {
    /// Numeric value of an ordinary workspace, `None` for special ones
    ///
    /// Only names made entirely of ASCII digits count as ordinary.
    pub fn workspace_number(&self) -> Option<u64> {
        let name = self.workspace_name.as_str();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        name.parse().ok()
    }

    /// True for windows on non-numeric workspaces (scratchpads and the like)
    pub fn is_special(&self) -> bool {
        self.workspace_number().is_none()
    }
}

/// The window list for one invocation, in compositor order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowCatalog {
    windows: Vec<WindowRecord>,
}

impl WindowCatalog {
    pub fn new(windows: Vec<WindowRecord>) -> Self {
        Self { windows }
    }

    /// Decode a `j/clients` reply
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidFormat` if the text is not valid JSON or
    /// its root is not an array.
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(json).map_err(|e| CatalogError::InvalidFormat {
            reason: e.to_string(),
        })?;

        let Value::Array(elements) = root else {
            return Err(CatalogError::InvalidFormat {
                reason: format!("root is {}", json_kind(&root)),
            });
        };

        Ok(Self::new(elements.iter().filter_map(window_from_json).collect()))
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WindowRecord> {
        self.windows.iter()
    }
}

impl<'a> IntoIterator for &'a WindowCatalog {
    type Item = &'a WindowRecord;
    type IntoIter = std::slice::Iter<'a, WindowRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn window_from_json(value: &Value) -> Option<WindowRecord> {
    let title = value.get("title").and_then(Value::as_str)?;
    if title.is_empty() {
        return None;
    }

    let workspace_name = match value.get("workspace") {
        Some(workspace @ Value::Object(_)) => string_field(workspace, "name"),
        _ => UNKNOWN_WORKSPACE.to_string(),
    };

    Some(WindowRecord {
        address: string_field(value, "address"),
        workspace_name,
        class_name: string_field(value, "class"),
        title: title.to_string(),
    })
}
