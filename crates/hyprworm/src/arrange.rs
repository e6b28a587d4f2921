//! Ordering and rendering of the window catalog for the picker
//!
//! [`arrange`] sorts the catalog according to the configured
//! [`SortOrder`] and [`SpecialWorkspacePosition`], then renders each window
//! into the single line shown by the picker. The rendered line is kept next
//! to the window it came from so a selection can be mapped back exactly.

use std::borrow::Cow;
use std::cmp::Ordering;

use hyprworm_config::{Config, SortOrder, SpecialWorkspacePosition, WorkspaceAlias};

use crate::hypr_ipc::{WindowCatalog, WindowRecord};

/// A catalog window together with its picker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangedWindow<'a> {
    pub line: String,
    pub window: &'a WindowRecord,
}

/// Sort the catalog and render every window
pub fn arrange<'a>(catalog: &'a WindowCatalog, config: &Config) -> Vec<ArrangedWindow<'a>> {
    let mut windows: Vec<&WindowRecord> = catalog.windows().iter().collect();
    sort_windows(
        &mut windows,
        config.sort_order,
        config.special_workspace_position,
    );

    windows
        .into_iter()
        .map(|window| ArrangedWindow {
            line: render_line(window, config),
            window,
        })
        .collect()
}

/// Stable sort of `windows` in place
///
/// Windows that compare equal keep their catalog order.
pub fn sort_windows(
    windows: &mut [&WindowRecord],
    order: SortOrder,
    position: SpecialWorkspacePosition,
) {
    match order {
        SortOrder::Workspace => windows.sort_by(|a, b| {
            workspace_rank(a, position)
                .cmp(&workspace_rank(b, position))
                .then_with(|| a.class_name.cmp(&b.class_name))
        }),
        SortOrder::Application => windows.sort_by(|a, b| {
            by_partition(a, b, position).then_with(|| a.class_name.cmp(&b.class_name))
        }),
        SortOrder::Title => windows
            .sort_by(|a, b| by_partition(a, b, position).then_with(|| a.title.cmp(&b.title))),
        SortOrder::None => windows.sort_by_key(|w| partition(w, position)),
    }
}

/// Sort key for workspace ordering
///
/// Special workspaces share one sentinel rank: below every numbered
/// workspace for `Top`, above every numbered workspace otherwise.
fn workspace_rank(window: &WindowRecord, position: SpecialWorkspacePosition) -> (u8, u64) {
    match (window.workspace_number(), position) {
        (Some(number), _) => (1, number),
        (None, SpecialWorkspacePosition::Top) => (0, 0),
        (None, SpecialWorkspacePosition::Bottom | SpecialWorkspacePosition::Default) => (2, 0),
    }
}

/// Group index used to pull special workspaces to one end
///
/// `Default` leaves everything in one group.
fn partition(window: &WindowRecord, position: SpecialWorkspacePosition) -> u8 {
    match position {
        SpecialWorkspacePosition::Default => 0,
        SpecialWorkspacePosition::Top => u8::from(!window.is_special()),
        SpecialWorkspacePosition::Bottom => u8::from(window.is_special()),
    }
}

fn by_partition(a: &WindowRecord, b: &WindowRecord, position: SpecialWorkspacePosition) -> Ordering {
    partition(a, position).cmp(&partition(b, position))
}

/// Display text for a workspace name
///
/// An alias whose key equals the name replaces it outright. Otherwise the
/// first alias (in configured order) whose key occurs in the name has that
/// occurrence replaced. Names matching no alias are returned unchanged.
pub fn resolve_workspace<'a>(name: &'a str, aliases: &[WorkspaceAlias]) -> Cow<'a, str> {
    if let Some(alias) = aliases.iter().find(|a| a.key == name) {
        return Cow::Owned(alias.value.clone());
    }

    match aliases
        .iter()
        .find(|a| !a.key.is_empty() && name.contains(a.key.as_str()))
    {
        Some(alias) => Cow::Owned(name.replacen(alias.key.as_str(), &alias.value, 1)),
        None => Cow::Borrowed(name),
    }
}

/// Replace line breaks so a field can never split a picker line
fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Render one window as `[workspace] class` or `[workspace] class: title`
pub fn render_line(window: &WindowRecord, config: &Config) -> String {
    let workspace = resolve_workspace(&window.workspace_name, &config.workspace_aliases);
    let workspace = single_line(&workspace);
    let class_name = single_line(&window.class_name);

    if config.show_title {
        format!(
            "[{}] {}: {}",
            workspace,
            class_name,
            single_line(&window.title)
        )
    } else {
        format!("[{}] {}", workspace, class_name)
    }
}
