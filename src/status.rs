//! Interaction phases of a [`RefreshView`](crate::views::RefreshView).
use enum_map::Enum;
use enumset::{enum_set, EnumSet, EnumSetType};
use std::fmt;

/// Current phase of the pull-to-refresh interaction.
///
/// Transitions follow a fixed table, see [`RefreshStatus::successors`].
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(EnumSetType, Enum, Debug, Hash)]
pub enum RefreshStatus {
    /// Nothing is happening: the header and footer are hidden.
    Idle,
    /// The header is being dragged, but not far enough to trigger a refresh.
    PullToRefresh,
    /// The header has been dragged past the threshold: releasing refreshes.
    ReleaseToRefresh,
    /// A refresh is in progress. The header stays fully visible.
    Refreshing,
    /// More content is being loaded. The footer stays visible.
    Loading,
}

impl Default for RefreshStatus {
    fn default() -> Self {
        RefreshStatus::Idle
    }
}

impl RefreshStatus {
    /// Returns the set of statuses reachable in one step from `self`.
    pub fn successors(self) -> EnumSet<RefreshStatus> {
        use self::RefreshStatus::*;

        match self {
            Idle => enum_set!(PullToRefresh | Refreshing | Loading),
            PullToRefresh => enum_set!(ReleaseToRefresh | Idle),
            ReleaseToRefresh => enum_set!(PullToRefresh | Refreshing),
            Refreshing => enum_set!(Idle),
            Loading => enum_set!(Idle),
        }
    }

    /// Returns `true` if going from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: RefreshStatus) -> bool {
        self.successors().contains(next)
    }

    /// Returns `true` while the user is dragging the header.
    pub fn is_pulling(self) -> bool {
        matches!(
            self,
            RefreshStatus::PullToRefresh | RefreshStatus::ReleaseToRefresh
        )
    }

    /// Returns `true` while a refresh or a load is in progress.
    pub fn is_busy(self) -> bool {
        matches!(self, RefreshStatus::Refreshing | RefreshStatus::Loading)
    }
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            RefreshStatus::Idle => "idle",
            RefreshStatus::PullToRefresh => "pull to refresh",
            RefreshStatus::ReleaseToRefresh => "release to refresh",
            RefreshStatus::Refreshing => "refreshing",
            RefreshStatus::Loading => "loading",
        };
        f.write_str(name)
    }
}
