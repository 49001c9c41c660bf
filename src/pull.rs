//! Drag tracking and status transitions, independent from any view.
use crate::status::RefreshStatus;
use log::{debug, warn};

/// What happened when a drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The header was past the threshold: a refresh started.
    Refresh,
    /// The header was below the threshold: the pull was cancelled.
    Cancel,
    /// No pull was in progress.
    Nothing,
}

/// State machine behind a pull-to-refresh gesture.
///
/// Keeps track of the current [`RefreshStatus`] and of how many rows of the
/// header are revealed.
#[derive(Debug, Clone)]
pub struct PullState {
    status: RefreshStatus,

    // Rows of header currently revealed.
    offset: usize,

    header_height: usize,

    // Fraction of the header height a drag must reach.
    threshold: f64,
}

impl PullState {
    /// Creates a new idle state.
    ///
    /// `threshold` is the fraction of the header height a drag must reach
    /// before a release triggers a refresh.
    pub fn new(threshold: f64) -> Self {
        PullState {
            status: RefreshStatus::Idle,
            offset: 0,
            header_height: 0,
            threshold,
        }
    }

    /// Returns the current status.
    pub fn status(&self) -> RefreshStatus {
        self.status
    }

    /// Returns the number of header rows currently revealed.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the header height used for threshold computations.
    pub fn header_height(&self) -> usize {
        self.header_height
    }

    /// Updates the header height, usually after a layout pass.
    pub fn set_header_height(&mut self, height: usize) {
        self.header_height = height;
        self.offset = self.offset.min(height);
        if self.status == RefreshStatus::Refreshing {
            self.offset = height;
        }
    }

    /// Updates the threshold ratio.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Number of revealed rows from which a release refreshes.
    ///
    /// Never less than one row, so a zero-length drag can't refresh.
    pub fn threshold_rows(&self) -> usize {
        let rows = (self.header_height as f64 * self.threshold).ceil() as usize;
        rows.max(1)
    }

    /// Attempts to move to `next`.
    ///
    /// Returns `false` (and leaves the status untouched) if the transition
    /// is not in the table.
    pub fn transition(&mut self, next: RefreshStatus) -> bool {
        if !self.status.can_transition_to(next) {
            warn!("Rejected refresh transition: {} -> {}", self.status, next);
            return false;
        }

        debug!("Refresh status: {} -> {}", self.status, next);
        self.status = next;
        true
    }

    /// Applies a drag of `distance` rows below the anchor.
    ///
    /// Only has an effect while idle or pulling. Returns `true` if the drag
    /// was taken as a pull.
    pub fn pull(&mut self, distance: usize) -> bool {
        if !(self.status == RefreshStatus::Idle || self.status.is_pulling()) {
            return false;
        }

        self.offset = distance.min(self.header_height);

        let next = if self.offset == 0 {
            RefreshStatus::Idle
        } else if self.offset >= self.threshold_rows() {
            RefreshStatus::ReleaseToRefresh
        } else {
            RefreshStatus::PullToRefresh
        };

        if next != self.status {
            match (self.status, next) {
                // Going straight past the threshold in a single move.
                (RefreshStatus::Idle, RefreshStatus::ReleaseToRefresh) => {
                    self.transition(RefreshStatus::PullToRefresh);
                    self.transition(next);
                }
                // Dragged back all the way: still a pull until released.
                (RefreshStatus::ReleaseToRefresh, RefreshStatus::Idle) => {
                    self.transition(RefreshStatus::PullToRefresh);
                }
                _ => {
                    self.transition(next);
                }
            }
        }

        true
    }

    /// Ends the current drag.
    pub fn release(&mut self) -> Release {
        match self.status {
            RefreshStatus::ReleaseToRefresh => {
                self.transition(RefreshStatus::Refreshing);
                self.offset = self.header_height;
                Release::Refresh
            }
            RefreshStatus::PullToRefresh => {
                self.transition(RefreshStatus::Idle);
                Release::Cancel
            }
            _ => Release::Nothing,
        }
    }

    /// Starts a refresh without any drag.
    ///
    /// Returns `false` unless currently idle.
    pub fn start_refreshing(&mut self) -> bool {
        if self.status != RefreshStatus::Idle {
            return false;
        }
        let started = self.transition(RefreshStatus::Refreshing);
        self.offset = self.header_height;
        started
    }

    /// Starts loading more content.
    ///
    /// Returns `false` unless currently idle.
    pub fn start_loading(&mut self) -> bool {
        self.status == RefreshStatus::Idle
            && self.transition(RefreshStatus::Loading)
    }

    /// Ends a refresh or a load, going back to idle.
    ///
    /// The revealed offset is left untouched so the caller can animate it
    /// out; see [`PullState::collapse`].
    pub fn finish(&mut self) -> bool {
        self.status.is_busy() && self.transition(RefreshStatus::Idle)
    }

    /// Retracts the header by up to `step` rows while idle.
    ///
    /// A `step` of `None` hides it at once. Returns `true` if the header is
    /// still partly visible afterwards.
    pub fn collapse(&mut self, step: Option<usize>) -> bool {
        if self.status != RefreshStatus::Idle {
            return false;
        }

        self.offset = match step {
            Some(step) => self.offset.saturating_sub(step.max(1)),
            None => 0,
        };

        self.offset > 0
    }
}
