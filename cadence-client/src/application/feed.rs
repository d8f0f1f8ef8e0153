use crate::domain::{EditError, EditSession, FailureNotice, FetchCycles, ListMode};
use crate::error::{ClientError, Result};
use crate::infrastructure::{Backend, Clock, KeyValueStore, OrderStore, SystemClock};
use cadence_core::{annotate_feed, merge_group_order, FeedEntry, GroupId, UserId};
use std::collections::{HashMap, HashSet};

/// Result of a feed refresh
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Entries were replaced with fresh data
    Updated,
    /// A newer cycle superseded this one; nothing was applied
    Superseded,
    /// A fetch failed; the previously loaded entries are untouched
    Failed {
        error: ClientError,
        /// Whether to show the failure to the user (first failure since
        /// the last success) or stay quiet (already shown)
        surface_notice: bool,
    },
}

/// View-model for the home group list of one user.
///
/// Owns the displayed entries, the persisted manual order, the editing
/// state machine, and the refresh-cycle bookkeeping. All server state is
/// refetched on focus; the only thing the controller writes locally is
/// the manual order.
pub struct FeedController<B, S, C = SystemClock> {
    backend: B,
    order: OrderStore<S>,
    clock: C,
    user: UserId,
    entries: Vec<FeedEntry>,
    edit: EditSession,
    cycles: FetchCycles,
    notice: FailureNotice,
}

impl<B: Backend, S: KeyValueStore> FeedController<B, S> {
    pub fn new(backend: B, store: S, user: UserId) -> Self {
        Self::with_clock(backend, store, user, SystemClock)
    }
}

impl<B: Backend, S: KeyValueStore, C: Clock> FeedController<B, S, C> {
    pub fn with_clock(backend: B, store: S, user: UserId, clock: C) -> Self {
        Self {
            backend,
            order: OrderStore::new(store),
            clock,
            user,
            entries: Vec::new(),
            edit: EditSession::new(),
            cycles: FetchCycles::new(),
            notice: FailureNotice::new(),
        }
    }

    // ===== Getters =====

    pub fn user(&self) -> UserId {
        self.user
    }

    /// The entries currently on screen, in display order.
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn mode(&self) -> ListMode {
        self.edit.mode()
    }

    pub fn is_selected(&self, id: GroupId) -> bool {
        self.edit.is_selected(id)
    }

    // ===== Refresh =====

    /// Refetch groups and ranks, merge with the persisted order, and
    /// replace the displayed entries.
    ///
    /// A refresh that was superseded while its fetches were in flight is
    /// discarded. A fetch failure leaves the last successfully loaded
    /// entries in place and reports whether the failure should be shown
    /// (repeated failures are muted until the next success).
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let cycle = self.cycles.begin();

        let fetched = match self.backend.fetch_visible_groups(self.user).await {
            Ok(groups) => groups,
            Err(e) => return self.refresh_failed(cycle, e.into()),
        };
        if !self.cycles.is_current(cycle) {
            tracing::debug!("Discarding superseded group fetch");
            return RefreshOutcome::Superseded;
        }

        let ids: Vec<GroupId> = fetched.iter().map(|g| g.id).collect();
        let ranks = match self.backend.fetch_ranks(self.user, &ids).await {
            Ok(ranks) => ranks,
            Err(e) => return self.refresh_failed(cycle, e.into()),
        };
        if !self.cycles.is_current(cycle) {
            tracing::debug!("Discarding superseded rank fetch");
            return RefreshOutcome::Superseded;
        }

        let saved = self.order.load_order().await;
        let merged = merge_group_order(fetched, &saved);
        if let Some(order) = &merged.updated_order {
            self.order.save_order(order).await;
        }

        self.entries = annotate_feed(merged.groups, &ranks, self.clock.now());
        self.notice.on_success();

        tracing::debug!("Feed refreshed: {} groups", self.entries.len());
        RefreshOutcome::Updated
    }

    fn refresh_failed(
        &mut self,
        cycle: crate::domain::CycleToken,
        error: ClientError,
    ) -> RefreshOutcome {
        // A stale cycle's failure is as irrelevant as its success.
        if !self.cycles.is_current(cycle) {
            return RefreshOutcome::Superseded;
        }

        let surface_notice = self.notice.on_failure();
        tracing::warn!("Feed refresh failed: {}", error);
        RefreshOutcome::Failed { error, surface_notice }
    }

    /// Supersede any in-flight refresh (the owning screen lost focus).
    pub fn invalidate(&mut self) {
        self.cycles.invalidate();
    }

    // ===== Editing =====

    pub fn begin_editing(&mut self) {
        self.edit.begin_editing();
    }

    pub fn finish_editing(&mut self) {
        self.edit.finish_editing();
    }

    pub fn toggle_select(&mut self, id: GroupId) -> Result<bool> {
        self.edit.toggle_select(id).map_err(Into::into)
    }

    /// Replace the display order with a user-provided permutation of the
    /// visible list and persist it.
    pub async fn reorder(&mut self, new_order: &[GroupId]) -> Result<()> {
        if !self.edit.is_editing() {
            return Err(EditError::NotEditing.into());
        }

        let current: HashSet<GroupId> = self.entries.iter().map(|e| e.group.id).collect();
        let proposed: HashSet<GroupId> = new_order.iter().copied().collect();
        if proposed.len() != new_order.len() || proposed != current {
            return Err(ClientError::NotAPermutation);
        }

        let mut by_id: HashMap<GroupId, FeedEntry> =
            self.entries.drain(..).map(|e| (e.group.id, e)).collect();
        self.entries = new_order
            .iter()
            .map(|id| by_id.remove(id).expect("validated permutation"))
            .collect();

        self.order.save_order(new_order).await;
        Ok(())
    }

    /// Hide every selected group.
    ///
    /// The backend is asked first, id by id in deterministic order; the
    /// first failure aborts with nothing removed locally, so the visible
    /// list never claims a hide that did not fully succeed. On success
    /// the ids leave both the entries and the persisted order, and the
    /// session returns to viewing mode.
    pub async fn hide_selected(&mut self) -> Result<usize> {
        if !self.edit.is_editing() {
            return Err(EditError::NotEditing.into());
        }

        let selection = self.edit.selection_sorted();
        if selection.is_empty() {
            self.edit.finish_editing();
            return Ok(0);
        }

        for id in &selection {
            self.backend.mark_group_hidden(self.user, *id).await?;
        }

        self.entries.retain(|e| !selection.contains(&e.group.id));
        self.order.remove(&selection).await;
        self.edit.finish_editing();

        tracing::info!("Hid {} groups", selection.len());
        Ok(selection.len())
    }
}
