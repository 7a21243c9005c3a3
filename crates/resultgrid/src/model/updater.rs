//! Keeps a grid in sync with an observable result provider.
//!
//! The adapter itself never watches the provider; it reads the current
//! snapshot on every call. Something still has to tell the grid *when* to
//! re-query. `GridUpdater` is that observer: it collects the provider's
//! per-mutation signals into a [`ChangeSet`] and replays each change unit onto
//! the grid in one batch, and asks for a full reload whenever the content is
//! replaced by a fetch.

use std::sync::Arc;

use parking_lot::Mutex;
use resultgrid_core::ConnectionId;
use resultgrid_core::logging::targets;

use super::changes::ChangeSet;
use super::traits::{GridUpdates, ObservableResults};

/// Replays a provider's content changes onto a grid.
///
/// The updater stays connected for as long as it lives; dropping it
/// disconnects every slot it installed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use resultgrid::model::{
///     ChangeSet, ContentChange, GridUpdater, GridUpdates, Position, Section,
///     SectionedResults,
/// };
///
/// #[derive(Default)]
/// struct Grid;
///
/// impl GridUpdates for Grid {
///     fn reload_data(&self) {}
///     fn perform_batch_updates(&self, changes: &ChangeSet) {
///         assert_eq!(
///             changes.changes(),
///             &[ContentChange::ItemInserted(Position::new(0, 0))]
///         );
///     }
/// }
///
/// let results = Arc::new(SectionedResults::loaded(vec![Section::new(vec![1])]));
/// let _updater = GridUpdater::attach(results.clone(), Arc::new(Grid));
/// results.insert_item(Position::new(0, 0), 0).unwrap();
/// ```
pub struct GridUpdater<P: ObservableResults> {
    provider: Arc<P>,
    pending: Arc<Mutex<ChangeSet>>,
    will_change: ConnectionId,
    changed: ConnectionId,
    did_change: ConnectionId,
    reset: ConnectionId,
}

impl<P: ObservableResults> GridUpdater<P> {
    /// Connects `grid` to the change signals of `provider`.
    pub fn attach<G>(provider: Arc<P>, grid: Arc<G>) -> Self
    where
        G: GridUpdates + Send + Sync + 'static,
    {
        let signals = provider.result_signals();
        let pending = Arc::new(Mutex::new(ChangeSet::new()));

        let will_change = {
            let pending = pending.clone();
            signals
                .will_change_content
                .connect(move |_| pending.lock().clear())
        };

        let changed = {
            let pending = pending.clone();
            signals
                .content_changed
                .connect(move |change| pending.lock().push(*change))
        };

        let did_change = {
            let pending = pending.clone();
            let grid = grid.clone();
            signals.did_change_content.connect(move |_| {
                let changes = std::mem::take(&mut *pending.lock());
                if changes.is_empty() {
                    return;
                }
                tracing::trace!(target: targets::UPDATER, change_count = changes.len(), "applying batch updates");
                grid.perform_batch_updates(&changes);
            })
        };

        let reset = {
            let pending = pending.clone();
            signals.content_reset.connect(move |state| {
                pending.lock().clear();
                tracing::debug!(target: targets::UPDATER, ?state, "content reset, reloading grid");
                grid.reload_data();
            })
        };

        tracing::debug!(target: targets::UPDATER, "grid updater attached");
        Self {
            provider,
            pending,
            will_change,
            changed,
            did_change,
            reset,
        }
    }

    /// Returns the observed provider.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Returns `true` while a change unit is being collected.
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.lock().is_empty()
    }
}

impl<P: ObservableResults> Drop for GridUpdater<P> {
    fn drop(&mut self) {
        let signals = self.provider.result_signals();
        signals.will_change_content.disconnect(self.will_change);
        signals.content_changed.disconnect(self.changed);
        signals.did_change_content.disconnect(self.did_change);
        signals.content_reset.disconnect(self.reset);
        tracing::debug!(target: targets::UPDATER, "grid updater detached");
    }
}
