//! Report-Pager: live print page estimation for inspection reports
//!
//! This crate predicts how many printed pages a rendered report will take
//! and keeps the prediction current while the report changes:
//! - Pure page-count heuristic over content height and break markers
//! - Change observation behind a platform-neutral feed trait
//! - Two debounce channels (resize, mutation) with cancel-and-restart timers
//! - Published pagination state with change subscriptions

pub mod error;
pub mod estimator;
pub mod geometry;
pub mod observer;
pub mod scheduler;
pub mod state;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use error::{PagerError, Result};
pub use estimator::{
    estimate_total_pages, ContentMetrics, ContentSource, EstimateOutcome, MarkerKind,
    PageEstimator,
};
pub use geometry::{DebounceConfig, PageDimensions, PageGeometry, PagerConfig, PaperSize};
pub use observer::{ChangeFeed, ContentChange, ContentObserver, ManualFeed, ObserveOptions};
pub use scheduler::{ChannelKind, DebounceScheduler};
pub use state::{PaginationInfo, PaginationState, SubscriptionId};

use std::time::Duration;

/// Estimator, scheduler, observer and state for one mounted report
pub struct Paginator<S: ContentSource, F: ChangeFeed> {
    estimator: PageEstimator,
    scheduler: DebounceScheduler,
    observer: Option<ContentObserver<F>>,
    source: Option<S>,
    state: PaginationState,
    options: ObserveOptions,
    mounted_at: Option<u64>,
    recomputations: u64,
}

impl<S: ContentSource, F: ChangeFeed> Default for Paginator<S, F> {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl<S: ContentSource, F: ChangeFeed> Paginator<S, F> {
    /// Create an unmounted paginator
    pub fn new(config: PagerConfig) -> Self {
        Self {
            estimator: PageEstimator::new(config.geometry),
            scheduler: DebounceScheduler::new(config.debounce),
            observer: None,
            source: None,
            state: PaginationState::new(),
            options: ObserveOptions::default(),
            mounted_at: None,
            recomputations: 0,
        }
    }

    /// Create from a config that is validated first
    pub fn with_config(config: PagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Attach to a container: estimate once, then start observing.
    ///
    /// The first estimate is published straight over whatever the previous
    /// mount left, so subscribers always end up on the new count.
    /// If the feed fails to connect the error is returned, but the
    /// container stays mounted and the initial estimate stands.
    pub fn mount(&mut self, source: S, feed: F, now_ms: u64) -> Result<()> {
        self.release();

        self.source = Some(source);
        self.mounted_at = Some(now_ms);
        self.recompute();

        match ContentObserver::attach(feed, self.options) {
            Ok(observer) => {
                self.observer = Some(observer);
                tracing::debug!(now_ms, "paginator mounted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "content observer failed to attach, estimate will not follow changes");
                Err(e)
            }
        }
    }

    /// Cancel pending work, stop observing and drop the container.
    /// State goes back to `{1, 1}` and subscribers are told.
    pub fn unmount(&mut self) {
        self.release();
        self.state.reset();
    }

    fn release(&mut self) {
        self.scheduler.cancel_all();
        if let Some(mut observer) = self.observer.take() {
            observer.detach();
        }
        if self.source.take().is_some() {
            tracing::debug!("paginator unmounted");
        }
        self.mounted_at = None;
    }

    /// Timestamp passed to the current `mount`
    pub fn mounted_at(&self) -> Option<u64> {
        self.mounted_at
    }

    pub fn is_mounted(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_observing(&self) -> bool {
        self.observer.as_ref().is_some_and(|o| o.is_connected())
    }

    /// Route a change notification to its debounce channel.
    /// Returns whether a recompute was scheduled.
    pub fn handle_change(&mut self, change: &ContentChange, now_ms: u64) -> bool {
        let Some(kind) = self.observer.as_ref().and_then(|o| o.route(change)) else {
            return false;
        };
        self.scheduler.schedule(kind, now_ms);
        true
    }

    /// Run the estimator once for every channel that came due
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let fired = self.scheduler.fire_due(now_ms);
        for kind in &fired {
            tracing::debug!(?kind, now_ms, "debounce channel fired");
            self.recompute();
        }
        fired.len()
    }

    /// Run the estimator now and publish the result
    pub fn recompute(&mut self) -> EstimateOutcome {
        self.recomputations += 1;
        let outcome = self.estimator.estimate(self.source.as_ref());
        if let Some(info) = outcome.info() {
            self.state.publish(info);
        }
        outcome
    }

    /// Absolute time of the next pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// How long the host should wait before polling again
    pub fn time_until_due(&self, now_ms: u64) -> Option<Duration> {
        self.scheduler.time_until_due(now_ms)
    }

    pub fn pagination(&self) -> PaginationInfo {
        self.state.get()
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(PaginationInfo) + 'static) -> SubscriptionId {
        self.state.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Estimator invocations since construction
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.estimator.geometry()
    }

    pub fn observe_options(&self) -> &ObserveOptions {
        &self.options
    }

    /// Mounted container, e.g. to mutate a test double
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }
}

impl<S: ContentSource, F: ChangeFeed> Drop for Paginator<S, F> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(height: f64) -> Paginator<ContentMetrics, ManualFeed> {
        let mut paginator = Paginator::default();
        paginator
            .mount(ContentMetrics::new(height, 0, 0), ManualFeed, 0)
            .unwrap();
        paginator
    }

    #[test]
    fn test_mount_estimates_immediately() {
        let paginator = mounted(1272.0);
        assert_eq!(paginator.pagination(), PaginationInfo::new(1, 2));
        assert_eq!(paginator.recomputations(), 1);
        assert!(paginator.is_observing());
    }

    #[test]
    fn test_mutation_burst_coalesces() {
        let mut paginator = mounted(100.0);
        for t in [0, 40, 80, 120] {
            assert!(paginator.handle_change(&ContentChange::ChildList, t));
        }

        assert_eq!(paginator.poll(200), 0);
        assert_eq!(paginator.poll(270), 1);
        assert_eq!(paginator.poll(10_000), 0);
        assert_eq!(paginator.recomputations(), 2);
    }

    #[test]
    fn test_content_growth_is_picked_up() {
        let mut paginator = mounted(100.0);
        paginator.source_mut().unwrap().content_height = 2000.0;

        paginator.handle_change(&ContentChange::ViewportResized, 0);
        paginator.poll(250);
        assert_eq!(paginator.pagination(), PaginationInfo::new(1, 4));
    }

    #[test]
    fn test_unmount_cancels_and_resets() {
        let mut paginator = mounted(5000.0);
        paginator.handle_change(&ContentChange::ChildList, 0);
        paginator.unmount();

        assert_eq!(paginator.poll(10_000), 0);
        assert_eq!(paginator.pagination(), PaginationInfo::default());
        assert!(!paginator.handle_change(&ContentChange::ChildList, 20_000));
        assert_eq!(paginator.next_deadline(), None);
    }

    #[test]
    fn test_mount_time_is_recorded() {
        let mut paginator: Paginator<ContentMetrics, ManualFeed> = Paginator::default();
        assert_eq!(paginator.mounted_at(), None);

        paginator
            .mount(ContentMetrics::new(10.0, 0, 0), ManualFeed, 1_700)
            .unwrap();
        assert_eq!(paginator.mounted_at(), Some(1_700));

        paginator.unmount();
        assert_eq!(paginator.mounted_at(), None);
    }

    #[test]
    fn test_recompute_without_container_keeps_state() {
        let mut paginator: Paginator<ContentMetrics, ManualFeed> = Paginator::default();
        assert_eq!(paginator.recompute(), EstimateOutcome::Unmounted);
        assert_eq!(paginator.pagination(), PaginationInfo::default());
    }
}
