//! Debounced recomputation scheduling
//!
//! Two independent single-slot channels, one per change source. Scheduling
//! cancels the channel's pending deadline and starts a new one; the channel
//! fires once nothing has been scheduled for its whole quiet period.
//!
//! Time is passed in as milliseconds so the host decides where it comes from
//! (`Date.now()` in the browser, a fake clock in tests).

use crate::geometry::DebounceConfig;
use smallvec::SmallVec;
use std::time::Duration;

/// Which debounce channel a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Resize,
    Mutation,
}

/// One cancel-and-restart timer slot
#[derive(Debug, Clone)]
pub struct DebounceChannel {
    quiet_period: Duration,
    /// Absolute deadline in ms, if armed
    deadline: Option<u64>,
}

impl DebounceChannel {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Restart the quiet period from `now_ms`, returning the new deadline
    pub fn schedule(&mut self, now_ms: u64) -> u64 {
        let quiet_ms = u64::try_from(self.quiet_period.as_millis()).unwrap_or(u64::MAX);
        let deadline = now_ms.saturating_add(quiet_ms);
        self.deadline = Some(deadline);
        deadline
    }

    /// Disarm. Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Consume the deadline if it has passed
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now_ms: u64) -> Option<Duration> {
        self.deadline
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(now_ms)))
    }
}

/// The resize and mutation channels
#[derive(Debug, Clone)]
pub struct DebounceScheduler {
    resize: DebounceChannel,
    mutation: DebounceChannel,
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl DebounceScheduler {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            resize: DebounceChannel::new(Duration::from_millis(config.resize_quiet_ms)),
            mutation: DebounceChannel::new(Duration::from_millis(config.mutation_quiet_ms)),
        }
    }

    pub fn channel(&self, kind: ChannelKind) -> &DebounceChannel {
        match kind {
            ChannelKind::Resize => &self.resize,
            ChannelKind::Mutation => &self.mutation,
        }
    }

    fn channel_mut(&mut self, kind: ChannelKind) -> &mut DebounceChannel {
        match kind {
            ChannelKind::Resize => &mut self.resize,
            ChannelKind::Mutation => &mut self.mutation,
        }
    }

    pub fn schedule(&mut self, kind: ChannelKind, now_ms: u64) -> u64 {
        let deadline = self.channel_mut(kind).schedule(now_ms);
        tracing::trace!(?kind, deadline, "recompute scheduled");
        deadline
    }

    /// Take every channel whose quiet period has elapsed
    pub fn fire_due(&mut self, now_ms: u64) -> SmallVec<[ChannelKind; 2]> {
        let mut fired = SmallVec::new();
        for kind in [ChannelKind::Resize, ChannelKind::Mutation] {
            if self.channel_mut(kind).fire(now_ms) {
                fired.push(kind);
            }
        }
        fired
    }

    /// Earliest pending deadline across both channels
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.resize.deadline(), self.mutation.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn time_until_due(&self, now_ms: u64) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(now_ms)))
    }

    pub fn has_pending(&self) -> bool {
        self.resize.is_pending() || self.mutation.is_pending()
    }

    /// Disarm both channels
    pub fn cancel_all(&mut self) {
        let resize = self.resize.cancel();
        let mutation = self.mutation.cancel();
        if resize || mutation {
            tracing::trace!(resize, mutation, "pending recomputes cancelled");
        }
    }
}
