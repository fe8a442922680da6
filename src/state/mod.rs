//! Published pagination state

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page indicator values shown to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPaginationInfo")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl PaginationInfo {
    /// Build a record, keeping both values in `1..=total_pages`
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    /// First page of a document with `total_pages` pages
    pub fn first_of(total_pages: u32) -> Self {
        Self::new(1, total_pages)
    }

    /// Indicator text, e.g. "Page 1 of 3"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

/// Wire shape, checked before it becomes a [`PaginationInfo`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaginationInfo {
    current_page: u32,
    total_pages: u32,
}

impl TryFrom<RawPaginationInfo> for PaginationInfo {
    type Error = String;

    fn try_from(raw: RawPaginationInfo) -> Result<Self, Self::Error> {
        if raw.total_pages == 0 || raw.current_page == 0 || raw.current_page > raw.total_pages {
            return Err(format!(
                "page {} of {} is out of range",
                raw.current_page, raw.total_pages
            ));
        }
        Ok(Self::new(raw.current_page, raw.total_pages))
    }
}

impl fmt::Display for PaginationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}

/// Handle returned by [`PaginationState::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u32);

type Subscriber = Box<dyn FnMut(PaginationInfo)>;

/// Latest pagination record plus its subscribers.
///
/// There is one writer (the paginator). Each publish replaces the whole
/// record; subscribers only hear about publishes that change it.
pub struct PaginationState {
    info: PaginationInfo,
    /// Number of publishes that changed the record
    revision: u64,
    subscribers: FxHashMap<SubscriptionId, Subscriber>,
    next_id: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationState")
            .field("info", &self.info)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            info: PaginationInfo::default(),
            revision: 0,
            subscribers: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Current record
    pub fn get(&self) -> PaginationInfo {
        self.info
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the record. Returns true and notifies subscribers if it changed.
    pub fn publish(&mut self, info: PaginationInfo) -> bool {
        if info == self.info {
            return false;
        }

        self.info = info;
        self.revision += 1;

        for subscriber in self.subscribers.values_mut() {
            subscriber(info);
        }
        true
    }

    /// Publish `{1, 1}`
    pub fn reset(&mut self) -> bool {
        self.publish(PaginationInfo::default())
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(PaginationInfo) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Box::new(subscriber));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
