//! Content change observation
//!
//! The platform mechanism (DOM observers, test doubles) sits behind
//! [`ChangeFeed`]. [`ContentObserver`] owns a connected feed for as long as
//! the content is mounted and decides which changes warrant a recompute.

use crate::error::Result;
use crate::scheduler::ChannelKind;

/// Attributes whose changes can alter layout height
pub const OBSERVED_ATTRIBUTES: &[&str] = &["style", "class"];

/// What a platform observer must watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserveOptions {
    pub child_list: bool,
    pub subtree: bool,
    pub attribute_filter: &'static [&'static str],
    pub viewport_resize: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            child_list: true,
            subtree: true,
            attribute_filter: OBSERVED_ATTRIBUTES,
            viewport_resize: true,
        }
    }
}

impl ObserveOptions {
    /// JSON shaped like a `MutationObserverInit`, plus the resize flag
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "childList": self.child_list,
            "subtree": self.subtree,
            "attributes": !self.attribute_filter.is_empty(),
            "attributeFilter": self.attribute_filter,
            "viewportResize": self.viewport_resize,
        })
        .to_string()
    }
}

/// A single notification from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentChange {
    ViewportResized,
    ChildList,
    Attribute(String),
    CharacterData,
}

impl ContentChange {
    /// Parse a `MutationRecord` type and attribute name
    pub fn from_mutation(record_type: &str, attribute: Option<&str>) -> Option<Self> {
        match record_type {
            "childList" => Some(ContentChange::ChildList),
            "attributes" => attribute.map(|name| ContentChange::Attribute(name.to_string())),
            "characterData" => Some(ContentChange::CharacterData),
            _ => None,
        }
    }
}

/// Start/stop a platform change observer
pub trait ChangeFeed {
    fn connect(&mut self, options: &ObserveOptions) -> Result<()>;

    fn disconnect(&mut self);
}

/// Feed for hosts that push every notification themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualFeed;

impl ChangeFeed for ManualFeed {
    fn connect(&mut self, _options: &ObserveOptions) -> Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) {}
}

/// Holds a connected feed until detached or dropped
pub struct ContentObserver<F: ChangeFeed> {
    feed: F,
    options: ObserveOptions,
    connected: bool,
}

impl<F: ChangeFeed> ContentObserver<F> {
    /// Connect the feed and start observing
    pub fn attach(mut feed: F, options: ObserveOptions) -> Result<Self> {
        feed.connect(&options)?;
        tracing::debug!("content observer attached");
        Ok(Self {
            feed,
            options,
            connected: true,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn options(&self) -> &ObserveOptions {
        &self.options
    }

    /// Channel a change should be debounced on, or `None` to ignore it
    pub fn route(&self, change: &ContentChange) -> Option<ChannelKind> {
        if !self.connected {
            return None;
        }

        match change {
            ContentChange::ViewportResized if self.options.viewport_resize => {
                Some(ChannelKind::Resize)
            }
            ContentChange::ChildList if self.options.child_list => Some(ChannelKind::Mutation),
            ContentChange::Attribute(name)
                if self.options.attribute_filter.iter().any(|attr| *attr == name.as_str()) =>
            {
                Some(ChannelKind::Mutation)
            }
            _ => None,
        }
    }

    /// Release the feed. Safe to call more than once.
    pub fn detach(&mut self) {
        if self.connected {
            self.feed.disconnect();
            self.connected = false;
            tracing::debug!("content observer detached");
        }
    }
}

impl<F: ChangeFeed> Drop for ContentObserver<F> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PagerError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct CountingFeed {
        connects: Rc<Cell<u32>>,
        disconnects: Rc<Cell<u32>>,
    }

    impl ChangeFeed for CountingFeed {
        fn connect(&mut self, _options: &ObserveOptions) -> Result<()> {
            self.connects.set(self.connects.get() + 1);
            Ok(())
        }

        fn disconnect(&mut self) {
            self.disconnects.set(self.disconnects.get() + 1);
        }
    }

    struct RefusingFeed;

    impl ChangeFeed for RefusingFeed {
        fn connect(&mut self, _options: &ObserveOptions) -> Result<()> {
            Err(PagerError::Observe("no MutationObserver".to_string()))
        }

        fn disconnect(&mut self) {
            panic!("never connected");
        }
    }

    #[test]
    fn test_routing() {
        let observer = ContentObserver::attach(ManualFeed, ObserveOptions::default()).unwrap();

        assert_eq!(
            observer.route(&ContentChange::ViewportResized),
            Some(ChannelKind::Resize)
        );
        assert_eq!(
            observer.route(&ContentChange::ChildList),
            Some(ChannelKind::Mutation)
        );
        assert_eq!(
            observer.route(&ContentChange::Attribute("style".into())),
            Some(ChannelKind::Mutation)
        );
        assert_eq!(
            observer.route(&ContentChange::Attribute("class".into())),
            Some(ChannelKind::Mutation)
        );
        assert_eq!(observer.route(&ContentChange::Attribute("title".into())), None);
        assert_eq!(observer.route(&ContentChange::CharacterData), None);
    }

    #[test]
    fn test_detached_observer_ignores_changes() {
        let mut observer = ContentObserver::attach(ManualFeed, ObserveOptions::default()).unwrap();
        observer.detach();
        assert_eq!(observer.route(&ContentChange::ChildList), None);
        assert_eq!(observer.route(&ContentChange::ViewportResized), None);
    }

    #[test]
    fn test_disconnects_exactly_once() {
        let feed = CountingFeed::default();
        let disconnects = Rc::clone(&feed.disconnects);
        let connects = Rc::clone(&feed.connects);

        let mut observer = ContentObserver::attach(feed, ObserveOptions::default()).unwrap();
        observer.detach();
        observer.detach();
        drop(observer);

        assert_eq!(connects.get(), 1);
        assert_eq!(disconnects.get(), 1);
    }

    #[test]
    fn test_drop_disconnects() {
        let feed = CountingFeed::default();
        let disconnects = Rc::clone(&feed.disconnects);
        drop(ContentObserver::attach(feed, ObserveOptions::default()).unwrap());
        assert_eq!(disconnects.get(), 1);
    }

    #[test]
    fn test_failed_connect_is_not_released() {
        let result = ContentObserver::attach(RefusingFeed, ObserveOptions::default());
        assert!(matches!(result, Err(PagerError::Observe(_))));
    }

    #[test]
    fn test_from_mutation() {
        assert_eq!(
            ContentChange::from_mutation("childList", None),
            Some(ContentChange::ChildList)
        );
        assert_eq!(
            ContentChange::from_mutation("attributes", Some("class")),
            Some(ContentChange::Attribute("class".to_string()))
        );
        assert_eq!(ContentChange::from_mutation("attributes", None), None);
        assert_eq!(ContentChange::from_mutation("bogus", None), None);
    }

    #[test]
    fn test_options_json() {
        let json: serde_json::Value =
            serde_json::from_str(&ObserveOptions::default().to_json()).unwrap();
        assert_eq!(json["childList"], true);
        assert_eq!(json["attributeFilter"], serde_json::json!(["style", "class"]));
    }
}
