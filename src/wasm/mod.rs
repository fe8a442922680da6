//! WASM bindings for the paginator

use crate::error::PagerError;
use crate::estimator::{ContentSource, MarkerKind};
use crate::observer::{ChangeFeed, ContentChange, ObserveOptions};
use crate::{PageGeometry, PagerConfig, Paginator, SubscriptionId};
use js_sys::{Function, Reflect, JSON};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    /// The report's content container (any DOM element)
    #[wasm_bindgen(typescript_type = "HTMLElement")]
    pub type ContentElement;

    #[wasm_bindgen(method, catch, js_name = querySelectorAll)]
    fn query_selector_all(this: &ContentElement, selectors: &str) -> Result<NodeList, JsValue>;

    pub type NodeList;

    #[wasm_bindgen(method, getter)]
    fn length(this: &NodeList) -> u32;
}

fn js_error(kind: fn(String) -> PagerError, err: JsValue) -> PagerError {
    kind(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn to_js(err: PagerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

impl ContentSource for ContentElement {
    fn content_height(&self) -> crate::Result<f64> {
        let target: &JsValue = self.as_ref();
        let value = Reflect::get(target, &JsValue::from_str("scrollHeight"))
            .map_err(|e| js_error(PagerError::Measurement, e))?;
        value
            .as_f64()
            .ok_or_else(|| PagerError::Measurement("scrollHeight is not a number".to_string()))
    }

    fn count_markers(&self, kind: MarkerKind) -> crate::Result<usize> {
        let nodes = self
            .query_selector_all(&kind.selector())
            .map_err(|e| js_error(PagerError::Measurement, e))?;
        Ok(nodes.length() as usize)
    }
}

/// Observer wiring owned by the host page.
///
/// `connect` receives the observe options as an object and sets up the
/// mutation and resize observers; `disconnect` tears them down.
pub struct JsChangeFeed {
    connect: Function,
    disconnect: Function,
}

impl JsChangeFeed {
    pub fn new(connect: Function, disconnect: Function) -> Self {
        Self {
            connect,
            disconnect,
        }
    }
}

impl ChangeFeed for JsChangeFeed {
    fn connect(&mut self, options: &ObserveOptions) -> crate::Result<()> {
        let options = JSON::parse(&options.to_json()).map_err(|e| js_error(PagerError::Observe, e))?;
        self.connect
            .call1(&JsValue::NULL, &options)
            .map_err(|e| js_error(PagerError::Observe, e))?;
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Err(e) = self.disconnect.call0(&JsValue::NULL) {
            tracing::warn!(error = ?e, "observer disconnect callback threw");
        }
    }
}

/// WASM-exposed paginator wrapper.
///
/// Subscriber callbacks run synchronously inside `tick`/`recompute` and
/// must not call back into this object.
#[wasm_bindgen]
pub struct WasmPaginator {
    inner: Paginator<ContentElement, JsChangeFeed>,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create a paginator with the reference page geometry
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Paginator::default(),
        }
    }

    /// Create a paginator with custom page geometry
    #[wasm_bindgen(js_name = withGeometry)]
    pub fn with_geometry(
        available_page_height: f64,
        max_pages: u32,
        avoid_break_buffer_factor: f64,
    ) -> Result<WasmPaginator, JsValue> {
        let config = PagerConfig {
            geometry: PageGeometry::new(available_page_height, max_pages, avoid_break_buffer_factor),
            ..PagerConfig::default()
        };
        let inner = Paginator::with_config(config).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Create a paginator from a JSON config
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<WasmPaginator, JsValue> {
        let config = PagerConfig::from_json(json).map_err(to_js)?;
        Ok(Self {
            inner: Paginator::new(config),
        })
    }

    /// Attach to the content element and start observing
    pub fn mount(
        &mut self,
        element: ContentElement,
        connect: Function,
        disconnect: Function,
    ) -> Result<(), JsValue> {
        self.inner
            .mount(element, JsChangeFeed::new(connect, disconnect), now_ms())
            .map_err(to_js)
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    /// Report a viewport resize
    #[wasm_bindgen(js_name = notifyResize)]
    pub fn notify_resize(&mut self) -> bool {
        self.inner
            .handle_change(&ContentChange::ViewportResized, now_ms())
    }

    /// Report a `MutationRecord` by its type and attribute name
    #[wasm_bindgen(js_name = notifyMutation)]
    pub fn notify_mutation(&mut self, record_type: &str, attribute_name: Option<String>) -> bool {
        match ContentChange::from_mutation(record_type, attribute_name.as_deref()) {
            Some(change) => self.inner.handle_change(&change, now_ms()),
            None => false,
        }
    }

    /// Run due recomputations; returns how many ran
    pub fn tick(&mut self) -> u32 {
        self.inner.poll(now_ms()) as u32
    }

    /// Milliseconds until `tick` has work, if anything is pending
    #[wasm_bindgen(js_name = nextDelay)]
    pub fn next_delay(&self) -> Option<f64> {
        self.inner
            .time_until_due(now_ms())
            .map(|delay| delay.as_millis() as f64)
    }

    /// Estimate immediately, bypassing the debounce channels
    pub fn recompute(&mut self) {
        self.inner.recompute();
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.inner.pagination().current_page
    }

    #[wasm_bindgen(js_name = totalPages)]
    pub fn total_pages(&self) -> u32 {
        self.inner.pagination().total_pages
    }

    /// Indicator text, e.g. "Page 1 of 3"
    pub fn label(&self) -> String {
        self.inner.pagination().label()
    }

    /// Register `callback(currentPage, totalPages)`; returns its id.
    ///
    /// The callback runs synchronously while this paginator is borrowed, so
    /// it must not call any method on it (not even `totalPages()`); such
    /// calls throw and are only logged. Read the arguments instead, or defer
    /// work with `queueMicrotask`.
    pub fn subscribe(&mut self, callback: Function) -> u32 {
        let id = self.inner.subscribe(move |info| {
            let current = JsValue::from(info.current_page);
            let total = JsValue::from(info.total_pages);
            if let Err(e) = callback.call2(&JsValue::NULL, &current, &total) {
                tracing::warn!(error = ?e, "pagination subscriber threw");
            }
        });
        id.0
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        self.inner.unsubscribe(SubscriptionId(id))
    }

    /// Observer configuration as a JSON string
    #[wasm_bindgen(js_name = observeOptions)]
    pub fn observe_options(&self) -> String {
        self.inner.observe_options().to_json()
    }
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}
