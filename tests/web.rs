//! Bridge tests, run with `wasm-pack test --node`

#![cfg(target_arch = "wasm32")]

use js_sys::Function;
use report_pager::wasm::ContentElement;
use report_pager::WasmPaginator;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

/// Plain object standing in for a DOM element
fn fake_element(height: f64, explicit: u32, avoid: u32) -> ContentElement {
    let build = Function::new_with_args(
        "h, e, a",
        "return {
            scrollHeight: h,
            querySelectorAll: (sel) => ({ length: sel === '.explicit-break' ? e : sel === '.avoid-break' ? a : 0 }),
        };",
    );
    build
        .call3(
            &JsValue::NULL,
            &JsValue::from(height),
            &JsValue::from(explicit),
            &JsValue::from(avoid),
        )
        .unwrap()
        .unchecked_into()
}

fn throwing_element() -> ContentElement {
    Function::new_no_args(
        "return { get scrollHeight() { throw new Error('detached'); }, querySelectorAll: () => ({ length: 0 }) };",
    )
    .call0(&JsValue::NULL)
    .unwrap()
    .unchecked_into()
}

fn noop() -> Function {
    Function::new_no_args("")
}

#[wasm_bindgen_test]
fn mount_estimates_from_element() {
    let mut pager = WasmPaginator::new();
    pager.mount(fake_element(636.0, 1, 0), noop(), noop()).unwrap();
    assert_eq!(pager.current_page(), 1);
    assert_eq!(pager.total_pages(), 2);
    assert_eq!(pager.label(), "Page 1 of 2");
}

#[wasm_bindgen_test]
fn throwing_element_falls_back() {
    let mut pager = WasmPaginator::new();
    pager.mount(throwing_element(), noop(), noop()).unwrap();
    assert_eq!(pager.total_pages(), 1);
}

#[wasm_bindgen_test]
fn mutation_schedules_tick() {
    let mut pager = WasmPaginator::new();
    pager.mount(fake_element(100.0, 0, 0), noop(), noop()).unwrap();

    assert!(pager.notify_mutation("childList", None));
    assert!(!pager.notify_mutation("attributes", Some("title".to_string())));
    let delay = pager.next_delay().unwrap();
    assert!(delay <= 150.0);

    pager.unmount();
    assert_eq!(pager.next_delay(), None);
}

#[wasm_bindgen_test]
fn connect_failure_is_reported() {
    let mut pager = WasmPaginator::new();
    let refuse = Function::new_no_args("throw new Error('no observers');");
    assert!(pager.mount(fake_element(100.0, 0, 0), refuse, noop()).is_err());
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(WasmPaginator::from_config(r#"{"geometry": {"maxPages": 0}}"#).is_err());
    assert!(WasmPaginator::with_geometry(-1.0, 50, 0.1).is_err());
}
