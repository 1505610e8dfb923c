//! Smoke tests for the exports in a real wasm runtime (`wasm-pack test --node`).

#![cfg(target_arch = "wasm32")]

use folio_core::{nav_links, CatalogController, TimelineController};
use serde_json::Value;
use wasm_bindgen_test::*;

fn parse(s: &str) -> Value {
    serde_json::from_str(s).unwrap()
}

#[wasm_bindgen_test]
fn timeline_without_data_is_empty() {
    let mut ctl = TimelineController::new(None, None);
    assert_eq!(parse(&ctl.stats())["commits"], 0);
    assert_eq!(parse(&ctl.set_progress(42.0))["visibleCount"], 0);
}

#[wasm_bindgen_test]
fn catalog_click_toggles_across_the_boundary() {
    let mut ctl = CatalogController::new(Some(
        r#"[{"title": "x", "year": 2021}, {"title": "y", "year": 2022}]"#.to_string(),
    ));
    let view = parse(&ctl.click_slice(1));
    assert_eq!(view["projects"].as_array().unwrap().len(), 1);
    let view = parse(&ctl.click_slice(1));
    assert_eq!(view["projects"].as_array().unwrap().len(), 2);
}

#[wasm_bindgen_test]
fn nav_marks_current_page() {
    let links = parse(&nav_links(false, "/projects/"));
    assert_eq!(links[1]["current"], true);
}
