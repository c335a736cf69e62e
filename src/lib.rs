mod by_rune;
mod config;
mod counts;
mod levenshtein;
mod normalized;
mod scan;


use wasm_bindgen::prelude::*;

use serde::Serialize;

pub use by_rune::WeightsByRune;
pub use config::{ConfigError, CostMode, PairCost, RuneCost, ScorerConfig};
pub use counts::{CountWeights, EditCounts, EditKind};
pub use levenshtein::{count_edit, lsd, CostModel, DistanceMeasurer, Weights};
pub use normalized::{normalized, Normalized};
pub use scan::{distance_all, nearest, ScanResult};

#[derive(Serialize)]
struct EditReport {
    distance: usize,
    counts: EditCounts,
}

fn scorer_from_json(config_json: &str) -> Result<Box<dyn DistanceMeasurer>, JsValue> {
    ScorerConfig::from_json(config_json)
        .and_then(|config| config.build())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn weighted_distance(config_json: &str, a: &str, b: &str) -> Result<f64, JsValue> {
    let dm = scorer_from_json(config_json)?;
    Ok(dm.distance(a, b))
}

#[wasm_bindgen]
pub fn count_edits(a: &str, b: &str) -> Result<String, JsValue> {
    let (distance, counts) = count_edit(a, b);
    serde_json::to_string(&EditReport { distance, counts })
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

fn candidates_from_json(candidates_json: &str) -> Result<Vec<String>, JsValue> {
    serde_json::from_str(candidates_json)
        .map_err(|e| JsValue::from_str(&format!("candidates must be a JSON array of strings: {}", e)))
}

#[wasm_bindgen]
pub fn nearest_candidate(config_json: &str, orig: &str, candidates_json: &str) -> Result<String, JsValue> {
    let dm = scorer_from_json(config_json)?;
    let candidates = candidates_from_json(candidates_json)?;
    let result = nearest(&dm, orig, &candidates);
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

#[wasm_bindgen]
pub fn distance_to_all(config_json: &str, orig: &str, candidates_json: &str) -> Result<Vec<f64>, JsValue> {
    let dm = scorer_from_json(config_json)?;
    let candidates = candidates_from_json(candidates_json)?;
    Ok(distance_all(&dm, orig, &candidates))
}
