// src/by_rune.rs
use rustc_hash::FxHashMap;

use crate::counts::EditCounts;
use crate::levenshtein::{accumulate_cost, Cell, CostModel, DistanceMeasurer, Weights};

/// Uniform weights with per-character exceptions.
///
/// Built once with the fluent setters, then only read while measuring.
#[derive(Clone, Debug, Default)]
pub struct WeightsByRune {
    weights: Weights,
    insert: FxHashMap<char, f64>,
    delete: FxHashMap<char, f64>,
    replace: FxHashMap<(char, char), f64>,
}

impl WeightsByRune {
    pub fn new(weights: Weights) -> Self {
        WeightsByRune {
            weights,
            ..Default::default()
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Inserting any character of `chars` costs `cost`.
    pub fn insert(mut self, chars: &str, cost: f64) -> Self {
        for c in chars.chars() {
            self.insert.insert(c, cost);
        }
        self
    }

    /// Deleting any character of `chars` costs `cost`.
    pub fn delete(mut self, chars: &str, cost: f64) -> Self {
        for c in chars.chars() {
            self.delete.insert(c, cost);
        }
        self
    }

    /// Replacing any character of `from` by any character of `to` costs `cost`.
    pub fn replace(mut self, from: &str, to: &str, cost: f64) -> Self {
        for src in from.chars() {
            for dest in to.chars() {
                self.replace.insert((src, dest), cost);
            }
        }
        self
    }

    pub fn has_overrides(&self) -> bool {
        !(self.insert.is_empty() && self.delete.is_empty() && self.replace.is_empty())
    }

    pub fn distance_with_detail(&self, a: &str, b: &str) -> (f64, EditCounts) {
        let cell: Cell = accumulate_cost(a, b, self);
        (cell.cost, cell.counts)
    }
}

impl CostModel for WeightsByRune {
    fn insert(&self, c: char) -> f64 {
        self.insert.get(&c).copied().unwrap_or(self.weights.insert)
    }

    fn delete(&self, c: char) -> f64 {
        self.delete.get(&c).copied().unwrap_or(self.weights.delete)
    }

    fn replace(&self, from: char, to: char) -> f64 {
        self.replace.get(&(from, to)).copied().unwrap_or(self.weights.replace)
    }
}

impl DistanceMeasurer for WeightsByRune {
    fn distance(&self, a: &str, b: &str) -> f64 {
        accumulate_cost::<f64, _>(a, b, self)
    }
}
