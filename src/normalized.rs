// src/normalized.rs
use crate::levenshtein::DistanceMeasurer;

/// Divides the wrapped distance by the code-point length of the longer input.
#[derive(Clone, Debug)]
pub struct Normalized<D> {
    wrapped: D,
}

/// Wraps `dm` so that its distances become comparable across input lengths.
pub fn normalized<D: DistanceMeasurer>(dm: D) -> Normalized<D> {
    Normalized { wrapped: dm }
}

impl<D> Normalized<D> {
    pub fn into_inner(self) -> D {
        self.wrapped
    }
}

impl<D: DistanceMeasurer> DistanceMeasurer for Normalized<D> {
    fn distance(&self, a: &str, b: &str) -> f64 {
        let d = self.wrapped.distance(a, b);
        let longest = a.chars().count().max(b.chars().count());
        if longest == 0 {
            return d;
        }
        d / longest as f64
    }
}
