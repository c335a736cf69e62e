// src/levenshtein.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::counts::{EditCounts, EditKind};

/// Anything that can measure how far apart two strings are.
pub trait DistanceMeasurer: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> f64;
}

impl<D: DistanceMeasurer + ?Sized> DistanceMeasurer for Box<D> {
    fn distance(&self, a: &str, b: &str) -> f64 {
        (**self).distance(a, b)
    }
}

impl<D: DistanceMeasurer + ?Sized> DistanceMeasurer for Arc<D> {
    fn distance(&self, a: &str, b: &str) -> f64 {
        (**self).distance(a, b)
    }
}

/// Cost of a single step of the edit graph. Consulted on every transition.
pub trait CostModel {
    /// Cost of producing `c` from `b`.
    fn insert(&self, c: char) -> f64;
    /// Cost of dropping `c` from `a`.
    fn delete(&self, c: char) -> f64;
    /// Cost of turning `from` into `to`. Only asked for distinct characters.
    fn replace(&self, from: char, to: char) -> f64;
}

/// Uniform insert/delete/replace weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub insert: f64,
    pub delete: f64,
    pub replace: f64,
}

impl Weights {
    /// Plain Levenshtein distance.
    pub const UNIT: Weights = Weights::new(1.0, 1.0, 1.0);

    pub const fn new(insert: f64, delete: f64, replace: f64) -> Self {
        Weights { insert, delete, replace }
    }

    /// Returns the name and value of the first weight that is negative or not finite.
    pub fn validate(&self) -> Result<(), (&'static str, f64)> {
        for (name, cost) in [("insert", self.insert), ("delete", self.delete), ("replace", self.replace)] {
            if !cost.is_finite() || cost < 0.0 {
                return Err((name, cost));
            }
        }
        Ok(())
    }

    pub fn distance_with_detail(&self, a: &str, b: &str) -> (f64, EditCounts) {
        let cell: Cell = accumulate_cost(a, b, self);
        (cell.cost, cell.counts)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::UNIT
    }
}

impl CostModel for Weights {
    fn insert(&self, _: char) -> f64 {
        self.insert
    }
    fn delete(&self, _: char) -> f64 {
        self.delete
    }
    fn replace(&self, _: char, _: char) -> f64 {
        self.replace
    }
}

impl DistanceMeasurer for Weights {
    fn distance(&self, a: &str, b: &str) -> f64 {
        accumulate_cost::<f64, _>(a, b, self)
    }
}

/// Unit-cost Levenshtein distance over code points.
pub fn lsd(a: &str, b: &str) -> usize {
    count_edit(a, b).0
}

/// Unit-cost Levenshtein distance together with the edits the chosen path uses.
pub fn count_edit(a: &str, b: &str) -> (usize, EditCounts) {
    let (_, counts) = Weights::UNIT.distance_with_detail(a, b);
    (counts.edits(), counts)
}

/// State kept per matrix position. `f64` tracks the cost only, `Cell` also
/// tracks the edit counts of the path that reached it.
pub(crate) trait Step: Copy {
    fn origin() -> Self;
    fn cost(&self) -> f64;
    fn extend(&self, kind: EditKind, cost: f64) -> Self;
}

impl Step for f64 {
    fn origin() -> Self {
        0.0
    }
    fn cost(&self) -> f64 {
        *self
    }
    fn extend(&self, _: EditKind, cost: f64) -> Self {
        self + cost
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Cell {
    pub cost: f64,
    pub counts: EditCounts,
}

impl Step for Cell {
    fn origin() -> Self {
        Cell::default()
    }
    fn cost(&self) -> f64 {
        self.cost
    }
    fn extend(&self, kind: EditKind, cost: f64) -> Self {
        let mut counts = self.counts;
        counts.bump(kind);
        Cell { cost: self.cost + cost, counts }
    }
}

/// Picks the cheapest way into cell (i, j).
///
/// `diagonal` is (i-1, j-1), `before_insert` is (i, j-1) and `before_delete`
/// is (i-1, j). Ties keep the diagonal, then the insertion: a later
/// candidate only wins when it is strictly cheaper. The order itself is a
/// convention, but the edit counts of tied paths depend on it.
#[inline]
fn relax<S: Step, C: CostModel + ?Sized>(
    diagonal: &S,
    before_insert: &S,
    before_delete: &S,
    ac: char,
    bc: char,
    costs: &C,
) -> S {
    let (diagonal_kind, diagonal_step) = if ac == bc {
        (EditKind::Match, 0.0)
    } else {
        (EditKind::Replace, costs.replace(ac, bc))
    };
    let mut best = (diagonal, diagonal_kind, diagonal_step);
    let mut best_cost = diagonal.cost() + diagonal_step;

    let insert_step = costs.insert(bc);
    let insert_cost = before_insert.cost() + insert_step;
    if insert_cost < best_cost {
        best = (before_insert, EditKind::Insert, insert_step);
        best_cost = insert_cost;
    }

    let delete_step = costs.delete(ac);
    if before_delete.cost() + delete_step < best_cost {
        best = (before_delete, EditKind::Delete, delete_step);
    }

    let (from, kind, step) = best;
    from.extend(kind, step)
}

/// Weighted edit distance DP, keeping one row over the shorter input.
///
/// Both orientations compute the same cell values and choose the same
/// predecessors, so the result does not depend on which input is shorter.
pub(crate) fn accumulate_cost<S: Step, C: CostModel + ?Sized>(a: &str, b: &str, costs: &C) -> S {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len() <= b.len() {
        // row[i] holds cell (i, j) for the current column j.
        let mut row: Vec<S> = Vec::with_capacity(a.len() + 1);
        row.push(S::origin());
        for (i, &ac) in a.iter().enumerate() {
            let next = row[i].extend(EditKind::Delete, costs.delete(ac));
            row.push(next);
        }
        for &bc in &b {
            let mut diagonal = row[0];
            row[0] = row[0].extend(EditKind::Insert, costs.insert(bc));
            for i in 1..row.len() {
                let next = relax(&diagonal, &row[i], &row[i - 1], a[i - 1], bc, costs);
                diagonal = std::mem::replace(&mut row[i], next);
            }
        }
        row[a.len()]
    } else {
        // row[j] holds cell (i, j) for the current line i.
        let mut row: Vec<S> = Vec::with_capacity(b.len() + 1);
        row.push(S::origin());
        for (j, &bc) in b.iter().enumerate() {
            let next = row[j].extend(EditKind::Insert, costs.insert(bc));
            row.push(next);
        }
        for &ac in &a {
            let mut diagonal = row[0];
            row[0] = row[0].extend(EditKind::Delete, costs.delete(ac));
            for j in 1..row.len() {
                let next = relax(&diagonal, &row[j - 1], &row[j], ac, b[j - 1], costs);
                diagonal = std::mem::replace(&mut row[j], next);
            }
        }
        row[b.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn unit_fixed_points() {
        assert_eq!(lsd("kitten", "sitting"), 3);
        assert_eq!(lsd("sitting", "kitten"), 3);
        assert_eq!(lsd("book", "back"), 2);
        assert_eq!(lsd("こんにちは", "こんばんは"), 2);
        assert_eq!(lsd("", ""), 0);
        assert_eq!(lsd("", "abc"), 3);
        assert_eq!(lsd("abc", ""), 3);
    }

    #[test]
    fn count_edit_known_vectors() {
        let cases: &[(&str, &str, usize, EditCounts)] = &[
            ("", "", 0, EditCounts::new(0, 0, 0, 0)),
            ("a", "", 1, EditCounts::new(0, 1, 0, 0)),
            ("", "a", 1, EditCounts::new(1, 0, 0, 0)),
            ("a", "aaa", 2, EditCounts::new(2, 0, 0, 1)),
            ("aaa", "a", 2, EditCounts::new(0, 2, 0, 1)),
            ("aaaaa", "aaa", 2, EditCounts::new(0, 2, 0, 3)),
            ("book", "back", 2, EditCounts::new(0, 0, 2, 2)),
            ("book", "backs", 3, EditCounts::new(1, 0, 2, 2)),
            ("こんにちは", "こんばんは", 2, EditCounts::new(0, 0, 2, 3)),
            ("book", "board", 3, EditCounts::new(1, 0, 2, 2)),
            ("book", "boo", 1, EditCounts::new(0, 1, 0, 3)),
        ];
        for (idx, &(a, b, cost, counts)) in cases.iter().enumerate() {
            assert_eq!(count_edit(a, b), (cost, counts), "{}: {:?} -> {:?}", idx, a, b);
        }
    }

    #[test]
    fn ties_prefer_the_diagonal() {
        // Two replacements and delete+match+insert both cost 2.
        assert_eq!(count_edit("ab", "ba"), (2, EditCounts::new(0, 0, 2, 0)));
    }

    #[test]
    fn weighted_distances() {
        let w = Weights::new(0.1, 1.0, 0.01);
        assert!(close(w.distance("kitten", "shitting"), 0.22));

        let insert_only = Weights::new(1.0, 0.0, 0.0);
        assert!(close(insert_only.distance("a", "aaa"), 2.0));
        let delete_only = Weights::new(0.0, 1.0, 0.0);
        assert!(close(delete_only.distance("aaa", "a"), 2.0));

        assert!(close(Weights::new(1.0, 1.0, 0.1).distance("book", "board"), 1.2));
        assert!(close(Weights::new(0.1, 1.0, 1.0).distance("book", "board"), 2.1));
    }

    #[test]
    fn insert_consumes_b_delete_consumes_a() {
        let w = Weights::new(0.5, 3.0, 10.0);
        assert!(close(w.distance("", "abcd"), 2.0));
        assert!(close(w.distance("abcd", ""), 12.0));
    }

    #[test]
    fn detail_reports_weighted_cost() {
        let (cost, counts) = Weights::new(1.0, 1.0, 0.1).distance_with_detail("book", "board");
        assert!(close(cost, 1.2));
        assert_eq!(counts, EditCounts::new(1, 0, 2, 2));
    }

    #[test]
    fn validate_rejects_bad_weights() {
        assert!(Weights::UNIT.validate().is_ok());
        assert_eq!(Weights::new(1.0, -1.0, 1.0).validate(), Err(("delete", -1.0)));
        assert!(Weights::new(1.0, 1.0, f64::NAN).validate().is_err());
    }
}
