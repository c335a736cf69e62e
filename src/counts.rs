// src/counts.rs
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::levenshtein::{count_edit, DistanceMeasurer};

/// The operations an alignment path is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
    Match,
}

impl EditKind {
    pub const ALL: [EditKind; 4] = [EditKind::Insert, EditKind::Delete, EditKind::Replace, EditKind::Match];

    fn slot(self) -> usize {
        match self {
            EditKind::Insert => 0,
            EditKind::Delete => 1,
            EditKind::Replace => 2,
            EditKind::Match => 3,
        }
    }
}

/// How many of each `EditKind` the chosen alignment path used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EditCounts([usize; 4]);

impl EditCounts {
    pub const fn new(insert: usize, delete: usize, replace: usize, matches: usize) -> Self {
        EditCounts([insert, delete, replace, matches])
    }

    pub fn get(&self, kind: EditKind) -> usize {
        self.0[kind.slot()]
    }

    pub(crate) fn bump(&mut self, kind: EditKind) {
        self.0[kind.slot()] += 1;
    }

    /// Insertions, deletions and replacements; matches are not edits.
    pub fn edits(&self) -> usize {
        self.get(EditKind::Insert) + self.get(EditKind::Delete) + self.get(EditKind::Replace)
    }

    /// Length of the alignment path, matches included.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Index<EditKind> for EditCounts {
    type Output = usize;

    fn index(&self, kind: EditKind) -> &usize {
        &self.0[kind.slot()]
    }
}

#[derive(Serialize)]
struct EditCountsRepr {
    insert: usize,
    delete: usize,
    replace: usize,
    #[serde(rename = "match")]
    matches: usize,
}

impl Serialize for EditCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EditCountsRepr {
            insert: self.get(EditKind::Insert),
            delete: self.get(EditKind::Delete),
            replace: self.get(EditKind::Replace),
            matches: self.get(EditKind::Match),
        }
        .serialize(serializer)
    }
}

/// Weighs the edit counts of the unit-cost optimal path instead of running
/// the DP with the weights themselves. Cheap operations therefore never
/// change which path is picked, only what it costs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountWeights {
    pub insert: f64,
    pub delete: f64,
    pub replace: f64,
}

impl CountWeights {
    pub fn weigh(&self, counts: &EditCounts) -> f64 {
        counts.get(EditKind::Insert) as f64 * self.insert
            + counts.get(EditKind::Delete) as f64 * self.delete
            + counts.get(EditKind::Replace) as f64 * self.replace
    }
}

impl DistanceMeasurer for CountWeights {
    fn distance(&self, a: &str, b: &str) -> f64 {
        let (_, counts) = count_edit(a, b);
        self.weigh(&counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn count_weights_match_known_costs() {
        let cases: &[((f64, f64, f64), &str, &str, f64)] = &[
            ((1., 1., 1.), "", "", 0.),
            ((1., 1., 1.), "", "a", 1.),
            ((1., 1., 1.), "a", "", 1.),
            ((1., 0., 0.), "a", "aaa", 2.),
            ((0., 1., 0.), "aaa", "a", 2.),
            ((0., 0., 1.), "aaa", "abc", 2.),
            ((1., 1., 1.), "book", "back", 2.),
            ((1., 1., 0.1), "book", "back", 0.2),
            ((0.1, 1., 1.), "book", "back", 2.),
            ((1., 0.1, 1.), "book", "back", 2.),
            ((0.01, 1., 0.1), "book", "backs", 0.21),
            ((1., 1., 1.), "こんにちは", "こんばんは", 2.),
            ((1., 1., 0.1), "こんにちは", "こんばんは", 0.2),
            ((1., 1., 1.), "book", "board", 3.),
            ((0.1, 1., 1.), "book", "board", 2.1),
            ((1., 1., 0.1), "book", "board", 1.2),
        ];
        for (idx, &((insert, delete, replace), a, b, want)) in cases.iter().enumerate() {
            let got = CountWeights { insert, delete, replace }.distance(a, b);
            assert!(close(got, want), "{}: {:?} -> {:?} = {}, want {}", idx, a, b, got, want);
        }
    }

    #[test]
    fn counts_accessors() {
        let counts = EditCounts::new(1, 0, 2, 2);
        assert_eq!(counts[EditKind::Replace], 2);
        assert_eq!(counts.get(EditKind::Insert), 1);
        assert_eq!(counts.edits(), 3);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn counts_serialize_by_name() {
        let json = serde_json::to_string(&EditCounts::new(0, 1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"insert":0,"delete":1,"replace":2,"match":3}"#);
    }
}
