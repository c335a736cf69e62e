// src/scan.rs
use crossbeam_channel::unbounded;
use serde::Serialize;

use crate::levenshtein::DistanceMeasurer;

/// The candidate closest to the reference string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ScanResult<'c> {
    pub candidate: &'c str,
    pub distance: f64,
}

/// Finds the candidate closest to `orig`.
///
/// Every candidate is measured in its own rayon task and the results are
/// reduced by a single consumer. Among candidates at exactly the same
/// distance the one listed first wins, whatever order the tasks finish in.
///
/// An empty `candidates` slice yields `ScanResult::default()`: an empty
/// candidate at distance `0.0`. Callers that need to tell this apart from a
/// real match should check for emptiness first.
pub fn nearest<'c, D, S>(dm: &D, orig: &str, candidates: &'c [S]) -> ScanResult<'c>
where
    D: DistanceMeasurer + ?Sized,
    S: AsRef<str> + Sync,
{
    if candidates.is_empty() {
        log::debug!("nearest: no candidates for {:?}", orig);
        return ScanResult::default();
    }
    log::debug!(
        "nearest: measuring {:?} against {} candidates on {} threads",
        orig,
        candidates.len(),
        rayon::current_num_threads()
    );

    let (tx, rx) = unbounded::<(usize, f64)>();
    rayon::scope(|s| {
        for (index, candidate) in candidates.iter().enumerate() {
            let tx = tx.clone();
            s.spawn(move |_| {
                let distance = dm.distance(orig, candidate.as_ref());
                if tx.send((index, distance)).is_err() {
                    log::error!("nearest: result for candidate {} dropped, receiver is gone", index);
                }
            });
        }
    });
    drop(tx);

    let mut best: Option<(usize, f64)> = None;
    for (index, distance) in rx {
        best = match best {
            Some((best_index, best_distance))
                if best_distance < distance || (best_distance == distance && best_index < index) =>
            {
                Some((best_index, best_distance))
            }
            _ => Some((index, distance)),
        };
    }

    match best {
        Some((index, distance)) => ScanResult {
            candidate: candidates[index].as_ref(),
            distance,
        },
        None => ScanResult::default(),
    }
}

/// Measures `orig` against every candidate.
///
/// `result[i]` is the distance to `candidates[i]`; each task writes only
/// its own slot.
pub fn distance_all<D, S>(dm: &D, orig: &str, candidates: &[S]) -> Vec<f64>
where
    D: DistanceMeasurer + ?Sized,
    S: AsRef<str> + Sync,
{
    let mut distances = vec![0.0; candidates.len()];
    log::debug!("distance_all: measuring {:?} against {} candidates", orig, candidates.len());
    rayon::scope(|s| {
        for (slot, candidate) in distances.iter_mut().zip(candidates) {
            s.spawn(move |_| *slot = dm.distance(orig, candidate.as_ref()));
        }
    });
    distances
}
