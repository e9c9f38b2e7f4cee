//! Greedy removal of the least useful nodes of a device.
//!
//! Used to shrink a device down to the size a circuit actually needs while
//! keeping the remaining nodes as well connected as possible.
//!
//! Each step removes one node: among the minimum-degree nodes that are not
//! articulation points, the one whose distance fingerprint is
//! lexicographically largest (farthest from the rest of the device). Ties on
//! the shrunk device are broken by the fingerprints on the original device.
//!
//! This is a local heuristic and does not find an optimal subset; which
//! nodes survive is part of the observable behaviour, so the comparison
//! rules below must stay as they are.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, info, instrument, trace};

use crate::architecture::Architecture;
use crate::node::Node;

/// Outcome of comparing a candidate's fingerprint against the current worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintOrder {
    /// The candidate is farther from the rest of the device.
    Worse,
    /// The candidate is closer to the rest of the device.
    Better,
    /// Equal up to the length of the shorter fingerprint.
    Tied,
}

/// Compare two distance fingerprints element by element.
///
/// Unreachable entries count as farther than any finite distance.
pub fn compare_fingerprints(candidate: &[Option<usize>], worst: &[Option<usize>]) -> FingerprintOrder {
    for (c, w) in candidate.iter().zip(worst) {
        match hop_key(*c).cmp(&hop_key(*w)) {
            Ordering::Greater => return FingerprintOrder::Worse,
            Ordering::Less => return FingerprintOrder::Better,
            Ordering::Equal => {}
        }
    }
    FingerprintOrder::Tied
}

fn hop_key(d: Option<usize>) -> usize {
    d.unwrap_or(usize::MAX)
}

fn fingerprint_key(dist: &[Option<usize>]) -> Vec<usize> {
    dist.iter().copied().map(hop_key).collect()
}

impl Architecture {
    /// Remove up to `num` nodes, one at a time, choosing the worst node each
    /// time.
    ///
    /// Stops early when no minimum-degree node is a safe (non-articulation)
    /// candidate. Returns the removed nodes; check its size against `num`.
    #[instrument(skip(self), fields(nodes = self.n_nodes()))]
    pub fn remove_worst_nodes(&mut self, num: usize) -> BTreeSet<Node> {
        let original = self.clone();
        let mut removed = BTreeSet::new();

        for _ in 0..num {
            let Some(worst) = self.find_worst_node(&original) else {
                debug!(removed = removed.len(), "no removable node left");
                break;
            };
            if self.remove_node(&worst).is_err() {
                break;
            }
            debug!(node = %worst, "removed node");
            removed.insert(worst);
        }

        info!(
            "Pruned {} of {} requested nodes, {} remain",
            removed.len(),
            num,
            self.n_nodes()
        );
        removed
    }

    /// The node [`remove_worst_nodes`](Self::remove_worst_nodes) would remove
    /// next, judged against `original` for tie-breaking.
    ///
    /// Returns `None` when every minimum-degree node is an articulation
    /// point.
    pub fn find_worst_node(&self, original: &Architecture) -> Option<Node> {
        let aps = self.articulation_points();
        let candidates: BTreeSet<Node> = self
            .min_degree_nodes()
            .into_iter()
            .filter(|n| !aps.contains(n))
            .collect();

        let mut iter = candidates.into_iter();
        let mut worst = iter.next()?;
        let mut worst_dist = self.fingerprint(&worst).ok()?;

        for candidate in iter {
            let Ok(dist) = self.fingerprint(&candidate) else {
                continue;
            };
            let order = compare_fingerprints(&dist, &worst_dist);
            trace!(candidate = %candidate, worst = %worst, ?order, "compared fingerprints");

            let replace = match order {
                FingerprintOrder::Worse => true,
                FingerprintOrder::Better => false,
                FingerprintOrder::Tied => original_is_worse(original, &candidate, &worst),
            };
            if replace {
                worst = candidate;
                worst_dist = dist;
            }
        }

        Some(worst)
    }
}

/// Tie-break on the unshrunk device: lexicographically larger fingerprint
/// loses. Nodes unknown to `original` never win the tie-break.
fn original_is_worse(original: &Architecture, candidate: &Node, worst: &Node) -> bool {
    match (original.fingerprint(candidate), original.fingerprint(worst)) {
        (Ok(c), Ok(w)) => fingerprint_key(&c) > fingerprint_key(&w),
        _ => false,
    }
}
