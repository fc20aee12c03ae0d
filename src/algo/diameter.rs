//! # iFUB Diameter Bounds
//!
//! Iterative Fringe-Upper-Bound: starting from a 4-sweep pivot, repeatedly
//! compute the eccentricities of the nodes on the pivot's farthest distance
//! shell. Every shell either certifies the current upper bound or lowers it,
//! so the gap between the bounds shrinks until it closes (or drops below a
//! caller-chosen tolerance).
//!
//! Unweighted graphs walk integer distance levels. Weighted graphs have no
//! levels; they scan a globally sorted sequence of per-node distance records
//! instead, treating every maximal run of equal distances as one shell.
//!
//! Both variants assume the graph is (strongly) connected; run
//! [`components`](crate::algo::components) first and restrict to the largest
//! component if that is not guaranteed.

use itertools::Itertools;
use rand::Rng;

use crate::{
    algo::{
        four_sweep::four_sweep,
        visit::{visit, VisitResult},
    },
    error::Result,
    node::{Dist, Node},
    progress::ProgressObserver,
    repr::{ArrayGraph, Direction},
};

/// Diameter bounds, exact iff `lower == upper`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiameterBounds {
    pub lower: Dist,
    pub upper: Dist,
    /// Total number of visits spent, the 4-sweep included
    pub num_visits: u64,
}

impl DiameterBounds {
    /// Returns *true* if the bounds agree
    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }
}

/// Computes diameter bounds with gap at most `tolerance` (`0` for the exact
/// diameter). Dispatches to the weighted variant iff the graph is weighted.
///
/// Returns [`Error::Cancelled`](crate::error::Error) as soon as the observer
/// requests a stop; bounds reached until then are discarded.
///
/// ** Panics if the graph is empty **
pub fn diameter_bounds<R: Rng + ?Sized>(
    graph: &ArrayGraph,
    tolerance: Dist,
    rng: &mut R,
    observer: &impl ProgressObserver,
) -> Result<DiameterBounds> {
    assert!(!graph.is_empty());

    let mut search = Search {
        graph,
        observer,
        num_visits: 0,
    };
    let bounds = if graph.is_weighted() {
        weighted_ifub(&mut search, tolerance, rng)
    } else {
        ifub(&mut search, tolerance, rng)
    }?;

    log::info!(
        "diameter in [{}, {}] after {} visits",
        bounds.lower,
        bounds.upper,
        bounds.num_visits
    );
    Ok(bounds)
}

/// Visit frontend that counts how many were spent
struct Search<'a, O> {
    graph: &'a ArrayGraph,
    observer: &'a O,
    num_visits: u64,
}

impl<O: ProgressObserver> Search<'_, O> {
    fn visit(&mut self, source: Node, dir: Direction) -> Result<VisitResult> {
        self.num_visits += 1;
        visit(self.graph, source, dir, self.observer)
    }
}

/// Plain iFUB over integer distance levels.
fn ifub<O: ProgressObserver, R: Rng + ?Sized>(
    search: &mut Search<'_, O>,
    tolerance: Dist,
    rng: &mut R,
) -> Result<DiameterBounds> {
    let graph = search.graph;
    let sweep = four_sweep(graph, rng, search.observer)?;
    search.num_visits += 4;

    let pivot = sweep.candidate;
    let forward = search.visit(pivot, Direction::Forward)?;
    let backward = if graph.is_directed() {
        Some(search.visit(pivot, Direction::Backward)?)
    } else {
        None
    };
    warn_if_not_reaching_all(graph, &forward, pivot);

    let mut level = forward
        .eccentricity()
        .max(backward.as_ref().map_or(0, VisitResult::eccentricity));
    let mut lower = sweep.lower_bound.max(level);
    let mut upper = 2 * level;

    while upper.saturating_sub(lower) > tolerance && level > 0 {
        // Biu: the largest eccentricity on the current fringe, seeded at the
        // established lower bound
        let mut biu = lower;

        // Forward fringe nodes bound paths *ending* far from the pivot, so
        // their relevant eccentricity is the backward one (and vice versa).
        'scan: for (shell, dir) in [
            (Some(&forward), Direction::Backward),
            (backward.as_ref(), Direction::Forward),
        ] {
            let Some(shell) = shell else { continue };
            for u in fringe(graph, shell, level) {
                let ecc = if graph.is_directed() {
                    search.visit(u, dir)?.eccentricity()
                } else {
                    search.visit(u, Direction::Forward)?.eccentricity()
                };
                biu = biu.max(ecc);
                // No fringe node can push the bound past the current upper
                if biu >= upper {
                    break 'scan;
                }
            }
        }

        if biu > 2 * (level - 1) {
            // No deeper shell can beat Biu: it is the exact diameter
            lower = biu;
            upper = biu;
            break;
        }
        lower = biu;
        upper = 2 * (level - 1);
        level -= 1;
    }

    Ok(DiameterBounds {
        lower,
        upper: upper.max(lower),
        num_visits: search.num_visits,
    })
}

/// The bounds only speak for the pivot's component; make that visible.
fn warn_if_not_reaching_all(graph: &ArrayGraph, result: &VisitResult, pivot: Node) {
    if (result.num_reached() as usize) < graph.len() {
        log::warn!(
            "pivot {pivot} reaches only {} of {} nodes; bounds cover its component only",
            result.num_reached(),
            graph.number_of_nodes()
        );
    }
}

fn fringe<'a>(
    graph: &'a ArrayGraph,
    shell: &'a VisitResult,
    level: Dist,
) -> impl Iterator<Item = Node> + 'a {
    graph
        .vertices()
        .filter(move |&u| shell.dist_of(u) == Some(level))
}

/// Per-node distance record of the weighted scan
#[derive(Debug, Clone, Copy)]
struct ShellRecord {
    node: Node,
    dist: Dist,
    /// Distance was measured pivot → node (as opposed to node → pivot)
    forward: bool,
}

/// Weighted iFUB: one sorted scan over all distance records replaces the
/// integer level loop.
fn weighted_ifub<O: ProgressObserver, R: Rng + ?Sized>(
    search: &mut Search<'_, O>,
    tolerance: Dist,
    rng: &mut R,
) -> Result<DiameterBounds> {
    let sweep = four_sweep(search.graph, rng, search.observer)?;
    search.num_visits += 4;

    let pivot = sweep.candidate;
    let records = sorted_records(search, pivot, rng)?;

    let ecc = records.last().map_or(0, |r| r.dist);
    let mut lower = sweep.lower_bound.max(ecc);
    let mut upper = 2 * ecc;

    // Scan shells from the farthest distance inward
    let mut end = records.len();
    while upper.saturating_sub(lower) > tolerance && end > 0 {
        let dist = records[end - 1].dist;
        if dist == 0 {
            break;
        }
        let start = records[..end].partition_point(|r| r.dist < dist);

        let mut biu = lower;
        for record in &records[start..end] {
            let ecc = if search.graph.is_directed() {
                // Records measured pivot → node cap paths ending at the node,
                // so the node's backward eccentricity is the relevant one
                let dir = if record.forward {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                search.visit(record.node, dir)?.eccentricity()
            } else {
                search.visit(record.node, Direction::Forward)?.eccentricity()
            };
            biu = biu.max(ecc);
            if biu >= upper {
                break;
            }
        }

        let next_dist = if start > 0 { records[start - 1].dist } else { 0 };
        if biu > 2 * next_dist {
            lower = biu;
            upper = biu;
            break;
        }
        lower = biu;
        upper = 2 * next_dist;
        end = start;
    }

    Ok(DiameterBounds {
        lower,
        upper: upper.max(lower),
        num_visits: search.num_visits,
    })
}

/// Collects one distance record per reached node and orientation, each
/// orientation sorted in place and the two then merged. Unreached nodes have
/// no finite distance and contribute no record.
fn sorted_records<O: ProgressObserver, R: Rng + ?Sized>(
    search: &mut Search<'_, O>,
    pivot: Node,
    rng: &mut R,
) -> Result<Vec<ShellRecord>> {
    fn collect(graph: &ArrayGraph, result: &VisitResult, forward: bool) -> Vec<ShellRecord> {
        graph
            .vertices()
            .filter_map(|node| {
                Some(ShellRecord {
                    node,
                    dist: result.dist_of(node)?,
                    forward,
                })
            })
            .collect()
    }

    let graph = search.graph;
    let result = search.visit(pivot, Direction::Forward)?;
    warn_if_not_reaching_all(graph, &result, pivot);
    let mut forward = collect(graph, &result, true);
    quicksort_by_dist(&mut forward, rng);
    if !graph.is_directed() {
        return Ok(forward);
    }

    let result = search.visit(pivot, Direction::Backward)?;
    let mut backward = collect(graph, &result, false);
    quicksort_by_dist(&mut backward, rng);

    Ok(forward
        .into_iter()
        .merge_by(backward, |a, b| a.dist <= b.dist)
        .collect())
}

/// In-place quicksort with a random pivot. Recurses only into the smaller
/// partition and loops on the larger one, bounding the stack depth by
/// `log2(n)` even in the worst case.
fn quicksort_by_dist<R: Rng + ?Sized>(mut records: &mut [ShellRecord], rng: &mut R) {
    while records.len() > 1 {
        let split = partition(records, rng);
        let (left, rest) = { records }.split_at_mut(split);
        // `rest` starts with the pivot, which is already in its final slot
        let right = &mut rest[1..];

        if left.len() <= right.len() {
            quicksort_by_dist(left, rng);
            records = right;
        } else {
            quicksort_by_dist(right, rng);
            records = left;
        }
    }
}

fn partition<R: Rng + ?Sized>(records: &mut [ShellRecord], rng: &mut R) -> usize {
    let last = records.len() - 1;
    records.swap(rng.random_range(0..records.len()), last);
    let pivot = records[last].dist;

    let mut store = 0;
    for i in 0..last {
        if records[i].dist < pivot {
            records.swap(i, store);
            store += 1;
        }
    }
    records.swap(store, last);
    store
}
