//! Shared helpers for unit tests: seeded random graph builders, a brute-force
//! diameter oracle, and a counting cancellation observer.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use crate::{
    algo::visit::visit,
    edge::NumEdges,
    node::{Dist, Node, NumNodes, Weight},
    progress::{NoProgress, ProgressObserver},
    repr::{ArrayGraph, Direction},
};

const MAX_TEST_WEIGHT: Weight = 10;

fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> Vec<(Node, Node)> {
    (0..m)
        .map(|_| loop {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u != v {
                return (u, v);
            }
        })
        .collect()
}

/// Random graph with `m` loop-free edges; connectivity is not guaranteed
pub fn random_graph<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges, directed: bool) -> ArrayGraph {
    ArrayGraph::from_edges(n, directed, random_edges(rng, n, m))
}

/// Like [`random_graph`] but with random edge weights
pub fn random_weighted_graph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
    directed: bool,
) -> ArrayGraph {
    let edges = random_edges(rng, n, m)
        .into_iter()
        .map(|e| (e, rng.random_range(1..=MAX_TEST_WEIGHT)))
        .collect::<Vec<_>>();
    ArrayGraph::from_weighted_edges(n, directed, edges)
}

/// Connected random graph: a random spanning tree (undirected) or a Hamilton
/// cycle (directed, strongly connected) plus `extra` random edges
pub fn random_connected_graph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    extra: NumEdges,
    directed: bool,
) -> ArrayGraph {
    ArrayGraph::from_edges(n, directed, connected_edges(rng, n, extra, directed))
}

/// Undirected connected random graph, weighted on demand
pub fn random_connected_graph_maybe_weighted<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    extra: NumEdges,
    weighted: bool,
) -> ArrayGraph {
    let edges = connected_edges(rng, n, extra, false);
    build_maybe_weighted(rng, n, edges, false, weighted)
}

/// Strongly connected directed random graph, weighted on demand
pub fn random_strongly_connected_graph_maybe_weighted<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    extra: NumEdges,
    weighted: bool,
) -> ArrayGraph {
    let edges = connected_edges(rng, n, extra, true);
    build_maybe_weighted(rng, n, edges, true, weighted)
}

fn connected_edges<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    extra: NumEdges,
    directed: bool,
) -> Vec<(Node, Node)> {
    let mut edges: Vec<(Node, Node)> = if directed {
        (0..n).map(|u| (u, (u + 1) % n)).collect()
    } else {
        (1..n).map(|u| (rng.random_range(0..u), u)).collect()
    };
    edges.extend(random_edges(rng, n, extra));
    edges
}

fn build_maybe_weighted<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    edges: Vec<(Node, Node)>,
    directed: bool,
    weighted: bool,
) -> ArrayGraph {
    if weighted {
        let edges = edges
            .into_iter()
            .map(|e| (e, rng.random_range(1..=MAX_TEST_WEIGHT)))
            .collect::<Vec<_>>();
        ArrayGraph::from_weighted_edges(n, directed, edges)
    } else {
        ArrayGraph::from_edges(n, directed, edges)
    }
}

/// All-pairs oracle: the maximum eccentricity over all sources. Only
/// meaningful on (strongly) connected graphs.
pub fn brute_force_diameter(graph: &ArrayGraph) -> Dist {
    graph
        .vertices()
        .map(|u| {
            visit(graph, u, Direction::Forward, &NoProgress)
                .unwrap()
                .eccentricity()
        })
        .max()
        .unwrap_or(0)
}

/// Observer that allows `limit` visits and then reports cancellation
pub struct CancelAfter {
    limit: usize,
    seen: AtomicUsize,
}

impl CancelAfter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: AtomicUsize::new(0),
        }
    }
}

impl ProgressObserver for CancelAfter {
    fn on_visit(&self, _label: &str) {
        self.seen.fetch_add(1, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.seen.load(Ordering::Relaxed) > self.limit
    }
}
