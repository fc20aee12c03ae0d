//! # 4-Sweep
//!
//! A cheap diameter lower-bound heuristic: four visits chasing farthest nodes
//! from a random start. Besides the bound itself it yields a node near the
//! "center" of the longest path found, which is the preferred pivot for the
//! iFUB bound tightening in [`diameter`](crate::algo::diameter).

use rand::Rng;

use crate::{
    algo::visit::{visit, VisitResult},
    error::Result,
    node::{Dist, Node},
    progress::ProgressObserver,
    repr::{ArrayGraph, Direction},
};

/// Outcome of one 4-sweep run
#[derive(Debug, Clone, Copy)]
pub struct FourSweep {
    /// Best diameter lower bound among the four sweeps
    pub lower_bound: Dist,
    /// Midpoint of the longest path found, the iFUB pivot candidate
    pub candidate: Node,
    /// Endpoints of the longest path found
    pub endpoints: (Node, Node),
}

/// Runs the 4-sweep heuristic. Performs exactly four visits; the random start
/// node is drawn from `rng`.
///
/// The lower bound never exceeds the diameter, and on (strongly) connected
/// graphs the diameter never exceeds twice the bound.
///
/// ** Panics if the graph is empty **
pub fn four_sweep<R: Rng + ?Sized>(
    graph: &ArrayGraph,
    rng: &mut R,
    observer: &impl ProgressObserver,
) -> Result<FourSweep> {
    assert!(!graph.is_empty());

    if graph.is_directed() {
        four_sweep_directed(graph, rng, observer)
    } else {
        four_sweep_undirected(graph, rng, observer)
    }
}

fn four_sweep_undirected<R: Rng + ?Sized>(
    graph: &ArrayGraph,
    rng: &mut R,
    observer: &impl ProgressObserver,
) -> Result<FourSweep> {
    let r = rng.random_range(0..graph.number_of_nodes());

    // Sweep 1: the farthest node from anywhere ends a long path
    let (a1, d_r) = visit(graph, r, Direction::Forward, observer)?.farthest_node();

    // Sweep 2: its eccentricity is a proper lower bound
    let from_a1 = visit(graph, a1, Direction::Forward, observer)?;
    let (b1, d1) = from_a1.farthest_node();
    let r2 = path_midpoint(&from_a1, b1);

    // Sweeps 3 and 4: repeat from the midpoint of that path
    let (a2, d_r2) = visit(graph, r2, Direction::Forward, observer)?.farthest_node();
    let from_a2 = visit(graph, a2, Direction::Forward, observer)?;
    let (b2, d2) = from_a2.farthest_node();

    // The pivot is always taken from the last sweep's path
    Ok(FourSweep {
        lower_bound: d_r.max(d1).max(d_r2).max(d2),
        candidate: path_midpoint(&from_a2, b2),
        endpoints: (a2, b2),
    })
}

fn four_sweep_directed<R: Rng + ?Sized>(
    graph: &ArrayGraph,
    rng: &mut R,
    observer: &impl ProgressObserver,
) -> Result<FourSweep> {
    let r = rng.random_range(0..graph.number_of_nodes());

    let (a1, _) = visit(graph, r, Direction::Forward, observer)?.farthest_node();
    let from_a1 = visit(graph, a1, Direction::Backward, observer)?;
    let (b1, d1) = from_a1.farthest_node();

    let (a2, _) = visit(graph, r, Direction::Backward, observer)?.farthest_node();
    let from_a2 = visit(graph, a2, Direction::Forward, observer)?;
    let (b2, d2) = from_a2.farthest_node();

    // The longer of the two witnessed paths decides bound and pivot
    let (candidate, endpoints, lower_bound) = if d1 >= d2 {
        (path_midpoint(&from_a1, b1), (b1, a1), d1)
    } else {
        (path_midpoint(&from_a2, b2), (a2, b2), d2)
    };

    Ok(FourSweep {
        lower_bound,
        candidate,
        endpoints,
    })
}

/// Walks from `t` back along the predecessor chain until half the path's
/// total length has been covered. The accumulation is by edge length, not hop
/// count, so the midpoint is meaningful on weighted graphs too.
fn path_midpoint(result: &VisitResult, t: Node) -> Node {
    let Some(total) = result.dist_of(t) else {
        return t;
    };

    let mut node = t;
    let mut covered: Dist = 0;
    while covered < total / 2 {
        let Some((pred, dist, pred_dist)) = result
            .pred_of(node)
            .and_then(|p| Some((p, result.dist_of(node)?, result.dist_of(p)?)))
        else {
            break;
        };
        covered += dist - pred_dist;
        node = pred;
    }
    node
}
