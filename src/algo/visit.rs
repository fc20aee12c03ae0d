//! # Single-Source Visit
//!
//! One visit computes, for a single source, the shortest distance and a
//! shortest-path predecessor for every reachable node. Unweighted graphs use a
//! plain BFS, weighted graphs a Dijkstra backed by [`IndexedMinHeap`]. On
//! directed graphs the visit can also run backward along incidence records.

use std::collections::VecDeque;

use crate::{
    error::{Error, Result},
    heap::IndexedMinHeap,
    node::{Dist, Node, NumNodes, OptionalDist, OptionalNode},
    progress::ProgressObserver,
    repr::{try_vec_with_capacity, ArrayGraph, Direction},
};

/// Distances and predecessors of one visit, indexed by node id.
///
/// The result is created fresh per visit and owned by the caller. Unreached
/// nodes answer `None` from both accessors; the source has distance `0` and no
/// predecessor.
#[derive(Debug, Clone)]
pub struct VisitResult {
    source: Node,
    dist: Vec<Option<OptionalDist>>,
    pred: Vec<Option<OptionalNode>>,
    num_reached: NumNodes,
}

impl VisitResult {
    fn new(source: Node, n: NumNodes) -> Result<Self> {
        let mut dist = try_vec_with_capacity(n as usize)?;
        dist.resize(n as usize, None);
        let mut pred = try_vec_with_capacity(n as usize)?;
        pred.resize(n as usize, None);

        Ok(Self {
            source,
            dist,
            pred,
            num_reached: 0,
        })
    }

    fn record(&mut self, v: Node, dist: Dist, pred: Option<Node>) {
        if self.dist[v as usize].is_none() {
            self.num_reached += 1;
        }
        self.dist[v as usize] = OptionalDist::new(dist);
        self.pred[v as usize] = pred.and_then(OptionalNode::new);
    }

    /// Returns the source of this visit
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the distance of `u` from the source, `None` if unreached
    pub fn dist_of(&self, u: Node) -> Option<Dist> {
        self.dist[u as usize].map(|d| d.get())
    }

    /// Returns *true* if `u` was reached
    pub fn is_reached(&self, u: Node) -> bool {
        self.dist[u as usize].is_some()
    }

    /// Returns the predecessor of `u` on a shortest path from the source.
    /// The source itself and unreached nodes have no predecessor.
    pub fn pred_of(&self, u: Node) -> Option<Node> {
        self.pred[u as usize].map(|p| p.get())
    }

    /// Returns the number of reached nodes, the source included
    pub fn num_reached(&self) -> NumNodes {
        self.num_reached
    }

    /// Returns the maximum distance among reached nodes
    pub fn eccentricity(&self) -> Dist {
        self.dist.iter().flatten().map(|d| d.get()).max().unwrap_or(0)
    }

    /// Returns a reached node of maximum distance together with that distance.
    /// Ties break toward the smaller node id.
    pub fn farthest_node(&self) -> (Node, Dist) {
        let mut best = (self.source, 0);
        for (u, d) in self.dist.iter().enumerate() {
            if let Some(d) = d {
                if d.get() > best.1 {
                    best = (u as Node, d.get());
                }
            }
        }
        best
    }
}

/// Runs a single-source visit from `source` in direction `dir`. Dispatches to
/// BFS or Dijkstra based on whether the graph is weighted.
///
/// Notifies `observer` once on entry and returns [`Error::Cancelled`] if its
/// cancellation flag is set.
///
/// ** Panics if `source >= n` **
pub fn visit(
    graph: &ArrayGraph,
    source: Node,
    dir: Direction,
    observer: &impl ProgressObserver,
) -> Result<VisitResult> {
    assert!(source < graph.number_of_nodes());

    observer.on_visit(match dir {
        Direction::Forward => "forward visit",
        Direction::Backward => "backward visit",
    });
    if observer.is_cancelled() {
        return Err(Error::Cancelled);
    }

    if graph.is_weighted() {
        dijkstra_visit(graph, source, dir)
    } else {
        bfs_visit(graph, source, dir)
    }
}

/// Breadth-first search: every edge counts one hop, levels increase by
/// exactly one per dequeued node.
fn bfs_visit(graph: &ArrayGraph, source: Node, dir: Direction) -> Result<VisitResult> {
    let mut result = VisitResult::new(source, graph.number_of_nodes())?;
    result.record(source, 0, None);

    let mut queue = VecDeque::from(try_vec_with_capacity::<Node>(graph.len())?);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        let Some(du) = result.dist_of(u) else {
            unreachable!()
        };
        for link in graph.links_of(u, dir) {
            if !result.is_reached(link.head) {
                result.record(link.head, du + 1, Some(u));
                queue.push_back(link.head);
            }
        }
    }

    Ok(result)
}

/// Dijkstra visit: seeds the source at distance `0`, every other node
/// implicitly at infinity, and settles nodes in non-decreasing distance order.
fn dijkstra_visit(graph: &ArrayGraph, source: Node, dir: Direction) -> Result<VisitResult> {
    let mut result = VisitResult::new(source, graph.number_of_nodes())?;
    result.record(source, 0, None);

    let mut heap = IndexedMinHeap::new(graph.number_of_nodes());
    heap.enqueue(source, 0);

    while let Some((u, du)) = heap.dequeue_min() {
        for link in graph.links_of(u, dir) {
            let v = link.head;
            let dv = du + link.weight;

            match result.dist_of(v) {
                None => {
                    result.record(v, dv, Some(u));
                    heap.enqueue(v, dv);
                }
                // A node without a heap entry is settled and final
                Some(old) if dv < old && heap.contains(v) => {
                    result.record(v, dv, Some(u));
                    heap.decrease_key(v, dv);
                }
                Some(_) => {}
            }
        }
    }

    Ok(result)
}
