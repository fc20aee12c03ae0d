//! # Components
//!
//! Connected components for undirected graphs via repeated BFS rounds, and
//! strongly connected components for directed graphs via a path-based
//! depth-first traversal.
//!
//! The SCC traversal keeps its own explicit call stack: the recursion depth of
//! the textbook formulation equals the longest path in the graph and can reach
//! `n` on chains, which overflows the native stack long before memory runs out.

use std::collections::VecDeque;

use crate::{
    error::{Error, Result},
    node::{Node, NodeBitSet, NumNodes, OptionalNode},
    progress::ProgressObserver,
    repr::{try_vec_with_capacity, ArrayGraph},
};

/// A component labeling: node → contiguous component id starting at `0`.
#[derive(Debug, Clone)]
pub struct Components {
    component: Vec<NumNodes>,
    num_components: NumNodes,
}

impl Components {
    /// Returns the component id of `u`
    pub fn component_of(&self, u: Node) -> NumNodes {
        self.component[u as usize]
    }

    /// Returns the number of components
    pub fn number_of_components(&self) -> NumNodes {
        self.num_components
    }

    /// Returns *true* if `u` and `v` share a component
    pub fn in_same_component(&self, u: Node, v: Node) -> bool {
        self.component[u as usize] == self.component[v as usize]
    }

    /// Returns the number of nodes per component id
    pub fn component_sizes(&self) -> Vec<NumNodes> {
        let mut sizes = vec![0; self.num_components as usize];
        for &c in &self.component {
            sizes[c as usize] += 1;
        }
        sizes
    }

    /// Returns a bitset of the nodes in a largest component.
    /// Among equally large components the one with the smallest id wins.
    pub fn largest_component_mask(&self) -> NodeBitSet {
        let sizes = self.component_sizes();
        let largest = sizes
            .iter()
            .enumerate()
            .max_by_key(|&(c, &size)| (size, std::cmp::Reverse(c)))
            .map(|(c, _)| c as NumNodes)
            .unwrap_or(0);

        let mut mask = NodeBitSet::new(self.component.len() as NumNodes);
        mask.set_bits(
            self.component
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c == largest)
                .map(|(u, _)| u as Node),
        );
        mask
    }
}

/// Computes the (strongly) connected components of `graph`, dispatching on its
/// orientation. Notifies `observer` once per traversal round.
pub fn components(graph: &ArrayGraph, observer: &impl ProgressObserver) -> Result<Components> {
    if graph.is_directed() {
        strongly_connected_components(graph, observer)
    } else {
        connected_components(graph, observer)
    }
}

/// Labels the connected components of an undirected graph by repeatedly
/// growing a BFS from the smallest unlabeled node. Runs in `O(n + m)` total:
/// the labeling doubles as the visited marker, so no round rescans nodes of
/// an earlier round.
pub fn connected_components(
    graph: &ArrayGraph,
    observer: &impl ProgressObserver,
) -> Result<Components> {
    debug_assert!(!graph.is_directed());

    const UNLABELED: NumNodes = NumNodes::MAX;
    let n = graph.number_of_nodes();
    let mut component = try_vec_with_capacity(n as usize)?;
    component.resize(n as usize, UNLABELED);

    let mut queue = VecDeque::from(try_vec_with_capacity::<Node>(n as usize)?);
    let mut num_components: NumNodes = 0;

    for root in graph.vertices() {
        if component[root as usize] != UNLABELED {
            continue;
        }

        observer.on_visit("component round");
        if observer.is_cancelled() {
            return Err(Error::Cancelled);
        }

        component[root as usize] = num_components;
        queue.push_back(root);
        while let Some(u) = queue.pop_front() {
            for v in graph.neighbors_of(u) {
                if component[v as usize] == UNLABELED {
                    component[v as usize] = num_components;
                    queue.push_back(v);
                }
            }
        }
        num_components += 1;
    }

    Ok(Components {
        component,
        num_components,
    })
}

/// Computes the strongly connected components of a directed graph with a
/// single path-based depth-first traversal in `O(n + m)`.
pub fn strongly_connected_components(
    graph: &ArrayGraph,
    observer: &impl ProgressObserver,
) -> Result<Components> {
    debug_assert!(graph.is_directed());

    let mut ctx = SccContext::new(graph)?;
    for root in graph.vertices() {
        if ctx.dfs_number[root as usize].is_some() {
            continue;
        }

        observer.on_visit("scc round");
        if observer.is_cancelled() {
            return Err(Error::Cancelled);
        }

        ctx.traverse_from(root);
    }

    debug_assert!(ctx.partial.is_empty() && ctx.representative.is_empty());
    Ok(Components {
        component: ctx.component,
        num_components: ctx.num_components,
    })
}

/// Scratch state of one SCC decomposition.
///
/// `partial` holds visited nodes whose component is still undetermined,
/// `representative` the candidate component roots; both shrink back to empty
/// once the traversal finishes.
struct SccContext<'a> {
    graph: &'a ArrayGraph,
    /// Discovery order, `None` until first visited
    dfs_number: Vec<Option<OptionalNode>>,
    /// Set once a node's component id is final
    complete: NodeBitSet,
    partial: Vec<Node>,
    representative: Vec<Node>,
    /// Frames of (node, next out-link index) replacing native recursion
    call_stack: Vec<(Node, usize)>,
    component: Vec<NumNodes>,
    next_dfs_number: NumNodes,
    num_components: NumNodes,
}

impl<'a> SccContext<'a> {
    fn new(graph: &'a ArrayGraph) -> Result<Self> {
        let n = graph.number_of_nodes() as usize;
        let mut dfs_number = try_vec_with_capacity(n)?;
        dfs_number.resize(n, None);
        let mut component = try_vec_with_capacity(n)?;
        component.resize(n, 0);

        Ok(Self {
            graph,
            dfs_number,
            complete: NodeBitSet::new(n as NumNodes),
            partial: try_vec_with_capacity(n)?,
            representative: try_vec_with_capacity(n)?,
            call_stack: try_vec_with_capacity(n)?,
            component,
            next_dfs_number: 0,
            num_components: 0,
        })
    }

    fn discover(&mut self, u: Node) {
        self.dfs_number[u as usize] = OptionalNode::new(self.next_dfs_number);
        self.next_dfs_number += 1;
        self.partial.push(u);
        self.representative.push(u);
        self.call_stack.push((u, 0));
    }

    fn dfs_number_of(&self, u: Node) -> NumNodes {
        match self.dfs_number[u as usize] {
            Some(number) => number.get(),
            None => unreachable!("queried before discovery"),
        }
    }

    fn traverse_from(&mut self, root: Node) {
        self.discover(root);

        while let Some(frame) = self.call_stack.last_mut() {
            let (u, i) = *frame;
            frame.1 += 1;

            let Some(&link) = self.graph.out_links_of(u).get(i) else {
                self.call_stack.pop();
                self.finish(u);
                continue;
            };

            let v = link.head;
            if self.dfs_number[v as usize].is_none() {
                self.discover(v);
            } else if !self.complete.get_bit(v) {
                // `v` lies on the current path (or one merged into it): every
                // representative discovered after `v` is mutually reachable
                // with it and stops being a component root.
                while self
                    .representative
                    .last()
                    .is_some_and(|&r| self.dfs_number_of(r) > self.dfs_number_of(v))
                {
                    self.representative.pop();
                }
            }
        }
    }

    /// All of `u`'s out-links are explored. If `u` is still its candidate
    /// root, its component is complete: everything above `u` on `partial`
    /// belongs to it.
    fn finish(&mut self, u: Node) {
        if self.representative.last() != Some(&u) {
            return;
        }
        self.representative.pop();

        while let Some(w) = self.partial.pop() {
            self.component[w as usize] = self.num_components;
            self.complete.set_bit(w);
            if w == u {
                break;
            }
        }
        self.num_components += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algo::visit::visit,
        progress::NoProgress,
        repr::Direction,
        testing::CancelAfter,
    };
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn labels_undirected_components() {
        // Two triangles and an isolated node
        let graph = ArrayGraph::from_edges(
            7,
            false,
            [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)],
        );
        let comps = components(&graph, &NoProgress).unwrap();

        assert_eq!(comps.number_of_components(), 3);
        assert!(comps.in_same_component(0, 2));
        assert!(!comps.in_same_component(2, 3));
        assert_eq!(comps.component_sizes(), vec![3, 3, 1]);
        // Contiguous ids in order of the smallest member
        assert_eq!(comps.component_of(0), 0);
        assert_eq!(comps.component_of(3), 1);
        assert_eq!(comps.component_of(6), 2);
    }

    #[test]
    fn largest_component_mask_picks_majority() {
        let graph = ArrayGraph::from_edges(6, false, [(0, 1), (2, 3), (3, 4), (4, 2)]);
        let mask = components(&graph, &NoProgress)
            .unwrap()
            .largest_component_mask();

        let kept: Vec<Node> = mask.iter_set_bits().collect();
        assert_eq!(kept, vec![2, 3, 4]);
    }

    #[test]
    fn cross_component_nodes_are_unreached() {
        // Components {0, 1, 2} and {3, 4}
        let graph = ArrayGraph::from_edges(5, false, [(0, 1), (1, 2), (3, 4)]);
        let comps = components(&graph, &NoProgress).unwrap();
        assert_eq!(comps.number_of_components(), 2);

        let result = visit(&graph, 0, Direction::Forward, &NoProgress).unwrap();
        assert_eq!(result.num_reached(), 3);
        assert_eq!(result.dist_of(3), None);
        assert_eq!(result.dist_of(4), None);
    }

    #[test]
    fn cycle_plus_isolated_node_has_two_sccs() {
        // a -> b -> c -> a plus isolated d
        let graph = ArrayGraph::from_edges(4, true, [(0, 1), (1, 2), (2, 0)]);
        let comps = components(&graph, &NoProgress).unwrap();

        assert_eq!(comps.number_of_components(), 2);
        assert!(comps.in_same_component(0, 1));
        assert!(comps.in_same_component(1, 2));
        assert!(!comps.in_same_component(0, 3));
    }

    #[test]
    fn chain_of_singletons() {
        // Without a back edge every node is its own SCC
        let graph = ArrayGraph::from_edges(5, true, [(0, 1), (1, 2), (2, 3), (3, 4)]);
        let comps = components(&graph, &NoProgress).unwrap();
        assert_eq!(comps.number_of_components(), 5);
    }

    #[test]
    fn long_chain_does_not_overflow_the_stack() {
        let n: NumNodes = 200_000;
        let graph = ArrayGraph::from_edges(n, true, (0..n - 1).map(|u| (u, u + 1)));
        let comps = components(&graph, &NoProgress).unwrap();
        assert_eq!(comps.number_of_components(), n);
    }

    /// Two nodes share an SCC iff they reach each other.
    #[test]
    fn scc_matches_mutual_reachability() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x5CC);
        for _ in 0..20 {
            let n: NumNodes = rng.random_range(2..40);
            let m = rng.random_range(0..3 * n);
            let edges: Vec<(Node, Node)> = (0..m)
                .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
                .collect();
            let graph = ArrayGraph::from_edges(n, true, edges);

            let comps = components(&graph, &NoProgress).unwrap();
            let visits: Vec<_> = graph
                .vertices()
                .map(|u| visit(&graph, u, Direction::Forward, &NoProgress).unwrap())
                .collect();

            for u in graph.vertices() {
                for v in graph.vertices() {
                    let mutually = visits[u as usize].is_reached(v)
                        && visits[v as usize].is_reached(u);
                    assert_eq!(comps.in_same_component(u, v), mutually);
                }
            }
        }
    }

    #[test]
    fn every_node_gets_exactly_one_label() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x1ABE1);
        for directed in [false, true] {
            let graph = crate::testing::random_graph(rng, 80, 120, directed);
            let comps = components(&graph, &NoProgress).unwrap();
            for u in graph.vertices() {
                assert!(comps.component_of(u) < comps.number_of_components());
            }
        }
    }

    #[test]
    fn components_report_cancellation() {
        let graph = ArrayGraph::from_edges(4, false, std::iter::empty::<(Node, Node)>());
        let err = components(&graph, &CancelAfter::new(2)).unwrap_err();
        assert!(err.is_cancelled());
    }
}
