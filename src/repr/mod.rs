/*!
# Graph Representation

A single, compact representation: one adjacency record per node, stored as an
exactly-sized boxed slice of [`Link`]s. Directed graphs additionally carry one
incidence record per node (the in-links), so backward visits are as cheap as
forward ones. Undirected graphs store every edge in both endpoints' adjacency
records and leave the incidence side empty.

The graph is immutable once built: the loader (and the in-memory constructors
used in tests and generators) size every record to the node's final degree, so
no record ever grows. This is what makes it safe to share a loaded graph
between concurrent visits without any locking.
*/

use std::ops::Range;

use crate::{edge::*, error::Result, node::*};

/// Orientation of a single-source visit on a directed graph.
///
/// `Backward` walks the incidence records (in-links) instead of the adjacency
/// records. On undirected graphs the adjacency is symmetric and `Backward`
/// degenerates to `Forward`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Returns the opposite orientation
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// An immutable graph stored as adjacency (and, if directed, incidence) arrays.
#[derive(Debug, Clone)]
pub struct ArrayGraph {
    adj: Vec<Box<[Link]>>,
    inc: Vec<Box<[Link]>>,
    num_edges: NumEdges,
    directed: bool,
    weighted: bool,
}

impl ArrayGraph {
    /// Assembles a graph from prebuilt records. `inc` must be empty for
    /// undirected graphs and have one record per node otherwise; the loader
    /// and the `from_*_edges` constructors are the intended callers.
    pub(crate) fn from_parts(
        directed: bool,
        weighted: bool,
        adj: Vec<Box<[Link]>>,
        inc: Vec<Box<[Link]>>,
    ) -> Self {
        debug_assert!(if directed {
            inc.len() == adj.len()
        } else {
            inc.is_empty()
        });

        let out_degree_sum: u64 = adj.iter().map(|nbs| nbs.len() as u64).sum();
        // Every undirected edge sits in both endpoints' records
        let num_edges = if directed {
            out_degree_sum as NumEdges
        } else {
            (out_degree_sum / 2) as NumEdges
        };

        Self {
            adj,
            inc,
            num_edges,
            directed,
            weighted,
        }
    }

    /// Builds an unweighted graph from an edge list (every weight is `1`).
    /// For undirected graphs (`directed = false`), each edge is inserted into
    /// both endpoints' records.
    ///
    /// # Panics
    /// Panics if an endpoint is `>= n`.
    pub fn from_edges(
        n: NumNodes,
        directed: bool,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
    ) -> Self {
        Self::from_weighted_edges(n, directed, edges.into_iter().map(|e| (e, 1)))
            .with_weighted(false)
    }

    /// Builds a weighted graph from `(edge, weight)` pairs, sizing every
    /// record exactly via a counting pass first.
    ///
    /// # Panics
    /// Panics if an endpoint is `>= n`.
    pub fn from_weighted_edges(
        n: NumNodes,
        directed: bool,
        edges: impl IntoIterator<Item = (impl Into<Edge>, Weight)>,
    ) -> Self {
        let edges: Vec<(Edge, Weight)> = edges.into_iter().map(|(e, w)| (e.into(), w)).collect();

        // Pass 1: degrees determine the exact record sizes
        let mut out_degree = vec![0 as NumNodes; n as usize];
        let mut in_degree = vec![0 as NumNodes; n as usize];
        for &(Edge(u, v), _) in &edges {
            assert!(u < n && v < n);
            out_degree[u as usize] += 1;
            if directed {
                in_degree[v as usize] += 1;
            } else {
                out_degree[v as usize] += 1;
            }
        }

        let mut adj: Vec<Vec<Link>> = out_degree
            .iter()
            .map(|&d| Vec::with_capacity(d as usize))
            .collect();
        let mut inc: Vec<Vec<Link>> = if directed {
            in_degree
                .iter()
                .map(|&d| Vec::with_capacity(d as usize))
                .collect()
        } else {
            Vec::new()
        };

        // Pass 2: fill
        for (Edge(u, v), w) in edges {
            adj[u as usize].push(Link::new(v, w));
            if directed {
                inc[v as usize].push(Link::new(u, w));
            } else {
                adj[v as usize].push(Link::new(u, w));
            }
        }

        Self::from_parts(
            directed,
            true,
            adj.into_iter().map(Vec::into_boxed_slice).collect(),
            inc.into_iter().map(Vec::into_boxed_slice).collect(),
        )
    }

    pub(crate) fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Returns the number of nodes of the graph
    pub fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }

    /// Returns the number of nodes as usize
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Returns the number of edges of the graph.
    /// Undirected edges count once even though they sit in two records.
    pub fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }

    /// Returns *true* if edges have an orientation
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns *true* if edges carry explicit weights.
    /// Visits on weighted graphs run Dijkstra instead of BFS.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Returns an iterator over V.
    pub fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    pub fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns the out-links of `u` (for undirected graphs: all links).
    /// ** Panics if `u >= n` **
    pub fn out_links_of(&self, u: Node) -> &[Link] {
        &self.adj[u as usize]
    }

    /// Returns the in-links of `u`. Directed graphs read the incidence
    /// record; undirected graphs fall back to the symmetric adjacency.
    /// ** Panics if `u >= n` **
    pub fn in_links_of(&self, u: Node) -> &[Link] {
        if self.directed {
            &self.inc[u as usize]
        } else {
            &self.adj[u as usize]
        }
    }

    /// Returns the links of `u` that a visit in direction `dir` must relax.
    /// ** Panics if `u >= n` **
    pub fn links_of(&self, u: Node, dir: Direction) -> &[Link] {
        match dir {
            Direction::Forward => self.out_links_of(u),
            Direction::Backward => self.in_links_of(u),
        }
    }

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    pub fn out_degree_of(&self, u: Node) -> NumNodes {
        self.adj[u as usize].len() as NumNodes
    }

    /// Returns the number of incoming neighbors of `u`
    /// ** Panics if `u >= n` **
    pub fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_links_of(u).len() as NumNodes
    }

    /// Returns an iterator over the (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    pub fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.adj[u as usize].iter().map(|l| l.head)
    }

    /// Returns the maximum out-degree in the graph
    pub fn max_degree(&self) -> NumNodes {
        self.vertices()
            .map(|u| self.out_degree_of(u))
            .max()
            .unwrap_or(0)
    }
}

/// Fallible allocation for arrays whose size is dictated by the input graph.
/// Surfaces `Error::ResourceExhausted` instead of aborting the process.
pub(crate) fn try_vec_with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(capacity)?;
    Ok(vec)
}
