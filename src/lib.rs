/*!
`gdiam` computes the diameter and connectivity structure of large real-world
graphs that are
- **directed** or **undirected**,
- **weighted** or **unweighted**,
- too large for an all-pairs shortest-path computation.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of
nodes in the graph. As most common graphs do not exceed `2^32` nodes, this
should normally suffice and save space as compared to `u64/usize`. Distances
and edge weights are `u64`.

Graphs are stored as an [`ArrayGraph`](crate::repr::ArrayGraph): one exactly
sized adjacency record per node (plus an incidence record for directed
graphs), immutable once loaded. The [`io`] module reads and writes them in the
degree-list format, which declares all record sizes up front.

# Algorithms

The [`algo`] module builds everything on a single-source
[`visit`](crate::algo::visit::visit) (BFS or Dijkstra, forward or backward):
- [`components`](crate::algo::components): connected and strongly connected
  components,
- [`four_sweep`](crate::algo::four_sweep): a 4-visit diameter lower-bound
  heuristic,
- [`diameter_bounds`](crate::algo::diameter::diameter_bounds): iFUB bound
  tightening, exact for tolerance `0`, in practice after a tiny fraction of
  the `n` visits an all-pairs computation would need.

Long computations accept a [`ProgressObserver`](crate::progress::ProgressObserver)
for step notifications and cooperative cancellation.

# Usage

```
use gdiam::prelude::*;
use rand::SeedableRng;

let graph = ArrayGraph::from_edges(5, false, [(0, 1), (1, 2), (2, 3), (3, 4)]);

let rng = &mut rand_pcg::Pcg64Mcg::seed_from_u64(1234);
let bounds = diameter_bounds(&graph, 0, rng, &NoProgress)?;
assert_eq!((bounds.lower, bounds.upper), (4, 4));
# Ok::<(), gdiam::Error>(())
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod heap;
pub mod io;
pub mod node;
pub mod progress;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;

pub use edge::{Edge, Link, NumEdges};
pub use error::{Error, Result};
pub use node::{Dist, Node, NumNodes, Weight};

/// `gdiam::prelude` includes definitions for nodes, edges and distances, the
/// graph representation, IO, and all algorithm entry points.
pub mod prelude {
    pub use super::{
        algo::*,
        edge::*,
        error::{Error, Result},
        io::*,
        node::*,
        progress::*,
        repr::*,
    };
}
