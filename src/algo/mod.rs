/*!
# Algorithms

Implementations of the graph algorithms of this crate:
- [`visit`]: the single-source visit (BFS or Dijkstra, forward or backward),
- [`components`]: connected and strongly connected components,
- [`four_sweep`]: the 4-sweep diameter lower-bound heuristic,
- [`diameter`]: iFUB diameter bound tightening, plain and weighted.

Every algorithm that performs more than one visit accepts a
[`ProgressObserver`](crate::progress::ProgressObserver) and checks it once per
visit, so long computations can report progress and be cancelled cooperatively.
*/

pub mod components;
pub mod diameter;
pub mod four_sweep;
pub mod visit;

pub use components::*;
pub use diameter::*;
pub use four_sweep::*;
pub use visit::*;
