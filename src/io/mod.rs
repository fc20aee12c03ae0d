/*!
# IO

Reading and writing graphs in the degree-list format.

## Format

The format is text based and line oriented:
- Line 1 is the header `n [d] [w]`: the number of nodes, followed by optional
  `1`/`0` flags for *directed* and *weighted*. A missing flag means `0`.
- The next `n` lines declare the exact record sizes, one line per node:
  `nodeId outDegree [inDegree]`, where `inDegree` is present iff the graph is
  directed.
- All remaining lines up to the end of the file or the first blank line are
  edges `tail head [weight]`, where `weight` is present iff the graph is
  weighted (and defaults to `1` otherwise). For undirected graphs each edge is
  listed once and added to both endpoints' records.

Malformed headers, out-of-range node ids, and mismatches between declared and
recorded degrees are reported as [`Error::Parse`](crate::error::Error) with a
1-based line number.
*/

pub mod degree_list;

pub use degree_list::*;
