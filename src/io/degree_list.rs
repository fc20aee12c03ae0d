//! # DegreeList
//!
//! The degree-list format declares every node's record sizes up front so the
//! loader can size all adjacency (and incidence) arrays exactly before a
//! single streaming pass over the edge lines fills them.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Lines, Write},
    path::Path,
};

use crate::{
    edge::{Link, NumEdges},
    error::{raise_parse_error_unless, Error, Result},
    node::{Node, NodeBitSet, NumNodes, Weight},
    repr::{try_vec_with_capacity, ArrayGraph},
};

/// Reader for the degree-list format
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeListReader;

impl DegreeListReader {
    /// Creates a new reader
    pub fn new() -> Self {
        Self
    }

    /// Reads a graph from `reader`
    pub fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<ArrayGraph> {
        let mut lines = CountedLines::new(reader);

        let (n, directed, weighted) = self.parse_header(&mut lines)?;
        let (out_caps, in_caps) = self.parse_degree_lines(&mut lines, n, directed)?;

        let mut adj: Vec<Vec<Link>> = Vec::with_capacity(n as usize);
        for &cap in &out_caps {
            adj.push(try_vec_with_capacity(cap as usize)?);
        }
        let mut inc: Vec<Vec<Link>> = Vec::with_capacity(if directed { n as usize } else { 0 });
        for &cap in &in_caps {
            inc.push(try_vec_with_capacity(cap as usize)?);
        }

        self.parse_edge_lines(
            &mut lines, n, directed, weighted, &out_caps, &in_caps, &mut adj, &mut inc,
        )?;

        // Underflow: every record must be filled up to its declared size
        let line = lines.current_line();
        for u in 0..n {
            raise_parse_error_unless!(
                adj[u as usize].len() == out_caps[u as usize] as usize,
                line,
                format!(
                    "node {u} declares out-degree {} but {} out-edges were recorded",
                    out_caps[u as usize],
                    adj[u as usize].len()
                )
            );
            if directed {
                raise_parse_error_unless!(
                    inc[u as usize].len() == in_caps[u as usize] as usize,
                    line,
                    format!(
                        "node {u} declares in-degree {} but {} in-edges were recorded",
                        in_caps[u as usize],
                        inc[u as usize].len()
                    )
                );
            }
        }

        let graph = ArrayGraph::from_parts(
            directed,
            weighted,
            adj.into_iter().map(Vec::into_boxed_slice).collect(),
            inc.into_iter().map(Vec::into_boxed_slice).collect(),
        );

        log::info!(
            "loaded {} {} graph with {} nodes and {} edges",
            if directed { "directed" } else { "undirected" },
            if weighted { "weighted" } else { "unweighted" },
            graph.number_of_nodes(),
            graph.number_of_edges(),
        );

        Ok(graph)
    }

    /// Reads a graph from the file at `path`
    pub fn try_read_file<P: AsRef<Path>>(&self, path: P) -> Result<ArrayGraph> {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }

    fn parse_header<R: BufRead>(
        &self,
        lines: &mut CountedLines<R>,
    ) -> Result<(NumNodes, bool, bool)> {
        let line_no = lines.current_line() + 1;
        let header = lines
            .next_line()?
            .ok_or_else(|| Error::parse(line_no, "header not found"))?;

        let mut tokens = header.split_whitespace();
        let n = parse_token::<NumNodes>(tokens.next(), line_no, "node count")?;
        let directed = match tokens.next() {
            Some(token) => parse_flag(token, line_no, "directed flag")?,
            None => false,
        };
        let weighted = match tokens.next() {
            Some(token) => parse_flag(token, line_no, "weighted flag")?,
            None => false,
        };
        raise_parse_error_unless!(
            tokens.next().is_none(),
            line_no,
            "trailing tokens after header"
        );

        Ok((n, directed, weighted))
    }

    /// Reads the `n` degree lines and returns the declared out- (and, for
    /// directed graphs, in-) degrees. Every node must be declared exactly once.
    fn parse_degree_lines<R: BufRead>(
        &self,
        lines: &mut CountedLines<R>,
        n: NumNodes,
        directed: bool,
    ) -> Result<(Vec<NumNodes>, Vec<NumNodes>)> {
        let mut out_caps = vec![0 as NumNodes; n as usize];
        let mut in_caps = vec![0 as NumNodes; if directed { n as usize } else { 0 }];
        let mut declared = NodeBitSet::new(n);

        for _ in 0..n {
            let line_no = lines.current_line() + 1;
            let line = lines
                .next_line()?
                .filter(|l| !l.trim().is_empty())
                .ok_or_else(|| Error::parse(line_no, "missing degree line"))?;

            let mut tokens = line.split_whitespace();
            let u = parse_token::<Node>(tokens.next(), line_no, "node id")?;
            raise_parse_error_unless!(u < n, line_no, format!("node id {u} out of range"));
            raise_parse_error_unless!(
                !declared.set_bit(u),
                line_no,
                format!("node {u} declared twice")
            );

            out_caps[u as usize] = parse_token(tokens.next(), line_no, "out-degree")?;
            if directed {
                in_caps[u as usize] = parse_token(tokens.next(), line_no, "in-degree")?;
            }
            raise_parse_error_unless!(
                tokens.next().is_none(),
                line_no,
                "trailing tokens after degree line"
            );
        }

        Ok((out_caps, in_caps))
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_edge_lines<R: BufRead>(
        &self,
        lines: &mut CountedLines<R>,
        n: NumNodes,
        directed: bool,
        weighted: bool,
        out_caps: &[NumNodes],
        in_caps: &[NumNodes],
        adj: &mut [Vec<Link>],
        inc: &mut [Vec<Link>],
    ) -> Result<()> {
        loop {
            let line_no = lines.current_line() + 1;
            let line = match lines.next_line()? {
                // A blank line ends the edge section
                Some(l) if !l.trim().is_empty() => l,
                _ => return Ok(()),
            };

            let mut tokens = line.split_whitespace();
            let tail = parse_token::<Node>(tokens.next(), line_no, "tail")?;
            let head = parse_token::<Node>(tokens.next(), line_no, "head")?;
            raise_parse_error_unless!(tail < n, line_no, format!("node id {tail} out of range"));
            raise_parse_error_unless!(head < n, line_no, format!("node id {head} out of range"));
            let weight = if weighted {
                parse_token::<Weight>(tokens.next(), line_no, "weight")?
            } else {
                1
            };
            raise_parse_error_unless!(
                tokens.next().is_none(),
                line_no,
                "trailing tokens after edge"
            );

            let mut push = |records: &mut [Vec<Link>],
                            caps: &[NumNodes],
                            at: Node,
                            to: Node,
                            kind: &str|
             -> Result<()> {
                raise_parse_error_unless!(
                    records[at as usize].len() < caps[at as usize] as usize,
                    line_no,
                    format!("node {at} exceeds its declared {kind}")
                );
                records[at as usize].push(Link::new(to, weight));
                Ok(())
            };

            push(adj, out_caps, tail, head, "out-degree")?;
            if directed {
                push(inc, in_caps, head, tail, "in-degree")?;
            } else {
                push(adj, out_caps, head, tail, "out-degree")?;
            }
        }
    }
}

/// Counts of an induced-subgraph export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubgraphStats {
    /// Number of surviving nodes
    pub nodes: NumNodes,
    /// Number of written edges
    pub edges: NumEdges,
}

/// Writer for the degree-list format
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeListWriter;

impl DegreeListWriter {
    /// Creates a new writer
    pub fn new() -> Self {
        Self
    }

    /// Writes the whole graph to `writer`
    pub fn try_write_graph<W: Write>(&self, graph: &ArrayGraph, writer: W) -> Result<()> {
        let mut keep = graph.vertex_bitset_unset();
        keep.set_bits(graph.vertices());
        self.try_write_induced(graph, &keep, writer).map(|_| ())
    }

    /// Writes the graph to the file at `path`
    pub fn try_write_file<P: AsRef<Path>>(&self, graph: &ArrayGraph, path: P) -> Result<()> {
        self.try_write_graph(graph, BufWriter::new(File::create(path)?))
    }

    /// Writes the subgraph induced by the nodes set in `keep`.
    ///
    /// Surviving nodes are renumbered densely in original id order. Only edges
    /// with both endpoints surviving are written; for undirected graphs each
    /// edge is written once, from its lower renumbered endpoint.
    pub fn try_write_induced<W: Write>(
        &self,
        graph: &ArrayGraph,
        keep: &NodeBitSet,
        mut writer: W,
    ) -> Result<SubgraphStats> {
        let mut renumbered = vec![0 as Node; graph.len()];
        let mut nodes: NumNodes = 0;
        for u in keep.iter_set_bits() {
            renumbered[u as usize] = nodes;
            nodes += 1;
        }

        writeln!(
            writer,
            "{} {} {}",
            nodes,
            graph.is_directed() as u8,
            graph.is_weighted() as u8
        )?;

        let surviving_degree = |links: &[Link]| {
            links.iter().filter(|l| keep.get_bit(l.head)).count() as NumNodes
        };
        for u in keep.iter_set_bits() {
            let out_degree = surviving_degree(graph.out_links_of(u));
            if graph.is_directed() {
                let in_degree = surviving_degree(graph.in_links_of(u));
                writeln!(writer, "{} {out_degree} {in_degree}", renumbered[u as usize])?;
            } else {
                writeln!(writer, "{} {out_degree}", renumbered[u as usize])?;
            }
        }

        let mut edges: NumEdges = 0;
        for u in keep.iter_set_bits() {
            // Undirected records hold every loop twice; write each once
            let mut loops_seen = 0usize;
            for link in graph.out_links_of(u) {
                if !keep.get_bit(link.head) {
                    continue;
                }
                if !graph.is_directed() {
                    if link.head == u {
                        loops_seen += 1;
                        if loops_seen % 2 == 0 {
                            continue;
                        }
                    } else if renumbered[u as usize] > renumbered[link.head as usize] {
                        continue;
                    }
                }

                let (tail, head) = (renumbered[u as usize], renumbered[link.head as usize]);
                if graph.is_weighted() {
                    writeln!(writer, "{tail} {head} {}", link.weight)?;
                } else {
                    writeln!(writer, "{tail} {head}")?;
                }
                edges += 1;
            }
        }

        log::info!("exported induced subgraph with {nodes} nodes and {edges} edges");

        Ok(SubgraphStats { nodes, edges })
    }

    /// Writes the induced subgraph to the file at `path`
    pub fn try_write_induced_file<P: AsRef<Path>>(
        &self,
        graph: &ArrayGraph,
        keep: &NodeBitSet,
        path: P,
    ) -> Result<SubgraphStats> {
        self.try_write_induced(graph, keep, BufWriter::new(File::create(path)?))
    }
}

/// Line iterator that tracks 1-based line numbers for error reporting
struct CountedLines<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> CountedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of the last line handed out, 1-based (`0` before the first)
    fn current_line(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next().transpose()? {
            Some(line) => {
                self.line += 1;
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }
}

fn parse_token<T: std::str::FromStr>(
    token: Option<&str>,
    line: usize,
    what: &str,
) -> Result<T> {
    let token = token.ok_or_else(|| Error::parse(line, format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| Error::parse(line, format!("invalid {what}: {token:?}")))
}

fn parse_flag(token: &str, line: usize, what: &str) -> Result<bool> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(Error::parse(line, format!("invalid {what}: {token:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<ArrayGraph> {
        DegreeListReader::new().try_read_graph(input.as_bytes())
    }

    #[test]
    fn reads_undirected_unweighted() {
        let graph = read("5\n0 1\n1 2\n2 2\n3 2\n4 1\n0 1\n1 2\n2 3\n3 4\n").unwrap();

        assert!(!graph.is_directed());
        assert!(!graph.is_weighted());
        assert_eq!(graph.number_of_nodes(), 5);
        assert_eq!(graph.number_of_edges(), 4);
        assert_eq!(graph.out_degree_of(2), 2);
        let mut nbs: Vec<Node> = graph.neighbors_of(2).collect();
        nbs.sort_unstable();
        assert_eq!(nbs, vec![1, 3]);
    }

    #[test]
    fn reads_directed_weighted() {
        let graph = read("3 1 1\n0 1 1\n1 1 1\n2 1 1\n0 1 4\n1 2 5\n2 0 6\n").unwrap();

        assert!(graph.is_directed());
        assert!(graph.is_weighted());
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.out_links_of(1), &[Link::new(2, 5)]);
        assert_eq!(graph.in_links_of(1), &[Link::new(0, 4)]);
    }

    #[test]
    fn blank_line_ends_edges() {
        let graph = read("2\n0 1\n1 1\n0 1\n\nthis is not parsed\n").unwrap();
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(matches!(
            read("five\n"),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            read("3 2\n"),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_id() {
        assert!(matches!(
            read("2\n0 1\n7 1\n"),
            Err(Error::Parse { line: 3, .. })
        ));
        assert!(matches!(
            read("2\n0 1\n1 1\n0 7\n"),
            Err(Error::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn rejects_degree_overflow_at_edge_line() {
        let err = read("3\n0 1\n1 1\n2 0\n0 1\n1 2\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 6, .. }));
    }

    #[test]
    fn rejects_degree_underflow_at_eof() {
        let err = read("2\n0 2\n1 2\n0 1\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, .. }));
    }

    #[test]
    fn writes_what_it_read() {
        let input = "3 1 1\n0 1 1\n1 1 1\n2 1 1\n0 1 4\n1 2 5\n2 0 6\n";
        let graph = read(input).unwrap();

        let mut out = Vec::new();
        DegreeListWriter::new().try_write_graph(&graph, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn induced_subgraph_renumbers_densely() {
        // Path 0-1-2-3-4; dropping the middle node leaves two edges
        let graph = read("5\n0 1\n1 2\n2 2\n3 2\n4 1\n0 1\n1 2\n2 3\n3 4\n").unwrap();
        let mut keep = graph.vertex_bitset_unset();
        keep.set_bits([0 as Node, 1, 3, 4].into_iter());

        let mut out = Vec::new();
        let stats = DegreeListWriter::new()
            .try_write_induced(&graph, &keep, &mut out)
            .unwrap();

        assert_eq!(stats, SubgraphStats { nodes: 4, edges: 2 });
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "4 0 0\n0 1\n1 1\n2 1\n3 1\n0 1\n2 3\n"
        );
    }

    #[test]
    fn undirected_edges_written_once() {
        let graph = ArrayGraph::from_edges(3, false, [(0, 1), (1, 2), (0, 2)]);
        let mut keep = graph.vertex_bitset_unset();
        keep.set_bits(graph.vertices());

        let mut out = Vec::new();
        let stats = DegreeListWriter::new()
            .try_write_induced(&graph, &keep, &mut out)
            .unwrap();
        assert_eq!(stats.edges, 3);
    }
}
