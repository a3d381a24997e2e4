//! # EdgeList
//!
//! The weighted EdgeList-Format consists of a header `n m`, followed by `m` triples `u v w`
//! representing a directed edge `u -> v` with capacity `w`. Nodes are `0`-based.
//!
//! Tokens are separated by arbitrary whitespace; line breaks carry no meaning. There are no
//! comments. If the same `(u, v)` pair appears more than once, the last triple wins.

use std::{
    fs::File,
    io::{BufRead, BufWriter, ErrorKind, Lines, Write},
    path::Path,
};

use itertools::Itertools;

use super::*;

/// A GraphReader for the weighted EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListReader {
    /// Accept (and ignore) tokens after the announced number of edges
    allow_trailing_tokens: bool,
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// If set, tokens after the last announced edge are ignored instead of being rejected
    pub fn allow_trailing_tokens(mut self, allow: bool) -> Self {
        self.allow_trailing_tokens = allow;
        self
    }
}

impl<G> GraphReader<G> for EdgeListReader
where
    G: GraphNew + GraphEdgeEditing,
{
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<G> {
        let mut tokens = TokenReader::new(reader);

        raise_error_unless!(
            tokens.peek_is_some()?,
            ErrorKind::InvalidData,
            "Header not found"
        );
        let n: NumNodes = parse_next_value!(tokens, "Header>Number of nodes");
        let m: NumEdges = parse_next_value!(tokens, "Header>Number of edges");

        let mut graph = G::new(n);
        for i in 0..m {
            let from: Node = parse_next_value!(tokens, format!("source node of edge {i}"));
            let to: Node = parse_next_value!(tokens, format!("target node of edge {i}"));
            let weight: Weight = parse_next_value!(tokens, format!("capacity of edge {i}"));

            raise_error_unless!(
                is_node_in_range(from, n) && is_node_in_range(to, n),
                ErrorKind::InvalidData,
                format!(
                    "Edge {i} ({from} -> {to}) in line {} references a node outside of 0..{n}",
                    tokens.line_number()
                )
            );

            graph.set_weight(from, to, weight);
        }

        if !self.allow_trailing_tokens {
            raise_error_unless!(
                !tokens.peek_is_some()?,
                ErrorKind::InvalidData,
                format!(
                    "Found more data than the {m} announced edges in line {}",
                    tokens.line_number()
                )
            );
        }

        Ok(graph)
    }
}

/// Trait for creating graphs form an EdgeListReader.
/// Used as shorthand for default EdgeListReader settings
pub trait EdgeListRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_edge_list(BufReader::new(File::open(path)?))
    }
}

impl<G> EdgeListRead for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_graph(reader)
    }
}

/// Splits the lines of a reader into whitespace separated tokens
struct TokenReader<R> {
    lines: Lines<R>,
    pending: std::vec::IntoIter<String>,
    line_number: usize,
}

impl<R: BufRead> TokenReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: Vec::new().into_iter(),
            line_number: 0,
        }
    }

    /// Returns the (1-based) line of the last token handed out
    fn line_number(&self) -> usize {
        self.line_number
    }

    /// Makes sure there is a pending token if the input is not exhausted
    fn fill(&mut self) -> Result<()> {
        while self.pending.len() == 0 {
            match self.lines.next() {
                None => break,
                Some(line) => {
                    let line = line?;
                    self.line_number += 1;
                    self.pending = line
                        .split_whitespace()
                        .map(str::to_owned)
                        .collect_vec()
                        .into_iter();
                }
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        self.fill()?;
        Ok(self.pending.next())
    }

    fn peek_is_some(&mut self) -> Result<bool> {
        self.fill()?;
        Ok(self.pending.len() > 0)
    }
}

/// A writer for the weighted EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter;

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }
}

impl<G: WeightedAdjacencyList> GraphWriter<G> for EdgeListWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "{} {}",
            graph.number_of_nodes(),
            graph.number_of_edges()
        )?;

        for WeightedEdge { from, to, weight } in graph.edges() {
            writeln!(writer, "{from} {to} {weight}")?;
        }

        Ok(())
    }
}

/// Trait for writing a graph to a writer in the EdgeList-Format.
/// Shorthand for default settings.
pub trait EdgeListWrite {
    /// Tries to write the graph to a writer
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(&mut writer)?;
        writer.flush()
    }
}

impl<G: WeightedAdjacencyList> EdgeListWrite for G {
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        EdgeListWriter.try_write_graph(self, writer)
    }
}
