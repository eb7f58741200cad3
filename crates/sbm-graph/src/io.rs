//! Plain-text edge lists: one `u v` pair per line.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::VertexId;

use crate::graph::Graph;

/// Parses whitespace separated `u v` pairs.
///
/// Blank lines and lines starting with `#` are skipped. Tokens after the
/// second one on a line are ignored.
pub fn parse_edge_list(text: &str) -> Result<Vec<(VertexId, VertexId)>, SbmError> {
    parse_lines(text, None)
}

fn parse_lines(
    text: &str,
    vertices: Option<usize>,
) -> Result<Vec<(VertexId, VertexId)>, SbmError> {
    let mut edges = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let u = parse_vertex(tokens.next(), index + 1, line, vertices)?;
        let v = parse_vertex(tokens.next(), index + 1, line, vertices)?;
        edges.push((u, v));
    }
    Ok(edges)
}

fn parse_vertex(
    token: Option<&str>,
    line_number: usize,
    line: &str,
    vertices: Option<usize>,
) -> Result<VertexId, SbmError> {
    let token = token.ok_or_else(|| {
        SbmError::Graph(
            ErrorInfo::new("edge-list-parse", "expected two vertex ids per line")
                .with_context("line", line_number)
                .with_context("content", line.trim()),
        )
    })?;
    let vertex = token.parse::<VertexId>().map_err(|err| {
        SbmError::Graph(
            ErrorInfo::new("edge-list-parse", err.to_string())
                .with_context("line", line_number)
                .with_context("token", token),
        )
    })?;
    match vertices {
        Some(bound) if vertex >= bound => Err(SbmError::Graph(
            ErrorInfo::new("edge-list-parse", "vertex id out of range")
                .with_context("line", line_number)
                .with_context("vertex", vertex)
                .with_context("vertices", bound)
                .with_hint("vertex ids must lie in [0, N) where N is the sum of the block sizes"),
        )),
        _ => Ok(vertex),
    }
}

/// Reads an edge list file and builds a graph with exactly `vertices` vertices.
///
/// Vertex ids at or beyond `vertices` are rejected with the offending line.
pub fn load_edge_list(path: &Path, vertices: usize) -> Result<Graph, SbmError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        SbmError::Serde(
            ErrorInfo::new("edge-list-read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    let edges = parse_lines(&contents, Some(vertices))?;
    Graph::from_edges(vertices, edges)
}

/// Writes every edge of the graph as a `u v` line.
pub fn write_edge_list<W: Write>(graph: &Graph, mut writer: W) -> io::Result<()> {
    for (u, v) in graph.edges() {
        writeln!(writer, "{u} {v}")?;
    }
    Ok(())
}

/// Writes one `v : n1 n2 ...` line per vertex.
pub fn write_adjacency<W: Write>(graph: &Graph, mut writer: W) -> io::Result<()> {
    for vertex in 0..graph.vertex_count() {
        write!(writer, "{vertex} :")?;
        for neighbour in graph.neighbors(vertex) {
            write!(writer, " {neighbour}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
