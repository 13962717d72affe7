use crate::core::error::{GraphError, Result};
use crate::core::graph::AdjacencyGraph;
use crate::core::ids::NodeId;
use crate::format::PREALLOC_LIMIT;
use log::debug;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const HEADER: &str = "AdjacencyGraph";

/// Writes `graph` as an adjacency edge file: header, node count, edge count,
/// one offset per node (no sentinel), then one destination per line.
pub fn write_adjacency<W: Write>(graph: &AdjacencyGraph, mut writer: W) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "{}", graph.node_count())?;
    writeln!(writer, "{}", graph.edge_count())?;

    for offset in &graph.offsets()[..graph.node_count()] {
        writeln!(writer, "{offset}")?;
    }
    for dst in graph.destinations() {
        writeln!(writer, "{dst}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads exactly `3 + N + M` lines of an adjacency edge file. Content after
/// the last destination is not read.
pub fn read_adjacency<R: BufRead>(reader: R) -> Result<AdjacencyGraph> {
    let mut lines = NumberedLines::new(reader);

    let (line_no, header) = lines.next_line("header")?;
    if header != HEADER {
        return Err(GraphError::format(
            line_no,
            format!("expected header {HEADER:?}, found {header:?}"),
        ));
    }

    let node_count: usize = lines.next_value("node count")?;
    let edge_count: usize = lines.next_value("edge count")?;
    debug!("decoding {node_count} nodes, {edge_count} edges");

    let mut offsets = Vec::with_capacity(node_count.min(PREALLOC_LIMIT));
    for _ in 0..node_count {
        offsets.push(lines.next_value::<usize>("offset")?);
    }

    let mut dsts = Vec::with_capacity(edge_count.min(PREALLOC_LIMIT));
    for _ in 0..edge_count {
        dsts.push(lines.next_value::<NodeId>("destination")?);
    }

    AdjacencyGraph::from_parts(node_count, offsets, dsts)
}

struct NumberedLines<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Next line with its 1-based number, stripped of the `\n` terminator only.
    fn next_line(&mut self, what: &str) -> Result<(usize, &str)> {
        self.buf.clear();
        self.line_no += 1;
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(GraphError::format(
                self.line_no,
                format!("missing {what}: unexpected end of file"),
            ));
        }
        let line = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        Ok((self.line_no, line))
    }

    fn next_value<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let (line_no, line) = self.next_line(what)?;
        line.trim().parse().map_err(|_| {
            GraphError::format(line_no, format!("invalid {what}: {:?}", line.trim()))
        })
    }
}
