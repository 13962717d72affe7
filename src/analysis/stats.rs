use crate::core::graph::AdjacencyGraph;
use crate::core::ids::NodeId;
use std::fmt;

#[derive(Debug, PartialEq)]
pub struct DegreeStats {
    pub nodes: usize,
    pub edges: usize,
    pub max_degree: usize,
    /// Smallest out-degree among nodes with at least one edge.
    pub min_nonzero_degree: Option<usize>,
    pub isolated_nodes: usize,
    pub bytes: usize,
}

impl DegreeStats {
    pub fn avg_degree(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.edges as f64 / self.nodes as f64
        }
    }
}

pub fn degree_stats(graph: &AdjacencyGraph) -> DegreeStats {
    let mut stats = DegreeStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        max_degree: 0,
        min_nonzero_degree: None,
        isolated_nodes: 0,
        bytes: graph.memory_bytes(),
    };

    for src in 0..graph.node_count() {
        let degree = graph.out_degree(src as NodeId);
        stats.max_degree = stats.max_degree.max(degree);
        if degree == 0 {
            stats.isolated_nodes += 1;
        } else {
            stats.min_nonzero_degree = Some(stats.min_nonzero_degree.map_or(degree, |d| d.min(degree)));
        }
    }

    stats
}

impl fmt::Display for DegreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "graph stats:")?;
        writeln!(f, "  total nodes: {}", self.nodes)?;
        writeln!(f, "  total edges: {}", self.edges)?;
        writeln!(f, "  avg edges per node: {}", self.avg_degree())?;
        writeln!(f, "  node max edges: {}", self.max_degree)?;
        match self.min_nonzero_degree {
            Some(d) => writeln!(f, "  connected node min edges: {d}")?,
            None => writeln!(f, "  connected node min edges: -")?,
        }
        writeln!(f, "  disconnected nodes: {}", self.isolated_nodes)?;
        writeln!(f, "  approx memory: {} KB", self.bytes / 1024)
    }
}
