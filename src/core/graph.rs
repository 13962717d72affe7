use crate::core::error::{GraphError, Result};
use crate::core::ids::{NodeId, check_node, node_id};

/// Accumulates per-node destination lists in ascending node order and
/// records offsets as the running sum of out-degrees.
pub struct AdjacencyBuilder {
    graph: AdjacencyGraph,
}

impl AdjacencyBuilder {
    pub fn new(node_count: usize) -> Self {
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        Self {
            graph: AdjacencyGraph {
                node_count,
                offsets,
                dsts: vec![],
            },
        }
    }

    /// Id of the node the next `push_node` call must carry.
    pub fn next_node(&self) -> usize {
        self.graph.offsets.len() - 1
    }

    pub fn push_node(&mut self, node: NodeId, destinations: &[NodeId]) -> Result<()> {
        let expected = self.next_node();
        if expected == self.graph.node_count {
            return Err(GraphError::range(format!(
                "node {node} pushed after all {} nodes",
                self.graph.node_count
            )));
        }
        if node as usize != expected {
            return Err(GraphError::range(format!(
                "node {node} pushed out of order, expected {expected}"
            )));
        }
        for &dst in destinations {
            check_node(dst, self.graph.node_count)?;
        }

        self.graph.dsts.extend_from_slice(destinations);
        self.graph.offsets.push(self.graph.dsts.len());
        Ok(())
    }

    pub fn finish(self) -> Result<AdjacencyGraph> {
        let pushed = self.next_node();
        if pushed != self.graph.node_count {
            return Err(GraphError::range(format!(
                "only {pushed} of {} nodes pushed",
                self.graph.node_count
            )));
        }
        Ok(self.graph)
    }
}

/// Compressed adjacency: node `i` owns `dsts[offsets[i]..offsets[i + 1]]`.
/// `offsets` always carries the trailing `offsets[N] == M` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyGraph {
    node_count: usize,
    offsets: Vec<usize>,
    dsts: Vec<NodeId>,
}

impl AdjacencyGraph {
    /// Assembles a graph from decoded parts. `offsets` holds one entry per
    /// node, without the sentinel, which is appended here.
    pub fn from_parts(node_count: usize, offsets: Vec<usize>, dsts: Vec<NodeId>) -> Result<Self> {
        if offsets.len() != node_count {
            return Err(GraphError::range(format!(
                "{} offsets for {node_count} nodes",
                offsets.len()
            )));
        }

        let edge_count = dsts.len();
        let mut offsets = offsets;
        offsets.push(edge_count);

        if offsets[0] != 0 {
            return Err(GraphError::range(format!(
                "first offset is {}, expected 0",
                offsets[0]
            )));
        }
        for (i, pair) in offsets.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(GraphError::range(format!(
                    "offset of node {} ({}) is outside [{}, {edge_count}]",
                    i + 1,
                    pair[1],
                    pair[0]
                )));
            }
        }
        for &dst in &dsts {
            check_node(dst, node_count)?;
        }

        Ok(Self {
            node_count,
            offsets,
            dsts,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.dsts.len()
    }

    /// Per-node offsets followed by the sentinel.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn destinations(&self) -> &[NodeId] {
        &self.dsts
    }

    pub fn destinations_of(&self, src: NodeId) -> &[NodeId] {
        let src = src as usize;
        &self.dsts[self.offsets[src]..self.offsets[src + 1]]
    }

    pub fn out_degree(&self, src: NodeId) -> usize {
        self.offsets[src as usize + 1] - self.offsets[src as usize]
    }

    pub fn edges_from(&self, src: NodeId) -> impl Iterator<Item = EdgeRef> + '_ {
        self.destinations_of(src)
            .iter()
            .map(move |&dst| EdgeRef::new(src, dst))
    }

    /// Every edge, grouped by source in ascending node order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        (0..self.node_count).flat_map(move |src| self.edges_from(src as NodeId))
    }

    /// Approximate heap footprint of the offset and destination arrays.
    pub fn memory_bytes(&self) -> usize {
        self.offsets.len() * size_of::<usize>() + self.dsts.len() * size_of::<NodeId>()
    }
}

#[derive(Debug, PartialEq)]
pub struct EdgeRef {
    pub src: NodeId,
    pub dst: NodeId,
}

impl EdgeRef {
    pub fn new(src: NodeId, dst: NodeId) -> Self {
        Self { src, dst }
    }

    /// Index distance between the endpoints. Zero for self-edges.
    pub fn length(&self) -> u32 {
        self.src.abs_diff(self.dst)
    }
}

/// Builds a graph from per-node destination lists given in node order.
pub fn from_lists(lists: &[Vec<NodeId>]) -> Result<AdjacencyGraph> {
    let mut builder = AdjacencyBuilder::new(lists.len());
    for (i, dsts) in lists.iter().enumerate() {
        builder.push_node(node_id(i)?, dsts)?;
    }
    builder.finish()
}
