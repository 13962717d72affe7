use crate::analysis::histogram::LengthHistogram;
use crate::core::graph::AdjacencyGraph;

/// Edge lengths in destination-array order. The length of an edge is the
/// index distance `|dst - src|`, not the distance between the points.
pub fn edge_lengths(graph: &AdjacencyGraph) -> Vec<u32> {
    graph.edges().map(|e| e.length()).collect()
}

/// `ceil(log2(length))` for a positive length.
pub fn log2_bin(length: u32) -> u32 {
    debug_assert!(length > 0);
    u32::BITS - (length - 1).leading_zeros()
}

pub fn length_histogram(graph: &AdjacencyGraph) -> LengthHistogram {
    let mut histogram = LengthHistogram::default();
    for length in edge_lengths(graph) {
        histogram.add(length);
    }
    histogram
}
