pub mod adjacency;
pub mod points;

/// Upper bound on allocation driven by header counts before lines are read.
pub const PREALLOC_LIMIT: usize = 1 << 20;
