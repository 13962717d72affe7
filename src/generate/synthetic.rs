use crate::core::error::Result;
use crate::core::graph::{AdjacencyBuilder, AdjacencyGraph};
use crate::core::ids::node_id;
use crate::core::point::{Point, PointSet};
use crate::generate::config::GeneratorConfig;
use crate::generate::spatial_index::SpatialIndex;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct SpatialGraph {
    pub points: PointSet,
    pub graph: AdjacencyGraph,
}

pub fn rng_for(cfg: &GeneratorConfig) -> StdRng {
    match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Connects each random point to its K nearest points, K drawn per node.
/// All coordinates are drawn before any degree.
pub fn generate<R: Rng>(cfg: &GeneratorConfig, rng: &mut R) -> Result<SpatialGraph> {
    cfg.validate()?;
    info!(
        "generating {} points in [{}, {}]^3 with degrees in [{}, {}]",
        cfg.point_count, cfg.bounds.0, cfg.bounds.1, cfg.degree_range.0, cfg.degree_range.1
    );

    let (min, max) = cfg.bounds;
    let points = PointSet::new(
        (0..cfg.point_count)
            .map(|_| {
                let x = rng.random_range(min..=max);
                let y = rng.random_range(min..=max);
                let z = rng.random_range(min..=max);
                Point::new(x, y, z)
            })
            .collect(),
    );

    let (lo, hi) = cfg.degree_range;
    let degrees: Vec<usize> = (0..cfg.point_count)
        .map(|_| rng.random_range(lo..=hi))
        .collect();
    debug!("degree draws sum to {}", degrees.iter().sum::<usize>());

    let mut builder = AdjacencyBuilder::new(points.len());
    if !points.is_empty() {
        let index = SpatialIndex::build(&points)?;
        for (i, (point, &k)) in points.iter().zip(&degrees).enumerate() {
            let neighbors = index.nearest(point, k)?;
            builder.push_node(node_id(i)?, &neighbors)?;
        }
    }
    let graph = builder.finish()?;

    info!(
        "generated {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(SpatialGraph { points, graph })
}
