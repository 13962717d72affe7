use crate::core::error::{GraphError, Result};
use crate::core::ids::{NodeId, node_id};
use crate::core::point::{Point, PointSet};
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use log::warn;

/// Nearest-neighbor index over a point set, built once and queried per node.
pub struct SpatialIndex {
    backend: Backend,
    len: usize,
}

enum Backend {
    Tree(ImmutableKdTree<f64, 3>),
    /// Exhaustive scan. The k-d tree cannot split buckets whose points share
    /// a coordinate, so point sets with repeated axis values land here.
    Scan(Vec<[f64; 3]>),
}

impl SpatialIndex {
    pub fn build(points: &PointSet) -> Result<Self> {
        if points.is_empty() {
            return Err(GraphError::range("cannot index an empty point set"));
        }
        node_id(points.len() - 1)?;

        let entries: Vec<[f64; 3]> = points.iter().map(Point::coords).collect();
        let backend = if has_repeated_axis_value(&entries) {
            warn!(
                "{} points share coordinate values, using exhaustive neighbor search",
                entries.len()
            );
            Backend::Scan(entries)
        } else {
            Backend::Tree(ImmutableKdTree::new_from_slice(&entries))
        };
        Ok(Self {
            backend,
            len: points.len(),
        })
    }

    /// The `k` indexed points closest to `query`, nearest first. A query
    /// located on an indexed point gets that point back as well.
    pub fn nearest(&self, query: &Point, k: usize) -> Result<Vec<NodeId>> {
        if k > self.len {
            return Err(GraphError::range(format!(
                "{k} neighbors requested from {} points",
                self.len
            )));
        }
        if k == 0 {
            return Ok(vec![]);
        }

        match &self.backend {
            Backend::Tree(tree) => {
                let results = tree.nearest_n::<SquaredEuclidean>(&query.coords(), k);
                Ok(results.into_iter().map(|n| n.item as NodeId).collect())
            }
            Backend::Scan(entries) => {
                let q = query.coords();
                let mut ranked: Vec<(f64, usize)> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (squared_distance(&q, p), i))
                    .collect();
                // stable, so equal distances keep index order
                ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
                Ok(ranked.into_iter().take(k).map(|(_, i)| i as NodeId).collect())
            }
        }
    }
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn has_repeated_axis_value(entries: &[[f64; 3]]) -> bool {
    (0..3).any(|axis| {
        let mut values: Vec<f64> = entries.iter().map(|p| p[axis]).collect();
        values.sort_by(f64::total_cmp);
        values.windows(2).any(|w| w[0] == w[1])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_points(n: usize) -> PointSet {
        PointSet::new(
            (0..n)
                .map(|i| Point::new(i as f64 * 10.0, i as f64 * 0.001, i as f64 * -0.002))
                .collect(),
        )
    }

    #[test]
    fn test_nearest_includes_query_point() {
        let points = line_points(5);
        let index = SpatialIndex::build(&points).unwrap();
        assert!(matches!(index.backend, Backend::Tree(_)));

        let ids = index.nearest(&points.as_slice()[2], 1).unwrap();
        assert_eq!(vec![2], ids);
    }

    #[test]
    fn test_nearest_sorted_by_distance() {
        let points = line_points(6);
        let index = SpatialIndex::build(&points).unwrap();

        let ids = index.nearest(&Point::new(1.0, 0.0, 0.0), 3).unwrap();
        assert_eq!(vec![0, 1, 2], ids);

        let ids = index.nearest(&Point::new(49.0, 1.0, 0.0), 2).unwrap();
        assert_eq!(vec![5, 4], ids);
    }

    #[test]
    fn test_nearest_all_points() {
        let points = line_points(4);
        let index = SpatialIndex::build(&points).unwrap();

        let ids = index.nearest(&points.as_slice()[3], 4).unwrap();
        assert_eq!(vec![3, 2, 1, 0], ids);
    }

    #[test]
    fn test_too_many_neighbors() {
        let index = SpatialIndex::build(&line_points(3)).unwrap();
        assert!(matches!(
            index.nearest(&Point::new(0.0, 0.0, 0.0), 4),
            Err(GraphError::Range(_))
        ));
        assert!(index.nearest(&Point::new(0.0, 0.0, 0.0), 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_point_set() {
        assert!(SpatialIndex::build(&PointSet::default()).is_err());
    }

    #[test]
    fn test_coincident_points_use_scan() {
        let points = PointSet::new(vec![Point::new(1.0, 1.0, 1.0); 500]);
        let index = SpatialIndex::build(&points).unwrap();
        assert!(matches!(index.backend, Backend::Scan(_)));

        let ids = index.nearest(&points.as_slice()[7], 4).unwrap();
        assert_eq!(vec![0, 1, 2, 3], ids);
    }

    #[test]
    fn test_scan_orders_by_distance() {
        let points = PointSet::new(vec![
            Point::new(5.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
        ]);
        let index = SpatialIndex::build(&points).unwrap();
        assert!(matches!(index.backend, Backend::Scan(_)));

        let ids = index.nearest(&Point::new(0.0, 0.0, 0.0), 3).unwrap();
        assert_eq!(vec![1, 3, 2], ids);
    }
}
