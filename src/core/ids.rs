use crate::core::error::{GraphError, Result};

pub type NodeId = u32;

/// Converts a position in the point sequence into a node id.
pub fn node_id(index: usize) -> Result<NodeId> {
    NodeId::try_from(index)
        .map_err(|_| GraphError::range(format!("node index {index} exceeds the id limit")))
}

/// Checks that `id` names one of `node_count` nodes.
pub fn check_node(id: NodeId, node_count: usize) -> Result<()> {
    if (id as usize) < node_count {
        Ok(())
    } else {
        Err(GraphError::range(format!(
            "node {id} out of range for {node_count} nodes"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_limit() {
        assert_eq!(7, node_id(7).unwrap());
        assert!(matches!(
            node_id(u32::MAX as usize + 1),
            Err(GraphError::Range(_))
        ));
    }

    #[test]
    fn test_check_node() {
        assert!(check_node(0, 1).is_ok());
        assert!(check_node(1, 1).is_err());
        assert!(check_node(0, 0).is_err());
    }
}
