//! Shortest-path distances and device diameter.
//!
//! All distances are hop counts in the undirected view of the architecture.
//! Connection weights are not used here.

use std::collections::VecDeque;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::architecture::Architecture;
use crate::error::{ArchError, ArchResult};
use crate::node::Node;

/// Breadth-first hop counts from `start` to every node of `graph`.
///
/// Entry `i` is the distance to node index `i`, or `None` if it is not
/// reachable.
pub(crate) fn bfs_distances<N, E>(graph: &UnGraph<N, E>, start: NodeIndex) -> Vec<Option<usize>> {
    let mut dist = vec![None; graph.node_count()];
    dist[start.index()] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        let d = dist[current.index()].unwrap_or_default();
        for neighbor in graph.neighbors(current) {
            if dist[neighbor.index()].is_none() {
                dist[neighbor.index()] = Some(d + 1);
                queue.push_back(neighbor);
            }
        }
    }
    dist
}

impl Architecture {
    /// Shortest-path distance between two nodes.
    ///
    /// Fails with [`ArchError::Unreachable`] if no path exists.
    pub fn distance(&self, from: &Node, to: &Node) -> ArchResult<usize> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        if a == b {
            return Ok(0);
        }
        let dist = bfs_distances(&self.undirected(), NodeIndex::new(a));
        dist[b].ok_or_else(|| ArchError::Unreachable {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Distances from one node to every node, in node order.
    ///
    /// The entry for `from` itself is `Some(0)`; unreachable nodes are
    /// `None`.
    pub fn all_distances(&self, from: &Node) -> ArchResult<Vec<Option<usize>>> {
        let a = self.position(from)?;
        Ok(bfs_distances(&self.undirected(), NodeIndex::new(a)))
    }

    /// Distances from `node` to every other node, in node order.
    ///
    /// This is the node's eccentricity fingerprint. Two nodes with the same
    /// view of the rest of the device have equal fingerprints.
    pub fn fingerprint(&self, node: &Node) -> ArchResult<Vec<Option<usize>>> {
        let a = self.position(node)?;
        let mut dist = bfs_distances(&self.undirected(), NodeIndex::new(a));
        dist.remove(a);
        Ok(dist)
    }

    /// Maximum distance over all node pairs.
    ///
    /// Fails with [`ArchError::EmptyArchitecture`] when there are no nodes
    /// and with [`ArchError::Unreachable`] when the device is disconnected.
    pub fn diameter(&self) -> ArchResult<usize> {
        if self.is_empty() {
            return Err(ArchError::EmptyArchitecture);
        }

        let graph = self.undirected();
        let mut max = 0;
        for i in graph.node_indices() {
            let dist = bfs_distances(&graph, i);
            for (j, d) in dist.iter().enumerate().skip(i.index() + 1) {
                match *d {
                    Some(d) => max = max.max(d),
                    None => {
                        return Err(ArchError::Unreachable {
                            from: graph[i].clone(),
                            to: graph[NodeIndex::new(j)].clone(),
                        });
                    }
                }
            }
        }
        Ok(max)
    }

    /// One shortest path from `from` to `to`, both endpoints included.
    pub fn shortest_path(&self, from: &Node, to: &Node) -> ArchResult<Vec<Node>> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        let graph = self.undirected();

        let mut pred: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
        let mut visited = vec![false; graph.node_count()];
        visited[a] = true;

        let mut queue = VecDeque::new();
        queue.push_back(NodeIndex::new(a));
        while let Some(current) = queue.pop_front() {
            if current.index() == b {
                break;
            }
            for neighbor in graph.neighbors(current) {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    pred[neighbor.index()] = Some(current);
                    queue.push_back(neighbor);
                }
            }
        }

        if !visited[b] {
            return Err(ArchError::Unreachable {
                from: from.clone(),
                to: to.clone(),
            });
        }

        let mut path = vec![graph[NodeIndex::new(b)].clone()];
        let mut current = NodeIndex::new(b);
        while let Some(prev) = pred[current.index()] {
            path.push(graph[prev].clone());
            current = prev;
        }
        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: u32) -> Architecture {
        Architecture::from_connections((0..n - 1).map(|i| (Node::new(i), Node::new(i + 1)))).unwrap()
    }

    #[test]
    fn test_distance_on_path() {
        let arch = path(5);
        assert_eq!(arch.distance(&Node::new(0), &Node::new(4)).unwrap(), 4);
        assert_eq!(arch.distance(&Node::new(4), &Node::new(0)).unwrap(), 4);
        assert_eq!(arch.distance(&Node::new(2), &Node::new(2)).unwrap(), 0);
    }

    #[test]
    fn test_distance_ignores_direction() {
        let arch = Architecture::from_connections([
            (Node::new(1), Node::new(0)),
            (Node::new(1), Node::new(2)),
        ])
        .unwrap();
        assert_eq!(arch.distance(&Node::new(0), &Node::new(2)).unwrap(), 2);
    }

    #[test]
    fn test_distance_unreachable() {
        let arch =
            Architecture::from_nodes([Node::new(0), Node::new(1)]).unwrap();
        assert!(matches!(
            arch.distance(&Node::new(0), &Node::new(1)),
            Err(ArchError::Unreachable { .. })
        ));
        assert!(matches!(
            arch.distance(&Node::new(0), &Node::new(5)),
            Err(ArchError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_all_distances() {
        let mut arch = path(3);
        arch.add_node(Node::new(9)).unwrap();
        let dist = arch.all_distances(&Node::new(1)).unwrap();
        assert_eq!(dist, vec![Some(1), Some(0), Some(1), None]);
    }

    #[test]
    fn test_fingerprint_skips_own_slot() {
        let mut arch = path(3);
        arch.add_node(Node::new(9)).unwrap();
        assert_eq!(arch.fingerprint(&Node::new(1)).unwrap(), vec![Some(1), Some(1), None]);

        // Two leaves on the same hub see the rest of the device the same way.
        let arch = Architecture::from_connections([
            (Node::new(0), Node::new(1)),
            (Node::new(0), Node::new(2)),
        ])
        .unwrap();
        assert_eq!(arch.fingerprint(&Node::new(1)).unwrap(), vec![Some(1), Some(2)]);
        assert_eq!(
            arch.fingerprint(&Node::new(1)).unwrap(),
            arch.fingerprint(&Node::new(2)).unwrap()
        );
        assert!(arch.fingerprint(&Node::new(7)).is_err());
    }

    #[test]
    fn test_diameter() {
        assert_eq!(path(6).diameter().unwrap(), 5);
        assert_eq!(
            Architecture::from_nodes([Node::new(0)])
                .unwrap()
                .diameter()
                .unwrap(),
            0
        );
        assert!(matches!(
            Architecture::new().diameter(),
            Err(ArchError::EmptyArchitecture)
        ));
    }

    #[test]
    fn test_diameter_disconnected() {
        let arch = Architecture::from_nodes([Node::new(0), Node::new(1)]).unwrap();
        assert!(matches!(arch.diameter(), Err(ArchError::Unreachable { .. })));
    }

    #[test]
    fn test_shortest_path() {
        let arch = path(5);
        let p = arch.shortest_path(&Node::new(1), &Node::new(4)).unwrap();
        assert_eq!(p, vec![Node::new(1), Node::new(2), Node::new(3), Node::new(4)]);

        let p = arch.shortest_path(&Node::new(2), &Node::new(2)).unwrap();
        assert_eq!(p, vec![Node::new(2)]);
    }
}
