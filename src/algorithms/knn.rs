//! Nearest-neighbor search for the R-tree
//!
//! This module implements a depth-first branch-and-bound nearest-neighbor
//! search. At every index node the children are visited in ascending order
//! of their MBR distance to the query point, so the most promising subtree
//! is explored first and the best candidate converges quickly.
//!
//! ## Algorithm Overview
//!
//! 1. Keep a best-so-far `(candidate, distance)`, starting at `(None, +inf)`
//! 2. At an index node, sort the children by minimum possible distance
//!    (point-to-MBR distance) and recurse in that order
//! 3. Skip any subtree whose MBR distance already exceeds the best distance;
//!    with the ascending visit order this prunes the whole tail at once
//! 4. At a leaf, measure the distance to every entry box and update the best
//!
//! Distances are plain Euclidean distances in the plane; a query point lying
//! inside or on the boundary of an entry box has distance 0.

use crate::node::{Entry, Node};
use crate::rtree::RTree;
use std::cmp::Ordering;

impl<T: Clone> RTree<T> {
    /// Find the single nearest entry to the query point.
    ///
    /// Returns the payload of the nearest entry together with its Euclidean
    /// distance, or `(None, f64::INFINITY)` when the tree is empty.
    pub fn nearest(&self, x: f64, y: f64) -> (Option<T>, f64) {
        let mut best = None;
        let mut best_distance = f64::INFINITY;

        if let Some(root) = self.root_ref().as_deref() {
            Self::nearest_recursive(root, x, y, &mut best, &mut best_distance);
        }

        (best, best_distance)
    }

    fn nearest_recursive(
        node: &Node<T>,
        x: f64,
        y: f64,
        best: &mut Option<T>,
        best_distance: &mut f64,
    ) {
        if node.is_leaf_node() {
            for entry in &node.entries {
                if let Entry::Data { mbr, data } = entry {
                    let distance = mbr.distance_to_point(x, y);
                    if distance < *best_distance {
                        *best_distance = distance;
                        *best = Some(data.clone());
                    }
                }
            }
            return;
        }

        // Visit children by ascending MBR distance
        let mut children: Vec<(f64, &Node<T>)> = node
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Node { mbr, node: child } => {
                    Some((mbr.distance_to_point(x, y), child.as_ref()))
                }
                Entry::Data { .. } => None,
            })
            .collect();
        children.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        for (distance, child) in children {
            // The list is sorted, so the remaining subtrees are at least
            // this far away as well
            if distance > *best_distance {
                break;
            }
            Self::nearest_recursive(child, x, y, best, best_distance);
        }
    }
}
