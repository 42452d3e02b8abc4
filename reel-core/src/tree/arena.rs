use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::node::{MediaEntry, MediaNode, NodeId};

/// Arena-allocated media tree
///
/// Nodes are never freed. A path that disappears from a rescan is unlinked
/// from its parent and from the path index, but its slot stays allocated.
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<MediaNode>,
    by_path: HashMap<PathBuf, NodeId>,
}

impl NodeArena {
    pub fn new(root_path: PathBuf) -> Self {
        let mut by_path = HashMap::new();
        by_path.insert(root_path.clone(), NodeId::ROOT);

        Self {
            nodes: vec![MediaNode::root(root_path)],
            by_path,
        }
    }

    /// Get a reference to a node
    pub fn get(&self, id: NodeId) -> Option<&MediaNode> {
        self.nodes.get(id.index())
    }

    /// Get the root node
    pub fn root(&self) -> &MediaNode {
        &self.nodes[0]
    }

    /// Resolve a path to its live node
    pub fn lookup(&self, path: &Path) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Total number of allocated nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (only has root)
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Replace a directory's children with a fresh listing
    ///
    /// Paths already known as children of `dir` keep their node (and with it
    /// any grandchildren loaded earlier); new paths get new nodes.
    pub fn replace_children(&mut self, dir: NodeId, entries: &[MediaEntry]) -> Vec<NodeId> {
        let Some(parent) = self.nodes.get_mut(dir.index()) else {
            return Vec::new();
        };
        let depth = parent.depth.saturating_add(1);
        let previous = std::mem::take(&mut parent.children);

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let existing = self
                .by_path
                .get(&entry.path)
                .copied()
                .filter(|id| self.nodes[id.index()].parent == Some(dir));

            let id = match existing {
                Some(id) => {
                    self.nodes[id.index()].update_from(entry);
                    id
                }
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(MediaNode::from_entry(id, entry, dir, depth));
                    self.by_path.insert(entry.path.clone(), id);
                    id
                }
            };
            children.push(id);
        }

        let kept: HashSet<NodeId> = children.iter().copied().collect();
        for id in previous {
            if !kept.contains(&id) {
                self.unlink(id);
            }
        }

        self.nodes[dir.index()].children = children.clone();
        children
    }

    /// Drop a subtree from the path index
    fn unlink(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current.index()];
            if self.by_path.get(&node.path) == Some(&current) {
                self.by_path.remove(&node.path);
            }
            stack.extend(node.children.iter().copied());
        }
    }

    /// Copy of a directory's children, in listing order
    pub fn children_snapshot(&self, id: NodeId) -> Vec<MediaNode> {
        self.get(id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|child| self.get(*child).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the path from root to a node
    pub fn path_to_node(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).and_then(|n| n.parent);
        }

        path.reverse();
        path
    }

    /// Get breadcrumb string for a node
    pub fn breadcrumbs(&self, id: NodeId) -> String {
        let path = self.path_to_node(id);
        path.iter()
            .filter_map(|&id| self.get(id).map(|n| n.name.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }
}
