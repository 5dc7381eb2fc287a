//! Weighted hierarchy built from a raw dataset tree.
//! Nodes live in an arena in pre-order; links are `NodeId` indices.

use crate::model::RawNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    /// Dotted path from the root, e.g. `Movies.Action.Avatar`.
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Sum of this node's own value and all descendants.
    pub value: f64,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Builds the hierarchy: dotted ids, summed values, siblings sorted by
    /// descending value (ties keep input order).
    pub fn from_raw(root: &RawNode) -> Self {
        let mut hierarchy = Hierarchy {
            nodes: Vec::with_capacity(128),
        };
        hierarchy.push(root, None, 0);
        hierarchy.sum(NodeId(0));
        hierarchy.sort_children(NodeId(0));
        hierarchy
    }

    fn push(&mut self, raw: &RawNode, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        let path = match parent {
            Some(p) => format!("{}.{}", self.nodes[p.0].id, raw.name),
            None => raw.name.clone(),
        };
        self.nodes.push(HierarchyNode {
            id: path,
            name: raw.name.clone(),
            category: raw.category.clone(),
            value: raw.numeric_value(),
            depth,
            parent,
            children: Vec::new(),
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
        });
        for child in raw.children() {
            let child_id = self.push(child, Some(id), depth + 1);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn sum(&mut self, id: NodeId) -> f64 {
        let children = self.nodes[id.0].children.clone();
        let mut total = self.nodes[id.0].value;
        for child in children {
            total += self.sum(child);
        }
        self.nodes[id.0].value = total;
        total
    }

    fn sort_children(&mut self, id: NodeId) {
        let mut children = std::mem::take(&mut self.nodes[id.0].children);
        // sort_by is stable, equal values keep their input order.
        children.sort_by(|a, b| {
            self.nodes[b.0]
                .value
                .partial_cmp(&self.nodes[a.0].value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for &child in &children {
            self.sort_children(child);
        }
        self.nodes[id.0].children = children;
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut HierarchyNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Pre-order traversal following the sorted child order.
    pub fn each_before(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![self.root_id()];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &c in self.nodes[id.0].children.iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    pub fn leaves(&self) -> impl Iterator<Item = &HierarchyNode> + '_ {
        self.each_before()
            .into_iter()
            .map(move |id| &self.nodes[id.0])
            .filter(|n| n.is_leaf())
    }
}
