//! Squarified treemap layout.
//!
//! Positions every node of a [`Hierarchy`] inside a fixed canvas so that leaf
//! areas are proportional to their values. Rows are packed with the golden
//! ratio as the target aspect ratio; padding is split between siblings
//! (inner) and around each group's children (outer).

use crate::hierarchy::{Hierarchy, NodeId};

const PHI: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreemapLayout {
    width: f64,
    height: f64,
    padding_inner: f64,
    padding_outer: f64,
    round: bool,
    ratio: f64,
}

impl TreemapLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding_inner: 0.0,
            padding_outer: 0.0,
            round: false,
            ratio: PHI,
        }
    }

    /// Sets both inner and outer padding.
    pub fn padding(mut self, p: f64) -> Self {
        let p = p.max(0.0);
        self.padding_inner = p;
        self.padding_outer = p;
        self
    }

    pub fn round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn apply(&self, hierarchy: &mut Hierarchy) {
        if hierarchy.is_empty() {
            return;
        }
        {
            let root = hierarchy.node_mut(hierarchy.root_id());
            root.x0 = 0.0;
            root.y0 = 0.0;
            root.x1 = self.width;
            root.y1 = self.height;
        }
        let order = hierarchy.each_before();
        let mut padding_stack = vec![0.0];
        for &id in &order {
            self.position_node(hierarchy, id, &mut padding_stack);
        }
        if self.round {
            for &id in &order {
                let n = hierarchy.node_mut(id);
                n.x0 = n.x0.round();
                n.y0 = n.y0.round();
                n.x1 = n.x1.round();
                n.y1 = n.y1.round();
            }
        }
    }

    fn position_node(&self, h: &mut Hierarchy, id: NodeId, padding_stack: &mut Vec<f64>) {
        let depth = h.node(id).depth;
        if padding_stack.len() <= depth {
            padding_stack.resize(depth + 1, 0.0);
        }
        let p = padding_stack[depth];
        let (x0, y0, x1, y1) = {
            let n = h.node(id);
            collapse(n.x0 + p, n.y0 + p, n.x1 - p, n.y1 - p)
        };
        {
            let n = h.node_mut(id);
            n.x0 = x0;
            n.y0 = y0;
            n.x1 = x1;
            n.y1 = y1;
        }
        if h.node(id).is_leaf() {
            return;
        }

        let p = self.padding_inner / 2.0;
        if padding_stack.len() <= depth + 1 {
            padding_stack.resize(depth + 2, 0.0);
        }
        padding_stack[depth + 1] = p;
        let inset = self.padding_outer - p;
        let (x0, y0, x1, y1) = collapse(x0 + inset, y0 + inset, x1 - inset, y1 - inset);
        self.squarify(h, id, x0, y0, x1, y1);
    }

    fn squarify(&self, h: &mut Hierarchy, parent: NodeId, mut x0: f64, mut y0: f64, x1: f64, y1: f64) {
        let children = h.children(parent).to_vec();
        let n = children.len();
        let mut value = h.node(parent).value;
        let mut i0 = 0usize;
        let mut i1 = 0usize;

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Skip leading zero-valued nodes; they collapse into the row.
            let mut sum_value;
            loop {
                sum_value = h.node(children[i1]).value;
                i1 += 1;
                if sum_value != 0.0 || i1 >= n {
                    break;
                }
            }
            let mut min_value = sum_value;
            let mut max_value = sum_value;
            let alpha = (dy / dx).max(dx / dy) / (value * self.ratio);
            let mut beta = sum_value * sum_value * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            // Grow the row while the worst aspect ratio keeps improving.
            while i1 < n {
                let node_value = h.node(children[i1]).value;
                sum_value += node_value;
                min_value = min_value.min(node_value);
                max_value = max_value.max(node_value);
                beta = sum_value * sum_value * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum_value -= node_value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &children[i0..i1];
            if dx < dy {
                let y2 = if value != 0.0 { y0 + dy * sum_value / value } else { y1 };
                dice(h, row, sum_value, x0, y0, x1, y2);
                y0 = y2;
            } else {
                let x2 = if value != 0.0 { x0 + dx * sum_value / value } else { x1 };
                slice(h, row, sum_value, x0, y0, x2, y1);
                x0 = x2;
            }
            value -= sum_value;
            i0 = i1;
        }
    }
}

/// Centers an inverted span instead of letting it go negative.
fn collapse(mut x0: f64, mut y0: f64, mut x1: f64, mut y1: f64) -> (f64, f64, f64, f64) {
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }
    (x0, y0, x1, y1)
}

/// Lays a row out left to right.
fn dice(h: &mut Hierarchy, row: &[NodeId], row_value: f64, x0: f64, y0: f64, x1: f64, y1: f64) {
    let k = if row_value != 0.0 { (x1 - x0) / row_value } else { 0.0 };
    let mut x = x0;
    for &id in row {
        let n = h.node_mut(id);
        n.y0 = y0;
        n.y1 = y1;
        n.x0 = x;
        x += n.value * k;
        n.x1 = x;
    }
}

/// Lays a row out top to bottom.
fn slice(h: &mut Hierarchy, row: &[NodeId], row_value: f64, x0: f64, y0: f64, x1: f64, y1: f64) {
    let k = if row_value != 0.0 { (y1 - y0) / row_value } else { 0.0 };
    let mut y = y0;
    for &id in row {
        let n = h.node_mut(id);
        n.x0 = x0;
        n.x1 = x1;
        n.y0 = y;
        y += n.value * k;
        n.y1 = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawNode;
    use serde_json::json;

    fn sample() -> RawNode {
        serde_json::from_value(json!({
            "name": "root",
            "children": [
                { "name": "A", "children": [
                    { "name": "a1", "category": "A", "value": "400" },
                    { "name": "a2", "category": "A", "value": "100" }
                ]},
                { "name": "B", "children": [
                    { "name": "b1", "category": "B", "value": "300" },
                    { "name": "b2", "category": "B", "value": "200" }
                ]}
            ]
        }))
        .unwrap()
    }

    fn laid_out(padding: f64, round: bool) -> Hierarchy {
        let mut h = Hierarchy::from_raw(&sample());
        TreemapLayout::new(900.0, 600.0)
            .padding(padding)
            .round(round)
            .apply(&mut h);
        h
    }

    #[test]
    fn without_padding_leaves_tile_the_whole_canvas() {
        let h = laid_out(0.0, false);
        let area: f64 = h.leaves().map(|l| l.width() * l.height()).sum();
        assert!((area - 900.0 * 600.0).abs() < 1e-6);
        for leaf in h.leaves() {
            let expected = leaf.value / h.root().value;
            let actual = leaf.width() * leaf.height() / (900.0 * 600.0);
            assert!((expected - actual).abs() < 1e-9, "{}: {} vs {}", leaf.name, expected, actual);
        }
    }

    #[test]
    fn padded_and_rounded_areas_stay_proportional() {
        let h = laid_out(1.0, true);
        let total = h.root().value;
        for leaf in h.leaves() {
            let expected = leaf.value / total;
            let actual = leaf.width() * leaf.height() / (900.0 * 600.0);
            assert!((expected - actual).abs() < 0.02, "{}: {} vs {}", leaf.name, expected, actual);
        }
    }

    #[test]
    fn rounded_coordinates_are_integers_inside_the_canvas() {
        let h = laid_out(1.0, true);
        for leaf in h.leaves() {
            for c in [leaf.x0, leaf.y0, leaf.x1, leaf.y1] {
                assert_eq!(c, c.round());
            }
            assert!(leaf.x0 >= 0.0 && leaf.y0 >= 0.0);
            assert!(leaf.x1 <= 900.0 && leaf.y1 <= 600.0);
            assert!(leaf.x1 > leaf.x0 && leaf.y1 > leaf.y0);
        }
    }

    #[test]
    fn padded_leaves_never_overlap() {
        let h = laid_out(1.0, true);
        let leaves: Vec<_> = h.leaves().collect();
        for (i, a) in leaves.iter().enumerate() {
            for b in &leaves[i + 1..] {
                let w = a.x1.min(b.x1) - a.x0.max(b.x0);
                let hgt = a.y1.min(b.y1) - a.y0.max(b.y0);
                assert!(w <= 0.0 || hgt <= 0.0, "{} overlaps {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn groups_contain_their_children() {
        let h = laid_out(1.0, true);
        for id in h.each_before() {
            let parent = h.node(id);
            for &c in h.children(id) {
                let child = h.node(c);
                assert!(child.x0 >= parent.x0 && child.x1 <= parent.x1);
                assert!(child.y0 >= parent.y0 && child.y1 <= parent.y1);
            }
        }
    }

    #[test]
    fn zero_valued_leaves_collapse_without_nan() {
        let raw: RawNode = serde_json::from_value(json!({
            "name": "root",
            "children": [
                { "name": "big", "category": "c", "value": "10" },
                { "name": "nothing", "category": "c", "value": "0" }
            ]
        }))
        .unwrap();
        let mut h = Hierarchy::from_raw(&raw);
        TreemapLayout::new(100.0, 50.0).padding(1.0).round(true).apply(&mut h);
        for leaf in h.leaves() {
            assert!(leaf.x0.is_finite() && leaf.x1.is_finite());
            assert!(leaf.y0.is_finite() && leaf.y1.is_finite());
        }
        let nothing = h.leaves().find(|l| l.name == "nothing").unwrap();
        assert_eq!(nothing.width() * nothing.height(), 0.0);
    }
}
