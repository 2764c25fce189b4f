use crate::features::FEATURE_COUNT;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Split {
        feature: usize,
        threshold: f32,
        default_left: bool,
        left: usize,
        right: usize,
    },
    Leaf(f32),
}

/// A single regression tree in array form, root at index 0.
///
/// Children always sit at a higher index than their parent and split features
/// are below [`FEATURE_COUNT`]; both are checked when the tree is built from an
/// artifact, so traversal cannot loop or index out of bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks from the root to a leaf and returns its value.
    ///
    /// A row goes left when its value is strictly below the threshold; NaN
    /// follows the node's default direction.
    pub fn predict(&self, row: &[f32; FEATURE_COUNT]) -> f32 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    default_left,
                    left,
                    right,
                } => {
                    let x = row[feature];
                    let go_left = if x.is_nan() { default_left } else { x < threshold };
                    idx = if go_left { left } else { right };
                }
            }
        }
    }
}
