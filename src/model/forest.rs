use serde::{Deserialize, Serialize};

use crate::math::vector::{add_assign, div_assign};
use crate::prelude::*;

/// Averaging ensemble of regression trees.
#[derive(Debug, Serialize, Deserialize)]
pub struct Forest {
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl Forest {
    pub fn n_outputs(&self) -> usize {
        self.trees
            .first()
            .and_then(|tree| tree.value.first())
            .map_or(0, Vec::len)
    }

    pub fn validate(&self) -> Result {
        if self.trees.is_empty() {
            bail!("the forest has no trees");
        }
        let n_outputs = self.n_outputs();
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, n_outputs)
                .with_context(|| format!("tree #{} is invalid", i))?;
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        let mut sum = vec![0.0; self.n_outputs()];
        for tree in &self.trees {
            add_assign(&mut sum, tree.predict(x));
        }
        div_assign(&mut sum, self.trees.len() as f64);
        sum
    }
}

/// Binary regression tree in the flat parallel-array layout.
///
/// Node `0` is the root. A node is a leaf when its feature or its left child is negative.
#[derive(Debug, Serialize, Deserialize)]
pub struct Tree {
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,

    /// Per-node output values, one per model output.
    pub value: Vec<Vec<f64>>,
}

impl Tree {
    #[cfg(test)]
    pub fn leaf(value: Vec<f64>) -> Self {
        Self {
            feature: vec![-2],
            threshold: vec![-2.0],
            children_left: vec![-1],
            children_right: vec![-1],
            value: vec![value],
        }
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.feature[node] < 0 || self.children_left[node] < 0
    }

    /// Children always come after their parent, so the traversal terminates.
    fn validate(&self, n_features: usize, n_outputs: usize) -> Result {
        let n_nodes = self.feature.len();
        if n_nodes == 0 {
            bail!("the tree is empty");
        }
        let lengths = [
            self.threshold.len(),
            self.children_left.len(),
            self.children_right.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|&len| len != n_nodes) {
            bail!("node arrays have different lengths");
        }
        for node in 0..n_nodes {
            if self.value[node].len() != n_outputs {
                bail!("node #{} has {} values, expected {}", node, self.value[node].len(), n_outputs);
            }
            if self.is_leaf(node) {
                continue;
            }
            if self.feature[node] as usize >= n_features {
                bail!("node #{} splits on feature #{} of {}", node, self.feature[node], n_features);
            }
            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child as usize >= n_nodes {
                    bail!("node #{} has an invalid child #{}", node, child);
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> &[f64] {
        let mut node = 0;
        while !self.is_leaf(node) {
            node = if x[self.feature[node] as usize] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}
