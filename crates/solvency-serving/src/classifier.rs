//! Fitted decision-tree classifier.
//!
//! The tree is stored in array form: node 0 is the root, split nodes point at
//! their children by index, and leaves carry per-class weights. Every child
//! index must be strictly greater than its parent's, which rules out cycles
//! and bounds traversal by the node count.

use serde::{Deserialize, Serialize};
use solvency_core::Label;

use crate::error::{ServingError, ServingResult};

/// A fitted classifier, tagged by `"type"` in the artifact file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// A single binary decision tree.
    DecisionTree(DecisionTree),
}

impl ClassifierArtifact {
    /// Feature names in fitted order.
    pub fn feature_names(&self) -> &[String] {
        match self {
            ClassifierArtifact::DecisionTree(t) => t.feature_names(),
        }
    }

    /// Short name of the model family.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierArtifact::DecisionTree(_) => "decision_tree",
        }
    }

    /// Classifies a scaled vector in fitted order.
    pub fn decide(&self, scaled: &[f64]) -> Label {
        match self {
            ClassifierArtifact::DecisionTree(t) => t.decide(scaled),
        }
    }

    /// Node indices visited while classifying `scaled`, root first.
    pub fn decision_path(&self, scaled: &[f64]) -> Vec<usize> {
        match self {
            ClassifierArtifact::DecisionTree(t) => t.decision_path(scaled),
        }
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Goes `left` when `x[feature]`, rounded to `f32`, is `<= threshold`,
    /// otherwise `right`. The threshold itself is compared as `f64`.
    Split {
        /// Feature index in fitted order.
        feature: usize,
        /// Decision threshold.
        threshold: f64,
        /// Child for values at or below the threshold.
        left: usize,
        /// Child for values above the threshold.
        right: usize,
    },
    /// Terminal node with one weight per class.
    Leaf {
        /// Class weights (sample counts or probabilities).
        value: Vec<f64>,
    },
}

/// A validated binary decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DecisionTreeSpec", into = "DecisionTreeSpec")]
pub struct DecisionTree {
    feature_names: Vec<String>,
    classes: Vec<Label>,
    nodes: Vec<TreeNode>,
}

/// On-disk form of [`DecisionTree`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeSpec {
    /// Feature names in fitted order.
    pub feature_names: Vec<String>,
    /// Class labels, indexed like each leaf's `value`.
    pub classes: Vec<Label>,
    /// Nodes, root first.
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Builds a validated tree.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::ArtifactLoadError`] if the tree is empty, a
    /// split references an out-of-range feature or a child that does not come
    /// after it, a threshold is non-finite, classes repeat, or a leaf's
    /// weights do not line up with the classes.
    pub fn new(
        feature_names: Vec<String>,
        classes: Vec<Label>,
        nodes: Vec<TreeNode>,
    ) -> ServingResult<Self> {
        if feature_names.is_empty() {
            return Err(ServingError::artifact_load("tree has no features"));
        }
        if nodes.is_empty() {
            return Err(ServingError::artifact_load("tree has no nodes"));
        }
        if classes.is_empty() {
            return Err(ServingError::artifact_load("tree has no classes"));
        }
        if classes.len() == 2 && classes[0] == classes[1] {
            return Err(ServingError::artifact_load("tree classes repeat"));
        }
        if classes.len() > 2 {
            return Err(ServingError::artifact_load(format!(
                "binary tree expects at most 2 classes, got {}",
                classes.len()
            )));
        }

        for (idx, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= feature_names.len() {
                        return Err(ServingError::artifact_load(format!(
                            "node {} splits on feature {} of {}",
                            idx,
                            feature,
                            feature_names.len()
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ServingError::artifact_load(format!(
                            "node {} has non-finite threshold",
                            idx
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= nodes.len() {
                            return Err(ServingError::artifact_load(format!(
                                "node {} has invalid child {} (tree has {} nodes)",
                                idx,
                                child,
                                nodes.len()
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != classes.len() {
                        return Err(ServingError::artifact_load(format!(
                            "leaf {} has {} weights for {} classes",
                            idx,
                            value.len(),
                            classes.len()
                        )));
                    }
                    if value.iter().any(|v| !v.is_finite()) {
                        return Err(ServingError::artifact_load(format!(
                            "leaf {} has non-finite weight",
                            idx
                        )));
                    }
                }
            }
        }

        Ok(Self {
            feature_names,
            classes,
            nodes,
        })
    }

    /// Feature names in fitted order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Class labels.
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// All nodes, root first.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let TreeNode::Split { left, right, .. } = &self.nodes[idx] {
                stack.push((*left, depth + 1));
                stack.push((*right, depth + 1));
            }
        }
        max_depth
    }

    /// Classifies a scaled vector in fitted order.
    pub fn decide(&self, scaled: &[f64]) -> Label {
        let weights = self.walk(scaled, |_| {});
        self.leaf_label(weights)
    }

    /// Node indices visited while classifying `scaled`, root first.
    pub fn decision_path(&self, scaled: &[f64]) -> Vec<usize> {
        let mut path = Vec::new();
        self.walk(scaled, |idx| path.push(idx));
        path
    }

    fn walk(&self, scaled: &[f64], mut visit: impl FnMut(usize)) -> &[f64] {
        debug_assert_eq!(scaled.len(), self.feature_names.len());
        let mut idx = 0;
        loop {
            visit(idx);
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if f64::from(scaled[*feature] as f32) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    fn leaf_label(&self, value: &[f64]) -> Label {
        let mut best = 0;
        for (i, w) in value.iter().enumerate().skip(1) {
            if *w > value[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

impl TryFrom<DecisionTreeSpec> for DecisionTree {
    type Error = ServingError;

    fn try_from(spec: DecisionTreeSpec) -> ServingResult<Self> {
        Self::new(spec.feature_names, spec.classes, spec.nodes)
    }
}

impl From<DecisionTree> for DecisionTreeSpec {
    fn from(t: DecisionTree) -> Self {
        Self {
            feature_names: t.feature_names,
            classes: t.classes,
            nodes: t.nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    fn leaf(a: f64, b: f64) -> TreeNode {
        TreeNode::Leaf { value: vec![a, b] }
    }

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    /// f0 <= 0 -> healthy; otherwise f1 <= 1 -> bankrupt, else healthy.
    fn sample_tree() -> DecisionTree {
        DecisionTree::new(
            names(2),
            vec![Label::NotBankrupt, Label::Bankrupt],
            vec![
                split(0, 0.0, 1, 2),
                leaf(9.0, 1.0),
                split(1, 1.0, 3, 4),
                leaf(2.0, 8.0),
                leaf(5.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_decide() {
        let tree = sample_tree();
        assert_eq!(tree.decide(&[-1.0, 0.0]), Label::NotBankrupt);
        assert_eq!(tree.decide(&[0.0, 5.0]), Label::NotBankrupt);
        assert_eq!(tree.decide(&[0.5, 1.0]), Label::Bankrupt);
        assert_eq!(tree.decide(&[0.5, 1.5]), Label::NotBankrupt);
    }

    #[test]
    fn test_decision_path_and_shape() {
        let tree = sample_tree();
        assert_eq!(tree.decision_path(&[0.5, 1.0]), vec![0, 2, 3]);
        assert_eq!(tree.decision_path(&[-0.5, 1.0]), vec![0, 1]);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_split_compares_in_single_precision() {
        // fitted thresholds sit midway between two observed f32 values
        let threshold = (f64::from(0.1f32) + f64::from(0.2f32)) / 2.0;
        let tree = DecisionTree::new(
            names(1),
            vec![Label::NotBankrupt, Label::Bankrupt],
            vec![split(0, threshold, 1, 2), leaf(1.0, 0.0), leaf(0.0, 1.0)],
        )
        .unwrap();

        // 0.15 < threshold in f64, but f32(0.15) > threshold
        assert!(0.15 < threshold);
        assert!(f64::from(0.15f32) > threshold);
        assert_eq!(tree.decide(&[0.15]), Label::Bankrupt);
        assert_eq!(tree.decision_path(&[0.15]), vec![0, 2]);
        assert_eq!(tree.decide(&[0.1]), Label::NotBankrupt);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let tree = DecisionTree::new(
            names(1),
            vec![Label::Bankrupt, Label::NotBankrupt],
            vec![leaf(3.0, 3.0)],
        )
        .unwrap();
        assert_eq!(tree.decide(&[0.0]), Label::Bankrupt);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_rejects_cycles_and_bad_indices() {
        let classes = vec![Label::NotBankrupt, Label::Bankrupt];

        let cyclic = vec![split(0, 0.0, 0, 1), leaf(1.0, 0.0)];
        assert!(DecisionTree::new(names(1), classes.clone(), cyclic).is_err());

        let backwards = vec![split(0, 0.0, 2, 1), split(0, 0.0, 0, 2), leaf(1.0, 0.0)];
        assert!(DecisionTree::new(names(1), classes.clone(), backwards).is_err());

        let dangling = vec![split(0, 0.0, 1, 7), leaf(1.0, 0.0)];
        assert!(DecisionTree::new(names(1), classes.clone(), dangling).is_err());

        let bad_feature = vec![split(3, 0.0, 1, 2), leaf(1.0, 0.0), leaf(0.0, 1.0)];
        assert!(DecisionTree::new(names(1), classes.clone(), bad_feature).is_err());

        let nan_threshold = vec![split(0, f64::NAN, 1, 2), leaf(1.0, 0.0), leaf(0.0, 1.0)];
        assert!(DecisionTree::new(names(1), classes.clone(), nan_threshold).is_err());

        let short_leaf = vec![TreeNode::Leaf { value: vec![1.0] }];
        assert!(DecisionTree::new(names(1), classes.clone(), short_leaf).is_err());

        assert!(DecisionTree::new(names(1), classes, vec![]).is_err());
    }

    #[test]
    fn test_rejects_bad_classes() {
        let repeated = vec![Label::Bankrupt, Label::Bankrupt];
        assert!(DecisionTree::new(names(1), repeated, vec![leaf(1.0, 0.0)]).is_err());
        assert!(DecisionTree::new(names(1), vec![], vec![leaf(1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_json_format() {
        let json = r#"{
            "type": "decision_tree",
            "feature_names": ["a", "b"],
            "classes": [0, 1],
            "nodes": [
                {"kind": "split", "feature": 1, "threshold": 0.5, "left": 1, "right": 2},
                {"kind": "leaf", "value": [10.0, 2.0]},
                {"kind": "leaf", "value": [1.0, 4.0]}
            ]
        }"#;
        let clf: ClassifierArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(clf.kind(), "decision_tree");
        assert_eq!(clf.decide(&[0.0, 0.9]), Label::Bankrupt);
        assert_eq!(clf.decide(&[0.0, 0.1]), Label::NotBankrupt);

        let out_of_domain = json.replace("[0, 1]", "[0, 2]");
        assert!(serde_json::from_str::<ClassifierArtifact>(&out_of_domain).is_err());
    }
}
