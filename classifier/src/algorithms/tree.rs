use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::capability::ClassifierCapability;
use crate::error::ClassifierError;

const MAX_DEPTH: usize = 6;
const MIN_SAMPLES_SPLIT: usize = 4;
const FOREST_SIZE: usize = 25;
const FOREST_SEED: u64 = 1337;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf { probability: f64 },
    Split { feature: usize, threshold: f64, left: Box<Node>, right: Box<Node> },
}

fn gini(targets: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let positive = targets.iter().filter(|&&t| t > 0.5).count() as f64;
    let n = targets.len() as f64;
    let p = positive / n;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

fn leaf_probability(targets: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.5;
    }
    targets.iter().filter(|&&t| t > 0.5).count() as f64 / targets.len() as f64
}

fn build_node(records: &Array2<f64>, rows: &[usize], targets: &[f64], depth: usize) -> Node {
    if depth >= MAX_DEPTH || rows.len() < MIN_SAMPLES_SPLIT || gini(targets) < 1e-6 {
        return Node::Leaf { probability: leaf_probability(targets) };
    }

    let width = records.ncols();
    let mut best: Option<(usize, f64, f64)> = None; // feature, threshold, weighted gini

    for feature in 0..width {
        let mut values: Vec<f64> = rows.iter().map(|&r| records[[r, feature]]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values.dedup();
        for window in values.windows(2) {
            let threshold = (window[0] + window[1]) / 2.0;
            let (left_targets, right_targets): (Vec<f64>, Vec<f64>) = rows
                .iter()
                .map(|&r| (records[[r, feature]], targets[r]))
                .fold((vec![], vec![]), |(mut l, mut r), (v, t)| {
                    if v <= threshold {
                        l.push(t);
                    } else {
                        r.push(t);
                    }
                    (l, r)
                });
            if left_targets.is_empty() || right_targets.is_empty() {
                continue;
            }
            let n = rows.len() as f64;
            let weighted = gini(&left_targets) * left_targets.len() as f64 / n
                + gini(&right_targets) * right_targets.len() as f64 / n;
            if best.as_ref().map(|(_, _, g)| weighted < *g).unwrap_or(true) {
                best = Some((feature, threshold, weighted));
            }
        }
    }

    match best {
        None => Node::Leaf { probability: leaf_probability(targets) },
        Some((feature, threshold, _)) => {
            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
                rows.iter().partition(|&&r| records[[r, feature]] <= threshold);
            let left_targets: Vec<f64> = left_rows.iter().map(|&r| targets[r]).collect();
            let right_targets: Vec<f64> = right_rows.iter().map(|&r| targets[r]).collect();
            Node::Split {
                feature,
                threshold,
                left: Box::new(build_node(records, &left_rows, &left_targets, depth + 1)),
                right: Box::new(build_node(records, &right_rows, &right_targets, depth + 1)),
            }
        }
    }
}

fn score_row(node: &Node, row: ndarray::ArrayView1<f64>) -> f64 {
    match node {
        Node::Leaf { probability } => *probability,
        Node::Split { feature, threshold, left, right } => {
            if row[*feature] <= *threshold {
                score_row(left, row)
            } else {
                score_row(right, row)
            }
        }
    }
}

/// Bagged ensemble of CART-style decision trees (bootstrap resampling +
/// majority-vote averaging), mirroring `sklearn.ensemble.RandomForestClassifier`
/// which backs the original `RandomForestClassifier` wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomForestModel {
    trees: Vec<Node>,
    width: usize,
}

impl ClassifierCapability for RandomForestModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        let n = records.nrows();
        if n == 0 {
            return Err(ClassifierError::Backend("cannot fit on an empty training set".to_string()));
        }
        let targets: Vec<f64> = targets.to_vec();
        let mut rng = StdRng::seed_from_u64(FOREST_SEED);

        let mut trees = Vec::with_capacity(FOREST_SIZE);
        for _ in 0..FOREST_SIZE {
            let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(build_node(records, &rows, &targets, 0));
        }

        self.trees = trees;
        self.width = records.ncols();
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted);
        }
        Ok(records
            .axis_iter(Axis(0))
            .map(|row| {
                let sum: f64 = self.trees.iter().map(|tree| score_row(tree, row)).sum();
                (sum / self.trees.len() as f64) as f32
            })
            .collect())
    }

    fn expected_width(&self) -> Option<usize> {
        if self.trees.is_empty() {
            None
        } else {
            Some(self.width)
        }
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forest_separates_well_apart_clusters() {
        let records = Array2::from_shape_vec((6, 1), vec![0.0, 0.1, 0.2, 5.0, 5.1, 5.2]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let mut model = RandomForestModel::default();
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds[0] < 0.5);
        assert!(preds[5] > 0.5);
    }
}
