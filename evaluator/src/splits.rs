use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A single fold: row indices held out for testing, and the rest used
/// for training.
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified k-fold split with a fixed seed (§4.7, §8): positive and
/// negative rows are shuffled and partitioned independently so every
/// fold keeps roughly the same class ratio as the full set, then
/// reproducibly combined — same `(n, k, seed)` always yields the same
/// partition.
pub fn stratified_kfold(targets: &Array1<f64>, k: usize, seed: u64) -> Vec<Fold> {
    assert!(k >= 2, "k-fold cross-validation requires at least 2 folds");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut positives: Vec<usize> = targets.iter().enumerate().filter(|(_, &t)| t > 0.5).map(|(i, _)| i).collect();
    let mut negatives: Vec<usize> = targets.iter().enumerate().filter(|(_, &t)| t <= 0.5).map(|(i, _)| i).collect();
    positives.shuffle(&mut rng);
    negatives.shuffle(&mut rng);

    let pos_buckets = bucket(&positives, k);
    let neg_buckets = bucket(&negatives, k);

    (0..k)
        .map(|fold| {
            let mut test: Vec<usize> = pos_buckets[fold].clone();
            test.extend(neg_buckets[fold].iter().copied());
            test.sort_unstable();

            let mut train: Vec<usize> = (0..k)
                .filter(|&i| i != fold)
                .flat_map(|i| pos_buckets[i].iter().chain(neg_buckets[i].iter()).copied())
                .collect();
            train.sort_unstable();

            Fold { train, test }
        })
        .collect()
}

fn bucket(rows: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); k];
    for (i, &row) in rows.iter().enumerate() {
        buckets[i % k].push(row);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_appears_in_exactly_one_test_fold() {
        let targets = Array1::from_vec(vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let folds = stratified_kfold(&targets, 5, 7);
        let mut all_test: Vec<usize> = folds.iter().flat_map(|f| f.test.iter().copied()).collect();
        all_test.sort_unstable();
        assert_eq!(all_test, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_is_reproducible() {
        let targets = Array1::from_vec(vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let a = stratified_kfold(&targets, 3, 42);
        let b = stratified_kfold(&targets, 3, 42);
        for (fa, fb) in a.iter().zip(b.iter()) {
            assert_eq!(fa.test, fb.test);
        }
    }

    #[test]
    fn train_and_test_rows_are_disjoint_within_a_fold() {
        let targets = Array1::from_vec(vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let folds = stratified_kfold(&targets, 4, 1);
        for fold in &folds {
            assert!(fold.train.iter().all(|r| !fold.test.contains(r)));
        }
    }
}
