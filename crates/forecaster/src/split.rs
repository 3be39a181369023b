use crate::error::ForecastError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Rows needed on the training side for the scaler and the forest to be meaningful.
pub const MIN_TRAIN_ROWS: usize = 2;

/// Row indices on each side of a train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..n_rows` with a seeded RNG and holds out
/// `ceil(n_rows * test_size)` rows for testing.
pub fn train_test_split(n_rows: usize, test_size: f64, seed: u64) -> Result<Split, ForecastError> {
    let n_test = (n_rows as f64 * test_size).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train < MIN_TRAIN_ROWS {
        return Err(ForecastError::NotEnoughData(format!(
            "{n_rows} complete rows cannot be split into at least {MIN_TRAIN_ROWS} training rows and 1 test row (test_size = {test_size})"
        )));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(Split {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_and_coverage() {
        let split = train_test_split(29, 0.2, 42).unwrap();

        assert_eq!(split.test.len(), 6);
        assert_eq!(split.train.len(), 23);
        let all: HashSet<usize> = split.train.iter().chain(&split.test).copied().collect();
        assert_eq!(all, (0..29).collect());
    }

    #[test]
    fn test_split_is_reproducible() {
        assert_eq!(
            train_test_split(30, 0.2, 7).unwrap(),
            train_test_split(30, 0.2, 7).unwrap()
        );
    }

    #[test]
    fn test_too_few_rows() {
        assert!(matches!(
            train_test_split(2, 0.2, 42),
            Err(ForecastError::NotEnoughData(_))
        ));
        assert!(train_test_split(3, 0.2, 42).is_ok());
        assert!(train_test_split(0, 0.2, 42).is_err());
    }
}
