//! Cross-validation integration tests.

mod common;

use approx::assert_relative_eq;
use common::{generate_cosine_two_factor_data, generate_low_rank_data, generate_two_factor_data};
use faer::Mat;
use pls_rs::core::{parse_latent_variables, CrossValidationOptions, PreprocessMode};
use pls_rs::evaluation::{crossval_pls, crossval_pls_with_rng, FoldPartition};
use pls_rs::solvers::PlsError;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Shape and bookkeeping
// ============================================================================

#[test]
fn test_cumpress_is_row_sum_of_press() {
    let (x, y) = generate_low_rank_data(40, 6, 3, 2, 0.1, 1);
    let options = CrossValidationOptions::builder()
        .lvs(&[1, 4, 0, 2])
        .blocks(8)
        .seed(10)
        .build()
        .unwrap();

    let result = crossval_pls(&x, &y, &options).unwrap();

    assert_eq!(result.cumpress.nrows(), 5);
    assert_eq!(result.press.nrows(), 5);
    assert_eq!(result.press.ncols(), 3);
    assert_eq!(result.lvs, vec![0, 1, 2, 4]);
    for lv in 0..5 {
        let row_sum: f64 = (0..3).map(|k| result.press[(lv, k)]).sum();
        assert_relative_eq!(result.cumpress[lv], row_sum);
    }
    assert_eq!(result.cumpress_for(3), None);
}

#[test]
fn test_latent_variables_from_floats() {
    let (x, y) = generate_two_factor_data(30, 4, 0.05, 2);
    let options = CrossValidationOptions {
        lvs: Some(parse_latent_variables(&[2.0, 0.0, 1.0]).unwrap()),
        blocks: Some(5),
        seed: Some(3),
        ..Default::default()
    };

    let result = crossval_pls(&x, &y, &options).unwrap();
    assert_eq!(result.lvs, vec![0, 1, 2]);
    assert_eq!(result.cumpress.nrows(), 3);

    assert!(parse_latent_variables(&[-1.0]).is_err());
    assert!(parse_latent_variables(&[0.5]).is_err());
}

// ============================================================================
// Numerical properties
// ============================================================================

#[test]
fn test_zero_lv_press_matches_training_mean_residuals() {
    let n = 23;
    let blocks = 5;
    let (x, y) = generate_low_rank_data(n, 4, 2, 1, 0.2, 5);
    let options = CrossValidationOptions::builder()
        .lvs(&[0])
        .blocks(blocks)
        .prep_y(PreprocessMode::MeanCenter)
        .build()
        .unwrap();

    let result = crossval_pls_with_rng(&x, &y, &options, &mut StdRng::seed_from_u64(17)).unwrap();

    // Rebuild the same folds from the same seed
    let partition = FoldPartition::random(n, blocks, &mut StdRng::seed_from_u64(17)).unwrap();
    for k in 0..2 {
        let mut expected = 0.0;
        for fold in 0..blocks {
            let train = partition.training(fold);
            let mean: f64 = train.iter().map(|&i| y[(i, k)]).sum::<f64>() / train.len() as f64;
            for &i in partition.fold(fold) {
                expected += (y[(i, k)] - mean).powi(2);
            }
        }
        assert_relative_eq!(result.press[(0, k)], expected, max_relative = 1e-10);
    }
}

#[test]
fn test_zero_lv_press_with_autoscaled_response() {
    let n = 18;
    let blocks = 6;
    let (x, y) = generate_low_rank_data(n, 3, 1, 1, 0.2, 6);
    let options = CrossValidationOptions::builder()
        .lvs(&[0, 1])
        .blocks(blocks)
        .build()
        .unwrap();

    let result = crossval_pls_with_rng(&x, &y, &options, &mut StdRng::seed_from_u64(4)).unwrap();

    let partition = FoldPartition::random(n, blocks, &mut StdRng::seed_from_u64(4)).unwrap();
    let mut expected = 0.0;
    for fold in 0..blocks {
        let train = partition.training(fold);
        let m = train.len() as f64;
        let mean: f64 = train.iter().map(|&i| y[(i, 0)]).sum::<f64>() / m;
        let var: f64 = train.iter().map(|&i| (y[(i, 0)] - mean).powi(2)).sum::<f64>() / m;
        for &i in partition.fold(fold) {
            expected += (y[(i, 0)] - mean).powi(2) / var;
        }
    }
    assert_relative_eq!(result.cumpress[0], expected, max_relative = 1e-10);
}

#[test]
fn test_low_rank_relationship_beats_mean_model() {
    let (x, y) = generate_low_rank_data(60, 8, 3, 2, 0.01, 12);
    let options = CrossValidationOptions::builder()
        .lvs(&[0, 1, 2, 3, 4, 5, 6, 7, 8])
        .blocks(6)
        .seed(8)
        .build()
        .unwrap();

    let result = crossval_pls(&x, &y, &options).unwrap();

    let best = result.cumpress[8];
    assert!(best < 0.05 * result.cumpress[0]);
    assert!(result.cumpress[2] < result.cumpress[0]);
    assert!(!result.is_degraded());
}

#[test]
fn test_fixed_rng_is_bit_identical() {
    let (x, y) = generate_low_rank_data(30, 5, 2, 2, 0.1, 7);
    let options = CrossValidationOptions::builder()
        .lvs(&[0, 1, 2, 3])
        .blocks(7)
        .build()
        .unwrap();

    let a = crossval_pls_with_rng(&x, &y, &options, &mut StdRng::seed_from_u64(123)).unwrap();
    let b = crossval_pls_with_rng(&x, &y, &options, &mut StdRng::seed_from_u64(123)).unwrap();

    for lv in 0..4 {
        assert_eq!(a.cumpress[lv].to_bits(), b.cumpress[lv].to_bits());
        for k in 0..2 {
            assert_eq!(a.press[(lv, k)].to_bits(), b.press[(lv, k)].to_bits());
        }
    }
}

#[test]
fn test_rank_deficient_training_data_is_reported() {
    let (base, y) = generate_two_factor_data(20, 2, 0.05, 14);
    // Third column duplicates the first
    let x = Mat::from_fn(20, 3, |i, j| base[(i, j % 2)]);
    let options = CrossValidationOptions::builder()
        .lvs(&[0, 1, 2, 3, 4])
        .blocks(4)
        .seed(1)
        .build()
        .unwrap();

    let result = crossval_pls(&x, &y, &options).unwrap();

    assert!(result.is_degraded());
    assert!(result.fold_components.iter().all(|&a| a <= 2));
    assert_eq!(result.cumpress[3], result.cumpress[2]);
    assert_eq!(result.cumpress[4], result.cumpress[2]);
}

#[test]
fn test_small_units_do_not_change_relative_press() {
    let (x, y) = generate_two_factor_data(40, 5, 0.05, 3);
    let options = CrossValidationOptions::builder()
        .lvs(&[0, 1, 2])
        .blocks(5)
        .prep_x(PreprocessMode::MeanCenter)
        .prep_y(PreprocessMode::MeanCenter)
        .build()
        .unwrap();

    let reference = crossval_pls_with_rng(&x, &y, &options, &mut StdRng::seed_from_u64(6)).unwrap();
    let ratio = reference.cumpress[2] / reference.cumpress[0];
    assert!(ratio < 0.5);

    let scale = 1e-6;
    let xs = Mat::from_fn(40, 5, |i, j| x[(i, j)] * scale);
    let ys = Mat::from_fn(40, 2, |i, k| y[(i, k)] * scale);
    let scaled = crossval_pls_with_rng(&xs, &ys, &options, &mut StdRng::seed_from_u64(6)).unwrap();

    assert!(!scaled.is_degraded());
    assert_relative_eq!(
        scaled.cumpress[2] / scaled.cumpress[0],
        ratio,
        max_relative = 1e-8
    );
}

// ============================================================================
// Fold boundaries
// ============================================================================

#[test]
fn test_leave_one_out_folds() {
    let partition = FoldPartition::random(12, 12, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(partition.n_folds(), 12);
    assert!(partition.sizes().iter().all(|&s| s == 1));

    let (x, y) = generate_two_factor_data(12, 3, 0.1, 3);
    let options = CrossValidationOptions::builder().lvs(&[0, 1]).seed(0).build().unwrap();
    let result = crossval_pls(&x, &y, &options).unwrap();
    assert_eq!(result.blocks, 12);
    assert_eq!(result.fold_components.len(), 12);
}

#[test]
fn test_three_blocks_of_ten_rows() {
    let partition = FoldPartition::random(10, 3, &mut StdRng::seed_from_u64(9)).unwrap();
    let mut sizes = partition.sizes();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3, 4]);
}

#[test]
fn test_block_count_must_fit_sample_count() {
    let (x, y) = generate_two_factor_data(10, 3, 0.1, 3);

    for blocks in [0, 2, 11, 20] {
        let options = CrossValidationOptions::builder().blocks(blocks).build().unwrap();
        assert!(matches!(
            crossval_pls(&x, &y, &options),
            Err(PlsError::InvalidBlocks { .. })
        ));
    }

    let y_short = Mat::zeros(8, 2);
    assert!(matches!(
        crossval_pls(&x, &y_short, &CrossValidationOptions::default()),
        Err(PlsError::DimensionMismatch { .. })
    ));
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_two_factor_scenario() {
    let (x, y) = generate_cosine_two_factor_data(100, 10, 0.01, 2024);
    let options = CrossValidationOptions::builder()
        .lvs(&[0, 1, 2, 3, 4, 5])
        .blocks(10)
        .prep_x(PreprocessMode::Autoscale)
        .prep_y(PreprocessMode::Autoscale)
        .seed(31)
        .build()
        .unwrap();

    let result = crossval_pls(&x, &y, &options).unwrap();
    let press = &result.cumpress;

    assert_eq!(press.nrows(), 6);
    assert!(press[1] < press[0]);
    assert!(press[2] < press[1]);
    assert!(press[2] < 0.1 * press[0]);

    // Past two components the curve flattens: no material increase and
    // most of the achievable reduction is already in place
    let floor = (0..6).map(|lv| press[lv]).fold(f64::INFINITY, f64::min);
    for lv in 3..6 {
        assert!(press[lv] < 1.5 * press[2]);
    }
    assert!(press[0] - press[2] > 0.9 * (press[0] - floor));
}
