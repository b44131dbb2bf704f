mod common;

use common::synthetic_image::{shifted_pair, texture, two_region_pair, uniform};
use lbp_stereo::io::array_to_gray;
use lbp_stereo::{compute_disp, BpParams, LoopyBp, Slot, StereoError};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn identical_uniform_images_decode_to_zero() {
    init_log();
    let img = uniform(40, 36, 128);
    let params = BpParams::default().with_iterations(3);
    let mut bp = LoopyBp::new(img.view(), img.view(), params).unwrap();
    let energies = bp.run();
    assert_eq!(energies, vec![0, 0, 0]);
    let labels = bp.grid().best_labels().unwrap();
    assert!(labels.iter().all(|&l| l == 0));
}

#[test]
fn constant_shift_is_recovered_everywhere() {
    init_log();
    let shift = 3;
    let (left, right) = shifted_pair(48, 40, shift);
    let params = BpParams::default().with_iterations(2);
    let mut bp = LoopyBp::new(left.view(), right.view(), params).unwrap();
    let energies = bp.run();
    assert_eq!(energies, vec![0, 0]);

    let grid = bp.grid();
    for y in 16..24 {
        for x in 16..32 {
            assert_eq!(grid.message(x, y, Slot::Data)[shift], 0);
            assert_eq!(grid.best_label(x, y), Some(shift), "pixel ({x}, {y})");
        }
    }
    let disparity = bp.disparity().unwrap();
    assert_eq!(disparity[(20, 20)], shift as u8);
    assert_eq!(disparity[(0, 0)], 0);
}

#[test]
fn two_regions_keep_their_own_disparity() {
    init_log();
    let (near, far, split) = (2, 6, 36);
    let (left, right) = two_region_pair(72, 40, split, near, far);
    let params = BpParams::default().with_iterations(5);
    let mut bp = LoopyBp::new(left.view(), right.view(), params).unwrap();
    bp.run();

    let disparity = bp.disparity().unwrap();
    for y in 16..24 {
        for x in 16..split - 6 {
            assert_eq!(disparity[(y, x)] as usize, near, "near side ({x}, {y})");
        }
        for x in split + (far - near) + 6..56 {
            assert_eq!(disparity[(y, x)] as usize, far, "far side ({x}, {y})");
        }
    }
}

#[test]
fn propagation_lowers_energy_below_winner_take_all() {
    init_log();
    let (left, right) = two_region_pair(72, 40, 36, 2, 6);
    let mut wta = LoopyBp::new(left.view(), right.view(), BpParams::default()).unwrap();
    let data_only = wta.decode();

    let params = BpParams::default().with_iterations(10);
    let mut bp = LoopyBp::new(left.view(), right.view(), params).unwrap();
    let energies = bp.run();
    assert_eq!(energies.len(), 10);
    assert!(
        *energies.last().unwrap() < data_only,
        "final energy {:?} not below data-only energy {data_only}",
        energies.last()
    );
}

#[test]
fn single_label_is_trivial() {
    init_log();
    let left = texture(20, 20, 1);
    let right = texture(20, 20, 2);
    let params = BpParams::with_labels(1).with_iterations(4);
    let mut bp = LoopyBp::new(left.view(), right.view(), params).unwrap();
    let energies = bp.run();
    assert_eq!(energies.len(), 4);
    let grid = bp.grid();
    for y in 0..20 {
        for x in 0..20 {
            assert_eq!(grid.best_label(x, y), Some(0));
            for slot in Slot::NEIGHBORS {
                assert_eq!(grid.message(x, y, slot)[0], 0);
            }
        }
    }
    // only the data term remains
    let data: u64 = (0..20)
        .flat_map(|y| (0..20).map(move |x| (x, y)))
        .map(|(x, y)| grid.message(x, y, Slot::Data)[0] as u64)
        .sum();
    assert!(energies.iter().all(|&e| e == data));
}

#[test]
fn parallel_and_sequential_runs_agree() {
    init_log();
    let (left, right) = two_region_pair(60, 40, 30, 1, 4);
    let params = BpParams::default().with_iterations(3);
    let mut par = LoopyBp::new(left.view(), right.view(), params.clone()).unwrap();
    let mut seq =
        LoopyBp::new(left.view(), right.view(), params.with_parallel(false)).unwrap();
    assert_eq!(par.run(), seq.run());
    assert_eq!(par.grid(), seq.grid());
}

#[test]
fn labels_stay_in_range() {
    init_log();
    let left = texture(40, 34, 3);
    let right = texture(40, 34, 4);
    let params = BpParams::default().with_iterations(2);
    let mut bp = LoopyBp::new(left.view(), right.view(), params).unwrap();
    bp.run();
    assert!(bp
        .grid()
        .best_labels()
        .unwrap()
        .iter()
        .all(|&l| (l as usize) < 16));
}

#[test]
fn compute_disp_returns_raw_labels() {
    init_log();
    let (left, right) = shifted_pair(48, 40, 5);
    let params = BpParams::default().with_iterations(2);
    let out = compute_disp(&array_to_gray(left.view()), &array_to_gray(right.view()), &params)
        .unwrap();
    assert_eq!((out.width(), out.height()), (48, 40));
    assert_eq!(out.get_pixel(20, 20).0, [5]);
    assert_eq!(out.get_pixel(0, 0).0, [0]);
}

#[test]
fn undersized_images_are_rejected() {
    let img = texture(32, 40, 5);
    let err = LoopyBp::new(img.view(), img.view(), BpParams::default()).unwrap_err();
    assert!(matches!(err, StereoError::DimensionTooSmall { min: 33, .. }));
}

#[test]
fn border_narrower_than_labels_is_rejected() {
    let img = texture(40, 40, 6);
    let params = BpParams {
        border: 4,
        ..BpParams::default()
    };
    let err = LoopyBp::new(img.view(), img.view(), params).unwrap_err();
    assert!(matches!(err, StereoError::InvalidParams(_)));
    assert!(err.is_invalid_input());
}

#[test]
fn normalization_leaves_labels_and_energies_unchanged() {
    init_log();
    let (left, right) = two_region_pair(60, 40, 30, 1, 4);
    let params = BpParams::default().with_iterations(2);
    let mut shifted = LoopyBp::new(left.view(), right.view(), params.clone()).unwrap();
    let mut raw =
        LoopyBp::new(left.view(), right.view(), params.with_normalize(false)).unwrap();
    assert_eq!(shifted.run(), raw.run());
    assert_eq!(shifted.grid().best_labels(), raw.grid().best_labels());
}

#[test]
fn raw_messages_survive_the_full_schedule() {
    init_log();
    let left = texture(48, 40, 1);
    let right = texture(48, 40, 2);
    let params = BpParams::default().with_normalize(false);
    assert_eq!(params.iterations, 40);
    let mut bp = LoopyBp::new(left.view(), right.view(), params).unwrap();
    let energies = bp.run();
    assert_eq!(energies.len(), 40);
    let labels = bp.grid().best_labels().unwrap();
    assert!(labels.iter().all(|&l| (l as usize) < 16));
    assert!(bp.disparity().is_some());
}
