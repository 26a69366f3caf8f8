//! Directory-level behaviour of the crop pair generator

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use srprep::{CropPairParams, Error, OutputRoots, crop_pairs_for_image, generate_crop_pairs};

fn write_gradient(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    })
    .save(path)
    .unwrap();
}

fn seeded(seed: u64) -> CropPairParams {
    CropPairParams {
        seed: Some(seed),
        n_jobs: 2,
        ..CropPairParams::default()
    }
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn assert_all_square(dir: &Path, side: u32) {
    for name in sorted_names(dir) {
        let img = image::open(dir.join(&name)).unwrap();
        assert_eq!((img.width(), img.height()), (side, side), "{name}");
    }
}

// 256x256 source with defaults gives the full frame plus two crops in each root
#[test]
fn default_parameters_on_a_single_image() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_gradient(&src.path().join("img.png"), 256, 256);

    let prefix = out.path().join("train_");
    let report = generate_crop_pairs(src.path(), &prefix, &seeded(1)).unwrap();

    let lq_root = out.path().join("train_64");
    let gt_root = out.path().join("train_128");
    let expected = vec!["img.png", "img_crop_0.png", "img_crop_1.png"];
    assert_eq!(sorted_names(&lq_root), expected);
    assert_eq!(sorted_names(&gt_root), expected);
    assert_all_square(&lq_root, 64);
    assert_all_square(&gt_root, 128);
    assert_eq!(report.processed, 1);
    assert_eq!(report.files_written, 6);
}

// Images whose short side does not exceed crop_size_min only get the full frame
#[test]
fn small_images_skip_crops() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_gradient(&src.path().join("tall.png"), 128, 400);
    write_gradient(&src.path().join("big.png"), 300, 200);

    let params = CropPairParams {
        num_crops: 3,
        ..seeded(5)
    };
    let prefix = out.path().join("p");
    let report = generate_crop_pairs(src.path(), &prefix, &params).unwrap();

    let expected = vec![
        "big.png",
        "big_crop_0.png",
        "big_crop_1.png",
        "big_crop_2.png",
        "tall.png",
    ];
    assert_eq!(sorted_names(&out.path().join("p64")), expected);
    assert_eq!(sorted_names(&out.path().join("p128")), expected);
    assert_eq!(report.files_written, 10);
}

// The same seed reproduces the same crops across runs and worker counts
#[test]
fn seeded_runs_are_reproducible() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    for i in 0..4 {
        write_gradient(&src.path().join(format!("s{i}.png")), 300 + i * 20, 260);
    }

    let first = out.path().join("a_");
    let second = out.path().join("b_");
    generate_crop_pairs(src.path(), &first, &CropPairParams { n_jobs: 1, ..seeded(99) }).unwrap();
    generate_crop_pairs(src.path(), &second, &CropPairParams { n_jobs: 4, ..seeded(99) }).unwrap();

    let a_root: PathBuf = out.path().join("a_128");
    let b_root: PathBuf = out.path().join("b_128");
    let names = sorted_names(&a_root);
    assert_eq!(names.len(), 12);
    assert_eq!(names, sorted_names(&b_root));
    for name in names {
        assert_eq!(
            image::open(a_root.join(&name)).unwrap(),
            image::open(b_root.join(&name)).unwrap(),
            "{name}"
        );
    }
}

// Without an explicit filter any known image format is used and other files are skipped
#[test]
fn default_filter_accepts_any_image_format() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_gradient(&src.path().join("photo.jpg"), 160, 160);
    write_gradient(&src.path().join("scan.bmp"), 100, 90);
    fs::write(src.path().join("labels.csv"), "a,b\n").unwrap();

    let params = CropPairParams {
        num_crops: 1,
        ..seeded(3)
    };
    let report = generate_crop_pairs(src.path(), &out.path().join("o"), &params).unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        sorted_names(&out.path().join("o64")),
        vec!["photo.jpg", "photo_crop_0.jpg", "scan.bmp"]
    );
}

// Zero crops still writes the full-frame pair
#[test]
fn zero_crops_writes_full_frame_only() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = src.path().join("img.png");
    write_gradient(&input, 512, 512);

    let roots = OutputRoots::from_prefix(&out.path().join("x"), 32, 96);
    fs::create_dir_all(&roots.lq).unwrap();
    fs::create_dir_all(&roots.gt).unwrap();
    let params = CropPairParams {
        num_crops: 0,
        lq_size: 32,
        gt_size: 96,
        ..CropPairParams::default()
    };
    let written =
        crop_pairs_for_image(&input, &roots, &params, &mut StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(written, 2);
    assert_eq!(sorted_names(&roots.lq), vec!["img.png"]);
    assert_all_square(&roots.gt, 96);
}

// Invalid sizes and worker counts fail before any directory is created
#[test]
fn invalid_parameters_fail_before_writing() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_gradient(&src.path().join("img.png"), 200, 200);
    let prefix = out.path().join("bad_");

    let zero_lq = CropPairParams {
        lq_size: 0,
        ..CropPairParams::default()
    };
    assert!(matches!(
        generate_crop_pairs(src.path(), &prefix, &zero_lq),
        Err(Error::InvalidArgument { arg: "lq_size", .. })
    ));

    let zero_jobs = CropPairParams {
        n_jobs: 0,
        ..CropPairParams::default()
    };
    assert!(matches!(
        generate_crop_pairs(src.path(), &prefix, &zero_jobs),
        Err(Error::InvalidArgument { arg: "n_jobs", .. })
    ));

    assert!(matches!(
        generate_crop_pairs(&src.path().join("missing"), &prefix, &CropPairParams::default()),
        Err(Error::SourceNotFound { .. })
    ));
    assert!(sorted_names(out.path()).is_empty());
}

// A failed GT write removes the LQ file of that pair; earlier pairs stay complete
#[test]
fn failed_gt_write_leaves_no_unpaired_lq() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = src.path().join("img.png");
    write_gradient(&input, 256, 256);

    let roots = OutputRoots::from_prefix(&out.path().join("w"), 64, 128);
    fs::create_dir_all(&roots.lq).unwrap();
    // A directory in place of the second crop's GT file makes that save fail
    fs::create_dir_all(roots.gt.join("img_crop_1.png")).unwrap();

    let params = CropPairParams {
        num_crops: 2,
        ..CropPairParams::default()
    };
    let result = crop_pairs_for_image(&input, &roots, &params, &mut StdRng::seed_from_u64(4));

    assert!(result.is_err());
    assert_eq!(sorted_names(&roots.lq), vec!["img.png", "img_crop_0.png"]);
    assert!(roots.gt.join("img.png").is_file());
    assert!(roots.gt.join("img_crop_0.png").is_file());
}

// The same holds for the full-frame pair
#[test]
fn failed_full_frame_gt_write_removes_its_lq() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = src.path().join("img.png");
    write_gradient(&input, 200, 200);

    let roots = OutputRoots::from_prefix(&out.path().join("f"), 64, 128);
    fs::create_dir_all(&roots.lq).unwrap();
    fs::create_dir_all(roots.gt.join("img.png")).unwrap();

    let params = CropPairParams {
        num_crops: 0,
        ..CropPairParams::default()
    };
    let result = crop_pairs_for_image(&input, &roots, &params, &mut StdRng::seed_from_u64(0));

    assert!(result.is_err());
    assert!(sorted_names(&roots.lq).is_empty());
}

// With continue_on_error a corrupt image is reported and the others still get pairs
#[test]
fn corrupt_image_is_collected_when_continuing() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_gradient(&src.path().join("good.png"), 200, 200);
    fs::write(src.path().join("broken.png"), b"not a png at all").unwrap();

    let params = CropPairParams {
        num_crops: 1,
        continue_on_error: true,
        ..seeded(11)
    };
    let report = generate_crop_pairs(src.path(), &out.path().join("c"), &params).unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);
    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("broken.png"));
    assert_eq!(report.files_written, 4);

    let expected = vec!["good.png", "good_crop_0.png"];
    assert_eq!(sorted_names(&out.path().join("c64")), expected);
    assert_eq!(sorted_names(&out.path().join("c128")), expected);
}

// Equal LQ and GT sizes share one root, one file per output name
#[test]
fn equal_sizes_share_one_root() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_gradient(&src.path().join("img.png"), 256, 256);

    let params = CropPairParams {
        lq_size: 96,
        gt_size: 96,
        num_crops: 2,
        ..seeded(8)
    };
    let prefix = out.path().join("s");
    let roots = OutputRoots::from_prefix(&prefix, params.lq_size, params.gt_size);
    assert!(roots.coincide());

    let report = generate_crop_pairs(src.path(), &prefix, &params).unwrap();

    assert!(report.is_success());
    assert_eq!(sorted_names(out.path()), vec!["s96"]);
    assert_eq!(
        sorted_names(&roots.lq),
        vec!["img.png", "img_crop_0.png", "img_crop_1.png"]
    );
    assert_all_square(&roots.lq, 96);
}
