//! End-to-end runs through the pipeline, in memory and on disk.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use enough::StopReason;

use pnmtool::pipeline::{Pipeline, Request, Stage, output_path};
use pnmtool::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pnmtool-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Allows `budget` checks, then reports cancellation on every later one.
struct CheckBudget {
    budget: usize,
    checks: AtomicUsize,
}

impl CheckBudget {
    fn new(budget: usize) -> Self {
        Self {
            budget,
            checks: AtomicUsize::new(0),
        }
    }

    fn checks(&self) -> usize {
        self.checks.load(Ordering::Relaxed)
    }
}

impl Stop for CheckBudget {
    fn check(&self) -> Result<(), StopReason> {
        if self.checks.fetch_add(1, Ordering::Relaxed) < self.budget {
            Ok(())
        } else {
            Err(StopReason::Cancelled)
        }
    }
}

/// P5, 2 columns by 64 rows: the body loop checks at rows 0, 16, 32 and 48.
fn tall_gray() -> Vec<u8> {
    let mut data = b"P5\n2 64\n255\n".to_vec();
    data.extend((0..128u8).map(|v| v * 2));
    data
}

const COLOR_2X2: &[u8] = b"P6\n2 2\n255\n\x00\x00\x00\xff\xff\xff\x0a\x14\x1e\xc8\x64\x32";

#[test]
fn negate_binary_color_to_ascii_text() {
    init_logger();
    let out = Pipeline::new()
        .run_bytes(COLOR_2X2, &Operation::Negate, Encoding::Ascii)
        .unwrap();
    assert_eq!(out.magic, MagicNumber::AsciiColor);
    assert_eq!(out.extension(), "ppm");
    assert_eq!(
        String::from_utf8(out.bytes).unwrap(),
        "P3\n2 2\n255\n255 255 255\n0 0 0\n245 235 225\n55 155 205\n"
    );
}

#[test]
fn grayscale_output_tag_follows_channel_count() {
    init_logger();
    let out = Pipeline::new()
        .run_bytes(COLOR_2X2, &Operation::Grayscale, Encoding::Binary)
        .unwrap();
    assert_eq!(out.magic, MagicNumber::BinaryGray);
    assert_eq!(out.extension(), "pgm");
    // 0, 255, round(3 + 12 + 3) = 18, round(60 + 60 + 5) = 125
    assert_eq!(out.bytes, b"P5\n2 2\n255\n\x00\xff\x12\x7d");
}

#[test]
fn comments_survive_a_transform() {
    let input = b"P3\n# kept\n1 1\n255\n1 2 3\n";
    let out = Pipeline::new()
        .run_bytes(input, &Operation::Brighten(10), Encoding::Ascii)
        .unwrap();
    assert_eq!(out.bytes, b"P3\n# kept\n1 1\n255\n11 12 13\n");
}

#[test]
fn gray_input_stays_gray() {
    let out = Pipeline::new()
        .run_bytes(b"P2\n3 3\n255\n0 0 0 0 90 0 0 0 0\n", &Operation::Smooth, Encoding::Ascii)
        .unwrap();
    assert_eq!(out.magic, MagicNumber::AsciiGray);
    assert_eq!(out.bytes, b"P2\n3 3\n255\n0\n0\n0\n0\n10\n0\n0\n0\n0\n");
}

#[test]
fn limits_stop_before_the_body() {
    let err = Pipeline::new()
        .with_limits(Limits {
            max_cols: Some(1),
            ..Default::default()
        })
        .run_bytes(COLOR_2X2, &Operation::Negate, Encoding::Binary)
        .unwrap_err();
    assert_eq!(err.stage, Stage::HeaderRead);
    assert!(matches!(err.source, PnmError::LimitExceeded(_)));
}

#[test]
fn file_run_writes_extension_by_channels() {
    init_logger();
    let dir = scratch_dir("file-run");
    let input = dir.join("in.ppm");
    fs::write(&input, COLOR_2X2).unwrap();

    let request = Request::new(Operation::Contrast, Encoding::Ascii, &input, dir.join("result"));
    let out = pipeline::run(&request).unwrap();
    let path = out.path.clone().unwrap();
    assert_eq!(path, dir.join("result.pgm"));
    assert_eq!(fs::read(&path).unwrap(), out.bytes);
    assert!(out.bytes.starts_with(b"P2\n2 2\n255\n"));

    let request = Request::new(Operation::Sharpen, Encoding::Binary, &input, dir.join("result"));
    let out = pipeline::run(&request).unwrap();
    assert_eq!(out.path.unwrap(), dir.join("result.ppm"));
    // 2x2 is all border.
    assert_eq!(
        fs::read(dir.join("result.ppm")).unwrap(),
        b"P6\n2 2\n255\n\0\0\0\0\0\0\0\0\0\0\0\0"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_run_leaves_no_output() {
    let dir = scratch_dir("failed-run");
    let input = dir.join("broken.ppm");
    fs::write(&input, b"P3\n2 2\n255\n1 2 3\n").unwrap();
    let base = dir.join("out");

    let err = pipeline::run(&Request::new(Operation::Negate, Encoding::Ascii, &input, &base))
        .unwrap_err();
    assert_eq!(err.stage, Stage::BodyRead);
    assert!(matches!(err.source, PnmError::TruncatedInput { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!output_path(&base, 3).exists());
    assert!(!output_path(&base, 1).exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_file() {
    let dir = scratch_dir("missing");
    let err = pipeline::run(&Request::new(
        Operation::Negate,
        Encoding::Ascii,
        dir.join("nope.ppm"),
        dir.join("out"),
    ))
    .unwrap_err();
    assert_eq!(err.stage, Stage::HeaderRead);
    assert!(matches!(err.source, PnmError::Io(_)));
    let _ = fs::remove_dir_all(&dir);
}

// ── Cancellation ─────────────────────────────────────────────────────

#[test]
fn cancelled_before_start() {
    let stop = CheckBudget::new(0);
    let err = Pipeline::with_stop(&stop)
        .run_bytes(COLOR_2X2, &Operation::Negate, Encoding::Ascii)
        .unwrap_err();
    assert_eq!(err.stage, Stage::HeaderRead);
    assert!(matches!(err.source, PnmError::Cancelled(StopReason::Cancelled)));
    assert_eq!(stop.checks(), 1);
}

#[test]
fn cancelled_inside_the_body_loop() {
    // Start of run, start of body, row 0; row 16 is refused.
    let stop = CheckBudget::new(3);
    let err = Pipeline::with_stop(&stop)
        .run_bytes(&tall_gray(), &Operation::Negate, Encoding::Binary)
        .unwrap_err();
    assert_eq!(err.stage, Stage::BodyRead);
    assert!(matches!(err.source, PnmError::Cancelled(_)));
    assert_eq!(stop.checks(), 4);
}

#[test]
fn cancelled_between_body_and_transform() {
    // Two checks before the body, four row bands, then the transform check.
    let stop = CheckBudget::new(6);
    let err = Pipeline::with_stop(&stop)
        .run_bytes(&tall_gray(), &Operation::Negate, Encoding::Binary)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Transformed);
    assert!(matches!(err.source, PnmError::Cancelled(_)));
    assert_eq!(stop.checks(), 7);
}

#[test]
fn generous_budget_completes() {
    let stop = CheckBudget::new(usize::MAX);
    let out = Pipeline::with_stop(&stop)
        .run_bytes(&tall_gray(), &Operation::Negate, Encoding::Binary)
        .unwrap();
    assert_eq!(out.magic, MagicNumber::BinaryGray);
    assert_eq!(&out.bytes[..12], b"P5\n2 64\n255\n");
    assert_eq!(out.bytes[12], 255);
    assert_eq!(out.bytes.len(), 12 + 128);
}
