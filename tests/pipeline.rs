use color_filter::pipeline::{apply_filter, load, FilterRequest};
use color_filter::{FilterError, FilterKind, Pixel};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

fn write_png(path: &Path, pixels: &[[u8; 3]], width: u32) {
    let height = pixels.len() as u32 / width;
    let image = RgbImage::from_fn(width, height, |x, y| Rgb(pixels[(y * width + x) as usize]));
    image.save(path).unwrap();
}

fn read_rgb(path: &Path) -> RgbImage {
    image::open(path).unwrap().to_rgb8()
}

#[test]
fn cooler_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_png(&input, &[[200, 150, 100], [10, 10, 10]], 2);

    let summary = apply_filter(&FilterRequest::new(&input, "cooler").with_output(&output)).unwrap();
    assert_eq!(summary.filter, FilterKind::Cooler);
    assert_eq!(summary.dimensions, (2, 1));
    assert_eq!(summary.visited, 2);
    // red of the second pixel went to -5 before encoding
    assert_eq!(summary.range.out_of_range, 1);

    let result = read_rgb(&output);
    assert_eq!(result.dimensions(), (2, 1));
    assert_eq!(result.get_pixel(0, 0), &Rgb([185, 150, 115]));
    assert_eq!(result.get_pixel(1, 0), &Rgb([0, 10, 25]));
}

#[test]
fn grayscale_output_has_equal_channels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("gray.png");
    let pixels: Vec<[u8; 3]> = (0..48u8).map(|i| [i * 5, 255 - i * 3, i.wrapping_mul(91)]).collect();
    write_png(&input, &pixels, 8);

    let summary = apply_filter(
        &FilterRequest::new(&input, "GrayScale")
            .with_output(&output)
            .with_parallel(true),
    )
    .unwrap();
    assert!(summary.range.is_clean());

    let result = read_rgb(&output);
    assert_eq!(result.dimensions(), (8, 6));
    for p in result.pixels() {
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }
}

#[test]
fn output_is_png_whatever_the_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    write_png(&input, &[[1, 2, 3]], 1);

    apply_filter(&FilterRequest::new(&input, "sepia").with_output(&output)).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn alpha_is_dropped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("alpha.png");
    RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]))
        .save(&input)
        .unwrap();

    let buffer = load(&input).unwrap();
    assert_eq!(buffer.dimensions(), (2, 2));
    assert_eq!(buffer.get(1, 1), Pixel::new(10, 20, 30));
}

#[test]
fn unreadable_input_reports_load_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("garbage.png");
    std::fs::write(&input, b"definitely not an image").unwrap();
    let output = dir.path().join("out.png");

    let err = apply_filter(&FilterRequest::new(&input, "warmer").with_output(&output)).unwrap_err();
    assert!(matches!(err, FilterError::ImageLoad { .. }));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_reports_save_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_png(&input, &[[9, 9, 9]], 1);
    let output = dir.path().join("no-such-dir").join("out.png");

    let err = apply_filter(&FilterRequest::new(&input, "sepia").with_output(&output)).unwrap_err();
    assert!(matches!(err, FilterError::ImageSave { .. }));
    assert!(err.to_string().starts_with("save failed"));
    assert!(!output.exists());
}

#[test]
fn load_failure_keeps_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.png");
    std::fs::write(&output, b"previous").unwrap();

    let err = apply_filter(
        &FilterRequest::new(dir.path().join("missing.png"), "sepia").with_output(&output),
    )
    .unwrap_err();
    assert!(matches!(err, FilterError::ImageLoad { .. }));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn save_failure_keeps_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_png(&input, &[[200, 150, 100], [10, 10, 10]], 2);
    // a non-empty directory cannot be replaced by the rename
    let output = dir.path().join("out.png");
    std::fs::create_dir(&output).unwrap();
    std::fs::write(output.join("keep.png"), b"previous").unwrap();

    let err = apply_filter(&FilterRequest::new(&input, "cooler").with_output(&output)).unwrap_err();
    assert!(matches!(err, FilterError::ImageSave { .. }));
    assert!(output.is_dir());
    assert_eq!(std::fs::read(output.join("keep.png")).unwrap(), b"previous");
}

#[cfg(unix)]
#[test]
fn output_mode_matches_a_plain_save() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_png(&input, &[[1, 2, 3]], 1);
    let output = dir.path().join("out.png");

    apply_filter(&FilterRequest::new(&input, "sepia").with_output(&output)).unwrap();

    let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(output.as_path()), mode(input.as_path()));
}
