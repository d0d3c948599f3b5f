use std::path::{Path, PathBuf};

use icon_rasterizer::{Error, Options, Rasterizer, SourceImage};
use rgb::{FromSlice, RGBA8};


fn options(source: &str, out_dir: &Path, sizes: &[u32]) -> Options {
    Options {
        source: PathBuf::from(source),
        out_dir: out_dir.to_owned(),
        sizes: sizes.to_vec(),
        skip_system_fonts: true,
        ..Options::default()
    }
}

fn generate(opt: &Options) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();
    let count = icon_rasterizer::generate(opt, |path, _| written.push(path.to_owned()))?;
    assert_eq!(count, written.len());
    Ok(written)
}

fn load_png(path: &Path) -> (u32, u32, Vec<u8>) {
    let data = std::fs::read(path).unwrap();
    let decoder = png::Decoder::new(data.as_slice());
    let mut reader = decoder.read_info().unwrap();
    let mut img_data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut img_data).unwrap();
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    img_data.truncate(info.buffer_size());
    (info.width, info.height, img_data)
}

fn pixel(data: &[u8], width: u32, x: u32, y: u32) -> RGBA8 {
    data.as_rgba()[(y * width + x) as usize]
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn default_icon_set() {
    let dir = tempfile::tempdir().unwrap();
    let opt = Options {
        source: PathBuf::from("tests/logo.svg"),
        out_dir: dir.path().to_owned(),
        skip_system_fonts: true,
        ..Options::default()
    };

    let written = generate(&opt).unwrap();
    assert_eq!(written.len(), icon_rasterizer::DEFAULT_SIZES.len());

    for (&size, path) in icon_rasterizer::DEFAULT_SIZES.iter().zip(&written) {
        assert_eq!(path, &dir.path().join(format!("icon-{}x{}.png", size, size)));

        let (width, height, _) = load_png(path);
        assert_eq!((width, height), (size, size));
    }
}

#[test]
fn two_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let opt = options("tests/logo.svg", dir.path(), &[72, 512]);
    generate(&opt).unwrap();

    assert_eq!(dir_entries(dir.path()), ["icon-512x512.png", "icon-72x72.png"]);

    let (w, h, _) = load_png(&dir.path().join("icon-72x72.png"));
    assert_eq!((w, h), (72, 72));

    let (w, h, _) = load_png(&dir.path().join("icon-512x512.png"));
    assert_eq!((w, h), (512, 512));
}

#[test]
fn rendered_content() {
    let dir = tempfile::tempdir().unwrap();
    let opt = options("tests/logo.svg", dir.path(), &[72]);
    generate(&opt).unwrap();

    let (w, _, data) = load_png(&dir.path().join("icon-72x72.png"));
    // Rounded corner.
    assert_eq!(pixel(&data, w, 0, 0).a, 0);
    // Rect.
    assert_eq!(pixel(&data, w, 36, 5), RGBA8::new(0x2e, 0x7d, 0x32, 255));
    // Circle.
    assert_eq!(pixel(&data, w, 36, 36), RGBA8::new(255, 255, 255, 255));
}

#[test]
fn deterministic_output() {
    let dir1 = tempfile::tempdir().unwrap();
    let dir2 = tempfile::tempdir().unwrap();
    generate(&options("tests/logo.svg", dir1.path(), &[96, 192])).unwrap();
    generate(&options("tests/logo.svg", dir2.path(), &[96, 192])).unwrap();

    for name in ["icon-96x96.png", "icon-192x192.png"] {
        let a = std::fs::read(dir1.path().join(name)).unwrap();
        let b = std::fs::read(dir2.path().join(name)).unwrap();
        assert!(a == b, "{} differs between runs", name);
    }
}

#[test]
fn regenerate_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let opt = options("tests/logo.svg", dir.path(), &[120]);
    generate(&opt).unwrap();
    let first = std::fs::read(dir.path().join("icon-120x120.png")).unwrap();

    generate(&opt).unwrap();
    let second = std::fs::read(dir.path().join("icon-120x120.png")).unwrap();
    assert_eq!(first, second);
    assert_eq!(dir_entries(dir.path()).len(), 1);
}

#[test]
fn wide_source_is_letterboxed() {
    let dir = tempfile::tempdir().unwrap();
    let opt = options("tests/wide.svg", dir.path(), &[100]);
    generate(&opt).unwrap();

    let (w, h, data) = load_png(&dir.path().join("icon-100x100.png"));
    assert_eq!((w, h), (100, 100));
    assert_eq!(pixel(&data, w, 50, 10).a, 0);
    assert_eq!(pixel(&data, w, 50, 50), RGBA8::new(255, 0, 0, 255));
    assert_eq!(pixel(&data, w, 50, 90).a, 0);
}

#[test]
fn background() {
    let dir = tempfile::tempdir().unwrap();
    let opt = Options {
        background: Some("#0000ff".parse().unwrap()),
        ..options("tests/wide.svg", dir.path(), &[100])
    };
    generate(&opt).unwrap();

    let (w, _, data) = load_png(&dir.path().join("icon-100x100.png"));
    assert_eq!(pixel(&data, w, 50, 10), RGBA8::new(0, 0, 255, 255));
    assert_eq!(pixel(&data, w, 50, 50), RGBA8::new(255, 0, 0, 255));
}

#[test]
fn malformed_source() {
    let dir = tempfile::tempdir().unwrap();
    let opt = options("tests/malformed.svg", dir.path(), &[72, 512]);

    let err = generate(&opt).unwrap_err();
    assert!(matches!(err, Error::ParsingFailed(_)));
    assert!(err.is_capability_missing());
    assert_eq!(err.to_string().matches("SVG data parsing failed").count(), 1);
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let opt = options("tests/does-not-exist.svg", dir.path(), &[72]);

    let err = generate(&opt).unwrap_err();
    assert!(matches!(err, Error::ReadFailed(..)));
    assert!(err.is_capability_missing());
    assert!(dir_entries(dir.path()).is_empty());

    let text = icon_rasterizer::fallback_instructions(&opt);
    assert!(text.contains("https://www.pwabuilder.com/imageGenerator"));
    assert!(text.contains("2. Upload tests/does-not-exist.svg"));
    assert!(text.contains(&format!("4. Place in {}/ directory", dir.path().display())));
}

#[test]
fn not_an_utf8_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.svg");
    std::fs::write(&source, [0xff, 0xfe, 0x00, 0x3c]).unwrap();

    let opt = Options {
        source,
        ..options("", dir.path(), &[72])
    };

    let err = generate(&opt).unwrap_err();
    assert!(matches!(err, Error::NotAnUtf8Str));
    assert!(err.is_capability_missing());
    assert_eq!(dir_entries(dir.path()), ["logo.svg"]);
}

#[test]
fn missing_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("icons");
    let opt = options("tests/logo.svg", &out_dir, &[72, 96]);

    let err = generate(&opt).unwrap_err();
    match err {
        Error::WriteFailed(ref path, _) => assert_eq!(path, &out_dir.join("icon-72x72.png")),
        ref e => panic!("unexpected error: {:?}", e),
    }
    assert!(!err.is_capability_missing());
    assert!(!out_dir.exists());
}

#[test]
fn invalid_sizes_are_rejected_before_rendering() {
    let dir = tempfile::tempdir().unwrap();

    let err = generate(&options("tests/logo.svg", dir.path(), &[72, 0])).unwrap_err();
    assert!(matches!(err, Error::InvalidSize(0)));

    let err = generate(&options("tests/logo.svg", dir.path(), &[72, 96, 72])).unwrap_err();
    assert!(matches!(err, Error::DuplicateSize(72)));

    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn render_from_text() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 10 10'>\
               <rect width='10' height='10' fill='black'/></svg>";
    let source = SourceImage::from_text("inline.svg", svg);
    let opt = Options {
        skip_system_fonts: true,
        ..Options::default()
    };

    let rasterizer = Rasterizer::prepare(&source, &opt).unwrap();
    let icon = rasterizer.render(16).unwrap();
    assert_eq!(icon.size(), 16);
    assert!(icon.data().starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn too_big_size_render() {
    let source = SourceImage::load("tests/logo.svg").unwrap();
    let opt = Options {
        skip_system_fonts: true,
        ..Options::default()
    };

    let rasterizer = Rasterizer::prepare(&source, &opt).unwrap();
    let size = icon_rasterizer::MAX_SIZE + 1;
    assert!(matches!(rasterizer.render(size), Err(Error::InvalidSize(s)) if s == size));
}

#[test]
fn report_messages() {
    assert_eq!(
        icon_rasterizer::generated_message(Path::new("icons/icon-72x72.png")),
        "Generated icons/icon-72x72.png"
    );
    assert_eq!(
        icon_rasterizer::summary_message(11),
        "Successfully generated 11 icon sizes."
    );
}

#[test]
fn zero_size_render() {
    let source = SourceImage::load("tests/logo.svg").unwrap();
    let opt = Options {
        skip_system_fonts: true,
        ..Options::default()
    };

    let rasterizer = Rasterizer::prepare(&source, &opt).unwrap();
    assert!(matches!(rasterizer.render(0), Err(Error::InvalidSize(0))));
}
