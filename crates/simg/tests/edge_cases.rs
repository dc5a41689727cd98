//! Comprehensive edge case tests for simg
//!
//! Construction from every source kind, channel access, resizing and export.

use simg::canvas::ImageDrawing;
use simg::file::{BlobPart, FileOptions};
use simg::{
    Canvas, Channel, Config, ExportFormat, File, ImageError, ImageHandle, ImageSource,
    SimpleImage, Smoothing, codec::DataUrl,
};

/// 5x5 image where pixel (x, y) is [50x, 50y, 100, 255]
const DUMMY_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAUAAAAFCAYAAACNbyblAAAAM0lEQVR42hXIMQHAMAwDsGAqJmMyprDalEOPZibfI5Rl5klC2XcZSSiby0pC2V6uJJTlBxOcNjTCO18bAAAAAElFTkSuQmCC";

fn load(source: impl Into<ImageSource>) -> SimpleImage {
    smol::block_on(SimpleImage::load(source)).unwrap()
}

fn dummy_handle() -> ImageHandle {
    ImageHandle::decode(DataUrl::parse(DUMMY_IMAGE).unwrap().data()).unwrap()
}

fn dummy_canvas() -> Canvas {
    let handle = dummy_handle();
    let mut canvas = Canvas::new(handle.width(), handle.height());
    canvas.draw_image(&handle, 0.0, 0.0);
    canvas
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_from_size() {
    let image = load((256u32, 256u32));
    assert_eq!(image.width(), Ok(256));
    assert_eq!(image.height(), Ok(256));
}

#[test]
fn test_from_size_is_opaque_black() {
    for (w, h) in [(1u32, 1u32), (3, 7), (17, 2)] {
        let image = load((w, h));
        assert_eq!((image.width().unwrap(), image.height().unwrap()), (w, h));
        for pixel in image.pixels().unwrap() {
            assert_eq!(pixel.rgba().unwrap(), [0, 0, 0, 255]);
        }
    }
}

#[test]
fn test_from_fractional_size() {
    let image = load((3.9f64, 2.1f64));
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (3, 2));
}

#[test]
fn test_size_validation_is_synchronous() {
    assert_eq!(
        SimpleImage::new(ImageSource::width_only(256.0)).unwrap_err(),
        ImageError::MissingHeight
    );
    assert_eq!(
        SimpleImage::new((0u32, 256u32)).unwrap_err(),
        ImageError::InvalidWidth(0.0)
    );
    assert_eq!(
        SimpleImage::new((256u32, 0u32)).unwrap_err(),
        ImageError::InvalidHeight(0.0)
    );
    assert_eq!(
        SimpleImage::new((-4i32, 10i32)).unwrap_err(),
        ImageError::InvalidWidth(-4.0)
    );
    assert!(matches!(
        SimpleImage::new((f64::NAN, 1.0)).unwrap_err(),
        ImageError::InvalidWidth(_)
    ));
}

#[test]
fn test_unrecognized_source() {
    assert!(matches!(
        SimpleImage::new("").unwrap_err(),
        ImageError::UnrecognizedSource(_)
    ));
    assert!(matches!(
        SimpleImage::new("   ").unwrap_err(),
        ImageError::UnrecognizedSource(_)
    ));
}

#[test]
fn test_from_string() {
    let image = load(DUMMY_IMAGE);
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (5, 5));
    assert_eq!(image.pixel(2, 3).rgba().unwrap(), [100, 150, 100, 255]);
}

#[test]
fn test_from_image_handle() {
    let image = load(dummy_handle());
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (5, 5));
    assert_eq!(image.pixel(4, 4).rgba().unwrap(), [200, 200, 100, 255]);
}

#[test]
fn test_from_image_handle_with_declared_size() {
    let mut handle = dummy_handle();
    handle.set_width(10);
    handle.set_height(2);

    let config = Config { smoothing: Smoothing::Nearest, ..Config::default() };
    let mut image = SimpleImage::with_config(handle, config).unwrap();
    smol::block_on(image.ready()).unwrap();

    // Layout size is max(natural, declared) per axis
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (10, 5));
    assert_eq!(image.red(9, 0), Ok(200));
    assert_eq!(image.red(0, 0), Ok(0));
}

#[test]
fn test_from_canvas() {
    let image = load(dummy_canvas());
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (5, 5));
    assert_eq!(image.pixel(1, 0).rgba().unwrap(), [50, 0, 100, 255]);
}

#[test]
fn test_from_existing_simple_image() {
    let first = load(dummy_canvas());
    first.set_red(0, 0, 42).unwrap();

    let image = load(first);
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (5, 5));
    // Pending writes travel with the surface
    assert_eq!(image.red(0, 0), Ok(42));
}

#[test]
fn test_from_snapshot_leaves_source_usable() {
    let first = load(DUMMY_IMAGE);
    first.set_blue(1, 1, 7).unwrap();

    let copy = load(first.snapshot().unwrap());
    copy.set_blue(1, 1, 9).unwrap();

    assert_eq!(first.blue(1, 1), Ok(7));
    assert_eq!(copy.blue(1, 1), Ok(9));
}

#[test]
fn test_from_pending_simple_image_fails() {
    let pending = SimpleImage::new((2u32, 2u32)).unwrap();
    assert_eq!(SimpleImage::new(pending).unwrap_err(), ImageError::NotReady);
}

#[test]
fn test_from_file() {
    let bytes = DataUrl::parse(DUMMY_IMAGE).unwrap().into_data();
    let file = File::new(
        vec![BlobPart::Bytes(bytes)],
        "fileName.jpg",
        FileOptions {
            mime_type: Some("image/jpeg".into()),
            ..Default::default()
        },
    );

    let image = load(file);
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (5, 5));
}

#[test]
fn test_from_file_on_disk() {
    let bytes = DataUrl::parse(DUMMY_IMAGE).unwrap().into_data();
    let path = std::env::temp_dir().join(format!("simg-edge-{}.png", std::process::id()));
    std::fs::write(&path, bytes).unwrap();

    let file = smol::block_on(File::open(&path)).unwrap();
    let from_file = load(file);
    let from_path = load(path.clone());

    assert_eq!(from_file.to_data_url(), from_path.to_data_url());
    assert_eq!(from_path.pixel(3, 0).rgba().unwrap(), [150, 0, 100, 255]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_decode_failure_surfaces_through_ready() {
    let mut image = SimpleImage::new("data:image/png;base64,AAAA").unwrap();
    let err = smol::block_on(image.ready()).unwrap_err();
    assert!(matches!(err, ImageError::Codec(_)));
    assert_eq!(image.width(), Err(ImageError::NotReady));
}

#[test]
fn test_missing_file_surfaces_through_ready() {
    let mut image = SimpleImage::new("/no/such/dir/simg.png").unwrap();
    assert!(matches!(smol::block_on(image.ready()), Err(ImageError::Read { .. })));
}

#[test]
fn test_remote_urls_are_unsupported() {
    let mut image = SimpleImage::new("http://example.com/image.png").unwrap();
    assert_eq!(
        smol::block_on(image.ready()),
        Err(ImageError::UnsupportedScheme("http".into()))
    );
}

// ============================================================================
// WIDTH / HEIGHT
// ============================================================================

#[test]
fn test_dimensions_not_ready() {
    let image = SimpleImage::new((256u32, 256u32)).unwrap();
    assert_eq!(image.width(), Err(ImageError::NotReady));
    assert_eq!(image.height(), Err(ImageError::NotReady));
}

// ============================================================================
// CHANNELS
// ============================================================================

#[test]
fn test_default_channels() {
    let image = load((256u32, 256u32));
    assert_eq!(image.red(0, 0), Ok(0));
    assert_eq!(image.green(0, 0), Ok(0));
    assert_eq!(image.blue(0, 0), Ok(0));
    assert_eq!(image.alpha(0, 0), Ok(255));
}

#[test]
fn test_set_channels() {
    let image = load((256u32, 256u32));

    image.set_red(1, 1, 255).unwrap();
    image.set_green(1, 1, 254).unwrap();
    image.set_blue(1, 1, 253).unwrap();
    image.set_alpha(1, 1, 0).unwrap();

    assert_eq!(image.red(1, 1), Ok(255));
    assert_eq!(image.green(1, 1), Ok(254));
    assert_eq!(image.blue(1, 1), Ok(253));
    assert_eq!(image.alpha(1, 1), Ok(0));
    assert_eq!(image.red(0, 1), Ok(0));
}

#[test]
fn test_set_channel_clamps_and_floors() {
    let image = load((4u32, 4u32));
    let cases: [(f64, u8); 7] = [
        (-1.0, 0),
        (-0.5, 0),
        (0.0, 0),
        (12.7, 12),
        (255.0, 255),
        (255.9, 255),
        (1000.0, 255),
    ];

    for channel in Channel::ALL {
        for (value, expected) in cases {
            image.set_channel(2, 2, channel, value).unwrap();
            assert_eq!(image.channel(2, 2, channel), Ok(expected), "{channel:?} <- {value}");
        }
    }
}

#[test]
fn test_fractional_coordinates_are_floored() {
    let image = load((4u32, 4u32));
    image.set_green(1.9, 2.2, 80).unwrap();
    assert_eq!(image.green(1, 2), Ok(80));
    assert_eq!(image.green(1.0f32, 2.999f32), Ok(80));
}

#[test]
fn test_out_of_bounds_coordinates() {
    let image = load((4u32, 4u32));
    assert_eq!(image.red(4, 0), Err(ImageError::OutOfBounds { x: 4.0, y: 0.0 }));
    assert_eq!(image.red(0, 4), Err(ImageError::OutOfBounds { x: 0.0, y: 4.0 }));
    assert_eq!(image.set_red(-1, 0, 1), Err(ImageError::OutOfBounds { x: -1.0, y: 0.0 }));
}

// ============================================================================
// PIXELS
// ============================================================================

#[test]
fn test_get_pixel() {
    let image = load((256u32, 256u32));
    image.set_red(1, 1, 255).unwrap();

    let pixel = image.pixel(1, 1);
    assert_eq!(pixel.red(), Ok(255));
}

#[test]
fn test_set_pixel() {
    let image = load((256u32, 256u32));

    let pixel = image.pixel(3, 3);
    pixel.set_red(200).unwrap();
    pixel.set_green(201).unwrap();
    pixel.set_blue(202).unwrap();
    pixel.set_alpha(203).unwrap();

    image.set_pixel(1, 1, &pixel).unwrap();

    let updated = image.pixel(1, 1);
    assert_eq!(updated.red(), Ok(200));
    assert_eq!(updated.green(), Ok(201));
    assert_eq!(updated.blue(), Ok(202));
    assert_eq!(updated.alpha(), Ok(203));
}

#[test]
fn test_set_pixel_from_other_image() {
    let source = load(DUMMY_IMAGE);
    let target = load((5u32, 5u32));

    target.set_pixel(0, 0, &source.pixel(4, 2)).unwrap();
    assert_eq!(target.pixel(0, 0).rgba().unwrap(), [200, 100, 100, 255]);
}

#[test]
fn test_pixels_row_major() {
    let image = load((3u32, 2u32));
    let pixels = image.pixels().unwrap();

    assert_eq!(pixels.len(), 6);
    let coords: Vec<(f64, f64)> = pixels.iter().map(|p| (p.x(), p.y())).collect();
    assert_eq!(
        coords,
        vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]
    );
}

#[test]
fn test_pixels_count() {
    let image = load((256u32, 256u32));
    assert_eq!(image.pixels().unwrap().len(), 256 * 256);
}

#[test]
fn test_set_all_from() {
    let image = load(DUMMY_IMAGE);

    let a = image.pixel(0, 0);
    a.set_red(200).unwrap();
    a.set_green(201).unwrap();
    a.set_blue(202).unwrap();
    a.set_alpha(203).unwrap();

    let b = image.pixel(1, 1);
    for (x, y) in a.rgba().unwrap().into_iter().zip(b.rgba().unwrap()) {
        assert_ne!(x, y);
    }

    b.set_all_from(&a).unwrap();
    assert_eq!(a.rgba(), b.rgba());
}

// ============================================================================
// SET SIZE
// ============================================================================

#[test]
fn test_set_size() {
    let mut image = load((256u32, 256u32));
    image.set_size(300, 200).unwrap();

    assert_eq!(image.width(), Ok(300));
    assert_eq!(image.height(), Ok(200));
    assert_eq!(image.pixels().unwrap().len(), 300 * 200);
    assert_eq!(image.alpha(299, 199), Ok(255));
}

#[test]
fn test_set_size_floors() {
    let mut image = load((4u32, 4u32));
    image.set_size(2.9, 7.1).unwrap();
    assert_eq!((image.width().unwrap(), image.height().unwrap()), (2, 7));
}

#[test]
fn test_set_size_invalid_leaves_state() {
    let mut image = load((256u32, 256u32));
    image.set_size(300, 200).unwrap();
    image.set_red(5, 5, 99).unwrap();

    assert_eq!(
        image.set_size(0, 200),
        Err(ImageError::InvalidSize { width: 0.0, height: 200.0 })
    );
    assert!(image.set_size(200, 0).is_err());
    assert!(image.set_size(0.5, 10).is_err());
    assert!(image.set_size(-3, -3).is_err());

    assert_eq!((image.width().unwrap(), image.height().unwrap()), (300, 200));
    assert_eq!(image.red(5, 5), Ok(99));
}

#[test]
fn test_set_size_keeps_content() {
    let config = Config { smoothing: Smoothing::Nearest, ..Config::default() };
    let mut image = SimpleImage::with_config((2u32, 2u32), config).unwrap();
    smol::block_on(image.ready()).unwrap();
    image.set_red(1, 1, 255).unwrap();

    image.set_size(4, 4).unwrap();

    assert_eq!(image.red(0, 0), Ok(0));
    assert_eq!(image.red(2, 2), Ok(255));
    assert_eq!(image.red(3, 3), Ok(255));
    assert_eq!(image.red(3, 0), Ok(0));
}

#[test]
fn test_set_size_not_ready() {
    let mut image = SimpleImage::new((2u32, 2u32)).unwrap();
    assert_eq!(image.set_size(3, 3), Err(ImageError::NotReady));
}

// ============================================================================
// DRAW / EXPORT
// ============================================================================

#[test]
fn test_draw() {
    let image = load(DUMMY_IMAGE);
    let mut canvas = Canvas::new(5, 5);
    let blank = canvas.to_data_url().unwrap();

    image.draw(&mut canvas).unwrap();

    assert_ne!(canvas.to_data_url().unwrap(), blank);
    assert_eq!(canvas.to_data_url().unwrap(), image.to_data_url().unwrap());
}

#[test]
fn test_draw_includes_pending_writes() {
    let image = load((2u32, 2u32));
    image.set_green(0, 1, 128).unwrap();

    let mut canvas = Canvas::new(2, 2);
    image.draw(&mut canvas).unwrap();
    assert_eq!(canvas.get_pixel(0, 1), Some([0, 128, 0, 255]));
}

#[test]
fn test_draw_scales_to_target() {
    let image = load((2u32, 2u32));
    let mut canvas = Canvas::new(6, 3);
    image.draw(&mut canvas).unwrap();
    assert!(canvas.data().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn test_to_data_url_roundtrip() {
    let exported = load(DUMMY_IMAGE).to_data_url().unwrap();
    assert!(exported.starts_with("data:image/png;base64,"));

    let image = load(exported.as_str());
    assert_eq!(image.to_data_url().unwrap(), exported);

    image.set_red(1, 1, 255).unwrap();
    assert_ne!(image.to_data_url().unwrap(), exported);
}

#[test]
fn test_to_data_url_jpeg() {
    let config = Config {
        export: ExportFormat::Jpeg { quality: 90 },
        ..Config::default()
    };
    let mut image = SimpleImage::with_config(DUMMY_IMAGE, config).unwrap();
    smol::block_on(image.ready()).unwrap();

    let url = image.to_data_url().unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));

    let reloaded = load(url);
    assert_eq!((reloaded.width().unwrap(), reloaded.height().unwrap()), (5, 5));
    assert!(image.to_data_url_with(ExportFormat::Png).unwrap().starts_with("data:image/png"));
}
