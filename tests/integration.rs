use std::io::Cursor;
use std::time::Duration;

use emoji_maker::{
    crop::CoverPlacement, export, render_variants, CropSize, Error, IntakeOutcome, RenderOptions,
    Session, SourceImage, Upload, FILTERS,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

/// Opaque gradient so every filter produces visibly different output.
#[allow(clippy::cast_possible_truncation)]
fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 255 / w) as u8, (y * 255 / h) as u8, 128, 255])
    })
}

fn upload(img: &RgbaImage, format: ImageFormat) -> Upload {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut out, format)
        .unwrap();
    Upload::new(format.to_mime_type(), out.into_inner())
}

fn session_at(size: u32) -> Session {
    Session::new(RenderOptions {
        crop_size: CropSize::new(size).unwrap(),
    })
}

#[test]
fn renders_twelve_variants_matching_filter_order() {
    let mut session = session_at(128);
    let outcome = session.submit(&upload(&gradient(300, 200), ImageFormat::Png)).unwrap();
    assert_eq!(outcome, IntakeOutcome::Rendered(12));

    let ids: Vec<_> = session.variants().iter().map(|v| v.id).collect();
    let expected: Vec<_> = FILTERS.iter().map(|f| f.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_variant_decodes_to_a_square_of_crop_size() {
    let source = SourceImage::from_rgba(gradient(90, 400)).unwrap();
    for size in [128, 320] {
        let variants = render_variants(&source, CropSize::new(size).unwrap()).unwrap();
        for v in &variants {
            let decoded = v.decode_png().unwrap();
            assert_eq!(decoded.dimensions(), (size, size), "{}", v.id);
        }
    }
}

#[test]
fn outside_circle_is_transparent_and_center_is_opaque() {
    let source = SourceImage::from_rgba(gradient(256, 256)).unwrap();
    let variants = render_variants(&source, CropSize::new(256).unwrap()).unwrap();

    for v in &variants {
        let img = v.decode_png().unwrap();
        for (x, y) in [(0, 0), (255, 0), (0, 255), (255, 255), (20, 30), (230, 225)] {
            assert_eq!(img.get_pixel(x, y)[3], 0, "{} at ({x},{y})", v.id);
        }
        assert_eq!(img.get_pixel(128, 128)[3], 255, "{} center", v.id);
    }
}

#[test]
fn every_pixel_outside_the_circle_is_transparent() {
    for size in [128_u32, 129] {
        let source = SourceImage::from_rgba(gradient(200, 150)).unwrap();
        let variants = render_variants(&source, CropSize::new(size).unwrap()).unwrap();
        let half = f64::from(size) / 2.0;

        for v in &variants {
            let img = v.decode_png().unwrap();
            for (x, y, px) in img.enumerate_pixels() {
                let dx = f64::from(x) + 0.5 - half;
                let dy = f64::from(y) + 0.5 - half;
                if dx.hypot(dy) > half + 0.5 {
                    assert_eq!(px[3], 0, "{} at ({x},{y}) size {size}", v.id);
                }
            }
        }
    }
}

#[test]
fn extreme_aspect_ratio_does_not_crash() {
    let source = SourceImage::from_rgba(RgbaImage::from_pixel(2, 6000, Rgba([9, 99, 199, 255])))
        .unwrap();
    let variants = render_variants(&source, CropSize::new(1024).unwrap()).unwrap();
    assert_eq!(variants.len(), 12);
    assert!(variants.iter().all(|v| v.bitmap.dimensions() == (1024, 1024)));
    assert_eq!(variants[0].bitmap.get_pixel(512, 512).0, [9, 99, 199, 255]);
}

#[test]
fn rendering_is_deterministic() {
    let source = SourceImage::from_rgba(gradient(333, 222)).unwrap();
    let size = CropSize::new(128).unwrap();
    let first = render_variants(&source, size).unwrap();
    let second = render_variants(&source, size).unwrap();

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.png, b.png, "{} differs between runs", a.id);
        assert_eq!(a.data_url, b.data_url);
    }
}

#[test]
fn regenerate_with_new_size_keeps_ids() {
    let mut session = session_at(128);
    session.submit(&upload(&gradient(120, 80), ImageFormat::Png)).unwrap();
    let before: Vec<_> = session.variants().iter().map(|v| v.id).collect();

    session.set_crop_size(CropSize::new(256).unwrap());
    session.regenerate().unwrap();

    let after = session.variants();
    assert_eq!(after.iter().map(|v| v.id).collect::<Vec<_>>(), before);
    assert!(after.iter().all(|v| v.bitmap.dimensions() == (256, 256)));
}

#[test]
fn cover_scenario_wide_photo_at_512() {
    let p = CoverPlacement::compute(1000, 600, 512);
    assert!((p.scale - 0.8533).abs() < 1e-4);
    assert!((p.scaled_width - 853.0).abs() < 1.0);
    assert!((p.scaled_height - 512.0).abs() < 1e-9);
    assert!((p.offset_x - -170.5).abs() < 0.5);
    assert!(p.offset_y.abs() < 1e-9);
}

#[test]
fn wide_photo_is_cropped_symmetrically() {
    // Red left edge, blue right edge, green middle: only green survives the crop.
    let img = RgbaImage::from_fn(1000, 600, |x, _| {
        if x < 100 {
            Rgba([255, 0, 0, 255])
        } else if x >= 900 {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([0, 255, 0, 255])
        }
    });
    let source = SourceImage::from_rgba(img).unwrap();
    let variants = render_variants(&source, CropSize::new(512).unwrap()).unwrap();
    let original = &variants[0].bitmap;
    assert_eq!(original.get_pixel(256, 256).0, [0, 255, 0, 255]);
    assert_eq!(original.get_pixel(2, 256).0, [0, 255, 0, 255]);
    assert_eq!(original.get_pixel(509, 256).0, [0, 255, 0, 255]);
}

#[test]
fn non_image_drop_changes_nothing() {
    let mut session = session_at(128);
    let outcome = session
        .submit(&Upload::new("application/pdf", b"%PDF-1.7".to_vec()))
        .unwrap();
    assert_eq!(outcome, IntakeOutcome::Ignored);
    assert!(session.source().is_none());
    assert!(session.variants().is_empty());
}

#[test]
fn jpeg_uploads_are_accepted() {
    let mut session = session_at(128);
    let rgb = DynamicImage::ImageRgba8(gradient(64, 64)).to_rgb8();
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg).unwrap();
    let outcome = session
        .submit(&Upload::new("image/jpeg", out.into_inner()))
        .unwrap();
    assert_eq!(outcome, IntakeOutcome::Rendered(12));
}

#[test]
fn unreadable_image_is_reported() {
    let mut session = session_at(128);
    let err = session
        .submit(&Upload::new("image/png", vec![0x89, b'P', b'N', b'G']))
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(err.to_string().starts_with("could not read image"));
}

#[test]
fn download_all_schedules_and_writes_in_order() {
    let mut session = session_at(128);
    session.submit(&upload(&gradient(100, 100), ImageFormat::Png)).unwrap();
    let variants = session.variants();

    let plan = export::plan_download_all(&variants, export::DEFAULT_STAGGER);
    assert_eq!(plan.len(), 12);
    assert!(plan.windows(2).all(|w| w[0].delay < w[1].delay));
    for (job, variant) in plan.iter().zip(variants.iter()) {
        assert_eq!(job.file_name, format!("emoji-{}.png", variant.id));
    }

    let dir = tempfile::tempdir().unwrap();
    let written = export::download_all(&variants, dir.path(), Duration::from_millis(1)).unwrap();
    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let expected: Vec<_> = plan.iter().map(|j| j.file_name.clone()).collect();
    assert_eq!(names, expected);
}
