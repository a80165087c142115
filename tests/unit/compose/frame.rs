use super::*;
use crate::scene::{SceneSelector, resolve};

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x * 255 / w.max(1)) as u8, (y * 255 / h.max(1)) as u8, 90, 255])
    })
}

#[test]
fn cover_fit_fills_and_centers() {
    let src = RgbaImage::from_fn(200, 100, |x, _| {
        if x < 50 || x >= 150 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    });
    let out = cover_fit(&src, canvas(50, 50)).unwrap();
    assert_eq!(out.dimensions(), (50, 50));
    // Portrait target from a landscape source keeps only the middle.
    assert_eq!(out.get_pixel(25, 25).0, [0, 0, 255, 255]);
}

#[test]
fn cover_fit_rejects_empty_source() {
    assert!(cover_fit(&RgbaImage::new(0, 0), canvas(4, 4)).is_err());
}

#[test]
fn zoom_keeps_bottom_center_pixel() {
    let c = canvas(64, 32);
    let src = gradient(64, 32);
    let out = apply_zoom(&src, ViewTransform::for_size(SizeCategory::Small), c);
    assert_eq!(out.dimensions(), (64, 32));
    // Top of the zoomed frame comes from well below the top of the source.
    assert!(out.get_pixel(32, 0).0[1] > src.get_pixel(32, 0).0[1]);

    let same = apply_zoom(&src, ViewTransform::IDENTITY, c);
    assert_eq!(same, src);
}

#[test]
fn vignette_darkens_corners_only() {
    let mut img = RgbaImage::from_pixel(40, 40, image::Rgba([200, 200, 200, 255]));
    apply_vignette(&mut img);
    assert_eq!(img.get_pixel(20, 20).0, [200, 200, 200, 255]);
    let corner = img.get_pixel(0, 0).0;
    assert!(corner[0] < 200 && corner[2] < corner[0]);
    assert_eq!(corner[3], 255);
}

#[test]
fn feet_box_hangs_off_bottom_right() {
    let c = canvas(896, 504);
    let r = feet_box(c, ViewTransform::overlay_for_size(SizeCategory::Unknown));
    assert!((r.width() - 280.0).abs() < 1e-9);
    assert!((r.height() - 140.0).abs() < 1e-9);
    assert!((r.x1 - 896.0 * 0.95).abs() < 1e-9);
    assert!((r.y1 - 524.0).abs() < 1e-9);

    let small = feet_box(c, ViewTransform::overlay_for_size(SizeCategory::Small));
    let large = feet_box(c, ViewTransform::overlay_for_size(SizeCategory::Large));
    assert!(small.width() > large.width());
    assert_eq!(small.x1, large.x1);
    assert_eq!(small.y1, large.y1);
}

#[test]
fn dog_view_has_canvas_size_and_feet() {
    let c = canvas(160, 90);
    let mut opts = ComposeOptions::dog_view(c, SizeCategory::Medium);
    opts.vignette = false;
    let plain = compose_dog_view(&gradient(300, 200), &opts).unwrap();
    assert_eq!(plain.dimensions(), (160, 90));

    opts.feet = Some(resolve(SceneSelector::Sport));
    let with_feet = compose_dog_view(&gradient(300, 200), &opts).unwrap();
    assert_eq!(with_feet.dimensions(), (160, 90));
    assert_ne!(plain, with_feet);
}

#[test]
fn human_view_is_plain_letterboxed_media() {
    let settings = RenderSettings {
        width: 32,
        height: 32,
        human_view: true,
        ..RenderSettings::default()
    };
    let opts =
        ComposeOptions::from_settings(&settings, SizeCategory::Small, resolve(SceneSelector::Casual))
            .unwrap();
    assert_eq!(opts.fit, Fit::Contain);
    assert!(opts.filter.is_none());
    assert!(opts.view.is_identity());
    assert!(opts.feet.is_none());
    assert!(!opts.vignette);

    // A wide red source sits in the middle with black bars above and below.
    let src = RgbaImage::from_pixel(64, 32, image::Rgba([255, 0, 0, 255]));
    let out = compose_dog_view(&src, &opts).unwrap();
    assert_eq!(out.dimensions(), (32, 32));
    assert_eq!(out.get_pixel(16, 16).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(out.get_pixel(31, 31).0, [0, 0, 0, 255]);

    let dog = ComposeOptions {
        vignette: false,
        ..ComposeOptions::dog_view(canvas(32, 32), SizeCategory::Small)
    };
    let filtered = compose_dog_view(&src, &dog).unwrap();
    assert_eq!(filtered.get_pixel(16, 16).0[2], 0);
    assert_eq!(filtered.get_pixel(16, 16).0[0], filtered.get_pixel(16, 16).0[1]);
}

#[test]
fn contain_fit_keeps_whole_source() {
    let src = gradient(40, 80);
    let out = contain_fit(&src, canvas(40, 40)).unwrap();
    assert_eq!(out.dimensions(), (40, 40));
    // 20px wide column centred, black either side.
    assert_eq!(out.get_pixel(5, 20).0, [0, 0, 0, 255]);
    assert_eq!(out.get_pixel(34, 20).0, [0, 0, 0, 255]);
    assert_ne!(out.get_pixel(20, 20).0, [0, 0, 0, 255]);
    assert!(contain_fit(&RgbaImage::new(0, 0), canvas(4, 4)).is_err());
}

#[test]
fn settings_skin_tone_reaches_the_feet() {
    let settings = RenderSettings {
        skin_tone: Some(Color::hex(0x8d5524)),
        ..RenderSettings::default()
    };
    let opts = ComposeOptions::from_settings(
        &settings,
        SizeCategory::Large,
        resolve(SceneSelector::Fancy),
    )
    .unwrap();
    assert_eq!(opts.feet.unwrap().skin_tone, Color::hex(0x8d5524));
}

#[test]
fn transition_yields_requested_frames() {
    let opts = ComposeOptions {
        vignette: false,
        ..ComposeOptions::dog_view(canvas(48, 27), SizeCategory::Small)
    };
    let media = ScaleTransition::new(
        ViewTransform::for_size(SizeCategory::Large),
        ViewTransform::for_size(SizeCategory::Small),
    );
    let feet = ScaleTransition::new(
        ViewTransform::overlay_for_size(SizeCategory::Large),
        ViewTransform::overlay_for_size(SizeCategory::Small),
    );
    let frames = compose_transition(&gradient(96, 54), &opts, &media, &feet, 4).unwrap();
    assert_eq!(frames.len(), 4);
    assert!(frames.iter().all(|f| f.dimensions() == (48, 27)));
    assert_ne!(frames[0], frames[3]);
}
