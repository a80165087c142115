use base64::Engine as _;

use super::*;

#[test]
fn fit_caps_the_long_edge() {
    assert_eq!(fit_within(1920, 1080, 640), (640, 360));
    assert_eq!(fit_within(1080, 1920, 640), (360, 640));
    assert_eq!(fit_within(320, 200, 640), (320, 200));
    assert_eq!(fit_within(4000, 1, 640), (640, 1));
}

#[test]
fn sample_is_base64_jpeg() {
    let img = RgbaImage::from_pixel(1000, 500, image::Rgba([200, 150, 50, 255]));
    let s = sample_from_image(&img).unwrap();
    assert_eq!(s.mime, "image/jpeg");
    assert_eq!((s.width, s.height), (640, 320));

    let bytes = general_purpose::STANDARD.decode(&s.data).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 320));
}

#[test]
fn small_images_keep_their_size() {
    let img = RgbaImage::from_pixel(8, 6, image::Rgba([0, 0, 0, 0]));
    let s = sample_from_image(&img).unwrap();
    assert_eq!((s.width, s.height), (8, 6));
}
