use super::*;

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(radius_for_sigma(1.2), 4);
    assert_eq!(radius_for_sigma(0.6), 2);
    assert_eq!(radius_for_sigma(0.0), 0);
    assert_eq!(radius_for_sigma(f32::NAN), 0);
}

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 1.2).unwrap();
    assert_eq!(out, src);
}

#[test]
fn wider_sigma_spreads_further() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let narrow = blur_rgba8_premul(&src, w, h, 0.6).unwrap();
    let wide = blur_rgba8_premul(&src, w, h, 1.2).unwrap();

    let lit = |buf: &[u8]| buf.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(lit(&wide) > lit(&narrow));
    assert!(narrow[center + 3] > wide[center + 3]);

    let sum_a: u32 = wide.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 20);
}

#[test]
fn mismatched_buffer_is_rejected() {
    assert!(blur_rgba8_premul(&[0u8; 7], 1, 2, 1.0).is_err());
}
