use image::{Rgba, RgbaImage};

use super::Rgba16Image;

/// Output colour for pixels at or below the threshold
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Output colour for pixels above the threshold
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const CHANNEL_MAX: u32 = u16::MAX as u32;

/// Normalized blue intensity of a 16-bit pixel.
///
/// Blue is first premultiplied by alpha (`b * a / 65535`, integer division) and
/// then divided by alpha again, so translucent pixels lose the same precision
/// they would in a premultiplied pipeline. Returns `None` for zero alpha.
pub fn normalized_blue(pixel: &Rgba<u16>) -> Option<f64> {
    let [_, _, blue, alpha] = pixel.0;
    if alpha == 0 {
        return None;
    }
    let premultiplied = blue as u32 * alpha as u32 / CHANNEL_MAX;
    Some(premultiplied as f64 / alpha as f64)
}

/// Decide whether a pixel becomes black at `threshold`.
///
/// Zero-alpha pixels are always white.
pub fn is_black(pixel: &Rgba<u16>, threshold: u8) -> bool {
    match normalized_blue(pixel) {
        Some(value) => value <= threshold as f64 / 255.0,
        None => false,
    }
}

/// Classify every pixel of `source` as black or white at `threshold`.
pub fn classify(source: &Rgba16Image, threshold: u8) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut binary = RgbaImage::new(width, height);

    for (dst, src) in binary.pixels_mut().zip(source.pixels()) {
        *dst = if is_black(src, threshold) { BLACK } else { WHITE };
    }

    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(blue: u8) -> Rgba<u16> {
        Rgba([0, 0, blue as u16 * 257, u16::MAX])
    }

    #[test]
    fn test_opaque_pixel_normalizes_to_eight_bit_ratio() {
        let value = normalized_blue(&opaque(128)).unwrap();
        assert_eq!(value, 128.0 / 255.0);
        assert_eq!(normalized_blue(&opaque(0)), Some(0.0));
        assert_eq!(normalized_blue(&opaque(255)), Some(1.0));
    }

    #[test]
    fn test_exact_half_flips_at_128() {
        // premultiplied blue = 32768 * 2 / 65535 = 1, normalized = 1 / 2
        let pixel = Rgba([0, 0, 32768, 2]);
        assert_eq!(normalized_blue(&pixel), Some(0.5));
        assert!(!is_black(&pixel, 127));
        assert!(is_black(&pixel, 128));
    }

    #[test]
    fn test_zero_alpha_is_always_white() {
        let pixel = Rgba([0, 0, 0, 0]);
        assert_eq!(normalized_blue(&pixel), None);
        for threshold in 0..=255u8 {
            assert!(!is_black(&pixel, threshold));
        }
    }

    #[test]
    fn test_only_blue_channel_matters() {
        let reddish = Rgba([u16::MAX, u16::MAX, 0, u16::MAX]);
        assert!(is_black(&reddish, 0));
    }

    #[test]
    fn test_monotonic_in_threshold() {
        let pixels = [
            opaque(0),
            opaque(1),
            opaque(77),
            opaque(200),
            opaque(255),
            Rgba([0, 0, 40000, 30000]),
            Rgba([0, 0, 65535, 1]),
        ];

        for pixel in &pixels {
            let mut seen_black = false;
            for threshold in 0..=255u8 {
                let black = is_black(pixel, threshold);
                assert!(!(seen_black && !black), "pixel {:?} flipped back at {}", pixel, threshold);
                seen_black |= black;
            }
        }
    }

    #[test]
    fn test_classify_preserves_dimensions_and_is_idempotent() {
        let mut source = Rgba16Image::new(3, 2);
        for (x, _, pixel) in source.enumerate_pixels_mut() {
            *pixel = opaque((x * 100) as u8);
        }

        let first = classify(&source, 100);
        let second = classify(&source, 100);

        assert_eq!(first.dimensions(), (3, 2));
        assert_eq!(first.as_raw(), second.as_raw());
        assert_eq!(first.get_pixel(0, 0), &BLACK);
        assert_eq!(first.get_pixel(1, 1), &BLACK);
        assert_eq!(first.get_pixel(2, 0), &WHITE);
    }
}
