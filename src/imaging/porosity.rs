use image::RgbaImage;

/// Black/total pixel counts of a binary image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PorosityCounts {
    pub black: u64,
    pub total: u64,
}

impl PorosityCounts {
    /// Count pixels whose colour channels are all zero; alpha is ignored.
    pub fn from_image(image: &RgbaImage) -> Self {
        let black = image
            .pixels()
            .filter(|pixel| pixel.0[..3] == [0, 0, 0])
            .count() as u64;

        Self {
            black,
            total: image.width() as u64 * image.height() as u64,
        }
    }

    /// Black pixels as a percentage in [0, 100]. An empty image is 0%.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.black as f64 / self.total as f64 * 100.0
    }
}

/// Percentage of black pixels in a classified image.
pub fn measure(binary: &RgbaImage) -> f64 {
    PorosityCounts::from_image(binary).percentage()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::classifier::{BLACK, WHITE};
    use image::Rgba;

    #[test]
    fn test_all_black_and_all_white() {
        assert_eq!(measure(&RgbaImage::from_pixel(4, 4, BLACK)), 100.0);
        assert_eq!(measure(&RgbaImage::from_pixel(4, 4, WHITE)), 0.0);
    }

    #[test]
    fn test_partial_coverage() {
        let mut image = RgbaImage::from_pixel(4, 2, WHITE);
        image.put_pixel(0, 0, BLACK);
        image.put_pixel(3, 1, BLACK);

        let counts = PorosityCounts::from_image(&image);
        assert_eq!(counts, PorosityCounts { black: 2, total: 8 });
        assert_eq!(counts.percentage(), 25.0);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        assert_eq!(measure(&image), 100.0);
    }

    #[test]
    fn test_empty_image_is_zero() {
        assert_eq!(measure(&RgbaImage::new(0, 0)), 0.0);
    }
}
