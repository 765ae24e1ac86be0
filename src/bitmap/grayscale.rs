use crate::bitmap::Bitmap;

/// ITU-R BT.601 luminance weights. These must not drift: the backend produces
/// its grayscale rendition with the same coefficients, and the local preview
/// is expected to match it perceptually.
const R_WEIGHT: f64 = 0.299;
const G_WEIGHT: f64 = 0.587;
const B_WEIGHT: f64 = 0.114;

/// Produces a luminance-mapped copy of `src`.
///
/// Each pixel's R, G and B channels are set to
/// `round(r*0.299 + g*0.587 + b*0.114)`; the alpha channel is passed through
/// unchanged. The input is never mutated. The weights sum to 1.0, so the
/// result of valid input always lies in [0, 255], and re-converting an
/// already-grayscale bitmap changes no pixel.
pub fn to_grayscale(src: &Bitmap) -> Bitmap {
    let mut data = Vec::with_capacity(src.data.len());
    for px in src.data.chunks_exact(4) {
        let gray = luminance(px[0], px[1], px[2]);
        data.extend_from_slice(&[gray, gray, gray, px[3]]);
    }
    Bitmap { width: src.width, height: src.height, data }
}

/// Weighted-channel luminance of one pixel, rounded to the nearest byte.
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (r as f64 * R_WEIGHT + g as f64 * G_WEIGHT + b as f64 * B_WEIGHT).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_red_two_by_two_maps_to_76() {
        let bmp = Bitmap::from_rgba(2, 2, vec![255, 0, 0, 255].repeat(4));
        let gray = to_grayscale(&bmp);
        assert_eq!(gray.width, 2);
        assert_eq!(gray.height, 2);
        for y in 0..2 {
            for x in 0..2 {
                // round(255 * 0.299) = 76, alpha untouched
                assert_eq!(gray.pixel(x, y), (76, 76, 76, 255));
            }
        }
    }

    #[test]
    fn channels_are_equal_and_match_the_formula() {
        let cases = [(0u8, 0u8, 0u8), (255, 255, 255), (12, 200, 99), (1, 2, 3)];
        for (r, g, b) in cases {
            let bmp = Bitmap::from_rgba(1, 1, vec![r, g, b, 200]);
            let (gr, gg, gb, ga) = to_grayscale(&bmp).pixel(0, 0);
            let expected =
                (r as f64 * 0.299 + g as f64 * 0.587 + b as f64 * 0.114).round() as u8;
            assert_eq!(gr, expected);
            assert_eq!(gg, expected);
            assert_eq!(gb, expected);
            assert_eq!(ga, 200);
        }
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let mut data = Vec::new();
        for i in 0..64u32 {
            data.extend_from_slice(&[
                (i * 4 % 256) as u8,
                (i * 7 % 256) as u8,
                (i * 13 % 256) as u8,
                (i % 256) as u8,
            ]);
        }
        let once = to_grayscale(&Bitmap::from_rgba(8, 8, data));
        let twice = to_grayscale(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn preserves_varying_alpha() {
        let bmp = Bitmap::from_rgba(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 128]);
        let gray = to_grayscale(&bmp);
        assert_eq!(gray.pixel(0, 0).3, 0);
        assert_eq!(gray.pixel(1, 0).3, 128);
    }

    #[test]
    fn input_is_not_mutated() {
        let bmp = Bitmap::from_rgba(1, 1, vec![200, 100, 50, 255]);
        let before = bmp.clone();
        let _ = to_grayscale(&bmp);
        assert_eq!(bmp, before);
    }
}
