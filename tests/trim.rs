//! Trimming properties checked through the public library API.

use qrcrop::output::{decode_png, encode_png};
use qrcrop::pixel::PixelBuffer;
use qrcrop::trim::{bounding_box, trim};

/// Small deterministic generator so the sample buffers vary.
struct Lcg(u64);

impl Lcg {
    fn step(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        u32::try_from(self.0 >> 33).unwrap()
    }

    fn below(&mut self, n: u32) -> u32 {
        self.step() % n
    }
}

fn sample(rng: &mut Lcg) -> PixelBuffer {
    let (width, height) = (1 + rng.below(12), 1 + rng.below(12));
    let mut buf = PixelBuffer::new(width, height);
    for _ in 0..rng.below(6) {
        let (x, y) = (rng.below(width), rng.below(height));
        let channel = u8::try_from(rng.below(256)).unwrap();
        let alpha = u8::try_from(1 + rng.below(255)).unwrap();
        buf.put_pixel(x, y, [channel, channel / 2, channel / 3, alpha]);
    }
    buf
}

#[test]
fn box_is_tight_and_content_preserved() {
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let buf = sample(&mut rng);
        let visible: Vec<(u32, u32)> = (0..buf.height())
            .flat_map(|y| (0..buf.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.alpha(x, y) > 0)
            .collect();
        let bbox = bounding_box(&buf);
        let trimmed = trim(buf.clone());

        if visible.is_empty() {
            assert_eq!(trimmed, buf);
            continue;
        }

        assert_eq!(bbox.top, visible.iter().map(|p| p.1).min().unwrap());
        assert_eq!(bbox.bottom, visible.iter().map(|p| p.1).max().unwrap() + 1);
        assert_eq!(bbox.left, visible.iter().map(|p| p.0).min().unwrap());
        assert_eq!(bbox.right, visible.iter().map(|p| p.0).max().unwrap() + 1);

        assert_eq!((trimmed.width(), trimmed.height()), (bbox.width(), bbox.height()));
        for y in 0..trimmed.height() {
            for x in 0..trimmed.width() {
                assert_eq!(trimmed.pixel(x, y), buf.pixel(bbox.left + x, bbox.top + y));
            }
        }

        assert_eq!(trim(trimmed.clone()), trimmed, "trimming twice changes nothing");
    }
}

#[test]
fn single_opaque_pixel() {
    let mut buf = PixelBuffer::new(10, 10);
    buf.put_pixel(4, 4, [1, 2, 3, 255]);
    let trimmed = trim(buf);
    assert_eq!((trimmed.width(), trimmed.height()), (1, 1));
    assert_eq!(trimmed.pixel(0, 0), [1, 2, 3, 255]);
}

#[test]
fn fully_transparent_is_a_no_op() {
    let buf = PixelBuffer::new(5, 5);
    let trimmed = trim(buf.clone());
    assert_eq!((trimmed.width(), trimmed.height()), (5, 5));
    assert_eq!(trimmed, buf);
}

#[test]
fn two_by_two_block() {
    let mut buf = PixelBuffer::new(8, 8);
    for (x, y) in [(5, 3), (6, 3), (5, 4), (6, 4)] {
        buf.put_pixel(x, y, [u8::try_from(x).unwrap(), u8::try_from(y).unwrap(), 9, 255]);
    }
    let trimmed = trim(buf.clone());
    assert_eq!((trimmed.width(), trimmed.height()), (2, 2));
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(trimmed.pixel(x, y), buf.pixel(5 + x, 3 + y));
        }
    }
}

#[test]
fn trimmed_png_round_trips() {
    let mut rng = Lcg(42);
    for _ in 0..20 {
        let trimmed = trim(sample(&mut rng));
        let decoded = decode_png(&encode_png(trimmed.clone()).unwrap()).unwrap();
        assert_eq!(decoded, trimmed);
    }
}
