//! Property tests over generated samples and byte streams.

use casia_pot::encode::RecordEncoder;
use casia_pot::normalize::{normalize, BoundingBox};
use casia_pot::text::{decode_class, encode_class};
use casia_pot::{decode_parallel, StreamDecoder, Stroke, StrokeSet};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Points that never collide with a terminator sentinel.
fn point() -> impl Strategy<Value = (u16, u16)> {
    (0u16..0xFFFF, any::<u16>())
}

fn strokes() -> impl Strategy<Value = StrokeSet> {
    prop::collection::vec(
        prop::collection::vec(point(), 0..8).prop_map(|pts| pts.into_iter().collect::<Stroke>()),
        0..6,
    )
}

/// Printable ASCII or a level-1 GB2312 hanzi.
fn label() -> impl Strategy<Value = u16> {
    prop_oneof![
        0x20u16..0x7F,
        (0xB0u16..=0xD6, 0xA1u16..=0xFE).prop_map(|(hi, lo)| (hi << 8) | lo),
    ]
}

fn shape(strokes: &[Stroke]) -> Vec<usize> {
    strokes.iter().map(Stroke::len).collect()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn normalized_sample_touches_both_axes(input in strokes()) {
        let out = normalize(&input);
        prop_assert_eq!(shape(&out), shape(&input));
        match (BoundingBox::of(&input), BoundingBox::of(&out)) {
            (Some(before), Some(after)) => {
                prop_assert_eq!(after.min_x, 0);
                prop_assert_eq!(after.min_y, 0);
                prop_assert_eq!(after.width(), before.width());
                prop_assert_eq!(after.height(), before.height());
            }
            (None, None) => prop_assert_eq!(&out, &input),
            _ => prop_assert!(false, "point count changed"),
        }
    }

    #[test]
    fn normalization_flips_about_max_y(input in strokes()) {
        let out = normalize(&input);
        if let Some(bounds) = BoundingBox::of(&input) {
            for (a, b) in input.iter().flatten().zip(out.iter().flatten()) {
                prop_assert_eq!(b.x + bounds.min_x, a.x);
                prop_assert_eq!(u32::from(b.y) + u32::from(a.y), u32::from(bounds.max_y));
            }
        }
    }

    #[test]
    fn normalize_is_idempotent_on_x(input in strokes()) {
        let once = normalize(&input);
        let twice = normalize(&once);
        let xs = |s: &[Stroke]| s.iter().flatten().map(|p| p.x).collect::<Vec<_>>();
        prop_assert_eq!(xs(&twice), xs(&once));
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn encoded_records_decode_to_normalized_strokes(
        records in prop::collection::vec((label(), any::<u16>(), strokes()), 1..6)
    ) {
        let mut enc = RecordEncoder::new();
        for (code, declared, strokes) in &records {
            enc.record(*code, *declared, strokes).unwrap();
        }
        let bytes = enc.flush();

        let decoded = StreamDecoder::new().decode_slice(&bytes);
        prop_assert_eq!(decoded.skipped, 0);
        prop_assert!(!decoded.truncated);
        prop_assert_eq!(decoded.samples.len(), records.len());
        for (sample, (code, declared, strokes)) in decoded.samples.iter().zip(&records) {
            prop_assert_eq!(sample.label_code, *code);
            prop_assert_eq!(sample.declared_stroke_count, *declared);
            prop_assert_eq!(&sample.strokes, &normalize(strokes));
        }
    }

    #[test]
    fn prefix_decodes_to_prefix(
        records in prop::collection::vec((label(), strokes()), 1..5),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut enc = RecordEncoder::new();
        for (code, strokes) in &records {
            enc.record(*code, strokes.len() as u16, strokes).unwrap();
        }
        let bytes = enc.flush();
        let full = StreamDecoder::new().decode_slice(&bytes);

        let cut = cut.index(bytes.len());
        let partial = StreamDecoder::new().decode_slice(&bytes[..cut]);
        prop_assert!(partial.samples.len() <= full.samples.len());
        prop_assert_eq!(&partial.samples[..], &full.samples[..partial.samples.len()]);
    }

    #[test]
    fn parallel_matches_sequential_on_arbitrary_bytes(
        bytes in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        prop_assert_eq!(decode_parallel(&bytes), StreamDecoder::new().decode_slice(&bytes));
    }

    #[test]
    fn reader_matches_slice_on_arbitrary_bytes(
        bytes in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let from_reader = StreamDecoder::new()
            .decode_reader(std::io::Cursor::new(bytes.clone()))
            .unwrap();
        prop_assert_eq!(from_reader, StreamDecoder::new().decode_slice(&bytes));
    }
}

// ---------------------------------------------------------------------------
// Class text
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn class_text_round_trips(
        code in any::<u16>(),
        samples in prop::collection::vec(strokes(), 0..5),
    ) {
        let text = encode_class(code, &samples);
        prop_assert_eq!(decode_class(&text).unwrap(), (code, samples.clone()));
        prop_assert_eq!(decode_class(&format!("{text}\r\n")).unwrap(), (code, samples));
    }
}
