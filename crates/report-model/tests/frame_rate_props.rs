use motionscope_report_model::{FrameRate, VideoMetadata};
use proptest::prelude::*;

proptest! {
    #[test]
    fn lenient_parse_always_yields_positive_rate(raw in ".{0,24}") {
        let rate = FrameRate::parse_lenient(Some(&raw));
        prop_assert!(rate.numerator > 0);
        prop_assert!(rate.denominator > 0);
        prop_assert!(rate.as_f64() > 0.0);
    }

    #[test]
    fn well_formed_rates_parse_exactly(num in 1u32..240_000, den in 1u32..10_000) {
        let rate = FrameRate::parse_lenient(Some(&format!("{num}/{den}")));
        prop_assert_eq!(rate.numerator, num);
        prop_assert_eq!(rate.denominator, den);
    }

    #[test]
    fn estimated_frames_track_duration(duration in 0.0f64..36_000.0, num in 1u32..120) {
        let rate = FrameRate { numerator: num, denominator: 1 };
        let metadata = VideoMetadata::new(rate, duration);
        let expected = (duration * num as f64).round() as u64;
        prop_assert_eq!(metadata.estimated_total_frames(), expected);
    }
}
