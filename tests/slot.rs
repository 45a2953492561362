mod tests {
    use embassy_time::{Duration, Instant};
    use segment_display_composer::slot::{
        DEFAULT_SEGMENT_STAGGER, LIT_INTENSITY, UNLIT_COLOR, UNLIT_INTENSITY, flicker,
    };
    use segment_display_composer::{
        CharacterSlot, DisplayFrame, DisplaySlots, Rgb, Segment, SegmentShade, Segments, lookup,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_segments_light_in_order() {
        let mut slot = CharacterSlot::new(DEFAULT_SEGMENT_STAGGER);
        assert!(slot.set('1', true, at(0)));

        // '1' is b and c; a comes first and is not part of it
        assert_eq!(slot.segments(at(0)), Segments::BLANK);
        assert_eq!(slot.segments(at(50)).bits(), 0b000_0010);
        assert_eq!(slot.segments(at(100)), lookup('1'));
        assert!(!slot.is_settled(at(250)));
        assert!(slot.is_settled(at(300)));
        assert_eq!(slot.segments(at(300)), lookup('1'));
    }

    #[test]
    fn test_reveal_replaces_previous_character() {
        let mut slot = CharacterSlot::default();
        slot.set('8', true, at(0));
        assert_eq!(slot.segments(at(1_000)), Segments::ALL);

        slot.set('1', true, at(1_000));
        // Only segment a has switched so far; the rest still shows '8'
        assert_eq!(slot.segments(at(1_000)).bits(), 0b111_1110);
        assert_eq!(slot.segments(at(1_300)), lookup('1'));
        assert_eq!(slot.char(), '1');
    }

    #[test]
    fn test_superseded_reveal_starts_from_screen() {
        let mut slot = CharacterSlot::default();
        slot.set('8', true, at(0));
        // a, b and c are lit at 100ms
        slot.set(' ', true, at(100));
        assert_eq!(slot.segments(at(100)).bits(), 0b000_0110);
        assert_eq!(slot.segments(at(400)), Segments::BLANK);
    }

    #[test]
    fn test_hide_is_immediate() {
        let mut slot = CharacterSlot::default();
        slot.set('8', true, at(0));
        assert!(slot.set('8', false, at(1_000)));
        assert_eq!(slot.segments(at(1_000)), Segments::BLANK);
        assert!(slot.is_settled(at(1_000)));
        assert!(!slot.is_visible());
    }

    #[test]
    fn test_unchanged_set_keeps_reveal() {
        let mut slot = CharacterSlot::default();
        assert!(slot.set('8', true, at(0)));
        assert!(!slot.set('8', true, at(100)));
        // Still revealing from the first set
        assert!(slot.is_settled(at(300)));
    }

    #[test]
    fn test_zero_stagger_reveals_at_once() {
        let mut slot = CharacterSlot::new(Duration::from_ticks(0));
        slot.set('8', true, at(0));
        assert_eq!(slot.segments(at(0)), Segments::ALL);
        assert!(slot.is_settled(at(0)));
    }

    #[test]
    fn test_flicker_range() {
        assert!((flicker(at(0)) - 0.95).abs() < 1e-6);
        for ms in (0..2_000).step_by(7) {
            let factor = flicker(at(ms));
            assert!((0.9..=1.0).contains(&factor), "{factor} at {ms}ms");
        }
    }

    #[test]
    fn test_shades() {
        assert_eq!(
            SegmentShade::for_segment(false, RED, at(0)),
            SegmentShade {
                color: UNLIT_COLOR,
                intensity: UNLIT_INTENSITY,
            }
        );
        let lit = SegmentShade::for_segment(true, RED, at(0));
        assert_eq!(lit.color, RED);
        assert!((lit.intensity - LIT_INTENSITY * 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_display_slots_follow_frames() {
        let mut slots = DisplaySlots::default();
        let mut frame = DisplayFrame {
            color: RED,
            ..DisplayFrame::default()
        };
        frame.text.clear();
        frame.text.push_str("8     ").unwrap();
        frame.visible[0] = true;

        slots.apply(&frame, at(0));
        assert_eq!(slots.color(), RED);
        assert_eq!(slots.shade(0, Segment::A, at(0)).color, RED);
        assert_eq!(slots.shade(0, Segment::G, at(0)), SegmentShade::UNLIT);
        assert_eq!(slots.shade(1, Segment::A, at(0)), SegmentShade::UNLIT);
        assert_eq!(slots.shade(42, Segment::A, at(0)), SegmentShade::UNLIT);
        assert!(!slots.is_settled(at(0)));

        let settled = slots.segments(at(300));
        assert!(slots.is_settled(at(300)));
        assert_eq!(settled[0], Segments::ALL);
        assert!(settled[1..].iter().all(|segments| segments.is_blank()));

        frame.set_all_visible(false);
        slots.apply(&frame, at(400));
        assert!(slots.segments(at(400)).iter().all(|segments| segments.is_blank()));
    }
}
