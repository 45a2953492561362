mod tests {
    use embassy_time::Duration;
    use segment_display_composer::animation::{FLASH_TOGGLES, WAVE_SWEEPS, wave_window};
    use segment_display_composer::script::normalize_text;
    use segment_display_composer::{
        AnimationMode, AnimationSlot, DISPLAY_WIDTH, DisplayFrame, SequencerTimings,
    };

    fn slot(mode: AnimationMode, text: &str) -> AnimationSlot {
        mode.to_slot(&normalize_text(text), &SequencerTimings::DEFAULT)
    }

    /// Step until the animation finishes, collecting (frame, delay) pairs
    fn run(animation: &mut AnimationSlot, frame: &mut DisplayFrame) -> Vec<(DisplayFrame, Duration)> {
        let mut steps = Vec::new();
        while let Some(delay) = animation.step(frame) {
            steps.push((frame.clone(), delay));
            assert!(steps.len() < 100, "animation never finished");
        }
        steps
    }

    #[test]
    fn test_type_in_reveals_left_to_right() {
        let mut animation = slot(AnimationMode::TypeIn, "AB    ");
        let mut frame = DisplayFrame::default();
        assert_eq!(animation.lead_in(), Duration::from_millis(200));

        let steps = run(&mut animation, &mut frame);
        assert_eq!(steps.len(), DISPLAY_WIDTH);

        for (i, (frame, delay)) in steps.iter().enumerate() {
            assert_eq!(frame.text, normalize_text(&"AB    "[..=i]));
            for slot in 0..DISPLAY_WIDTH {
                assert_eq!(frame.visible[slot], slot <= i, "step {i}, slot {slot}");
            }
            let expected = if i + 1 == DISPLAY_WIDTH { 1500 } else { 200 };
            assert_eq!(*delay, Duration::from_millis(expected));
        }
        assert_eq!(steps[0].0.text, "A     ");
        assert_eq!(steps[1].0.text, "AB    ");
    }

    #[test]
    fn test_flash_ends_visible() {
        for start_visible in [false, true] {
            let mut animation = slot(AnimationMode::Flash, "HELLO");
            let mut frame = DisplayFrame::default();
            frame.set_all_visible(start_visible);

            let steps = run(&mut animation, &mut frame);
            assert_eq!(steps.len(), FLASH_TOGGLES + 1);

            for (i, (frame, delay)) in steps.iter().take(FLASH_TOGGLES).enumerate() {
                assert_eq!(frame.text, "HELLO ");
                assert_eq!(frame.all_visible(), i % 2 == 0);
                assert_eq!(frame.none_visible(), i % 2 == 1);
                assert_eq!(*delay, Duration::from_millis(150));
            }

            let (last, hold) = steps.last().unwrap();
            assert!(last.all_visible());
            assert_eq!(*hold, Duration::from_millis(1200));
            assert!(frame.all_visible());
        }
    }

    #[test]
    fn test_scroll_slides_one_position_at_a_time() {
        let mut animation = slot(AnimationMode::Scroll, "HELLO ");
        let mut frame = DisplayFrame::default();
        assert_eq!(animation.lead_in(), Duration::from_millis(0));

        let buffer = "      HELLO       ";
        let steps = run(&mut animation, &mut frame);
        assert_eq!(steps.len(), buffer.len() - DISPLAY_WIDTH + 1);

        for (offset, (frame, delay)) in steps.iter().enumerate() {
            assert_eq!(frame.text, &buffer[offset..offset + DISPLAY_WIDTH]);
            assert!(frame.all_visible());
            assert_eq!(*delay, Duration::from_millis(180));
        }
        for pair in steps.windows(2) {
            assert_eq!(pair[0].0.text[1..], pair[1].0.text[..DISPLAY_WIDTH - 1]);
        }
        assert_eq!(steps[6].0.text, "HELLO ");
        assert_eq!(steps.last().unwrap().0.text, "      ");
    }

    #[test]
    fn test_countdown_right_aligns_suffixes() {
        let mut animation = slot(AnimationMode::Countdown, "54321 ");
        let mut frame = DisplayFrame::default();

        let steps = run(&mut animation, &mut frame);
        let texts: Vec<&str> = steps.iter().map(|(frame, _)| frame.text.as_str()).collect();
        assert_eq!(
            texts,
            ["54321 ", " 4321 ", "  321 ", "   21 ", "    1 ", "      "]
        );
        for (i, (frame, delay)) in steps.iter().enumerate() {
            assert_eq!(frame.text.len(), DISPLAY_WIDTH);
            assert!(frame.all_visible());
            let expected = if i + 1 == DISPLAY_WIDTH { 900 } else { 400 };
            assert_eq!(*delay, Duration::from_millis(expected));
        }
    }

    #[test]
    fn test_countdown_ends_on_last_digit() {
        let mut animation = slot(AnimationMode::Countdown, "543210");
        let mut frame = DisplayFrame::default();
        let steps = run(&mut animation, &mut frame);
        assert_eq!(steps.last().unwrap().0.text, "     0");
    }

    #[test]
    fn test_wave_window() {
        assert_eq!(wave_window(0), [true, false, false, false, false, false]);
        assert_eq!(wave_window(1), [true, true, false, false, false, false]);
        assert_eq!(wave_window(2), [true, true, true, false, false, false]);
        assert_eq!(wave_window(3), [false, true, true, true, false, false]);
        assert_eq!(wave_window(5), [false, false, false, true, true, true]);
    }

    #[test]
    fn test_wave_sweeps_then_settles() {
        let mut animation = slot(AnimationMode::Wave, "------");
        let mut frame = DisplayFrame::default();

        let steps = run(&mut animation, &mut frame);
        assert_eq!(steps.len(), WAVE_SWEEPS * DISPLAY_WIDTH + 1);

        for (i, (frame, delay)) in steps.iter().take(WAVE_SWEEPS * DISPLAY_WIDTH).enumerate() {
            assert_eq!(frame.text, "------");
            assert_eq!(frame.visible, wave_window(i % DISPLAY_WIDTH));
            assert_eq!(*delay, Duration::from_millis(100));
        }
        let (last, hold) = steps.last().unwrap();
        assert!(last.all_visible());
        assert_eq!(*hold, Duration::from_millis(800));
    }

    #[test]
    fn test_reset_replays_animation() {
        for mode in AnimationMode::ALL {
            let mut animation = slot(mode, "CODE");
            assert_eq!(animation.mode(), mode);

            let first = run(&mut animation, &mut DisplayFrame::default());
            animation.reset();
            let second = run(&mut animation, &mut DisplayFrame::default());
            assert_eq!(first, second, "{}", mode.as_str());
        }
    }
}
