mod tests {
    use embassy_time::{Duration, Instant};
    use segment_display_composer::{
        AnimationMode, ConfigError, DEFAULT_SEQUENCE, DisplayConfig, DisplayEntry, DisplayFrame,
        FnSink, LatestFrame, Rgb, Sequencer, SequencerTimings,
    };

    const CYAN: Rgb = Rgb { r: 0, g: 255, b: 255 };

    /// Run `count` steps, recording each step's deadline and published frame
    fn record(sequencer: &mut Sequencer<'_>, count: usize) -> Vec<(u64, DisplayFrame)> {
        (0..count)
            .map(|_| {
                let at = sequencer.next_deadline().as_millis();
                let mut published = None;
                sequencer.step(&mut FnSink(|frame: &DisplayFrame| {
                    published = Some(frame.clone());
                }));
                (at, published.expect("every step publishes"))
            })
            .collect()
    }

    fn started(config: &DisplayConfig<'static>) -> Sequencer<'static> {
        let mut sequencer = Sequencer::new(config).unwrap();
        sequencer.reset(Instant::from_millis(0));
        sequencer
    }

    #[test]
    fn test_entry_lifecycle_timing() {
        static SEQUENCE: [DisplayEntry<'static>; 1] =
            [DisplayEntry::new("AB", CYAN, AnimationMode::TypeIn)];
        let config = DisplayConfig {
            sequence: &SEQUENCE,
            ..DisplayConfig::DEFAULT
        };
        let mut sequencer = started(&config);

        let steps = record(&mut sequencer, 9);
        let times: Vec<u64> = steps.iter().map(|(at, _)| *at).collect();
        assert_eq!(times, [0, 200, 400, 600, 800, 1000, 1200, 2700, 3000]);

        // Entering hides everything and takes the entry color
        let (_, enter) = &steps[0];
        assert!(enter.none_visible());
        assert_eq!(enter.color, CYAN);

        // Fully typed, then blanked before the next entry
        assert_eq!(steps[6].1.text, "AB    ");
        assert!(steps[6].1.all_visible());
        assert_eq!(steps[7].1.text, "AB    ");
        assert!(steps[7].1.none_visible());

        // Single entry wraps onto itself
        assert_eq!(sequencer.current_index(), 0);
        assert_eq!(sequencer.passes(), 1);
        assert_eq!(sequencer.current_mode(), Some(AnimationMode::TypeIn));
    }

    #[test]
    fn test_entries_advance_in_order() {
        let mut sequencer = started(&DisplayConfig::DEFAULT);
        let mut seen = Vec::new();

        while sequencer.passes() == 0 {
            let before = sequencer.current_index();
            record(&mut sequencer, 1);
            if seen.last() != Some(&before) {
                seen.push(before);
            }
        }

        let expected: Vec<usize> = (0..DEFAULT_SEQUENCE.len()).collect();
        assert_eq!(seen, expected);
        assert_eq!(sequencer.current_index(), 0);
    }

    #[test]
    fn test_second_pass_repeats_first() {
        let mut sequencer = started(&DisplayConfig::DEFAULT);
        let mut passes: [Vec<(u64, DisplayFrame)>; 2] = [Vec::new(), Vec::new()];

        loop {
            let step = record(&mut sequencer, 1).remove(0);
            match sequencer.passes() {
                0 => passes[0].push(step),
                1 => passes[1].push(step),
                _ => break,
            }
        }

        assert_eq!(sequencer.current_index(), 0);
        assert_eq!(passes[0].len(), passes[1].len());

        let pass_start = passes[1][0].0;
        assert_eq!(pass_start, 19_540);

        for ((at_a, frame_a), (at_b, frame_b)) in passes[0].iter().zip(&passes[1]) {
            assert_eq!(at_b - pass_start, *at_a);
            assert_eq!(frame_a, frame_b);
        }
    }

    #[test]
    fn test_entry_frames_carry_index_and_color() {
        let mut sequencer = started(&DisplayConfig::DEFAULT);
        let mut entries = Vec::new();
        while sequencer.passes() == 0 {
            for (_, frame) in record(&mut sequencer, 1) {
                if entries.last() != Some(&frame.entry_index) {
                    assert_eq!(frame.color, DEFAULT_SEQUENCE[frame.entry_index].color);
                    entries.push(frame.entry_index);
                }
            }
        }
        assert_eq!(entries.len(), DEFAULT_SEQUENCE.len() + 1);
    }

    #[test]
    fn test_tick_runs_due_steps() {
        let mut sequencer = started(&DisplayConfig::DEFAULT);
        let mut sink = LatestFrame::new();

        let next = sequencer.tick(Instant::from_millis(200), &mut sink);
        assert_eq!(sink.updates(), 2);
        assert_eq!(next, Instant::from_millis(400));
        assert_eq!(sink.frame().unwrap().text, "A     ");

        // Nothing due yet
        let next = sequencer.tick(Instant::from_millis(399), &mut sink);
        assert_eq!(sink.updates(), 2);
        assert_eq!(next, Instant::from_millis(400));
    }

    #[test]
    fn test_drift_rebases_schedule() {
        let mut sequencer = started(&DisplayConfig::DEFAULT);
        let mut sink = LatestFrame::new();

        let next = sequencer.tick(Instant::from_millis(100_000), &mut sink);
        assert_eq!(sink.updates(), 1);
        assert_eq!(next, Instant::from_millis(100_200));
        assert_eq!(sequencer.current_index(), 0);
    }

    #[test]
    fn test_unbounded_drift_replays_backlog() {
        let config = DisplayConfig {
            max_drift: Duration::MAX,
            ..DisplayConfig::DEFAULT
        };
        let mut sequencer = started(&config);
        let mut sink = LatestFrame::new();

        // Never rebased: enter plus every reveal up to 1000ms
        let next = sequencer.tick(Instant::from_millis(1_000), &mut sink);
        assert_eq!(sink.updates(), 6);
        assert_eq!(next, Instant::from_millis(1_200));
        assert_eq!(sink.frame().unwrap().text, "ACHEB ");
    }

    #[test]
    fn test_huge_hold_saturates_schedule() {
        static SEQUENCE: [DisplayEntry<'static>; 1] =
            [DisplayEntry::new("GO", CYAN, AnimationMode::Flash)];
        let config = DisplayConfig {
            sequence: &SEQUENCE,
            timings: SequencerTimings {
                flash_hold: Duration::MAX,
                ..SequencerTimings::DEFAULT
            },
            max_drift: Duration::MAX,
            ..DisplayConfig::DEFAULT
        };
        let mut sequencer = started(&config);
        let mut sink = LatestFrame::new();

        // Enter, six toggles and the settle step, then held for good
        let next = sequencer.tick(Instant::from_millis(900), &mut sink);
        assert_eq!(sink.updates(), 8);
        assert_eq!(next, Instant::MAX);
        assert!(sink.frame().unwrap().all_visible());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut sequencer = started(&DisplayConfig::DEFAULT);
        record(&mut sequencer, 40);
        assert_ne!(sequencer.current_index(), 0);

        sequencer.reset(Instant::from_millis(5_000));
        assert_eq!(sequencer.current_index(), 0);
        assert_eq!(sequencer.next_deadline(), Instant::from_millis(5_000));
        assert_eq!(sequencer.frame(), &DisplayFrame::default());
        assert_eq!(sequencer.current_mode(), None);
    }

    #[test]
    fn test_config_validation() {
        let empty = DisplayConfig {
            sequence: &[],
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(Sequencer::new(&empty).err(), Some(ConfigError::EmptySequence));

        let zero_flash = DisplayConfig {
            timings: SequencerTimings {
                flash_interval: Duration::from_millis(0),
                ..SequencerTimings::DEFAULT
            },
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(
            Sequencer::new(&zero_flash).err(),
            Some(ConfigError::ZeroInterval("flash_interval"))
        );

        // Holds may be zero
        let no_holds = SequencerTimings {
            type_in_hold: Duration::from_millis(0),
            flash_hold: Duration::from_millis(0),
            countdown_hold: Duration::from_millis(0),
            wave_hold: Duration::from_millis(0),
            ..SequencerTimings::DEFAULT
        };
        assert_eq!(no_holds.validate(), Ok(()));
    }
}
