//! Desktop preview app for segment-display-composer
//!
//! Plays the display script in a window, with playback controls.
//! Drives the controller with synthetic time and draws the slots the same
//! way a hardware renderer would: staggered segment reveals and flicker.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use segment_display_composer::{
    DISPLAY_WIDTH, DisplayConfig, DisplayController, DisplaySlots, FrameChannel, FrameSender,
    Instant, RunSource, Segment, SegmentShade, slot::LIT_INTENSITY,
};

/// Default width of one digit in pixels
const DIGIT_SIZE: f32 = 48.0;

/// Gap between digits, as a fraction of the digit width
const DIGIT_GAP: f32 = 0.35;

/// Segment thickness, as a fraction of the digit width
const SEGMENT_THICKNESS: f32 = 0.16;

/// Frame channel size; one UI tick rarely runs more steps than this
const FRAME_CHANNEL_SIZE: usize = 32;

/// Run source shared by the UI and the controller
static RUN_SOURCE: RunSource = RunSource::new();

/// Every published frame, drained by the UI once per tick
static FRAMES_CHANNEL: FrameChannel<FRAME_CHANNEL_SIZE> = FrameChannel::new();

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 360.0])
            .with_title("Segment Display Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "segment-display-preview",
        options,
        Box::new(|_cc| {
            let app = PreviewApp::new().map_err(|err| format!("{err:?}"))?;
            Ok(Box::new(app))
        }),
    )
}

struct PreviewApp {
    /// The display instance
    controller: DisplayController<'static, FrameSender<'static, FRAME_CHANNEL_SIZE>>,
    /// Per-slot render state fed from published frames
    slots: DisplaySlots,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether time is advancing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Digit width in pixels
    digit_size: f32,
}

impl PreviewApp {
    fn new() -> Result<Self, segment_display_composer::ConfigError> {
        let mut controller =
            DisplayController::new(&DisplayConfig::DEFAULT, &RUN_SOURCE, FRAMES_CHANNEL.sender())?;
        controller.start(Instant::from_millis(0));

        Ok(Self {
            controller,
            slots: DisplaySlots::default(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            digit_size: DIGIT_SIZE,
        })
    }

    /// Restart the script from the first entry
    fn restart(&mut self) {
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
        self.slots = DisplaySlots::default();
        while FRAMES_CHANNEL.try_receive().is_ok() {}
        self.controller.start(Instant::from_millis(0));
    }

    /// Toggle playing state
    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    fn draw_display(&self, ui: &mut egui::Ui, now: Instant) {
        let width = self.digit_size;
        let height = width * 2.0;
        let pitch = width * (1.0 + DIGIT_GAP);

        #[allow(clippy::cast_precision_loss)]
        let total_width = pitch * DISPLAY_WIDTH as f32 + width * DIGIT_GAP;
        let (response, painter) = ui.allocate_painter(
            egui::vec2(total_width, height + 2.0 * width * DIGIT_GAP),
            egui::Sense::hover(),
        );
        painter.rect_filled(response.rect, 6.0, egui::Color32::from_rgb(4, 8, 4));

        let inset = width * DIGIT_GAP;
        for slot in 0..DISPLAY_WIDTH {
            #[allow(clippy::cast_precision_loss)]
            let origin = response.rect.min + egui::vec2(inset + slot as f32 * pitch, inset);
            for segment in Segment::ALL {
                let rect = segment_rect(segment, width).translate(origin.to_vec2());
                let shade = self.slots.shade(slot, segment, now);
                painter.rect_filled(rect, 2.0, shade_color(shade));
            }
        }
    }
}

/// Rectangle of `segment` in a digit of the given width, anchored at zero
fn segment_rect(segment: Segment, width: f32) -> egui::Rect {
    let t = width * SEGMENT_THICKNESS;
    let h = width * 2.0;
    let half = width;

    let (min, max) = match segment {
        Segment::A => ((t, 0.0), (width - t, t)),
        Segment::B => ((width - t, t), (width, half - t / 2.0)),
        Segment::C => ((width - t, half + t / 2.0), (width, h - t)),
        Segment::D => ((t, h - t), (width - t, h)),
        Segment::E => ((0.0, half + t / 2.0), (t, h - t)),
        Segment::F => ((0.0, t), (t, half - t / 2.0)),
        Segment::G => ((t, half - t / 2.0), (width - t, half + t / 2.0)),
    };
    egui::Rect::from_min_max(egui::pos2(min.0, min.1), egui::pos2(max.0, max.1))
}

/// Screen color of a segment; lit segments scale with their flicker
fn shade_color(shade: SegmentShade) -> egui::Color32 {
    if shade == SegmentShade::UNLIT {
        return egui::Color32::from_rgb(shade.color.r, shade.color.g, shade.color.b);
    }

    let scale = (shade.intensity / LIT_INTENSITY).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |value: u8| (f32::from(value) * scale) as u8;
    egui::Color32::from_rgb(
        channel(shade.color.r),
        channel(shade.color.g),
        channel(shade.color.b),
    )
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update synthetic time
        self.update_time();

        // Advance the script and feed every new state to the slots, in order
        let now = Instant::from_millis(self.t_ms);
        self.controller.tick(now);
        while let Ok(frame) = FRAMES_CHANNEL.try_receive() {
            self.slots.apply(&frame, now);
        }

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("⏮ Restart").clicked() {
                            self.restart();
                        }
                        if ui
                            .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                            .clicked()
                        {
                            self.toggle_playing();
                        }
                        if self.controller.is_running() {
                            if ui.button("⏹ Stop").clicked() {
                                self.controller.stop();
                            }
                        } else if ui.button("⏵ Start").clicked() {
                            self.restart();
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <DisplayInfo>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Size: ");
                        ui.add(egui::Slider::new(&mut self.digit_size, 16.0..=96.0));
                    });

                    ui.add_space(4.0);

                    let sequencer = self.controller.sequencer();
                    let entry = sequencer.current_entry();
                    ui.label(format!(
                        "Entry {}/{}: \"{}\" ({})",
                        sequencer.current_index() + 1,
                        sequencer.sequence().len(),
                        entry.text,
                        entry.mode.as_str(),
                    ));
                    ui.label(format!("Pass: {}", sequencer.passes() + 1));
                });
                // </DisplayInfo>
            });

            ui.add_space(16.0);

            self.draw_display(ui, now);
        });
    }
}
