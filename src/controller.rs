//! The interactive capture loop.

use std::time::Duration;

use crate::annotate::Annotator;
use crate::gui::Display;
use crate::mode::{transition, Key, Mode, Notice};
use crate::timer::FpsCounter;
use crate::vision::Vision;
use crate::webcam::FrameSource;

/// How long each iteration waits for a key press.
pub const KEY_POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// State of the capture loop after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running(Mode),
    Terminated,
}

/// Outcome of a single loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: LoopState,
    pub notice: Notice,
}

/// Owns the detection mode and drives frames from a source through annotation to a display.
pub struct Controller<V: Vision> {
    mode: Mode,
    annotator: Annotator<V>,
    fps: FpsCounter,
    missed_frames: u32,
}

impl<V: Vision> Controller<V> {
    /// Creates a controller starting in [`Mode::None`].
    pub fn new(annotator: Annotator<V>) -> Self {
        Self {
            mode: Mode::None,
            annotator,
            fps: FpsCounter::new("frames"),
            missed_frames: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn annotator(&self) -> &Annotator<V> {
        &self.annotator
    }

    /// Runs one iteration: handle a key, then capture, annotate and show a frame.
    ///
    /// When the escape key is read, no frame is captured and [`LoopState::Terminated`] is
    /// returned. If the source has no frame for this iteration, nothing is shown and the loop
    /// keeps running; source errors are returned to the caller.
    pub fn step<S, D>(&mut self, source: &mut S, display: &mut D) -> anyhow::Result<Step>
    where
        S: FrameSource<Frame = V::Frame>,
        D: Display<Frame = V::Frame>,
    {
        let key = display.poll_key(KEY_POLL_TIMEOUT)?;
        if key == Some(Key::Escape) {
            return Ok(Step {
                state: LoopState::Terminated,
                notice: Notice::Exit,
            });
        }

        let (mode, notice) = transition(self.mode, key);
        if mode != self.mode {
            log::debug!("mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;

        match source.next_frame()? {
            Some(mut frame) => {
                if self.missed_frames > 0 {
                    log::info!("camera recovered after {} missed frames", self.missed_frames);
                    self.missed_frames = 0;
                }
                self.annotator.annotate(&mut frame, self.mode)?;
                display.show_frame(&frame)?;
                self.fps
                    .tick_with(source.timers().into_iter().chain(self.annotator.timers()));
            }
            None => {
                if self.missed_frames == 0 {
                    log::warn!("no frame received from camera, skipping");
                }
                self.missed_frames += 1;
            }
        }

        Ok(Step {
            state: LoopState::Running(self.mode),
            notice,
        })
    }

    /// Runs the loop until the escape key is pressed, printing notices as they occur.
    pub fn run<S, D>(&mut self, source: &mut S, display: &mut D) -> anyhow::Result<()>
    where
        S: FrameSource<Frame = V::Frame>,
        D: Display<Frame = V::Frame>,
    {
        loop {
            let step = self.step(source, display)?;
            if step.notice.is_visible() {
                println!("\t>> {}", step.notice);
            }
            if step.state == LoopState::Terminated {
                return Ok(());
            }
        }
    }
}
