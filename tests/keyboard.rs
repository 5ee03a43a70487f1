//! Drives the public controller API with a frame type defined outside the crate.

use std::time::Duration;

use houghcam::annotate::Annotator;
use houghcam::controller::{Controller, LoopState};
use houghcam::detection::{Circle, CircleParams, EdgeParams, Line, LineParams, SegmentParams};
use houghcam::draw::Style;
use houghcam::gui::Display;
use houghcam::mode::{Key, Mode, Notice};
use houghcam::vision::Vision;
use houghcam::webcam::FrameSource;

/// A frame that only remembers what was drawn onto it.
#[derive(Debug, Default, Clone, PartialEq)]
struct Sketch {
    strokes: Vec<&'static str>,
}

struct Sketcher;

impl Vision for Sketcher {
    type Frame = Sketch;
    type Gray = ();

    fn to_gray(&mut self, _: &Sketch) -> anyhow::Result<()> {
        Ok(())
    }

    fn median_blur(&mut self, _: &(), _: i32) -> anyhow::Result<()> {
        Ok(())
    }

    fn detect_edges(&mut self, _: &(), _: &EdgeParams) -> anyhow::Result<()> {
        Ok(())
    }

    fn detect_lines(&mut self, _: &(), _: &LineParams) -> anyhow::Result<Vec<Line>> {
        Ok(vec![Line::Polar {
            rho: 1.0,
            theta: 0.0,
        }])
    }

    fn detect_segments(&mut self, _: &(), _: &SegmentParams) -> anyhow::Result<Vec<Line>> {
        Ok(Vec::new())
    }

    fn detect_circles(&mut self, _: &(), _: &CircleParams) -> anyhow::Result<Vec<Circle>> {
        Ok(vec![Circle {
            x: 1.0,
            y: 1.0,
            radius: 40.0,
        }])
    }

    fn draw_line(
        &mut self,
        frame: &mut Sketch,
        _: (i32, i32),
        _: (i32, i32),
        _: Style,
    ) -> anyhow::Result<()> {
        frame.strokes.push("line");
        Ok(())
    }

    fn draw_circle(
        &mut self,
        frame: &mut Sketch,
        _: (i32, i32),
        radius: i32,
        _: Style,
    ) -> anyhow::Result<()> {
        frame.strokes.push(if radius == 1 { "center" } else { "outline" });
        Ok(())
    }
}

struct Blank;

impl FrameSource for Blank {
    type Frame = Sketch;

    fn next_frame(&mut self) -> anyhow::Result<Option<Sketch>> {
        Ok(Some(Sketch::default()))
    }
}

struct Keyboard {
    keys: Vec<Option<Key>>,
    shown: Vec<Sketch>,
}

impl Display for Keyboard {
    type Frame = Sketch;

    fn show_frame(&mut self, frame: &Sketch) -> anyhow::Result<()> {
        self.shown.push(frame.clone());
        Ok(())
    }

    fn poll_key(&mut self, _: Duration) -> anyhow::Result<Option<Key>> {
        if self.keys.is_empty() {
            Ok(Some(Key::Escape))
        } else {
            Ok(self.keys.remove(0))
        }
    }
}

fn keyboard(codes: &[i32]) -> Keyboard {
    Keyboard {
        keys: codes.iter().map(|&code| Key::from_code(code)).collect(),
        shown: Vec::new(),
    }
}

#[test]
fn every_mode_draws_its_shapes() {
    let mut controller = Controller::new(Annotator::new(Sketcher));
    let mut display = keyboard(&[
        -1,
        i32::from(b'l'),
        i32::from(b'c'),
        i32::from(b'b'),
        i32::from(b'n'),
    ]);
    controller.run(&mut Blank, &mut display).unwrap();

    let strokes = display
        .shown
        .iter()
        .map(|sketch| sketch.strokes.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        strokes,
        [
            vec![],
            vec!["line"],
            vec!["center", "outline"],
            vec!["line", "center", "outline"],
            vec![],
        ]
    );
}

#[test]
fn escape_code_terminates() {
    let mut controller = Controller::new(Annotator::new(Sketcher));
    let mut display = keyboard(&[i32::from(b'b'), 27, i32::from(b'l')]);

    let first = controller.step(&mut Blank, &mut display).unwrap();
    assert_eq!(first.state, LoopState::Running(Mode::Both));
    assert_eq!(first.notice, Notice::Activated(Mode::Both));

    let second = controller.step(&mut Blank, &mut display).unwrap();
    assert_eq!(second.state, LoopState::Terminated);
    assert_eq!(second.notice, Notice::Exit);
    assert_eq!(display.shown.len(), 1);
}
