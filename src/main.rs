use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use houghcam::annotate::Annotator;
use houghcam::controller::Controller;
use houghcam::gui::{Window, WINDOW_TITLE};
use houghcam::termination::Exit;
use houghcam::vision::OpenCv;
use houghcam::webcam::{Resolution, Webcam, WebcamOptions};

/// Detect lines, circles, or both in a live camera feed.
///
/// The detection mode is switched with the keys n/l/c/b while the window has focus; Esc quits.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "houghcam", disable_help_flag = true)]
struct Cli {
    /// disable any hough detection.
    #[arg(short = 'n')]
    none: bool,

    /// enable hough line detection.
    #[arg(short = 'l')]
    lines: bool,

    /// enable hough circle detection.
    #[arg(short = 'c')]
    circles: bool,

    /// enable both hough line and circle detection.
    #[arg(short = 'b')]
    both: bool,

    /// show help message
    #[arg(short = 'h', long = "help")]
    help: bool,
}

impl Cli {
    /// Parses `args`, falling back to the defaults if they are malformed.
    ///
    /// The flags don't gate anything, so a bad command line must not keep the camera from
    /// starting.
    fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).unwrap_or_else(|e| {
            log::warn!("ignoring command line ({:?}): {}", e.kind(), e.to_string().trim_end());
            Self::default()
        })
    }
}

fn main() -> Exit {
    houghcam::init_logger!();

    let cli = Cli::parse_lenient(std::env::args_os());
    log::debug!("{cli:?}");
    if cli.none || cli.lines || cli.circles || cli.both {
        log::info!("mode flags are informational; use the keys n/l/c/b in the window instead");
    }

    println!("{}", Cli::command().render_help());
    println!("v{}", env!("CARGO_PKG_VERSION"));
    if cli.help {
        log::debug!("help shown, starting capture anyway");
    }

    Exit::from_result(run())
}

fn run() -> anyhow::Result<()> {
    let mut webcam = Webcam::open(WebcamOptions::default().resolution(Resolution::RES_VGA))?;
    let mut window = Window::open(WINDOW_TITLE)?;

    let mut controller = Controller::new(Annotator::new(OpenCv::new()));
    controller.run(&mut webcam, &mut window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_flags() {
        let cli = Cli::parse_lenient(["houghcam", "-l", "-c"]);
        assert!(cli.lines && cli.circles);
        assert!(!cli.none && !cli.both && !cli.help);
    }

    #[test]
    fn help_does_not_exit() {
        assert!(Cli::parse_lenient(["houghcam", "-h"]).help);
        assert!(Cli::parse_lenient(["houghcam", "--help"]).help);
    }

    #[test]
    fn unknown_arguments_fall_back_to_defaults() {
        assert_eq!(Cli::parse_lenient(["houghcam", "--fullscreen"]), Cli::default());
        assert_eq!(Cli::parse_lenient(["houghcam", "-b", "extra"]), Cli::default());
    }

    #[test]
    fn version_flag_does_not_exit() {
        assert!(Cli::try_parse_from(["houghcam", "-V"]).is_err());
        assert_eq!(Cli::parse_lenient(["houghcam", "-V"]), Cli::default());
        assert_eq!(Cli::parse_lenient(["houghcam", "--version"]), Cli::default());
    }
}
