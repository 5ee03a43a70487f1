//! Detection modes and the keyboard-driven transitions between them.

use std::fmt;

/// The detection behavior currently applied to each camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Frames are displayed as captured.
    #[default]
    None,
    /// Straight lines are detected and drawn.
    Line,
    /// Circles are detected and drawn.
    Circle,
    /// Lines, then circles.
    Both,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::None, Mode::Line, Mode::Circle, Mode::Both];

    /// Returns the mode selected by the given character, if any.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Mode::None),
            'l' => Some(Mode::Line),
            'c' => Some(Mode::Circle),
            'b' => Some(Mode::Both),
            _ => None,
        }
    }

    /// The character that selects this mode.
    pub fn as_char(self) -> char {
        match self {
            Mode::None => 'n',
            Mode::Line => 'l',
            Mode::Circle => 'c',
            Mode::Both => 'b',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::None => "none",
            Mode::Line => "line",
            Mode::Circle => "circle",
            Mode::Both => "both",
        })
    }
}

/// The key code reported for the escape key.
pub const ESCAPE_KEY_CODE: i32 = 27;

/// A key press read from the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

impl Key {
    /// Interprets a raw key code as returned by the window system.
    ///
    /// Negative codes mean that no key was pressed within the polling interval. Only the low byte
    /// of the code is significant; some backends set modifier bits above it.
    pub fn from_code(code: i32) -> Option<Self> {
        if code < 0 {
            return None;
        }
        let byte = (code & 0xff) as u8;
        if i32::from(byte) == ESCAPE_KEY_CODE {
            Some(Key::Escape)
        } else {
            Some(Key::Char(char::from(byte)))
        }
    }
}

/// Message produced by a mode transition or by termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The input did not select a mode. Nothing is printed for these.
    Ignored,
    /// The input selected the mode that was already active.
    AlreadyActive(Mode),
    /// The input switched to a different mode.
    Activated(Mode),
    /// The exit key was pressed.
    Exit,
}

impl Notice {
    /// Whether this notice is shown to the user.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Notice::Ignored)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Ignored => Ok(()),
            Notice::AlreadyActive(mode) => write!(
                f,
                "requested mode is currently enabled! (got [{}], current mode [{}])",
                mode.as_char(),
                mode.as_char(),
            ),
            Notice::Activated(Mode::None) => f.write_str("disable all hough detection requested"),
            Notice::Activated(Mode::Line) => f.write_str("enabling hough line detection"),
            Notice::Activated(Mode::Circle) => f.write_str("enabling hough circle detection"),
            Notice::Activated(Mode::Both) => {
                f.write_str("enabling both hough line and circle detection")
            }
            Notice::Exit => f.write_str("Exiting!"),
        }
    }
}

/// Computes the mode that follows `current` after receiving `input`.
///
/// Input that doesn't select a mode leaves `current` in place and yields [`Notice::Ignored`].
pub fn transition(current: Mode, input: Option<Key>) -> (Mode, Notice) {
    let requested = match input {
        Some(Key::Char(c)) => Mode::from_char(c),
        Some(Key::Escape) | None => None,
    };

    match requested {
        None => (current, Notice::Ignored),
        Some(mode) if mode == current => (current, Notice::AlreadyActive(current)),
        Some(mode) => (mode, Notice::Activated(mode)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Option<Key> {
        Some(Key::Char(c))
    }

    #[test]
    fn unrecognized_input_is_ignored() {
        for mode in Mode::ALL {
            assert_eq!(transition(mode, None), (mode, Notice::Ignored));
            assert_eq!(transition(mode, Some(Key::Escape)), (mode, Notice::Ignored));

            for byte in 0..=u8::MAX {
                let c = char::from(byte);
                if Mode::from_char(c).is_some() {
                    continue;
                }
                assert_eq!(transition(mode, key(c)), (mode, Notice::Ignored), "{c:?}");
            }
        }
    }

    #[test]
    fn reselecting_active_mode() {
        for mode in Mode::ALL {
            let (next, notice) = transition(mode, key(mode.as_char()));
            assert_eq!(next, mode);
            assert_eq!(notice, Notice::AlreadyActive(mode));
            assert!(notice.is_visible());
        }
    }

    #[test]
    fn switching_modes() {
        for from in Mode::ALL {
            for to in Mode::ALL {
                if from == to {
                    continue;
                }
                assert_eq!(
                    transition(from, key(to.as_char())),
                    (to, Notice::Activated(to))
                );
            }
        }
    }

    #[test]
    fn cycle_returns_to_start() {
        for start in Mode::ALL {
            let end = "nlcbn".chars().fold(start, |mode, c| transition(mode, key(c)).0);
            assert_eq!(end, Mode::None);

            // Starting from `None`, the cycle is a round trip.
            if start == Mode::None {
                assert_eq!(end, start);
            }
        }
    }

    #[test]
    fn uppercase_is_not_a_mode() {
        assert_eq!(transition(Mode::None, key('L')), (Mode::None, Notice::Ignored));
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_code(-1), None);
        assert_eq!(Key::from_code(27), Some(Key::Escape));
        assert_eq!(Key::from_code(i32::from(b'l')), Some(Key::Char('l')));
        // High bits carry modifier state on some window systems.
        assert_eq!(Key::from_code(0x10_0000 | 27), Some(Key::Escape));
        assert_eq!(
            Key::from_code(0x10_0000 | i32::from(b'c')),
            Some(Key::Char('c'))
        );
    }

    #[test]
    fn notices() {
        assert_eq!(Notice::Ignored.to_string(), "");
        assert!(!Notice::Ignored.is_visible());
        assert_eq!(
            Notice::Activated(Mode::Circle).to_string(),
            "enabling hough circle detection"
        );
        assert_eq!(
            Notice::AlreadyActive(Mode::Line).to_string(),
            "requested mode is currently enabled! (got [l], current mode [l])"
        );
        assert_eq!(Notice::Exit.to_string(), "Exiting!");
    }
}
