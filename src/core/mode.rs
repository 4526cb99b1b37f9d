//! The three-valued intensity signal and its validated holder.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Calm,
    Active,
    Surge,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Calm, Mode::Active, Mode::Surge];

    /// Strict parse of the external label. Anything but the three exact,
    /// lower-case names is rejected.
    pub fn parse(label: &str) -> Option<Mode> {
        match label {
            "calm" => Some(Mode::Calm),
            "active" => Some(Mode::Active),
            "surge" => Some(Mode::Surge),
            _ => None,
        }
    }

    /// Parse with the documented fallback: unknown labels behave as `Calm`.
    pub fn parse_or_calm(label: &str) -> Mode {
        Mode::parse(label).unwrap_or(Mode::Calm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Calm => "calm",
            Mode::Active => "active",
            Mode::Surge => "surge",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Mode::Calm => 0,
            Mode::Active => 1,
            Mode::Surge => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed in by an external decision source: `{ state: "..." }`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeReport {
    pub state: Option<String>,
}

impl ModeReport {
    pub fn with_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
        }
    }
}

/// Holds the current mode. Mutated only through validated setters; invalid
/// input leaves the mode untouched and never errors.
#[derive(Clone, Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new(initial: Mode) -> Self {
        Self { mode: initial }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set(&mut self, mode: Mode) {
        if mode != self.mode {
            log::info!("[mode] {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Apply an external label. Returns whether it was accepted.
    pub fn set_label(&mut self, label: &str) -> bool {
        match Mode::parse(label) {
            Some(mode) => {
                self.set(mode);
                true
            }
            None => {
                log::debug!("[mode] ignoring unknown label {:?}", label);
                false
            }
        }
    }

    /// Extract `state` from a report and apply it like `set_label`.
    pub fn update_from_report(&mut self, report: &ModeReport) -> bool {
        match report.state.as_deref() {
            Some(label) => self.set_label(label),
            None => {
                log::debug!("[mode] report without state ignored");
                false
            }
        }
    }
}
