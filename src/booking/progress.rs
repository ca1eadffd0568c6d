//! Progress indicator: a pure view of (current step, total steps).

use serde::Serialize;

use crate::booking::step::{BookingStep, TOTAL_STEPS};

/// State of one marker in the progress trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerState {
    Done,
    Current,
    Upcoming,
}

/// One marker of the progress trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressMarker {
    pub number: u32,
    pub title: &'static str,
    pub state: MarkerState,
}

/// Progress trail for a resolved step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: u32,
    pub total: u32,
    pub markers: Vec<ProgressMarker>,
}

impl Progress {
    /// Build the trail from the step the resolver produced
    pub fn of(current: BookingStep) -> Self {
        let markers = BookingStep::all()
            .iter()
            .map(|step| ProgressMarker {
                number: step.number(),
                title: step.title(),
                state: match step.cmp(&current) {
                    std::cmp::Ordering::Less => MarkerState::Done,
                    std::cmp::Ordering::Equal => MarkerState::Current,
                    std::cmp::Ordering::Greater => MarkerState::Upcoming,
                },
            })
            .collect();

        Self {
            current: current.number(),
            total: TOTAL_STEPS,
            markers,
        }
    }

    /// Completed fraction, counting the current step as reached
    pub fn ratio(&self) -> f64 {
        f64::from(self.current) / f64::from(self.total)
    }

    /// Compact one-line trail, e.g. `● 1 Select … ─ ◉ 2 Patient … ─ ○ 3 Confirmation`
    pub fn trail(&self) -> String {
        self.markers
            .iter()
            .map(|m| {
                let glyph = match m.state {
                    MarkerState::Done => '●',
                    MarkerState::Current => '◉',
                    MarkerState::Upcoming => '○',
                };
                format!("{glyph} {} {}", m.number, m.title)
            })
            .collect::<Vec<_>>()
            .join(" ─ ")
    }
}
