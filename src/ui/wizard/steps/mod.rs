//! Render methods for each step component

mod confirm;
mod patient;
mod schedule;
