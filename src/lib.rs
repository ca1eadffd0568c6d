//! careflow - hospital appointment booking wizard
//!
//! The booking flow core lives in [`booking`]; [`app`] hosts it in a terminal
//! wizard and [`rest`] serves it over HTTP.

pub mod app;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod notifications;
pub mod rest;
pub mod ui;
