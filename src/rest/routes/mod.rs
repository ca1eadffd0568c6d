//! Route handlers for the REST API.

pub mod booking;
pub mod bookings;
pub mod catalog;
pub mod health;
