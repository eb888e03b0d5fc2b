//! Domain types and pure logic for event seating layouts.

#[cfg(feature = "database")]
mod db_value;

pub mod geometry;
pub mod layout;
pub mod occupancy;
pub mod seating_type;
pub mod template;
pub mod validation;
