pub mod companies;
pub mod event_seatings;
pub mod events;
pub mod layouts;
pub mod reservations;
pub mod seating_layout_templates;
pub mod seating_types;
