//! State machine module root.

pub mod switch;
