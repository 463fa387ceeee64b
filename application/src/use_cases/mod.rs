//! Use cases

pub mod firmenbuch;
