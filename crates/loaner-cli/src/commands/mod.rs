pub mod present_value;
pub mod schedule;
pub mod summary;
