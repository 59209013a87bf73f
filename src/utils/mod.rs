pub mod calendar;
pub mod geo;
pub mod report_cache;
