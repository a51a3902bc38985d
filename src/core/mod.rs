pub mod aggregate;
pub mod calendar;
pub mod import;
pub mod log;
pub mod logic;
pub mod risk;
pub mod stats;
pub mod summary;
pub mod trend;
