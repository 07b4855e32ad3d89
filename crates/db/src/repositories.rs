pub mod alert;
pub mod appointment;
pub mod availability;
pub mod directory;
pub mod report;
