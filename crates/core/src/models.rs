pub mod alert;
pub mod appointment;
pub mod auth;
pub mod availability;
pub mod directory;
pub mod report;
