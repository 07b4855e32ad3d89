pub mod alerts;
pub mod appointments;
pub mod directory;
pub mod reports;
