//! Domain types shared by the CampusCare storage and HTTP layers.

pub mod clock;
pub mod errors;
pub mod models;
pub mod slots;
