// Domain layer - Data types and pure calculation
pub mod dashboard;
pub mod interpolate;
pub mod reading;
pub mod rooms;
pub mod stats;
pub mod telemetry;
pub mod timeparse;
pub mod yearly;
