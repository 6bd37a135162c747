// Domain layer - Pure types and the fuel analysis algorithm
pub mod dataset;
pub mod fuel_analysis;
pub mod telemetry;
pub mod time_format;
