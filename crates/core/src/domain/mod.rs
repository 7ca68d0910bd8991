pub mod indicator;
pub mod metrics;
pub mod stock;
