pub mod interval;
pub mod quiz;
pub mod stats;
