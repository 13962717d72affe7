pub mod distance;
pub mod histogram;
pub mod stats;
