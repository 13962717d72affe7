pub mod config;
pub mod spatial_index;
pub mod synthetic;
