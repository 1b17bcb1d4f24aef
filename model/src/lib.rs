pub mod base_types;
pub mod config;
pub mod json_serialisation;
pub mod network;
