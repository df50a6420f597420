pub mod analysis;
pub mod operations;
