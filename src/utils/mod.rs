pub mod linalg;
pub mod logger;
pub mod report;
