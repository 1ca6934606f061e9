pub mod range;
pub mod roll;
pub mod tables;
