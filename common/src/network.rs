pub mod device;
pub mod host;
pub mod range;
pub mod target;
