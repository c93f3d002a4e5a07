pub mod memory;
pub mod platform;
