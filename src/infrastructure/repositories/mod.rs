pub mod memory;
pub mod sessions;
