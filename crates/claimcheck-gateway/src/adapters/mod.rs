pub mod horizon;
pub mod memory;
