pub mod carousel;
pub mod geometry;
pub mod ipc;
pub mod macros;
pub mod source;
