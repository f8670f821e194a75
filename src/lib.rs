pub mod buffer;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod keys;
pub mod landmarks;
pub mod render;
pub mod session;
pub mod simulate;
pub mod trace;
// cmd and reports belong to the binary (main.rs).
