//! Window, context and GL plumbing for drawing a single indexed quad.
//!
//! `app::launch` runs the whole pipeline; the other modules are its phases.

pub mod app;
pub mod config;
pub mod error;
pub mod geometry;
pub mod glutils;
pub mod input;
pub mod logging;
pub mod math;
pub mod shaders;
pub mod system;

#[cfg(test)]
mod testing;
