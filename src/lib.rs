//! vizdemos library - spectrum analysis, cube transforms and their windows

pub mod app;
pub mod audio;
pub mod cli;
pub mod cube;
pub mod error;
pub mod params;
pub mod rendering;
pub mod spectrum;
pub mod timer;
