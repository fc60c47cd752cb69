pub mod api;
pub mod components;
pub mod config;
pub mod controller;
pub mod interop;
pub mod panels;

pub use api::*;
pub use components::*;
pub use panels::*;
