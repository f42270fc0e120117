#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;
