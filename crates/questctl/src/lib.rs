//! questctl - command-line front end for the heritage quest engine

pub mod display;
pub mod script;
