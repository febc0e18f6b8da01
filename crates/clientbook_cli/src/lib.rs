//! Menu-loop building blocks for the ClientBook console binary.

pub mod input;
pub mod menu;
