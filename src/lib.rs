//! Demo population model driven by the lifeline data manager.

pub mod model;
