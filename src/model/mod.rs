pub mod config;
pub mod lineage;
pub mod population;
pub mod simulation;
