//! # Lifeline Core
//!
//! The data manager for a tick-driven simulation: subsystems register value
//! providers, analysis code attaches recorders, and the manager activates
//! only what the recorders need, refreshing it once per tick.
//!
//! ## Example
//!
//! ```
//! use lifeline_core::{Manager, StaticProvider, TimeSeriesRecorder};
//! use lifeline_data::Update;
//! use std::sync::Arc;
//!
//! let manager = Manager::new();
//! let provider = StaticProvider::builder()
//!     .provide("sim.answer", "The answer", || 42i64)
//!     .build();
//! provider.register_with(&manager).unwrap();
//!
//! let recorder = Arc::new(TimeSeriesRecorder::<i64>::new("sim.answer"));
//! manager.attach_recorder(recorder.clone(), false).unwrap();
//! manager.perform_update(Update::Tick(1));
//! assert_eq!(recorder.values(), vec![42]);
//! ```

/// Data manager settings
pub mod config;
/// Error types and result alias
pub mod error;
/// Registry, activation, per-tick orchestration and value cache
pub mod manager;
/// Tick and cache metrics, logging setup
pub mod metrics;
/// Provider capabilities and the table-driven provider
pub mod provider;
/// Recorder capability and time-series recorders
pub mod recorder;
/// Facet host driving one update per tick
pub mod world;

pub use config::DataConfig;
pub use error::{DataError, Result};
pub use manager::Manager;
pub use metrics::{init_logging, Metrics};
pub use provider::{dispatch_argumented, ArgumentedProvider, Provider, StaticProvider};
pub use recorder::{DataEntry, DataRetrieval, Recorder, SeriesValue, TimeSeriesRecorder};
pub use world::{World, WorldFacet, DATA_MANAGER_FACET_ID};
