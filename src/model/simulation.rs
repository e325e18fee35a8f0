//! Wires a population, a world and a data manager together and records the
//! requested keys while the world runs.

use crate::model::config::AppConfig;
use crate::model::population::Population;
use lifeline_core::{DataEntry, Manager, TimeSeriesRecorder, World};
use lifeline_data::PackagePtr;
use serde::Serialize;
use std::sync::Arc;

pub const POPULATION_FACET_ID: &str = "population";

pub type Series = TimeSeriesRecorder<Option<PackagePtr>>;

#[derive(Debug, Serialize)]
pub struct SeriesReport {
    pub key: String,
    pub entries: Vec<DataEntry<Option<PackagePtr>>>,
}

pub struct Simulation {
    world: World,
    manager: Arc<Manager>,
    population: Arc<Population>,
    series: Vec<Arc<Series>>,
}

impl Simulation {
    /// Builds the world and records every key listed in `config.data`.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut world = World::new();
        let manager = Arc::new(Manager::with_config(&config.data));
        manager.attach_to(&mut world)?;

        let population = Arc::new(Population::new(&config.world));
        population.register_providers(&manager)?;
        world.attach_facet(POPULATION_FACET_ID, population.clone())?;

        let mut sim = Self {
            world,
            manager,
            population,
            series: Vec::new(),
        };
        for key in &config.data.recorded_keys {
            sim.record(key, config.data.immediate_update)?;
        }
        Ok(sim)
    }

    /// Starts recording `key`, one entry per tick from now on.
    pub fn record(&mut self, key: &str, immediate: bool) -> anyhow::Result<Arc<Series>> {
        let series = Arc::new(Series::new(key));
        self.manager.attach_recorder(series.clone(), immediate)?;
        tracing::info!(key, immediate, "recording");
        self.series.push(Arc::clone(&series));
        Ok(series)
    }

    pub fn step(&mut self) {
        self.world.update();
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
        tracing::info!(
            update = self.world.current_update(),
            organisms = self.population.state().organisms.len(),
            "run finished"
        );
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn manager(&self) -> &Arc<Manager> {
        &self.manager
    }

    pub fn population(&self) -> &Arc<Population> {
        &self.population
    }

    pub fn series(&self) -> &[Arc<Series>] {
        &self.series
    }

    pub fn report(&self) -> Vec<SeriesReport> {
        self.series
            .iter()
            .map(|s| SeriesReport {
                key: s.data_id().to_string(),
                entries: s.entries(),
            })
            .collect()
    }
}
