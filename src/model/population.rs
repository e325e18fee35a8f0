//! A minimal population of self-replicating organisms.
//!
//! Each organism belongs to one of a few founder lineages, gathers a random
//! amount of energy every tick, pays a metabolic cost, divides once it has
//! stored enough, and dies when it runs dry or grows too old. The population
//! is a world facet; its statistics are exposed to the data manager through
//! providers that only read shared state.

use crate::model::config::WorldConfig;
use crate::model::lineage::{LineageProvider, LINEAGE_SIZE};
use lifeline_core::{ArgumentedProvider, Manager, StaticProvider, WorldFacet, DATA_MANAGER_FACET_ID};
use lifeline_data::Update;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct Organism {
    pub lineage: u32,
    pub energy: f64,
    pub age: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PopulationState {
    pub organisms: Vec<Organism>,
    pub founders: u32,
    pub num_births: u64,
    pub num_deaths: u64,
    pub total_births: u64,
    pub update: u64,
}

impl PopulationState {
    pub fn average_energy(&self) -> f64 {
        if self.organisms.is_empty() {
            return 0.0;
        }
        self.organisms.iter().map(|o| o.energy).sum::<f64>() / self.organisms.len() as f64
    }

    pub fn lineage_size(&self, lineage: u32) -> usize {
        self.organisms.iter().filter(|o| o.lineage == lineage).count()
    }

    pub fn living_lineages(&self) -> usize {
        (0..self.founders).filter(|&l| self.lineage_size(l) > 0).count()
    }
}

pub struct Population {
    config: WorldConfig,
    state: Arc<RwLock<PopulationState>>,
    rng: Mutex<ChaCha8Rng>,
}

impl Population {
    pub fn new(config: &WorldConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let founders = config.founder_lineages.max(1);
        let organisms = (0..config.initial_population)
            .map(|i| Organism {
                lineage: i as u32 % founders,
                energy: config.reproduction_threshold * rng.gen_range(0.1..0.9),
                age: 0,
            })
            .collect();
        Self {
            config: config.clone(),
            state: Arc::new(RwLock::new(PopulationState {
                organisms,
                founders,
                ..Default::default()
            })),
            rng: Mutex::new(rng),
        }
    }

    pub fn state(&self) -> RwLockReadGuard<'_, PopulationState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn shared_state(&self) -> Arc<RwLock<PopulationState>> {
        Arc::clone(&self.state)
    }

    /// Registers the population statistics and the lineage size family.
    pub fn register_providers(&self, manager: &Manager) -> lifeline_core::Result<()> {
        let stats = population_stats(&self.state);
        stats.register_with(manager)?;

        let state = Arc::clone(&self.state);
        manager.register_argumented(LINEAGE_SIZE, move || {
            Some(Arc::new(LineageProvider::new(Arc::clone(&state))) as Arc<dyn ArgumentedProvider>)
        })?;
        Ok(())
    }

    /// Advances the population by one tick.
    pub fn step(&self, update: Update) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let cfg = &self.config;

        let mut births = 0u64;
        let mut deaths = 0u64;
        let mut offspring = Vec::new();
        let room = cfg.max_population.saturating_sub(state.organisms.len());

        state.organisms.retain_mut(|o| {
            o.age += 1;
            o.energy += rng.gen_range(0.0..1.5) - cfg.metabolic_cost;
            if o.energy <= 0.0 || o.age > cfg.max_age {
                deaths += 1;
                return false;
            }
            if o.energy >= cfg.reproduction_threshold && offspring.len() < room {
                o.energy /= 2.0;
                offspring.push(Organism {
                    lineage: o.lineage,
                    energy: o.energy,
                    age: 0,
                });
                births += 1;
            }
            true
        });

        state.organisms.extend(offspring);
        state.num_births = births;
        state.num_deaths = deaths;
        state.total_births += births;
        if let Some(tick) = update.tick() {
            state.update = tick;
        }
        tracing::trace!(
            %update,
            organisms = state.organisms.len(),
            births,
            deaths,
            "population step"
        );
    }
}

impl WorldFacet for Population {
    fn perform_update(&self, update: Update) {
        self.step(update);
    }

    fn update_before(&self) -> Option<&str> {
        Some(DATA_MANAGER_FACET_ID)
    }
}

fn sample<T: 'static>(
    state: &Arc<RwLock<PopulationState>>,
    stat: fn(&PopulationState) -> T,
) -> impl Fn() -> T + Send + Sync + 'static {
    let state = Arc::clone(state);
    move || stat(&state.read().unwrap_or_else(|e| e.into_inner()))
}

fn population_stats(state: &Arc<RwLock<PopulationState>>) -> Arc<StaticProvider> {
    StaticProvider::builder()
        .provide(
            "core.world.organisms",
            "Count of Organisms in the World",
            sample(state, |s| s.organisms.len()),
        )
        .provide(
            "core.world.ave_energy",
            "Average Stored Energy",
            sample(state, PopulationState::average_energy),
        )
        .provide(
            "core.world.num_births",
            "Number of Births",
            sample(state, |s| s.num_births as i64),
        )
        .provide(
            "core.world.num_deaths",
            "Number of Deaths",
            sample(state, |s| s.num_deaths as i64),
        )
        .provide(
            "core.world.total_births",
            "Total Number of Births",
            sample(state, |s| s.total_births as i64),
        )
        .provide(
            "core.world.lineages",
            "Number of Living Lineages",
            sample(state, PopulationState::living_lineages),
        )
        .provide(
            "core.world.update",
            "Current Update",
            sample(state, |s| s.update as i64),
        )
        .concurrent(true)
        .build()
}
