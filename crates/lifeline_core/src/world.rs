//! Tick host.
//!
//! A `World` owns a list of facets and drives each of them once per discrete
//! update. The data manager is one such facet, and is also kept in a typed
//! slot so that it can be looked up without downcasting.

use crate::error::{DataError, Result};
use crate::manager::Manager;
use lifeline_data::Update;
use std::sync::Arc;
use tracing::{debug, trace};

/// Stable id under which the data manager attaches to its world.
pub const DATA_MANAGER_FACET_ID: &str = "data_manager";

pub trait WorldFacet: Send + Sync {
    fn perform_update(&self, update: Update);

    /// Id of a facet that must run after this one each tick.
    fn update_before(&self) -> Option<&str> {
        None
    }
}

struct FacetEntry {
    id: String,
    facet: Arc<dyn WorldFacet>,
}

#[derive(Default)]
pub struct World {
    update: u64,
    facets: Vec<FacetEntry>,
    data_manager: Option<Arc<Manager>>,
}

impl World {
    /// Creates a world at update 0 with no facets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `facet` under `id`. A facet that names another in
    /// `update_before` is placed ahead of it if that one is already attached.
    pub fn attach_facet(&mut self, id: &str, facet: Arc<dyn WorldFacet>) -> Result<()> {
        if self.facets.iter().any(|f| f.id == id) {
            return Err(DataError::DuplicateFacet(id.to_string()));
        }
        let position = facet
            .update_before()
            .and_then(|before| self.facets.iter().position(|f| f.id == before))
            .unwrap_or(self.facets.len());
        self.facets.insert(
            position,
            FacetEntry {
                id: id.to_string(),
                facet,
            },
        );
        debug!(facet = id, position, "facet attached");
        Ok(())
    }

    pub(crate) fn set_data_manager(&mut self, manager: Arc<Manager>) {
        self.data_manager = Some(manager);
    }

    /// The attached data manager, if any.
    pub fn data_manager(&self) -> Option<&Arc<Manager>> {
        self.data_manager.as_ref()
    }

    /// Facet ids in the order they run.
    pub fn facet_ids(&self) -> Vec<&str> {
        self.facets.iter().map(|f| f.id.as_str()).collect()
    }

    /// Number of the last completed tick.
    pub fn current_update(&self) -> u64 {
        self.update
    }

    /// Advances one tick and runs every facet.
    pub fn update(&mut self) -> Update {
        self.update += 1;
        let update = Update::Tick(self.update);
        for entry in &self.facets {
            trace!(facet = %entry.id, %update, "facet update");
            entry.facet.perform_update(update);
        }
        update
    }
}
