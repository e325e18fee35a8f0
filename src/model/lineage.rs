//! Per-lineage population sizes, served as the argumented family
//! `core.world.lineage_size[<lineage>]`.

use crate::model::population::PopulationState;
use lifeline_core::{dispatch_argumented, ArgumentedProvider, Provider};
use lifeline_data::{ArgumentSet, DataSet, Package, PackagePtr, Update};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub const LINEAGE_SIZE: &str = "core.world.lineage_size[]";

pub struct LineageProvider {
    provides: DataSet,
    state: Arc<RwLock<PopulationState>>,
    active: RwLock<ArgumentSet>,
    sizes: RwLock<HashMap<String, i64>>,
}

impl LineageProvider {
    pub fn new(state: Arc<RwLock<PopulationState>>) -> Self {
        Self {
            provides: DataSet::from([LINEAGE_SIZE.to_string()]),
            state,
            active: RwLock::new(ArgumentSet::new()),
            sizes: RwLock::new(HashMap::new()),
        }
    }

    fn founders(&self) -> u32 {
        self.state.read().unwrap_or_else(|e| e.into_inner()).founders
    }
}

impl Provider for LineageProvider {
    fn provides(&self) -> &DataSet {
        &self.provides
    }

    /// Only lineages some recorder asked for are counted.
    fn update_provided_values(&self, _update: Update) {
        let active = self.active.read().unwrap_or_else(|e| e.into_inner());
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let sizes = active
            .iter()
            .filter_map(|arg| {
                let lineage = arg.parse::<u32>().ok()?;
                Some((arg.clone(), state.lineage_size(lineage) as i64))
            })
            .collect();
        *self.sizes.write().unwrap_or_else(|e| e.into_inner()) = sizes;
    }

    fn get_provided_value(&self, key: &str) -> Option<PackagePtr> {
        dispatch_argumented(self, key)
    }

    fn describe_provided_value(&self, _key: &str) -> String {
        "Number of Organisms in Lineage".to_string()
    }

    fn supports_concurrent_update(&self) -> bool {
        true
    }

    fn as_argumented(self: Arc<Self>) -> Option<Arc<dyn ArgumentedProvider>> {
        Some(self)
    }
}

impl ArgumentedProvider for LineageProvider {
    fn is_valid_argument(&self, raw_key: &str, argument: &str) -> bool {
        raw_key == LINEAGE_SIZE
            && argument
                .parse::<u32>()
                .is_ok_and(|lineage| lineage < self.founders())
    }

    fn valid_arguments(&self, raw_key: &str) -> Option<ArgumentSet> {
        (raw_key == LINEAGE_SIZE).then(|| (0..self.founders()).map(|l| l.to_string()).collect())
    }

    fn set_active_arguments(&self, raw_key: &str, arguments: &ArgumentSet) {
        if raw_key == LINEAGE_SIZE {
            *self.active.write().unwrap_or_else(|e| e.into_inner()) = arguments.clone();
        }
    }

    fn get_provided_value_for_argument(
        &self,
        raw_key: &str,
        argument: &str,
    ) -> Option<PackagePtr> {
        if raw_key != LINEAGE_SIZE {
            return None;
        }
        self.sizes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(argument)
            .map(|&size| Package::from(size).shared())
    }
}
