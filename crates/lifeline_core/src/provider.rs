//! Value sources.
//!
//! A provider supplies a fixed set of keys and refreshes them once per tick.
//! Providers are shared between the manager and whatever built them, so every
//! method takes `&self`; implementations keep their own interior mutability.

use crate::error::Result;
use crate::manager::Manager;
use lifeline_data::{key, ArgumentSet, ArrayPackage, DataId, DataSet, Package, PackagePtr, Update};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Builds a provider on first demand.
pub type ProviderFactory = Box<dyn Fn() -> Option<Arc<dyn Provider>> + Send + Sync>;
/// Builds an argumented provider on first demand.
pub type ArgumentedProviderFactory =
    Box<dyn Fn() -> Option<Arc<dyn ArgumentedProvider>> + Send + Sync>;

pub trait Provider: Send + Sync {
    /// Keys this instance supplies. Must not change over its lifetime.
    fn provides(&self) -> &DataSet;

    /// Refreshes every provided value. Called once per tick before any
    /// recorder is notified, and must not depend on other providers having
    /// been refreshed first.
    fn update_provided_values(&self, update: Update);

    /// Current value for `key`. Only valid for keys in `provides()`.
    fn get_provided_value(&self, key: &str) -> Option<PackagePtr>;

    fn describe_provided_value(&self, key: &str) -> String;

    /// Whether `update_provided_values(Update::Immediate)` may be called
    /// outside the regular tick.
    fn supports_concurrent_update(&self) -> bool {
        false
    }

    /// Argumented view of this provider, if it has one.
    fn as_argumented(self: Arc<Self>) -> Option<Arc<dyn ArgumentedProvider>> {
        None
    }
}

pub trait ArgumentedProvider: Provider {
    fn is_valid_argument(&self, raw_key: &str, argument: &str) -> bool;

    /// Arguments this provider can serve for `raw_key`, when enumerable.
    fn valid_arguments(&self, _raw_key: &str) -> Option<ArgumentSet> {
        None
    }

    /// Receives the complete set of arguments currently requested for
    /// `raw_key`. Called again every time the set grows.
    fn set_active_arguments(&self, raw_key: &str, arguments: &ArgumentSet);

    fn get_provided_value_for_argument(&self, raw_key: &str, argument: &str)
        -> Option<PackagePtr>;

    /// Aggregate of the values for every argument in `arguments`, in set
    /// order. Arguments without a value contribute an empty string so that
    /// component indices line up with the set.
    fn get_provided_values_for_arguments(
        &self,
        raw_key: &str,
        arguments: &ArgumentSet,
    ) -> PackagePtr {
        let array: ArrayPackage = arguments
            .iter()
            .map(|arg| {
                self.get_provided_value_for_argument(raw_key, arg)
                    .unwrap_or_else(|| Package::from("").shared())
            })
            .collect();
        Package::from(array).shared()
    }
}

/// `get_provided_value` for argumented providers: standard keys are served
/// with an empty argument, argumented keys are split and delegated.
pub fn dispatch_argumented<P>(provider: &P, key: &str) -> Option<PackagePtr>
where
    P: ArgumentedProvider + ?Sized,
{
    if key::is_standard(key) {
        provider.get_provided_value_for_argument(key, "")
    } else {
        let (raw_key, argument) = key::split(key)?;
        provider.get_provided_value_for_argument(&raw_key, &argument)
    }
}

type ValueFn = Box<dyn Fn() -> Package + Send + Sync>;

struct ProvidedValue {
    description: String,
    value: ValueFn,
}

/// Table-driven provider: each key maps to a description and a closure that
/// samples the current value. Values are sampled once per refresh and served
/// from that snapshot until the next one.
pub struct StaticProvider {
    provides: DataSet,
    entries: BTreeMap<DataId, ProvidedValue>,
    snapshot: RwLock<HashMap<DataId, PackagePtr>>,
    concurrent: bool,
}

impl StaticProvider {
    pub fn builder() -> StaticProviderBuilder {
        StaticProviderBuilder::default()
    }

    /// Registers this instance as the factory result for every key it
    /// provides. Stops at the first key that is already taken.
    pub fn register_with(self: &Arc<Self>, manager: &Manager) -> Result<()> {
        for key in &self.provides {
            let this = Arc::clone(self);
            manager.register(key, move || Some(this.clone() as Arc<dyn Provider>))?;
        }
        Ok(())
    }
}

impl Provider for StaticProvider {
    fn provides(&self) -> &DataSet {
        &self.provides
    }

    fn update_provided_values(&self, _update: Update) {
        let fresh: HashMap<DataId, PackagePtr> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), (entry.value)().shared()))
            .collect();
        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = fresh;
    }

    fn get_provided_value(&self, key: &str) -> Option<PackagePtr> {
        debug_assert!(self.provides.contains(key), "{key} is not provided here");
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn describe_provided_value(&self, key: &str) -> String {
        self.entries
            .get(key)
            .map(|e| e.description.clone())
            .unwrap_or_default()
    }

    fn supports_concurrent_update(&self) -> bool {
        self.concurrent
    }
}

#[derive(Default)]
pub struct StaticProviderBuilder {
    entries: BTreeMap<DataId, ProvidedValue>,
    concurrent: bool,
}

impl StaticProviderBuilder {
    pub fn provide<F, T>(mut self, key: &str, description: &str, value: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Package>,
    {
        self.entries.insert(
            key.to_string(),
            ProvidedValue {
                description: description.to_string(),
                value: Box::new(move || value().into()),
            },
        );
        self
    }

    /// Allows an immediate refresh when a recorder attaches.
    pub fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn build(self) -> Arc<StaticProvider> {
        Arc::new(StaticProvider {
            provides: self.entries.keys().cloned().collect(),
            entries: self.entries,
            snapshot: RwLock::new(HashMap::new()),
            concurrent: self.concurrent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct Doubler {
        provides: DataSet,
    }

    impl Provider for Doubler {
        fn provides(&self) -> &DataSet {
            &self.provides
        }

        fn update_provided_values(&self, _update: Update) {}

        fn get_provided_value(&self, key: &str) -> Option<PackagePtr> {
            dispatch_argumented(self, key)
        }

        fn describe_provided_value(&self, _key: &str) -> String {
            "Doubled argument".to_string()
        }

        fn as_argumented(self: Arc<Self>) -> Option<Arc<dyn ArgumentedProvider>> {
            Some(self)
        }
    }

    impl ArgumentedProvider for Doubler {
        fn is_valid_argument(&self, _raw_key: &str, argument: &str) -> bool {
            argument.parse::<i64>().is_ok()
        }

        fn set_active_arguments(&self, _raw_key: &str, _arguments: &ArgumentSet) {}

        fn get_provided_value_for_argument(
            &self,
            raw_key: &str,
            argument: &str,
        ) -> Option<PackagePtr> {
            match raw_key {
                "calc.double[]" => argument
                    .parse::<i64>()
                    .ok()
                    .map(|v| Package::from(v * 2).shared()),
                "calc.zero" => Some(Package::from(0i64).shared()),
                _ => None,
            }
        }
    }

    fn doubler() -> Doubler {
        Doubler {
            provides: ["calc.double[]", "calc.zero"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    #[test]
    fn test_dispatch_splits_argumented_keys() {
        let d = doubler();
        assert_eq!(d.get_provided_value("calc.double[21]").unwrap().int_value(), 42);
        assert_eq!(d.get_provided_value("calc.zero").unwrap().int_value(), 0);
        assert!(d.get_provided_value("calc.double[x]").is_none());
    }

    #[test]
    fn test_values_for_arguments_in_set_order() {
        let d = doubler();
        let args: ArgumentSet = ["3", "1", "x"].into_iter().map(String::from).collect();
        let values = d.get_provided_values_for_arguments("calc.double[]", &args);
        assert!(values.is_aggregate());
        assert_eq!(values.num_components(), 3);
        assert_eq!(values.component(0).unwrap().int_value(), 2);
        assert_eq!(values.component(1).unwrap().int_value(), 6);
        assert_eq!(values.component(2).unwrap().string_value(), "");
    }

    #[test]
    fn test_static_provider_snapshots_on_update() {
        let counter = Arc::new(AtomicI64::new(5));
        let c = Arc::clone(&counter);
        let provider = StaticProvider::builder()
            .provide("sim.count", "Counter", move || c.load(Ordering::SeqCst))
            .build();

        assert!(provider.get_provided_value("sim.count").is_none());
        provider.update_provided_values(Update::Tick(1));
        counter.store(9, Ordering::SeqCst);
        assert_eq!(provider.get_provided_value("sim.count").unwrap().int_value(), 5);
        provider.update_provided_values(Update::Tick(2));
        assert_eq!(provider.get_provided_value("sim.count").unwrap().int_value(), 9);
        assert_eq!(provider.describe_provided_value("sim.count"), "Counter");
    }

    #[test]
    fn test_capability_query() {
        let plain: Arc<dyn Provider> = StaticProvider::builder().build();
        assert!(plain.as_argumented().is_none());

        let arg: Arc<dyn Provider> = Arc::new(doubler());
        let view = arg.as_argumented().unwrap();
        assert!(view.is_valid_argument("calc.double[]", "7"));
    }
}
