//! The data manager.
//!
//! Sits between providers and recorders. Factories are registered up front
//! under every key they can serve; a provider is only built when the first
//! recorder that needs one of its keys attaches, and is then refreshed once
//! per tick for the rest of the manager's life. Recorders pull values through
//! a per-tick cache.
//!
//! ## Locking
//!
//! Three locks:
//!
//! - `providers` (`RwLock`): factories, active instances, active arguments.
//!   Written by registration and attachment, read by everything else.
//! - `cache` (`Mutex`): values retrieved during the current tick. Only ever
//!   taken after `providers` or on its own, never the other way round.
//! - `recorders` (`Mutex`): attached recorders.
//!
//! A tick clears the cache, refreshes providers under the read lock, takes
//! the recorder lock and only then releases the read lock. Recorders are
//! notified with the recorder lock held, and each value they pull takes the
//! read lock again, so during notification `recorders` is held before
//! `providers`. Attachment never holds the write lock and the recorder lock
//! at the same time, so a recorder may take the write lock from
//! `notify_data` (for example by registering a factory). It must not attach
//! or detach recorders.
//!
//! `perform_update` expects a single ticking thread. Two concurrent ticks
//! take the two locks in opposite orders and can deadlock behind a waiting
//! writer.

use crate::config::DataConfig;
use crate::error::{DataError, Result};
use crate::metrics::Metrics;
use crate::provider::{ArgumentedProvider, ArgumentedProviderFactory, Provider, ProviderFactory};
use crate::recorder::Recorder;
use crate::world::{World, WorldFacet, DATA_MANAGER_FACET_ID};
use lifeline_data::{key, Argument, ArgumentSet, DataId, DataSet, PackagePtr, Update};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// A provider instance together with its argumented view, resolved once.
#[derive(Clone)]
struct ActiveProvider {
    provider: Arc<dyn Provider>,
    argumented: Option<Arc<dyn ArgumentedProvider>>,
}

impl ActiveProvider {
    fn new(provider: Arc<dyn Provider>) -> Self {
        let argumented = Arc::clone(&provider).as_argumented();
        Self {
            provider,
            argumented,
        }
    }

    fn from_argumented(provider: Arc<dyn ArgumentedProvider>) -> Self {
        Self {
            provider: provider.clone(),
            argumented: Some(provider),
        }
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.provider) as *const ()
    }
}

/// Factory registered under a standard key. Argumented factories registered
/// under a standard key keep their argumented view when built.
enum Factory {
    Standard(ProviderFactory),
    Argumented(ArgumentedProviderFactory),
}

impl Factory {
    fn build(&self) -> Option<ActiveProvider> {
        match self {
            Factory::Standard(f) => f().map(ActiveProvider::new),
            Factory::Argumented(f) => f().map(ActiveProvider::from_argumented),
        }
    }
}

/// A key a recorder asked for, checked against the registered factories.
enum Request<'a> {
    Standard(&'a str),
    Argumented { raw_key: DataId, argument: Argument },
}

#[derive(Default)]
struct ProviderState {
    factories: HashMap<DataId, Factory>,
    family_factories: HashMap<DataId, ArgumentedProviderFactory>,
    available: DataSet,
    /// Built by a factory during an attach that has not committed yet.
    instantiated: HashMap<DataId, ActiveProvider>,
    active: HashMap<DataId, ActiveProvider>,
    active_families: HashMap<DataId, ActiveProvider>,
    active_arguments: HashMap<DataId, BTreeMap<Argument, usize>>,
    /// Refreshed every tick, in activation order.
    activated: Vec<ActiveProvider>,
}

/// Claims collected during one attach, applied only once every requested
/// key has been satisfied.
#[derive(Default)]
struct Activation {
    claims: HashMap<DataId, ActiveProvider>,
    family_claims: HashMap<DataId, ActiveProvider>,
    built: Vec<(DataId, ActiveProvider, bool)>,
}

impl Activation {
    /// Claims every key `provider` supplies that nobody has claimed yet.
    /// First claimant wins.
    fn stage(&mut self, state: &ProviderState, registered_as: &str, provider: &ActiveProvider) {
        let mut claimed_any = false;
        for pdid in provider.provider.provides() {
            if key::is_argumented(pdid) {
                if provider.argumented.is_none()
                    || state.active_families.contains_key(pdid)
                    || self.family_claims.contains_key(pdid)
                {
                    continue;
                }
                self.family_claims.insert(pdid.clone(), provider.clone());
            } else {
                if state.active.contains_key(pdid) || self.claims.contains_key(pdid) {
                    continue;
                }
                self.claims.insert(pdid.clone(), provider.clone());
            }
            claimed_any = true;
        }
        self.built
            .push((registered_as.to_string(), provider.clone(), claimed_any));
    }
}

impl ProviderState {
    fn validate<'a>(&self, requested: &'a DataSet) -> Result<Vec<Request<'a>>> {
        requested
            .iter()
            .map(|data_id| {
                if data_id.is_empty() {
                    return Err(DataError::malformed(data_id.as_str()));
                }
                if key::is_argumented(data_id) {
                    let (raw_key, argument) =
                        key::split(data_id).ok_or_else(|| DataError::malformed(data_id.as_str()))?;
                    if !self.family_factories.contains_key(&raw_key) {
                        return Err(DataError::unavailable(data_id.as_str()));
                    }
                    Ok(Request::Argumented { raw_key, argument })
                } else if self.factories.contains_key(data_id) {
                    Ok(Request::Standard(data_id))
                } else {
                    Err(DataError::unavailable(data_id.as_str()))
                }
            })
            .collect()
    }

    fn instantiate(&mut self, data_id: &str) -> Result<ActiveProvider> {
        if let Some(built) = self.instantiated.get(data_id) {
            return Ok(built.clone());
        }
        let built = self
            .factories
            .get(data_id)
            .ok_or_else(|| DataError::unavailable(data_id))?
            .build()
            .ok_or_else(|| DataError::ActivationFailed(data_id.to_string()))?;
        debug!(key = data_id, "provider instantiated");
        self.instantiated.insert(data_id.to_string(), built.clone());
        Ok(built)
    }

    fn instantiate_family(&mut self, raw_key: &str) -> Result<ActiveProvider> {
        if let Some(built) = self.instantiated.get(raw_key) {
            return Ok(built.clone());
        }
        let factory = self
            .family_factories
            .get(raw_key)
            .ok_or_else(|| DataError::unavailable(raw_key))?;
        let provider = factory().ok_or_else(|| DataError::ActivationFailed(raw_key.to_string()))?;
        let built = ActiveProvider::from_argumented(provider);
        debug!(key = raw_key, "argumented provider instantiated");
        self.instantiated.insert(raw_key.to_string(), built.clone());
        Ok(built)
    }

    /// Resolves every request to a provider, building what is missing.
    /// Nothing becomes active unless every request succeeds.
    fn activate(&mut self, requests: &[Request<'_>]) -> Result<Vec<ActiveProvider>> {
        let mut activation = Activation::default();
        let mut touched = Vec::with_capacity(requests.len());
        let mut arguments = Vec::new();

        for request in requests {
            match request {
                Request::Standard(data_id) => {
                    let existing = self
                        .active
                        .get(*data_id)
                        .or_else(|| activation.claims.get(*data_id))
                        .cloned();
                    let provider = match existing {
                        Some(provider) => provider,
                        None => {
                            let provider = self.instantiate(data_id)?;
                            activation.stage(self, data_id, &provider);
                            provider
                        }
                    };
                    touched.push(provider);
                }
                Request::Argumented { raw_key, argument } => {
                    let existing = self
                        .active_families
                        .get(raw_key)
                        .or_else(|| activation.family_claims.get(raw_key))
                        .cloned();
                    let provider = match existing {
                        Some(provider) => provider,
                        None => {
                            let provider = self.instantiate_family(raw_key)?;
                            activation.stage(self, raw_key, &provider);
                            provider
                        }
                    };
                    let view = provider
                        .argumented
                        .as_ref()
                        .ok_or_else(|| DataError::ActivationFailed(raw_key.clone()))?;
                    if !view.is_valid_argument(raw_key, argument) {
                        return Err(DataError::invalid_argument(raw_key.as_str(), argument.as_str()));
                    }
                    arguments.push((raw_key.clone(), argument.clone(), view.clone()));
                    touched.push(provider);
                }
            }
        }

        self.commit(activation);

        for (raw_key, argument, provider) in arguments {
            let multiset = self.active_arguments.entry(raw_key.clone()).or_default();
            *multiset.entry(argument).or_insert(0) += 1;
            let full: ArgumentSet = multiset.keys().cloned().collect();
            provider.set_active_arguments(&raw_key, &full);
        }

        Ok(touched)
    }

    fn commit(&mut self, activation: Activation) {
        self.active.extend(activation.claims);
        self.active_families.extend(activation.family_claims);
        for (registered_as, provider, claimed_any) in activation.built {
            self.instantiated.remove(&registered_as);
            if claimed_any {
                debug!(key = %registered_as, "provider activated");
                self.activated.push(provider);
            }
        }

        // Leftovers from failed attaches that can no longer claim anything
        let (active, families) = (&self.active, &self.active_families);
        self.instantiated.retain(|registered_as, built| {
            let claimable = built.provider.provides().iter().any(|pdid| {
                if key::is_argumented(pdid) {
                    built.argumented.is_some() && !families.contains_key(pdid)
                } else {
                    !active.contains_key(pdid)
                }
            });
            if !claimable {
                debug!(key = %registered_as, "dropped unclaimable provider");
            }
            claimable
        });
    }
}

/// Registry of provider factories and attached recorders for one world.
///
/// Shared behind an `Arc`; every method takes `&self`.
pub struct Manager {
    providers: RwLock<ProviderState>,
    cache: Mutex<HashMap<DataId, PackagePtr>>,
    recorders: Mutex<Vec<Arc<dyn Recorder>>>,
    attached: AtomicBool,
    metrics: Metrics,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Creates an empty manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&DataConfig::default())
    }

    /// Creates an empty manager, taking the metrics log interval from
    /// `config`.
    #[must_use]
    pub fn with_config(config: &DataConfig) -> Self {
        Self {
            providers: RwLock::new(ProviderState::default()),
            cache: Mutex::new(HashMap::new()),
            recorders: Mutex::new(Vec::new()),
            attached: AtomicBool::new(false),
            metrics: Metrics::with_log_interval(config.log_interval),
        }
    }

    /// Attaches this manager to `world` as its data facet. A manager serves
    /// exactly one world.
    pub fn attach_to(self: &Arc<Self>, world: &mut World) -> Result<()> {
        if self.attached.swap(true, Ordering::SeqCst) {
            return Err(DataError::AlreadyAttached);
        }
        let facet: Arc<dyn WorldFacet> = self.clone();
        if let Err(e) = world.attach_facet(DATA_MANAGER_FACET_ID, facet) {
            self.attached.store(false, Ordering::SeqCst);
            return Err(e);
        }
        world.set_data_manager(Arc::clone(self));
        Ok(())
    }

    /// The data manager attached to `world`, if any.
    pub fn of(world: &World) -> Option<Arc<Manager>> {
        world.data_manager().cloned()
    }

    /// Registers a provider factory under a standard key.
    pub fn register<F>(&self, data_id: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Option<Arc<dyn Provider>> + Send + Sync + 'static,
    {
        if data_id.is_empty() || data_id.ends_with(']') {
            warn!(key = data_id, "rejected registration of malformed key");
            return Err(DataError::malformed(data_id));
        }
        let mut state = self.write_providers();
        if state.factories.contains_key(data_id) {
            warn!(key = data_id, "key already registered");
            return Err(DataError::AlreadyRegistered(data_id.to_string()));
        }
        state
            .factories
            .insert(data_id.to_string(), Factory::Standard(Box::new(factory)));
        state.available.insert(data_id.to_string());
        debug!(key = data_id, "provider registered");
        Ok(())
    }

    /// Registers an argumented provider factory, either under a standard key
    /// or under a family key of the form `name[]`.
    pub fn register_argumented<F>(&self, data_id: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Option<Arc<dyn ArgumentedProvider>> + Send + Sync + 'static,
    {
        let mut state = self.write_providers();
        if !data_id.is_empty() && !data_id.ends_with(']') {
            if state.factories.contains_key(data_id) {
                warn!(key = data_id, "key already registered");
                return Err(DataError::AlreadyRegistered(data_id.to_string()));
            }
            state
                .factories
                .insert(data_id.to_string(), Factory::Argumented(Box::new(factory)));
        } else if key::is_family(data_id) {
            if state.family_factories.contains_key(data_id) {
                warn!(key = data_id, "key family already registered");
                return Err(DataError::AlreadyRegistered(data_id.to_string()));
            }
            state
                .family_factories
                .insert(data_id.to_string(), Box::new(factory));
        } else {
            warn!(key = data_id, "rejected registration of malformed key");
            return Err(DataError::malformed(data_id));
        }
        state.available.insert(data_id.to_string());
        debug!(key = data_id, "argumented provider registered");
        Ok(())
    }

    /// Every key that has been registered, active or not.
    pub fn available(&self) -> DataSet {
        self.read_providers().available.clone()
    }

    /// Whether a factory could serve `data_id`. For an argumented key only
    /// the family is checked; its argument is validated on attach.
    pub fn is_available(&self, data_id: &str) -> bool {
        let state = self.read_providers();
        if key::is_argumented(data_id) {
            key::split(data_id).is_some_and(|(raw_key, _)| state.family_factories.contains_key(&raw_key))
        } else {
            state.factories.contains_key(data_id)
        }
    }

    /// Whether a provider is currently serving `data_id`. For an argumented
    /// key the argument must also have been requested; a family key `name[]`
    /// only asks whether the family is served.
    pub fn is_active(&self, data_id: &str) -> bool {
        let state = self.read_providers();
        if key::is_argumented(data_id) {
            let Some((raw_key, argument)) = key::split(data_id) else {
                return false;
            };
            if !state.active_families.contains_key(&raw_key) {
                return false;
            }
            argument.is_empty()
                || state
                    .active_arguments
                    .get(&raw_key)
                    .is_some_and(|args| args.contains_key(&argument))
        } else {
            state.active.contains_key(data_id)
        }
    }

    /// Description of an active value, as given by its provider.
    pub fn describe(&self, data_id: &str) -> Option<String> {
        let state = self.read_providers();
        let provider = if key::is_argumented(data_id) {
            let (raw_key, _) = key::split(data_id)?;
            state.active_families.get(&raw_key)?
        } else {
            state.active.get(data_id)?
        };
        Some(provider.provider.describe_provided_value(data_id))
    }

    /// Arguments currently requested for the family `raw_key`.
    pub fn active_arguments(&self, raw_key: &str) -> ArgumentSet {
        self.read_providers()
            .active_arguments
            .get(raw_key)
            .map(|args| args.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of provider instances refreshed each tick.
    pub fn num_active_providers(&self) -> usize {
        self.read_providers().activated.len()
    }

    /// Number of recorders notified each tick.
    pub fn num_recorders(&self) -> usize {
        self.lock_recorders().len()
    }

    /// Counters kept by this manager.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Activates whatever `recorder` needs and starts notifying it every
    /// tick. Fails without activating anything if any requested key is
    /// unavailable, cannot be built, or has an argument its provider rejects.
    ///
    /// With `want_immediate_update`, providers that support it are refreshed
    /// right away and the recorder receives one `Update::Immediate`
    /// notification before this returns.
    pub fn attach_recorder(
        &self,
        recorder: Arc<dyn Recorder>,
        want_immediate_update: bool,
    ) -> Result<()> {
        let touched = {
            let mut state = self.write_providers();
            let before = state.activated.len();
            let result = state
                .validate(recorder.requested_data())
                .and_then(|requests| state.activate(&requests));
            match result {
                Ok(touched) => {
                    self.metrics
                        .record_activations(state.activated.len() - before);
                    touched
                }
                Err(e) => {
                    warn!(error = %e, "recorder attach failed");
                    return Err(e);
                }
            }
        };

        if want_immediate_update {
            self.immediate_update(&touched, recorder.as_ref());
        }

        let mut recorders = self.lock_recorders();
        if !recorders.iter().any(|r| same_recorder(r, &recorder)) {
            recorders.push(recorder);
        }
        debug!(recorders = recorders.len(), "recorder attached");
        Ok(())
    }

    /// Stops notifying `recorder`. Providers it caused to be activated stay
    /// active.
    pub fn detach_recorder(&self, recorder: &Arc<dyn Recorder>) -> bool {
        let mut recorders = self.lock_recorders();
        let before = recorders.len();
        recorders.retain(|r| !same_recorder(r, recorder));
        before != recorders.len()
    }

    /// Runs one tick: clears the cache, refreshes every active provider, then
    /// notifies every attached recorder.
    pub fn perform_update(&self, update: Update) {
        let started = Instant::now();
        self.lock_cache().clear();

        let recorders = self.refresh_providers(update);
        let retrieve = |data_id: &str| self.get_current_value(data_id);
        for recorder in recorders.iter() {
            recorder.notify_data(update, &retrieve);
        }
        let notified = recorders.len();
        drop(recorders);

        trace!(%update, notified, "data update complete");
        self.metrics.record_tick(started.elapsed(), notified);
    }

    /// Refreshes active providers under the read lock and returns the
    /// recorder lock, which is taken before the read lock is released.
    fn refresh_providers(&self, update: Update) -> MutexGuard<'_, Vec<Arc<dyn Recorder>>> {
        let state = self.read_providers();
        for active in &state.activated {
            active.provider.update_provided_values(update);
        }
        let recorders = self.lock_recorders();
        drop(state);
        recorders
    }

    /// Current value of `data_id`, computed at most once per tick. `None` if
    /// no active provider serves it.
    pub fn get_current_value(&self, data_id: &str) -> Option<PackagePtr> {
        if let Some(hit) = self.lock_cache().get(data_id).cloned() {
            self.metrics.record_cache_hit();
            return Some(hit);
        }
        self.metrics.record_cache_miss();

        let state = self.read_providers();
        let value = if key::is_argumented(data_id) {
            let (raw_key, argument) = key::split(data_id)?;
            let provider = state.active_families.get(&raw_key)?.argumented.as_ref()?;
            provider.get_provided_value_for_argument(&raw_key, &argument)?
        } else {
            state.active.get(data_id)?.provider.get_provided_value(data_id)?
        };
        self.lock_cache()
            .insert(data_id.to_string(), Arc::clone(&value));
        Some(value)
    }

    fn immediate_update(&self, touched: &[ActiveProvider], recorder: &dyn Recorder) {
        let mut seen = HashSet::new();
        for active in touched {
            if !seen.insert(active.addr()) || !active.provider.supports_concurrent_update() {
                continue;
            }
            active.provider.update_provided_values(Update::Immediate);
            let provided = active.provider.provides();
            self.lock_cache().retain(|data_id, _| {
                let family_served = key::is_argumented(data_id)
                    && key::split(data_id).is_some_and(|(raw_key, _)| provided.contains(&raw_key));
                !provided.contains(data_id) && !family_served
            });
        }
        let retrieve = |data_id: &str| self.get_current_value(data_id);
        recorder.notify_data(Update::Immediate, &retrieve);
    }

    fn read_providers(&self) -> RwLockReadGuard<'_, ProviderState> {
        self.providers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_providers(&self) -> RwLockWriteGuard<'_, ProviderState> {
        self.providers.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<DataId, PackagePtr>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_recorders(&self) -> MutexGuard<'_, Vec<Arc<dyn Recorder>>> {
        self.recorders.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl WorldFacet for Manager {
    fn perform_update(&self, update: Update) {
        Manager::perform_update(self, update);
    }
}

fn same_recorder(a: &Arc<dyn Recorder>, b: &Arc<dyn Recorder>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;
    use crate::recorder::TimeSeriesRecorder;

    fn constant_provider(key: &str, value: i64) -> Arc<StaticProvider> {
        StaticProvider::builder()
            .provide(key, "Constant", move || value)
            .build()
    }

    #[test]
    fn test_register_rejects_malformed_keys() {
        let manager = Manager::new();
        let p = constant_provider("a", 1);
        let f = move || Some(p.clone() as Arc<dyn Provider>);
        assert_eq!(manager.register("", f.clone()), Err(DataError::malformed("")));
        assert_eq!(
            manager.register("a[]", f.clone()),
            Err(DataError::malformed("a[]"))
        );
        assert!(manager.register("a", f.clone()).is_ok());
        assert_eq!(
            manager.register("a", f),
            Err(DataError::AlreadyRegistered("a".to_string()))
        );
    }

    #[test]
    fn test_register_argumented_key_shapes() {
        let manager = Manager::new();
        let factory = || None::<Arc<dyn ArgumentedProvider>>;
        assert!(manager.register_argumented("env.trigger[]", factory).is_ok());
        assert!(manager.register_argumented("env.trigger[]", factory).is_err());
        assert!(manager.register_argumented("env.level", factory).is_ok());
        assert!(manager.register_argumented("env.bad[x]", factory).is_err());
        assert!(manager.register_argumented("", factory).is_err());

        assert!(manager.available().contains("env.trigger[]"));
        assert!(manager.is_available("env.trigger[anything]"));
        assert!(manager.is_available("env.level"));
    }

    #[test]
    fn test_refresh_hands_off_read_lock() {
        let manager = Manager::new();
        let recorders = manager.refresh_providers(Update::Tick(1));
        // Read lock is gone while the recorder lock is still held
        assert!(manager.providers.try_write().is_ok());
        drop(recorders);
    }

    #[test]
    fn test_detach_unknown_recorder() {
        let manager = Manager::new();
        let r: Arc<dyn Recorder> = Arc::new(TimeSeriesRecorder::<i64>::new("x"));
        assert!(!manager.detach_recorder(&r));
    }

    #[test]
    fn test_factory_failure_leaves_nothing_active() {
        let manager = Manager::new();
        let good = constant_provider("good", 1);
        manager
            .register("good", move || Some(good.clone() as Arc<dyn Provider>))
            .unwrap();
        manager.register("bad", || None).unwrap();

        let recorder = Arc::new(Recorded::new(&["good", "bad"]));
        let err = manager.attach_recorder(recorder, false).unwrap_err();
        assert_eq!(err, DataError::ActivationFailed("bad".to_string()));
        assert!(!manager.is_active("good"));
        assert_eq!(manager.num_active_providers(), 0);
        assert_eq!(manager.num_recorders(), 0);
    }

    #[test]
    fn test_superseded_leftover_is_dropped() {
        let manager = Manager::new();
        let wide = StaticProvider::builder()
            .provide("sim.x", "X", || 1i64)
            .provide("sim.y", "Y", || 2i64)
            .build();
        let narrow = constant_provider("sim.y", 3);
        manager
            .register("sim.x", move || Some(wide.clone() as Arc<dyn Provider>))
            .unwrap();
        manager
            .register("sim.y", move || Some(narrow.clone() as Arc<dyn Provider>))
            .unwrap();
        manager.register("sim.z", || None).unwrap();

        let failed = Arc::new(Recorded::new(&["sim.y", "sim.z"]));
        assert!(manager.attach_recorder(failed, false).is_err());
        assert!(manager.read_providers().instantiated.contains_key("sim.y"));

        let recorder = Arc::new(Recorded::new(&["sim.x"]));
        manager.attach_recorder(recorder, false).unwrap();
        assert!(manager.is_active("sim.y"));
        assert!(manager.read_providers().instantiated.is_empty());
    }

    struct Recorded {
        requested: DataSet,
    }

    impl Recorded {
        fn new(keys: &[&str]) -> Self {
            Self {
                requested: keys.iter().map(|k| k.to_string()).collect(),
            }
        }
    }

    impl Recorder for Recorded {
        fn requested_data(&self) -> &DataSet {
            &self.requested
        }

        fn notify_data(&self, _update: Update, _retrieve: &crate::recorder::DataRetrieval<'_>) {}
    }
}
