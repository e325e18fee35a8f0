#![allow(dead_code)]

pub mod macros;

use lifeline_core::{dispatch_argumented, ArgumentedProvider, DataRetrieval, Provider, Recorder};
use lifeline_data::{ArgumentSet, DataSet, Package, PackagePtr, Update};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn data_set(keys: &[&str]) -> DataSet {
    keys.iter().map(|k| k.to_string()).collect()
}

pub fn argument_set(args: &[&str]) -> ArgumentSet {
    args.iter().map(|a| a.to_string()).collect()
}

/// Provides its keys with the number of updates seen so far. Nothing is
/// available before the first update.
pub struct SpyProvider {
    provides: DataSet,
    concurrent: bool,
    pub updates: Mutex<Vec<Update>>,
    pub gets: AtomicUsize,
}

impl SpyProvider {
    pub fn new(keys: &[&str]) -> Arc<Self> {
        Self::build(keys, false)
    }

    pub fn concurrent(keys: &[&str]) -> Arc<Self> {
        Self::build(keys, true)
    }

    fn build(keys: &[&str], concurrent: bool) -> Arc<Self> {
        Arc::new(Self {
            provides: data_set(keys),
            concurrent,
            updates: Mutex::new(Vec::new()),
            gets: AtomicUsize::new(0),
        })
    }

    pub fn updates(&self) -> Vec<Update> {
        self.updates.lock().unwrap().clone()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

impl Provider for SpyProvider {
    fn provides(&self) -> &DataSet {
        &self.provides
    }

    fn update_provided_values(&self, update: Update) {
        self.updates.lock().unwrap().push(update);
    }

    fn get_provided_value(&self, key: &str) -> Option<PackagePtr> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        assert!(self.provides.contains(key));
        let seen = self.updates.lock().unwrap().len();
        (seen > 0).then(|| Package::from(seen).shared())
    }

    fn describe_provided_value(&self, key: &str) -> String {
        format!("spy {key}")
    }

    fn supports_concurrent_update(&self) -> bool {
        self.concurrent
    }
}

/// Argumented provider for `env.trigger[]`. Accepts any argument except
/// `bad` and answers `trigger <arg>`.
pub struct TriggerProvider {
    provides: DataSet,
    pub activations: Mutex<Vec<(String, ArgumentSet)>>,
}

impl TriggerProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            provides: data_set(&["env.trigger[]"]),
            activations: Mutex::new(Vec::new()),
        })
    }

    pub fn last_activation(&self) -> Option<(String, ArgumentSet)> {
        self.activations.lock().unwrap().last().cloned()
    }
}

impl Provider for TriggerProvider {
    fn provides(&self) -> &DataSet {
        &self.provides
    }

    fn update_provided_values(&self, _update: Update) {}

    fn get_provided_value(&self, key: &str) -> Option<PackagePtr> {
        dispatch_argumented(self, key)
    }

    fn describe_provided_value(&self, _key: &str) -> String {
        "Environment trigger".to_string()
    }

    fn as_argumented(self: Arc<Self>) -> Option<Arc<dyn ArgumentedProvider>> {
        Some(self)
    }
}

impl ArgumentedProvider for TriggerProvider {
    fn is_valid_argument(&self, raw_key: &str, argument: &str) -> bool {
        raw_key == "env.trigger[]" && argument != "bad"
    }

    fn set_active_arguments(&self, raw_key: &str, arguments: &ArgumentSet) {
        self.activations
            .lock()
            .unwrap()
            .push((raw_key.to_string(), arguments.clone()));
    }

    fn get_provided_value_for_argument(
        &self,
        _raw_key: &str,
        argument: &str,
    ) -> Option<PackagePtr> {
        Some(Package::from(format!("trigger {argument}")).shared())
    }
}

/// Wraps `provider` in a factory that counts its invocations.
pub fn counting_factory<P>(
    provider: Arc<P>,
) -> (
    impl Fn() -> Option<Arc<dyn Provider>> + Send + Sync + 'static,
    Arc<AtomicUsize>,
)
where
    P: Provider + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(Arc::clone(&provider) as Arc<dyn Provider>)
    };
    (factory, calls)
}

pub fn counting_argumented_factory<P>(
    provider: Arc<P>,
) -> (
    impl Fn() -> Option<Arc<dyn ArgumentedProvider>> + Send + Sync + 'static,
    Arc<AtomicUsize>,
)
where
    P: ArgumentedProvider + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(Arc::clone(&provider) as Arc<dyn ArgumentedProvider>)
    };
    (factory, calls)
}

pub type Reading = (Update, Vec<(String, Option<PackagePtr>)>);

/// Pulls every requested key `reads` times per notification and keeps the
/// last reading of each.
pub struct LogRecorder {
    requested: DataSet,
    reads: usize,
    pub log: Mutex<Vec<Reading>>,
}

impl LogRecorder {
    pub fn new(keys: &[&str]) -> Arc<Self> {
        Self::reading(keys, 1)
    }

    pub fn reading(keys: &[&str], reads: usize) -> Arc<Self> {
        Arc::new(Self {
            requested: data_set(keys),
            reads,
            log: Mutex::new(Vec::new()),
        })
    }

    pub fn updates(&self) -> Vec<Update> {
        self.log.lock().unwrap().iter().map(|(u, _)| *u).collect()
    }

    /// Value of `key` in the most recent notification.
    pub fn last(&self, key: &str) -> Option<PackagePtr> {
        let log = self.log.lock().unwrap();
        let (_, values) = log.last()?;
        values
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.clone())
    }
}

impl Recorder for LogRecorder {
    fn requested_data(&self) -> &DataSet {
        &self.requested
    }

    fn notify_data(&self, update: Update, retrieve: &DataRetrieval<'_>) {
        let mut values = Vec::new();
        for key in &self.requested {
            let mut value = None;
            for _ in 0..self.reads {
                value = retrieve(key);
            }
            values.push((key.clone(), value));
        }
        self.log.lock().unwrap().push((update, values));
    }
}
