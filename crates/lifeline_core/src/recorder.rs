//! Value consumers.
//!
//! Recorders are driven by the manager through `notify_data`, once per tick,
//! and pull whatever they need through the retrieval callback. They never
//! poll.

use crate::error::{DataError, Result};
use lifeline_data::{DataId, DataSet, Package, PackagePtr, Update};
use serde::Serialize;
use std::sync::Mutex;

/// Callback handed to recorders for pulling current values.
pub type DataRetrieval<'a> = dyn Fn(&str) -> Option<PackagePtr> + 'a;

pub trait Recorder: Send + Sync {
    /// Keys this recorder may pull. Fixed at construction.
    fn requested_data(&self) -> &DataSet;

    /// Called once per tick, after every active provider has refreshed.
    ///
    /// Must not call `attach_recorder` or `detach_recorder` on the notifying
    /// manager.
    fn notify_data(&self, update: Update, retrieve: &DataRetrieval<'_>);
}

/// A value type a `TimeSeriesRecorder` can store.
pub trait SeriesValue: Clone + Send + Sync + 'static {
    /// Coerces a retrieved package, or produces the absent value.
    fn from_package(package: Option<&PackagePtr>) -> Self;

    /// Unescaped text form, or `None` for an absent value.
    fn render(&self) -> Option<String>;

    /// Reads back a rendered, unescaped value.
    fn parse(text: &str) -> Option<Self>;
}

/// Text form of an absent value. A literal `~` is always escaped.
const ABSENT: &str = "~";

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ',' | ':' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `None` on a dangling trailing backslash.
fn unescape(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next()?);
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Splits on commas that are not escaped. Items keep their escapes.
fn split_items(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ',' => {
                items.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&text[start..]);
    items
}

impl SeriesValue for bool {
    fn from_package(package: Option<&PackagePtr>) -> Self {
        package.is_some_and(|p| p.bool_value())
    }

    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn parse(text: &str) -> Option<Self> {
        Some(Package::from(text).bool_value())
    }
}

impl SeriesValue for i64 {
    fn from_package(package: Option<&PackagePtr>) -> Self {
        package.map_or(0, |p| p.int_value())
    }

    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn parse(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

impl SeriesValue for f64 {
    fn from_package(package: Option<&PackagePtr>) -> Self {
        package.map_or(0.0, |p| p.double_value())
    }

    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn parse(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

impl SeriesValue for String {
    fn from_package(package: Option<&PackagePtr>) -> Self {
        package.map(|p| p.string_value()).unwrap_or_default()
    }

    fn render(&self) -> Option<String> {
        Some(self.clone())
    }

    fn parse(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl SeriesValue for Option<PackagePtr> {
    fn from_package(package: Option<&PackagePtr>) -> Self {
        package.cloned()
    }

    fn render(&self) -> Option<String> {
        self.as_ref().map(|p| p.string_value())
    }

    fn parse(text: &str) -> Option<Self> {
        Some(Some(Package::from(text).shared()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataEntry<T> {
    pub update: Update,
    pub value: T,
}

/// Records one key, one entry per observed tick.
#[derive(Debug)]
pub struct TimeSeriesRecorder<T> {
    data_id: DataId,
    requested: DataSet,
    entries: Mutex<Vec<DataEntry<T>>>,
}

impl<T: SeriesValue> TimeSeriesRecorder<T> {
    /// Creates an empty series requesting only `data_id`.
    pub fn new(data_id: &str) -> Self {
        Self {
            data_id: data_id.to_string(),
            requested: DataSet::from([data_id.to_string()]),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Restores a series from the form produced by [`Self::to_text`].
    pub fn from_text(data_id: &str, text: &str) -> Result<Self> {
        let recorder = Self::new(data_id);
        {
            let mut entries = recorder.lock();
            for item in split_items(text).into_iter().filter(|s| !s.is_empty()) {
                let malformed = || DataError::MalformedSeries(item.to_string());
                // Update numbers never contain ':', so the first one separates
                let (update, value) = item.split_once(':').ok_or_else(malformed)?;
                let update: Update = update.parse().map_err(|_| malformed())?;
                let value = if value == ABSENT {
                    T::from_package(None)
                } else {
                    unescape(value)
                        .and_then(|v| T::parse(&v))
                        .ok_or_else(malformed)?
                };
                entries.push(DataEntry { update, value });
            }
        }
        Ok(recorder)
    }

    pub fn data_id(&self) -> &str {
        &self.data_id
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<DataEntry<T>> {
        self.lock().get(index).cloned()
    }

    /// Copy of every entry, oldest first.
    pub fn entries(&self) -> Vec<DataEntry<T>> {
        self.lock().clone()
    }

    /// The recorded values without their updates.
    pub fn values(&self) -> Vec<T> {
        self.lock().iter().map(|e| e.value.clone()).collect()
    }

    /// Renders the series as `update:value` pairs joined by commas.
    ///
    /// Backslash, `,`, `:` and `~` inside values are escaped with a
    /// backslash, and an absent value is written as a bare `~`.
    pub fn to_text(&self) -> String {
        self.lock()
            .iter()
            .map(|e| {
                let value = e
                    .value
                    .render()
                    .map_or_else(|| ABSENT.to_string(), |v| escape(&v));
                format!("{}:{}", e.update, value)
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DataEntry<T>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: SeriesValue> Recorder for TimeSeriesRecorder<T> {
    fn requested_data(&self) -> &DataSet {
        &self.requested
    }

    fn notify_data(&self, update: Update, retrieve: &DataRetrieval<'_>) {
        let value = T::from_package(retrieve(&self.data_id).as_ref());
        self.lock().push(DataEntry { update, value });
    }
}
