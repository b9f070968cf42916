//! Cadence rules and the registry that resolves them by identifier.
//!
//! A [`Cadence`] is a stateless rule answering three questions: which date
//! follows a given one, whether a start date is safe for the rule, and
//! roughly how many days lie between occurrences. The [`CadenceRegistry`]
//! maps identifiers such as `"weekly"` to rules; the scheduler only ever talks
//! to the registry, so new cadences are added by registering them.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;

/// Latest day of month a monthly cadence may start on. Every month has at
/// least this many days, so `+1 month` never lands on an invalid date.
pub const MONTHLY_MAX_START_DAY: u32 = 28;

/// A recurrence rule.
pub trait Cadence: Send + Sync + fmt::Debug {
    /// Identifier under which the rule is registered.
    fn id(&self) -> &str;

    /// The date following `last` in this cadence. Returning `last` itself
    /// means the chain has ended.
    fn next(&self, last: NaiveDate) -> NaiveDate;

    /// Whether tasks of this cadence may start on `start` without ever
    /// skipping an occurrence.
    fn is_compatible(&self, _start: NaiveDate) -> bool {
        true
    }

    /// Approximate number of days between occurrences, used for ordering.
    fn approximate_period(&self) -> u32;
}

/// Non-repeating: the chain ends at the start date.
#[derive(Debug, Clone, Copy, Default)]
pub struct Once;

impl Cadence for Once {
    fn id(&self) -> &str {
        "once"
    }

    fn next(&self, last: NaiveDate) -> NaiveDate {
        last
    }

    fn approximate_period(&self) -> u32 {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Daily;

impl Cadence for Daily {
    fn id(&self) -> &str {
        "daily"
    }

    fn next(&self, last: NaiveDate) -> NaiveDate {
        last.succ_opt().unwrap_or(last)
    }

    fn approximate_period(&self) -> u32 {
        1
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Weekly;

impl Cadence for Weekly {
    fn id(&self) -> &str {
        "weekly"
    }

    fn next(&self, last: NaiveDate) -> NaiveDate {
        last.checked_add_days(Days::new(7)).unwrap_or(last)
    }

    fn approximate_period(&self) -> u32 {
        7
    }
}

/// Same day of the following month; December rolls into January.
///
/// No clamping happens here. Start days past [`MONTHLY_MAX_START_DAY`] are
/// rejected up front by [`Cadence::is_compatible`]; a stored date that still
/// cannot be advanced ends the chain instead of yielding a bogus date.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monthly;

impl Cadence for Monthly {
    fn id(&self) -> &str {
        "monthly"
    }

    fn next(&self, last: NaiveDate) -> NaiveDate {
        let (year, month) = if last.month() == 12 {
            (last.year() + 1, 1)
        } else {
            (last.year(), last.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, last.day()).unwrap_or(last)
    }

    fn is_compatible(&self, start: NaiveDate) -> bool {
        start.day() <= MONTHLY_MAX_START_DAY
    }

    fn approximate_period(&self) -> u32 {
        30
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Lookup table from cadence identifier to rule.
///
/// Build it once at startup and share it behind an [`Arc`]; nothing mutates
/// a registry after it has been handed to a scheduler.
#[derive(Debug, Clone, Default)]
pub struct CadenceRegistry {
    rules: HashMap<String, Arc<dyn Cadence>>,
}

impl CadenceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `once`, `daily`, `weekly` and `monthly`.
    pub fn with_builtins() -> Self {
        Self::new()
            .with(Once)
            .with(Daily)
            .with(Weekly)
            .with(Monthly)
    }

    /// Builder form of [`CadenceRegistry::register`].
    pub fn with<C: Cadence + 'static>(mut self, cadence: C) -> Self {
        self.register(cadence);
        self
    }

    /// Registers `cadence` under its identifier, replacing any rule already
    /// registered under the same identifier.
    pub fn register<C: Cadence + 'static>(&mut self, cadence: C) {
        self.rules
            .insert(normalize_id(cadence.id()), Arc::new(cadence));
    }

    /// Resolves an identifier. Matching ignores case and surrounding spaces.
    pub fn get(&self, id: &str) -> Result<&dyn Cadence, CoreError> {
        self.rules
            .get(&normalize_id(id))
            .map(|rule| rule.as_ref())
            .ok_or_else(|| CoreError::UnsupportedCadence(id.to_string()))
    }

    /// The key `id` is registered under, as stored with new tasks.
    pub fn canonical_id(&self, id: &str) -> Result<String, CoreError> {
        let key = normalize_id(id);
        if self.rules.contains_key(&key) {
            Ok(key)
        } else {
            Err(CoreError::UnsupportedCadence(id.to_string()))
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(&normalize_id(id))
    }

    pub fn next(&self, id: &str, last: NaiveDate) -> Result<NaiveDate, CoreError> {
        Ok(self.get(id)?.next(last))
    }

    pub fn is_compatible(&self, id: &str, start: NaiveDate) -> Result<bool, CoreError> {
        Ok(self.get(id)?.is_compatible(start))
    }

    pub fn approximate_period(&self, id: &str) -> Result<u32, CoreError> {
        Ok(self.get(id)?.approximate_period())
    }

    /// Checks that `id` is registered and that `start` is compatible with it,
    /// in that order.
    pub fn validate(&self, id: &str, start: NaiveDate) -> Result<(), CoreError> {
        let rule = self.get(id)?;
        if !rule.is_compatible(start) {
            return Err(CoreError::InvalidStartDate {
                cadence: rule.id().to_string(),
                start,
            });
        }
        Ok(())
    }

    /// Registered identifiers, shortest period first.
    pub fn ids(&self) -> Vec<&str> {
        let mut rules: Vec<(&str, u32)> = self
            .rules
            .iter()
            .map(|(id, rule)| (id.as_str(), rule.approximate_period()))
            .collect();
        rules.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        rules.into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
