//! Venue registry
//!
//! Holds the registered venues in registration order. Names are unique and
//! case-insensitive; every adapter is wrapped in a `TimedAdapter` on the
//! way in, so each venue call made through the registry has a deadline.
//!
//! The registry is built once at startup and then shared read-only
//! (`Arc<VenueRegistry>`), so lookups need no locking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapters::timed::TimedAdapter;
use crate::adapters::traits::ExchangeAdapter;
use crate::error::AppError;

/// A registered venue
#[derive(Clone)]
pub struct Venue {
    /// Lowercase registration name
    pub name: String,
    pub adapter: Arc<dyn ExchangeAdapter>,
}

pub struct VenueRegistry {
    call_timeout: Duration,
    venues: Vec<Venue>,
    index: HashMap<String, usize>,
}

impl VenueRegistry {
    pub fn new(call_timeout: Duration) -> Self {
        Self {
            call_timeout,
            venues: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a venue under its `exchange_name()`
    pub fn register<A>(&mut self, adapter: A) -> Result<(), AppError>
    where
        A: ExchangeAdapter + 'static,
    {
        self.register_boxed(Box::new(adapter))
    }

    pub fn register_boxed(&mut self, adapter: Box<dyn ExchangeAdapter>) -> Result<(), AppError> {
        let name = adapter.exchange_name().trim().to_lowercase();
        if name.is_empty() {
            return Err(AppError::Config("Venue name cannot be empty".to_string()));
        }
        if self.index.contains_key(&name) {
            return Err(AppError::Config(format!(
                "Venue '{}' is already registered",
                name
            )));
        }

        let timed = TimedAdapter::new(adapter, self.call_timeout);
        self.index.insert(name.clone(), self.venues.len());
        self.venues.push(Venue {
            name: name.clone(),
            adapter: Arc::new(timed),
        });

        info!(
            venue = %name,
            timeout_ms = self.call_timeout.as_millis() as u64,
            "[VENUE] Registered"
        );
        Ok(())
    }

    /// Look up a venue by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<Arc<dyn ExchangeAdapter>> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| Arc::clone(&self.venues[i].adapter))
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<String> {
        self.venues.iter().map(|v| v.name.clone()).collect()
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
