//! API state management for the REST server.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::booking::{BookingConfirmation, BookingPaths, StepResolver};
use crate::catalog::Catalog;
use crate::config::Config;

/// Shared state for the REST API
#[derive(Clone)]
pub struct ApiState {
    /// Normalized catalog, loaded once at startup
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
    /// Path scheme of the booking flow
    pub paths: BookingPaths,
    /// Bookings accepted during this process's lifetime
    pub bookings: Arc<RwLock<Vec<BookingConfirmation>>>,
}

impl ApiState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let paths = BookingPaths::from_config(&config.booking);
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            paths,
            bookings: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Resolver over the configured path scheme
    pub fn resolver(&self) -> StepResolver {
        StepResolver::new(self.paths.clone())
    }
}
