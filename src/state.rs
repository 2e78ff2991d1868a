//! Shared taxonomy state with swap-on-reload.

use crate::application::services::{Taxonomy, TaxonomyService};
use crate::error::TaxonomyError;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Handle readers use to reach the current taxonomy snapshot.
///
/// Readers call [`current`](Self::current) and keep the returned `Arc` for as
/// long as they need a consistent view. A reload builds a complete new
/// snapshot first and then swaps the pointer, so no reader ever sees a
/// partially rebuilt tree. Cloning the state shares the same snapshot slot.
#[derive(Clone)]
pub struct TaxonomyState {
    pub service: Arc<TaxonomyService>,
    snapshot: Arc<ArcSwap<Taxonomy>>,
}

impl TaxonomyState {
    pub fn new(service: Arc<TaxonomyService>, initial: Taxonomy) -> Self {
        Self {
            service,
            snapshot: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Loads the first snapshot from `service`.
    ///
    /// # Errors
    ///
    /// Propagates any [`TaxonomyService::load_taxonomy`] failure.
    pub async fn bootstrap(service: Arc<TaxonomyService>) -> Result<Self, TaxonomyError> {
        let initial = service.load_taxonomy().await?;
        Ok(Self::new(service, initial))
    }

    /// The snapshot visible right now.
    pub fn current(&self) -> Arc<Taxonomy> {
        self.snapshot.load_full()
    }

    /// Rebuilds the taxonomy from the service's sources and publishes it.
    ///
    /// On failure the previous snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Propagates any [`TaxonomyService::load_taxonomy`] failure.
    pub async fn reload(&self) -> Result<Arc<Taxonomy>, TaxonomyError> {
        match self.service.load_taxonomy().await {
            Ok(next) => {
                let next = Arc::new(next);
                self.snapshot.store(next.clone());
                tracing::info!(
                    records = next.store().len(),
                    loaded_at = %next.loaded_at(),
                    "Taxonomy snapshot swapped"
                );
                Ok(next)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Taxonomy reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Publishes an externally built snapshot.
    pub fn replace(&self, next: Taxonomy) {
        self.snapshot.store(Arc::new(next));
    }
}
