//! Read-through cache for static vehicle metadata.
//!
//! A vehicle id is either unknown (not stored) or cached. Cached records are
//! never refreshed or evicted. A failed or incomplete fetch leaves the id
//! uncached, so the next request fetches again.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use thiserror::Error;

use crate::observability::metrics;
use crate::upstream::{Service, UpstreamClient, UpstreamError};
use crate::vehicles::integrity;
use crate::vehicles::model::{VehicleInfo, VehicleRecord};
use crate::vehicles::normalize::{self, NormalizeError};
use crate::vehicles::store::VehicleStore;

/// Errors from a vehicle lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

type PendingFetch = Shared<BoxFuture<'static, Result<VehicleInfo, LookupError>>>;

/// Read-through vehicle cache. Cheap to clone.
#[derive(Clone)]
pub struct VehicleCache {
    store: Arc<VehicleStore>,
    upstream: UpstreamClient,
    /// Fetches in progress, keyed by vehicle id.
    in_flight: Arc<DashMap<String, PendingFetch>>,
}

impl VehicleCache {
    pub fn new(store: Arc<VehicleStore>, upstream: UpstreamClient) -> Self {
        metrics::record_cache_size(store.len());
        Self {
            store,
            upstream,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Look up a vehicle, fetching it from the upstream on a miss.
    ///
    /// Concurrent misses for the same id share a single upstream fetch.
    pub async fn get_vehicle(&self, id: &str) -> Result<VehicleInfo, LookupError> {
        if let Some(record) = self.store.find(id) {
            tracing::debug!(vehicle_id = %id, "Retrieved vehicle info from cache");
            metrics::record_cache_event("hit");
            return Ok(record.into());
        }
        metrics::record_cache_event("miss");

        let pending = match self.in_flight.entry(id.to_string()) {
            Entry::Occupied(slot) => {
                tracing::debug!(vehicle_id = %id, "Joining in-flight vehicle fetch");
                slot.get().clone()
            }
            Entry::Vacant(slot) => {
                let fetch = load(self.store.clone(), self.upstream.clone(), id.to_string())
                    .boxed()
                    .shared();
                slot.insert(fetch.clone());
                fetch
            }
        };

        let result = pending.clone().await;
        self.in_flight.remove_if(id, |_, current| current.ptr_eq(&pending));
        result
    }

    /// Every cached vehicle. Never calls the upstream.
    pub fn cached(&self) -> Vec<VehicleRecord> {
        self.store.all()
    }
}

/// Fetch, normalize and verify a vehicle, persisting it if it is complete.
async fn load(
    store: Arc<VehicleStore>,
    upstream: UpstreamClient,
    id: String,
) -> Result<VehicleInfo, LookupError> {
    let envelope = upstream.call(Service::VehicleInfo, &id, None).await?;
    let data = envelope
        .data
        .as_ref()
        .ok_or(NormalizeError::MissingField("data"))?;
    let info = normalize::vehicle_info(&id, data)?;

    if integrity::verify(&info) {
        if let Some(record) = info.to_record() {
            let writer = store.clone();
            let persisted = tokio::task::spawn_blocking(move || writer.push(record))
                .await
                .unwrap_or_else(|e| Err(std::io::Error::other(e)));
            match persisted {
                Ok(true) => {
                    tracing::info!(vehicle_id = %id, "Cached vehicle info");
                    metrics::record_cache_event("store");
                    metrics::record_cache_size(store.len());
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(vehicle_id = %id, error = %e, "Failed to persist vehicle info");
                }
            }
        }
    }

    Ok(info)
}
