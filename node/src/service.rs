//! Registry service: the concurrent host for a [`HousingRegistry`].
//!
//! All mutations take the write half of one `RwLock`, so they are applied in a
//! single total order, one at a time. Reads share the read half and only ever
//! see committed state.
//!
//! With persistence enabled a mutation is applied to a staged copy, the copy is
//! written to disk, and only then swapped in. A failed write therefore leaves
//! both memory and disk at the previous committed state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hqa_registry::{
    AssessmentInfo, AssessorProfile, HousingRegistry, QualityReport, RegistryError, RegistryEvent,
    RegistrySnapshot, RegistrySummary,
};
use hqa_types::{AccountId, AssessmentId, Clock, PropertyToken, Timestamp};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info};

use crate::config::NodeConfig;
use crate::persistence;
use crate::NodeError;

#[derive(Clone)]
pub struct RegistryService {
    registry: Arc<RwLock<HousingRegistry>>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<RegistryEvent>,
    snapshot_path: Option<PathBuf>,
}

impl RegistryService {
    /// Host `registry` in memory only.
    pub fn new(registry: HousingRegistry, clock: Arc<dyn Clock>, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            registry: Arc::new(RwLock::new(registry)),
            clock,
            events,
            snapshot_path: None,
        }
    }

    /// Persist a snapshot to `path` as part of every committed mutation.
    pub fn with_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Open the registry described by `config`.
    ///
    /// Restores the snapshot at `config.snapshot_path()` if one exists,
    /// otherwise creates a fresh registry owned by `config.owner` and writes
    /// its first snapshot.
    pub fn open(config: &NodeConfig, clock: Arc<dyn Clock>) -> Result<Self, NodeError> {
        config.validate()?;
        let path = config.snapshot_path();
        let registry = match persistence::read_snapshot(&path)? {
            Some(snapshot) => {
                let registry = HousingRegistry::restore(snapshot)?;
                if !config.owner.is_empty() && registry.owner().as_str() != config.owner {
                    return Err(NodeError::Config(format!(
                        "configured owner {} does not match snapshot owner {}",
                        config.owner,
                        registry.owner()
                    )));
                }
                info!(
                    path = %path.display(),
                    assessments = registry.total_assessments(),
                    "restored registry snapshot"
                );
                registry
            }
            None => {
                let registry = HousingRegistry::new(AccountId::new(config.owner.clone()))?;
                persistence::write_snapshot(&path, &registry.snapshot())?;
                info!(path = %path.display(), owner = %registry.owner(), "created new registry");
                registry
            }
        };

        let service = Self::new(registry, clock, config.event_channel_capacity);
        Ok(if config.persist_on_write {
            service.with_persistence(path)
        } else {
            service
        })
    }

    /// Receive every event committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Apply one mutation under the writer lock and publish its events.
    async fn apply<T>(
        &self,
        op: impl FnOnce(&mut HousingRegistry, Timestamp) -> Result<T, RegistryError>,
    ) -> Result<T, NodeError> {
        let mut registry = self.registry.write().await;
        let now = self.clock.now();

        let (value, events) = match &self.snapshot_path {
            None => {
                let value = op(&mut *registry, now)?;
                (value, registry.drain_events())
            }
            Some(path) => {
                let mut staged = registry.clone();
                let value = op(&mut staged, now)?;
                let events = staged.drain_events();
                if let Err(e) = persistence::write_snapshot(path, &staged.snapshot()) {
                    error!(
                        path = %path.display(),
                        error = %e,
                        "snapshot write failed, mutation discarded"
                    );
                    return Err(e);
                }
                *registry = staged;
                (value, events)
            }
        };

        // Published while still holding the lock so subscribers see commit order.
        for event in events {
            debug!(kind = event.kind(), "publishing registry event");
            let _ = self.events.send(event);
        }
        Ok(value)
    }

    // ── Mutations ───────────────────────────────────────────────────────

    pub async fn register(&self, caller: &AccountId) -> Result<(), NodeError> {
        self.apply(|reg, now| reg.register(caller, now)).await
    }

    pub async fn certify(&self, caller: &AccountId, target: &AccountId) -> Result<(), NodeError> {
        self.apply(|reg, _| reg.certify(caller, target)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn submit(
        &self,
        caller: &AccountId,
        structural: u32,
        safety: u32,
        utility: u32,
        location: u32,
        property: PropertyToken,
    ) -> Result<AssessmentId, NodeError> {
        self.apply(|reg, now| {
            reg.submit(caller, structural, safety, utility, location, property, now)
        })
        .await
    }

    pub async fn verify(&self, caller: &AccountId, id: AssessmentId) -> Result<(), NodeError> {
        self.apply(|reg, now| reg.verify(caller, id, now)).await
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub async fn owner(&self) -> AccountId {
        self.registry.read().await.owner().clone()
    }

    pub async fn assessor_stats(&self, id: &AccountId) -> AssessorProfile {
        self.registry.read().await.assessor_stats(id)
    }

    pub async fn assessment_info(&self, id: AssessmentId) -> Result<AssessmentInfo, RegistryError> {
        self.registry.read().await.assessment_info(id)
    }

    pub async fn quality_report(&self, id: AssessmentId) -> Result<QualityReport, RegistryError> {
        self.registry.read().await.quality_report(id)
    }

    pub async fn property_assessment_count(&self, property: &PropertyToken) -> usize {
        self.registry.read().await.property_assessment_count(property)
    }

    pub async fn property_assessment_ids(&self, property: &PropertyToken) -> Vec<AssessmentId> {
        self.registry
            .read()
            .await
            .property_assessment_ids(property)
            .to_vec()
    }

    pub async fn total_assessments(&self) -> u32 {
        self.registry.read().await.total_assessments()
    }

    pub async fn summary(&self) -> RegistrySummary {
        self.registry.read().await.summary()
    }

    pub async fn snapshot(&self) -> RegistrySnapshot {
        self.registry.read().await.snapshot()
    }
}
