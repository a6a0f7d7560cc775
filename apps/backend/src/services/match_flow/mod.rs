//! Match lifecycle state machine and its transactional transition guards.

mod lifecycle;
mod queries;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::{BlindStructure, Clock};
use crate::events::EventBus;

pub use queries::{CurrentRoundView, MatchDetails};

/// The match lifecycle service.
///
/// Owns the status transitions (created -> running -> paused <-> running ->
/// ended), round progression, and pause-time accounting. Every mutating
/// operation re-fetches the match row under a row lock inside its own
/// transaction and re-validates its guard there, so concurrent callers
/// serialize and at most one transition wins.
pub struct MatchFlowService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    events: Arc<EventBus>,
    structure: BlindStructure,
}

impl MatchFlowService {
    /// Service over the deployment-wide standard blind structure.
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self::with_structure(db, clock, BlindStructure::standard())
    }

    pub fn with_structure(
        db: DatabaseConnection,
        clock: Arc<dyn Clock>,
        structure: BlindStructure,
    ) -> Self {
        debug_assert!(structure.validate().is_ok());
        Self {
            db,
            clock,
            events: Arc::new(EventBus::new()),
            structure,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn structure(&self) -> &BlindStructure {
        &self.structure
    }
}
