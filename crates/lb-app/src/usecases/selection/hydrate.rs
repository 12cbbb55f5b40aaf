use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use lb_core::ports::{GatewayError, SelectionGatewayPort};
use lb_core::{SelectionCategory, SelectionSet};

use crate::usecases::sync::SyncEngine;

/// Load a category's saved selection into the store and seed the sync engine
/// with it, so re-saving an untouched set makes no network call.
pub struct HydrateSelection {
    gateway: Arc<dyn SelectionGatewayPort>,
    sync: Arc<SyncEngine>,
}

impl HydrateSelection {
    pub fn new(gateway: Arc<dyn SelectionGatewayPort>, sync: Arc<SyncEngine>) -> Self {
        Self { gateway, sync }
    }

    /// Fresh store for `category`, filled from the gateway.
    pub async fn load(&self, category: SelectionCategory) -> Result<SelectionSet, GatewayError> {
        let mut set = SelectionSet::new(category);
        self.execute(&mut set).await?;
        Ok(set)
    }

    /// Overwrite `set` with server state unless the user already edited it.
    ///
    /// Returns whether the set was replaced.
    pub async fn execute(&self, set: &mut SelectionSet) -> Result<bool, GatewayError> {
        let category = set.category();
        let span = info_span!("usecase.selection.hydrate", category = %category);
        async {
            if set.has_local_edits() {
                debug!("local edits present, keeping them");
                return Ok(false);
            }

            let saved = self.gateway.fetch(category).await?;
            set.replace(&saved);
            self.sync.seed_persisted(category, set.selected());
            debug!(count = set.len(), "selection hydrated");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}
