use std::sync::Arc;

use formkit_core::{FormSession, Outcome};
use tokio::sync::{broadcast, Mutex};

use crate::embed;
use crate::surface::{HttpSurface, SurfaceEvent, SurfaceNotifier};

pub type Controller = FormSession<HttpSurface, SurfaceNotifier>;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Every inbound message goes through this one lock.
    pub session: Arc<Mutex<Controller>>,
    pub event_tx: broadcast::Sender<SurfaceEvent>,
    pub outcome_tx: broadcast::Sender<Outcome>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_template(embed::page_template()?)
    }

    pub fn with_template(template: String) -> anyhow::Result<Self> {
        let (event_tx, _) = broadcast::channel(64);
        let (outcome_tx, _) = broadcast::channel(8);
        let surface = HttpSurface::new(template, event_tx.clone())?;
        let notifier = SurfaceNotifier::new(event_tx.clone());
        Ok(Self {
            session: Arc::new(Mutex::new(FormSession::new(surface, notifier))),
            event_tx,
            outcome_tx,
        })
    }

    /// Hand a resolved session's outcome to whoever is waiting on it.
    pub fn publish_outcome(&self, outcome: Outcome) {
        let _ = self.outcome_tx.send(outcome);
    }
}
