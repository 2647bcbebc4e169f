//! Single-slot form session controller.
//!
//! A [`FormSession`] owns at most one active session: a rendered
//! [`FormDefinition`] plus the callbacks registered for it. The active session
//! is one owned value in an `Option`; every path that resolves it (submit
//! message, cancel message, external [`FormSession::dispose`]) moves it out of
//! the slot with `Option::take` before running a callback, and the callbacks
//! themselves are `FnOnce`. That is what makes "exactly one of submit/cancel
//! fires" hold: there is nothing left to fire the second time.
//!
//! Starting a new session while one is active pre-empts it. The previous
//! session is dropped without notifying its callbacks.
//!
//! The controller is driven through `&mut self` only. Hosts that deliver
//! messages from several threads must put it behind a mutex.

use crate::form::FormDefinition;
use crate::message::{FormData, FormMessage};
use crate::render::render_form;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type SubmitCallback = Box<dyn FnOnce(&FormData) -> anyhow::Result<()> + Send>;
pub type CancelCallback = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// A host rendering target that can display form markup and relay messages
/// back to the controller.
pub trait Surface {
    /// Display `markup` for `session`, replacing whatever was shown before.
    fn show(&mut self, session: SessionId, title: &str, markup: &str);

    /// Close the surface. Must tolerate being called more than once.
    fn release(&mut self);
}

/// Operator-facing success/failure banners.
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

// ---------------------------------------------------------------------------
// Session identity and results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Submitted { data: FormData },
    /// A submit callback returned an error. The session is still over.
    SubmitFailed { error: String },
    Cancelled,
}

/// What happened to an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The message ended the active session.
    Resolved(Outcome),
    /// Informational message (`ready`, `stepChanged`); no state change.
    Acknowledged,
    /// No active session, or the message was addressed to a pre-empted one.
    Ignored,
}

// ---------------------------------------------------------------------------
// FormSession
// ---------------------------------------------------------------------------

struct ActiveSession {
    id: SessionId,
    definition: FormDefinition,
    on_submit: Option<SubmitCallback>,
    on_cancel: Option<CancelCallback>,
}

pub struct FormSession<S, N> {
    surface: S,
    notifier: N,
    active: Option<ActiveSession>,
}

impl<S: Surface, N: Notifier> FormSession<S, N> {
    pub fn new(surface: S, notifier: N) -> Self {
        Self {
            surface,
            notifier,
            active: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|s| s.id)
    }

    pub fn active_definition(&self) -> Option<&FormDefinition> {
        self.active.as_ref().map(|s| &s.definition)
    }

    /// Render `definition` and make it the active session.
    ///
    /// Any session that was active is dropped here; its callbacks never run.
    pub fn start(
        &mut self,
        definition: FormDefinition,
        on_submit: Option<SubmitCallback>,
        on_cancel: Option<CancelCallback>,
    ) -> SessionId {
        let id = SessionId::new();
        let markup = render_form(&definition);
        self.surface.show(id, definition.title(), &markup);

        let next = ActiveSession {
            id,
            definition,
            on_submit,
            on_cancel,
        };
        if let Some(previous) = self.active.replace(next) {
            tracing::debug!(
                previous = %previous.id,
                next = %id,
                form = previous.definition.id(),
                "form session pre-empted"
            );
        }
        tracing::info!(session = %id, "form session started");
        id
    }

    /// Deliver a message to whichever session is active.
    pub fn receive(&mut self, message: FormMessage) -> Delivery {
        match message {
            FormMessage::FormSubmit { data } => match self.active.take() {
                Some(session) => Delivery::Resolved(self.submit(session, data)),
                None => Delivery::Ignored,
            },
            FormMessage::FormCancel => match self.active.take() {
                Some(session) => Delivery::Resolved(self.cancel(session)),
                None => Delivery::Ignored,
            },
            FormMessage::StepChanged { step } => {
                if self.active.is_none() {
                    return Delivery::Ignored;
                }
                tracing::debug!(step, "form step changed");
                Delivery::Acknowledged
            }
            FormMessage::Ready => {
                if self.active.is_none() {
                    return Delivery::Ignored;
                }
                tracing::debug!("form surface ready");
                Delivery::Acknowledged
            }
        }
    }

    /// Deliver a message that names the session it belongs to. Messages for a
    /// session that is no longer active are dropped.
    pub fn receive_from(&mut self, session: SessionId, message: FormMessage) -> Delivery {
        if self.active_id() != Some(session) {
            tracing::debug!(%session, kind = message.kind(), "message for inactive session ignored");
            return Delivery::Ignored;
        }
        self.receive(message)
    }

    /// The surface was closed by other means. Resolves an unresolved session
    /// as cancelled; a no-op otherwise.
    pub fn dispose(&mut self) -> Option<Outcome> {
        let session = self.active.take()?;
        Some(self.cancel(session))
    }

    fn submit(&mut self, session: ActiveSession, data: FormData) -> Outcome {
        let ActiveSession {
            id,
            definition,
            on_submit,
            on_cancel: _,
        } = session;

        let mut result = match on_submit {
            Some(callback) => callback(&data),
            None => Ok(()),
        };
        if result.is_ok() {
            if let Some(hook) = definition.on_submit() {
                result = hook(&data);
            }
        }

        let outcome = match result {
            Ok(()) => {
                tracing::info!(session = %id, form = definition.id(), "form submitted");
                self.notifier.info("Form submitted successfully!");
                Outcome::Submitted { data }
            }
            Err(e) => {
                tracing::error!(session = %id, error = %e, "form submit callback failed");
                self.notifier.error(&format!("Form submission failed: {e:#}"));
                Outcome::SubmitFailed {
                    error: format!("{e:#}"),
                }
            }
        };
        self.surface.release();
        outcome
    }

    fn cancel(&mut self, session: ActiveSession) -> Outcome {
        tracing::info!(session = %session.id, form = session.definition.id(), "form cancelled");
        if let Some(callback) = session.on_cancel {
            if let Err(e) = callback() {
                tracing::error!(session = %session.id, error = %e, "form cancel callback failed");
                self.notifier.error(&format!("Form cancel handler failed: {e:#}"));
            }
        }
        self.surface.release();
        Outcome::Cancelled
    }
}
