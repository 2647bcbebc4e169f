//! Browser-tab implementation of the session controller's collaborators.

use formkit_core::page::{compose_page, PageContext};
use formkit_core::{Notifier, SessionId, Surface};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tokio::sync::broadcast;

const NONCE_LEN: usize = 32;

/// Pushed to connected browsers over `/api/events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// A new form replaced whatever was shown.
    Updated { session: SessionId },
    /// The session ended; the tab should stop accepting input.
    Closed,
    Notice { level: NoticeLevel, message: String },
}

impl SurfaceEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceEvent::Updated { .. } => "updated",
            SurfaceEvent::Closed => "closed",
            SurfaceEvent::Notice { .. } => "notice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// The page currently on display.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub session: SessionId,
    pub title: String,
    pub markup: String,
    pub html: String,
}

pub struct HttpSurface {
    template: String,
    page: Option<RenderedPage>,
    events: broadcast::Sender<SurfaceEvent>,
}

impl HttpSurface {
    /// Fails when `template` has no `<div id="app">` anchor.
    pub fn new(
        template: String,
        events: broadcast::Sender<SurfaceEvent>,
    ) -> formkit_core::Result<Self> {
        let blank = PageContext {
            nonce: "",
            session: "",
            title: "",
        };
        compose_page(&template, &blank, "")?;
        Ok(Self {
            template,
            page: None,
            events,
        })
    }

    pub fn page(&self) -> Option<&RenderedPage> {
        self.page.as_ref()
    }

    fn publish(&self, event: SurfaceEvent) {
        // No subscribers is the normal state before a browser connects.
        let _ = self.events.send(event);
    }
}

impl Surface for HttpSurface {
    fn show(&mut self, session: SessionId, title: &str, markup: &str) {
        let nonce = generate_nonce();
        let session_str = session.to_string();
        let ctx = PageContext {
            nonce: &nonce,
            session: &session_str,
            title,
        };
        let html = match compose_page(&self.template, &ctx, markup) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(error = %e, "page template rejected; serving bare markup");
                markup.to_string()
            }
        };
        self.page = Some(RenderedPage {
            session,
            title: title.to_string(),
            markup: markup.to_string(),
            html,
        });
        self.publish(SurfaceEvent::Updated { session });
    }

    fn release(&mut self) {
        if self.page.take().is_some() {
            self.publish(SurfaceEvent::Closed);
        }
    }
}

/// Logs every notice and forwards it to the browser.
#[derive(Clone)]
pub struct SurfaceNotifier {
    events: broadcast::Sender<SurfaceEvent>,
}

impl SurfaceNotifier {
    pub fn new(events: broadcast::Sender<SurfaceEvent>) -> Self {
        Self { events }
    }

    fn publish(&self, level: NoticeLevel, message: &str) {
        let _ = self.events.send(SurfaceEvent::Notice {
            level,
            message: message.to_string(),
        });
    }
}

impl Notifier for SurfaceNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
        self.publish(NoticeLevel::Info, message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
        self.publish(NoticeLevel::Error, message);
    }
}

/// 32 random alphanumeric characters for the page's Content-Security-Policy.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}
