//! Application event definitions

use robot_protocol::StatusMessage;
use tokio::sync::mpsc;

/// Wrapper around `mpsc::UnboundedSender<AppEvent>` that also asks the egui
/// context for a repaint after every send, so the window wakes up for
/// background events even while idle.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<AppEvent>,
    repaint: Option<egui::Context>,
}

impl EventSender {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx, repaint: None }
    }

    /// Attach the egui context to wake on each event
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn send(&self, event: AppEvent) -> Result<(), mpsc::error::SendError<AppEvent>> {
        let result = self.tx.send(event);
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        result
    }
}

/// Events produced by the transport for the panel
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Robot connection established
    Connected,

    /// Robot connection lost
    Disconnected,

    /// Status report received from the robot
    Status(StatusMessage),
}
