//! Channel-backed surface for the TUI
//!
//! Sync client operations run on their own tokio tasks. Everything they want
//! shown is forwarded to the event loop as a [`UiEvent`]; confirmations wait
//! on a oneshot reply from the loop.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use snipe_core::{Row, Surface};

/// Events emitted towards the TUI event loop
#[derive(Debug)]
pub enum UiEvent {
    /// Fresh table contents
    Tasks { rows: Vec<Row>, total: usize },
    /// The task list could not be loaded
    LoadFailed(Vec<Row>),
    /// Modal notification
    Alert(String),
    /// Modal yes/no question
    Confirm {
        prompt: String,
        reply: oneshot::Sender<bool>,
    },
    /// Add control disabled (true) or re-enabled (false)
    AddBusy(bool),
    /// Course-name input should be emptied
    ClearInput,
}

/// [`Surface`] that forwards to the event loop
pub struct ChannelSurface {
    tx: mpsc::UnboundedSender<UiEvent>,
}

/// Create a surface and the receiver the event loop drains
pub fn channel() -> (ChannelSurface, mpsc::UnboundedReceiver<UiEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSurface { tx }, rx)
}

impl ChannelSurface {
    fn emit(&self, event: UiEvent) {
        // Receiver only goes away on shutdown
        let _ = self.tx.send(event);
    }
}

#[async_trait]
impl Surface for ChannelSurface {
    fn show_tasks(&self, rows: Vec<Row>, total: usize) {
        self.emit(UiEvent::Tasks { rows, total });
    }

    fn show_load_error(&self, rows: Vec<Row>) {
        self.emit(UiEvent::LoadFailed(rows));
    }

    fn alert(&self, message: &str) {
        self.emit(UiEvent::Alert(message.to_string()));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let event = UiEvent::Confirm {
            prompt: prompt.to_string(),
            reply,
        };
        if self.tx.send(event).is_err() {
            return false;
        }
        // A dropped reply (e.g. the app quit) counts as "no"
        answer.await.unwrap_or(false)
    }

    fn set_add_busy(&self, busy: bool) {
        self.emit(UiEvent::AddBusy(busy));
    }

    fn clear_course_input(&self) {
        self.emit(UiEvent::ClearInput);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_are_forwarded_in_order() {
        let (surface, mut rx) = channel();

        surface.set_add_busy(true);
        surface.alert("hello");
        surface.set_add_busy(false);
        surface.clear_course_input();

        assert!(matches!(rx.recv().await, Some(UiEvent::AddBusy(true))));
        assert!(matches!(rx.recv().await, Some(UiEvent::Alert(m)) if m == "hello"));
        assert!(matches!(rx.recv().await, Some(UiEvent::AddBusy(false))));
        assert!(matches!(rx.recv().await, Some(UiEvent::ClearInput)));
    }

    #[tokio::test]
    async fn test_confirm_waits_for_reply() {
        let (surface, mut rx) = channel();

        let question = tokio::spawn(async move { surface.confirm("Delete?").await });

        match rx.recv().await {
            Some(UiEvent::Confirm { prompt, reply }) => {
                assert_eq!(prompt, "Delete?");
                reply.send(true).unwrap();
            }
            other => panic!("expected confirm, got {:?}", other),
        }
        assert!(question.await.unwrap());
    }

    #[tokio::test]
    async fn test_confirm_dropped_reply_is_no() {
        let (surface, mut rx) = channel();

        let question = tokio::spawn(async move { surface.confirm("Delete?").await });

        drop(rx.recv().await);
        assert!(!question.await.unwrap());
    }

    #[tokio::test]
    async fn test_confirm_without_receiver_is_no() {
        let (surface, rx) = channel();
        drop(rx);
        assert!(!surface.confirm("Delete?").await);
    }
}
