//! The dispatch-to-UI-loop combinator
//!
//! View models emit on whatever thread their fetch completes on. Render state
//! is owned by the UI loop. [`UiHandle`] is the one crossing point: stream
//! subscriptions project emissions into typed messages and post them through
//! a handle; the UI loop drains the channel and applies them.

use std::sync::Arc;

use tokio::sync::mpsc;

/// Cheaply cloneable poster of UI-loop messages.
///
/// In production this wraps the main loop's unbounded sender; in tests any
/// collecting closure works.
pub struct UiHandle<M> {
    post: Arc<dyn Fn(M) + Send + Sync>,
}

impl<M> Clone for UiHandle<M> {
    fn clone(&self) -> Self {
        Self {
            post: Arc::clone(&self.post),
        }
    }
}

impl<M: Send + 'static> UiHandle<M> {
    /// Wrap an arbitrary posting closure.
    pub fn new(post: impl Fn(M) + Send + Sync + 'static) -> Self {
        Self {
            post: Arc::new(post),
        }
    }

    /// Wrap a tokio unbounded sender. A closed channel drops the message
    /// silently; the loop is gone, so there is nothing left to update.
    pub fn from_sender(tx: mpsc::UnboundedSender<M>) -> Self {
        Self::new(move |message| {
            let _ = tx.send(message);
        })
    }

    /// Post a message to the UI loop.
    pub fn post(&self, message: M) {
        (self.post)(message);
    }

    /// Derive a handle for a narrower message type.
    ///
    /// Screens get a `UiHandle<ScreenMsg>` derived from the app-level handle,
    /// typically tagging messages with the screen's identity.
    pub fn map<N: Send + 'static>(
        &self,
        into: impl Fn(N) -> M + Send + Sync + 'static,
    ) -> UiHandle<N> {
        let post = Arc::clone(&self.post);
        UiHandle {
            post: Arc::new(move |message| post(into(message))),
        }
    }
}
