//! # UI-Affinity Dispatch
//!
//! Every piece of shell state is owned by one task (the "UI task"). Bridge
//! callbacks arrive on arbitrary threads (network transitions, timer expiry,
//! activity results) and must never touch that state directly; they post a
//! message through a [`UiDispatcher`] instead, and the UI task drains the
//! matching [`UiQueue`] in order.
//!
//! ```rust
//! use core_runtime::dispatch::ui_channel;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (dispatcher, mut queue) = ui_channel::<&'static str>();
//!
//! let remote = dispatcher.clone();
//! std::thread::spawn(move || {
//!     remote.dispatch("network available");
//! });
//!
//! assert_eq!(queue.next().await, Some("network available"));
//! # }
//! ```
//!
//! Once the queue is dropped, `dispatch` returns `false` and the message is
//! discarded. Late callbacks use this as their liveness check.

use std::fmt;
use tokio::sync::mpsc;
use tracing::trace;

/// Cloneable, thread-safe handle for posting messages to the UI task.
pub struct UiDispatcher<M> {
    sender: mpsc::UnboundedSender<M>,
}

impl<M> Clone for UiDispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M: Send + 'static> UiDispatcher<M> {
    /// Posts `message` to the UI task.
    ///
    /// Returns `false` if the UI task has gone away.
    pub fn dispatch(&self, message: M) -> bool {
        match self.sender.send(message) {
            Ok(()) => true,
            Err(_) => {
                trace!("UI queue closed; dropping message");
                false
            }
        }
    }

    /// Whether the UI task is still receiving.
    pub fn is_alive(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Returns a closure that posts `make()` each time it runs.
    ///
    /// Used to adapt bridge callbacks (`Fn() + Send + Sync`) into UI messages.
    pub fn callback<F>(&self, make: F) -> impl Fn() + Send + Sync + 'static
    where
        F: Fn() -> M + Send + Sync + 'static,
    {
        let dispatcher = self.clone();
        move || {
            if !dispatcher.dispatch(make()) {
                trace!("Bridge callback outlived the UI task");
            }
        }
    }
}

impl<M> fmt::Debug for UiDispatcher<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiDispatcher")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// Receiving side drained by the UI task.
pub struct UiQueue<M> {
    receiver: mpsc::UnboundedReceiver<M>,
}

impl<M> UiQueue<M> {
    /// Waits for the next message. `None` once every dispatcher is dropped.
    pub async fn next(&mut self) -> Option<M> {
        self.receiver.recv().await
    }

    /// Returns a buffered message without waiting.
    pub fn try_next(&mut self) -> Option<M> {
        self.receiver.try_recv().ok()
    }

    /// Stops accepting messages; buffered ones can still be drained.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl<M> fmt::Debug for UiQueue<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiQueue").finish_non_exhaustive()
    }
}

/// Creates a connected dispatcher/queue pair.
pub fn ui_channel<M>() -> (UiDispatcher<M>, UiQueue<M>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (UiDispatcher { sender }, UiQueue { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Msg {
        Available,
        Lost,
    }

    #[tokio::test]
    async fn test_messages_arrive_in_order() {
        let (dispatcher, mut queue) = ui_channel();

        assert!(dispatcher.dispatch(Msg::Lost));
        assert!(dispatcher.dispatch(Msg::Available));

        assert_eq!(queue.next().await, Some(Msg::Lost));
        assert_eq!(queue.next().await, Some(Msg::Available));
        assert_eq!(queue.try_next(), None);
    }

    #[tokio::test]
    async fn test_dispatch_from_foreign_thread() {
        let (dispatcher, mut queue) = ui_channel();

        let remote = dispatcher.clone();
        std::thread::spawn(move || remote.dispatch(Msg::Available))
            .join()
            .unwrap();

        assert_eq!(queue.next().await, Some(Msg::Available));
    }

    #[test]
    fn test_dispatch_after_queue_dropped_returns_false() {
        let (dispatcher, queue) = ui_channel();
        assert!(dispatcher.is_alive());

        drop(queue);

        assert!(!dispatcher.is_alive());
        assert!(!dispatcher.dispatch(Msg::Lost));
    }

    #[test]
    fn test_close_keeps_buffered_messages() {
        let (dispatcher, mut queue) = ui_channel();
        dispatcher.dispatch(Msg::Lost);

        queue.close();

        assert!(!dispatcher.dispatch(Msg::Available));
        assert_eq!(queue.try_next(), Some(Msg::Lost));
        assert_eq!(queue.try_next(), None);
    }

    #[test]
    fn test_callback_posts_fresh_message_each_call() {
        let (dispatcher, mut queue) = ui_channel();
        let on_lost = dispatcher.callback(|| Msg::Lost);

        on_lost();
        on_lost();

        assert_eq!(queue.try_next(), Some(Msg::Lost));
        assert_eq!(queue.try_next(), Some(Msg::Lost));

        drop(queue);
        on_lost();
        assert!(!dispatcher.is_alive());
    }

    #[tokio::test]
    async fn test_queue_ends_when_dispatchers_dropped() {
        let (dispatcher, mut queue) = ui_channel::<Msg>();
        drop(dispatcher);
        assert_eq!(queue.next().await, None);
    }
}
