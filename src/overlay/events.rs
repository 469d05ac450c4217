use std::sync::mpsc::{self, Receiver, Sender};

use log::trace;

/// Topic the overlay publishes joystick tracking on
pub const JOYSTICK_TOPIC: &str = "joystick";

/// Broadcast channel for one named topic
///
/// Every subscriber gets its own receiver and sees each event published after
/// it subscribed. Receivers that were dropped are pruned on the next publish.
pub struct EventChannel<T: Clone> {
    topic: String,
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> EventChannel<T> {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            subscribers: Vec::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn subscribe(&mut self) -> Receiver<T> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Sends `event` to every live subscriber, returning how many received it
    pub fn publish(&mut self, event: T) -> usize {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        trace!(
            "Published on '{}' to {} subscribers",
            self.topic,
            self.subscribers.len()
        );
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let mut channel = EventChannel::new(JOYSTICK_TOPIC);
        let first = channel.subscribe();
        let second = channel.subscribe();

        assert_eq!(channel.publish(7u32), 2);
        assert_eq!(first.try_recv().unwrap(), 7);
        assert_eq!(second.try_recv().unwrap(), 7);
        assert_eq!(channel.topic(), "joystick");
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut channel = EventChannel::new("test");
        let kept = channel.subscribe();
        drop(channel.subscribe());

        assert_eq!(channel.publish("hello"), 1);
        assert_eq!(channel.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut channel: EventChannel<u8> = EventChannel::new("empty");
        assert_eq!(channel.publish(1), 0);
    }
}
