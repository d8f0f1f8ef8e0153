use cadence_core::UserId;
use std::collections::HashMap;

/// Authentication state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(UserId),
    SignedOut,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type AuthCallback = Box<dyn FnMut(&AuthEvent) + Send>;

/// Auth-state change fan-out with explicit subscription lifecycle.
///
/// Subscribers register a callback and hold the returned id; they must
/// unsubscribe when their owning component goes away, so callbacks never
/// outlive the screen that installed them.
#[derive(Default)]
pub struct AuthWatch {
    next_id: u64,
    subscribers: HashMap<u64, AuthCallback>,
}

impl AuthWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&AuthEvent) + Send + 'static,
    {
        self.next_id += 1;
        self.subscribers.insert(self.next_id, Box::new(callback));
        SubscriptionId(self.next_id)
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id.0).is_some()
    }

    /// Deliver an event to every live subscriber.
    pub fn emit(&mut self, event: AuthEvent) {
        tracing::debug!("Auth event: {:?} → {} subscribers", event, self.subscribers.len());
        for callback in self.subscribers.values_mut() {
            callback(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[test]
    fn test_subscriber_receives_events() {
        let mut watch = AuthWatch::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        watch.subscribe(move |event| sink.lock().unwrap().push(*event));

        let user = Uuid::new_v4();
        watch.emit(AuthEvent::SignedIn(user));
        watch.emit(AuthEvent::SignedOut);

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            [AuthEvent::SignedIn(user), AuthEvent::SignedOut]
        );
    }

    #[test]
    fn test_unsubscribed_callback_is_dropped() {
        let mut watch = AuthWatch::new();
        let seen = Arc::new(Mutex::new(0u32));
        let sink = seen.clone();
        let id = watch.subscribe(move |_| *sink.lock().unwrap() += 1);

        watch.emit(AuthEvent::SignedOut);
        assert!(watch.unsubscribe(id));
        watch.emit(AuthEvent::SignedOut);

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(watch.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_twice_is_harmless() {
        let mut watch = AuthWatch::new();
        let id = watch.subscribe(|_| {});

        assert!(watch.unsubscribe(id));
        assert!(!watch.unsubscribe(id));
    }

    #[test]
    fn test_subscriptions_are_independent() {
        let mut watch = AuthWatch::new();
        let first = Arc::new(Mutex::new(0u32));
        let second = Arc::new(Mutex::new(0u32));
        let a = first.clone();
        let b = second.clone();
        let id = watch.subscribe(move |_| *a.lock().unwrap() += 1);
        watch.subscribe(move |_| *b.lock().unwrap() += 1);

        watch.emit(AuthEvent::SignedOut);
        watch.unsubscribe(id);
        watch.emit(AuthEvent::SignedOut);

        assert_eq!(*first.lock().unwrap(), 1);
        assert_eq!(*second.lock().unwrap(), 2);
    }
}
