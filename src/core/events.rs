//! Core domain: the synchronous event sink shared by gameplay components.

use bevy::ecs::message::{Message, MessageWriter};

/// Destination for notifications raised while a gameplay call runs.
///
/// Events are handed over inside the call that produced them, in the order
/// they happened. Nothing is deferred to a later tick.
pub trait EventSink<E> {
    fn emit(&mut self, event: E);
}

impl<E> EventSink<E> for Vec<E> {
    fn emit(&mut self, event: E) {
        self.push(event);
    }
}

impl<E: Message> EventSink<E> for MessageWriter<'_, E> {
    fn emit(&mut self, event: E) {
        self.write(event);
    }
}

/// Sink that drops everything, for callers that do not observe a channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl<E> EventSink<E> for Discard {
    fn emit(&mut self, _event: E) {}
}
