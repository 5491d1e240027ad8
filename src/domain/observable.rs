// src/domain/observable.rs
use std::rc::Rc;

use crate::bus::EventBus;
use crate::domain::events::AppEvent;

/// Wraps a state value together with the bus it announces changes on.
///
/// `emit_changes` is the single sanctioned path for a state machine to
/// notify observers: apply the mutation, then publish an event built from
/// the post-mutation state. Observers never see a half-applied mutation
/// because dispatch starts only after the closure returns.
pub struct ObservableState<T> {
    value: T,
    events: Rc<EventBus>,
}

impl<T> ObservableState<T> {
    pub fn new(value: T, events: Rc<EventBus>) -> Self {
        ObservableState { value, events }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn events(&self) -> &Rc<EventBus> {
        &self.events
    }

    pub fn emit_changes<A, E>(&mut self, apply: A, event: E)
    where
        A: FnOnce(&mut T),
        E: FnOnce(&T) -> AppEvent,
    {
        apply(&mut self.value);
        let event = event(&self.value);
        self.events.emit(event);
    }

    // Mutation without an announcement; reserved for selector state that the
    // mediators re-render on demand.
    pub(crate) fn apply<A: FnOnce(&mut T)>(&mut self, apply: A) {
        apply(&mut self.value);
    }
}
