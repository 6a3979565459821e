// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom events dispatched through [`Dom::dispatch_event`](crate::Dom::dispatch_event).

/// A synthetic event carrying an arbitrary `detail` payload.
///
/// Mirrors the browser `CustomEvent`: handlers receive it by exclusive
/// reference, so anything they write into `detail` is visible to the code that
/// fired the event once dispatch returns.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomEvent<T> {
    name: &'static str,
    bubbles: bool,
    cancelable: bool,
    default_prevented: bool,
    /// Event payload.
    pub detail: T,
}

impl<T> CustomEvent<T> {
    /// Creates a bubbling, cancelable event.
    pub fn new(name: &'static str, detail: T) -> Self {
        Self {
            name,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
            detail,
        }
    }

    /// Event type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether the event is cancelable.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Marks the event as canceled. No-op for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Whether a handler canceled the event.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Consumes the event, returning its payload.
    pub fn into_detail(self) -> T {
        self.detail
    }
}
