// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_view::ViewContext;
use kurbo::Rect;

use crate::operation::Operation;

/// Result of one [`Animator::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick<T> {
    /// No operation is live.
    Idle,
    /// The live operation moved the view and needs more frames.
    Running,
    /// The live operation reached its end this frame.
    ///
    /// Carries the operation's completion token, if it had one.
    Finished(Option<T>),
}

/// Owner of the single live [`Operation`].
///
/// Assigning a new operation follows a priority rule: it replaces the live
/// one only when that one is finished or the new priority is greater than or
/// equal to the live priority. Equal priorities preempt, so a fresh settle
/// interrupts an in-flight settle, while a settle never interrupts a
/// higher-priority user zoom.
#[derive(Clone, Debug)]
pub struct Animator<T = ()> {
    current: Option<Operation<T>>,
}

impl<T> Default for Animator<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> Animator<T> {
    /// Creates an idle animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a new operation, returning `true` if it became the live one.
    pub fn set(&mut self, op: Operation<T>) -> bool {
        if let Some(current) = &self.current {
            if !current.is_finished() && op.priority() < current.priority() {
                log::trace!(
                    "operation with priority {} rejected by live priority {}",
                    op.priority(),
                    current.priority()
                );
                return false;
            }
        }
        self.current = Some(op);
        true
    }

    /// Drops the live operation. Calling this while idle is a no-op.
    pub fn abort(&mut self) {
        self.current = None;
    }

    /// Returns `true` while an unfinished operation is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(|op| !op.is_finished())
    }

    /// Returns the live operation.
    #[must_use]
    pub fn current(&self) -> Option<&Operation<T>> {
        self.current.as_ref()
    }

    /// Advances the live operation to time `now`.
    ///
    /// A finished operation is dropped and its completion token returned.
    pub fn tick(&mut self, view: &mut ViewContext, bounds: Option<Rect>, now: u64) -> Tick<T> {
        let Some(op) = self.current.as_mut() else {
            return Tick::Idle;
        };
        if !op.step(view, bounds, now) {
            return Tick::Running;
        }
        let token = op.take_completion();
        self.current = None;
        Tick::Finished(token)
    }
}
