//! The render + animate step of a host.
//!
//! A transition receives the target snapshot once per frame and returns what
//! is displayed right now. Returning the target means the frame is settled.

use crate::snapshot::NavSnapshot;

pub trait NavTransition<T, S, H> {
    fn transition(&mut self, target: &NavSnapshot<T, S, H>) -> NavSnapshot<T, S, H>;
}

impl<T, S, H, F> NavTransition<T, S, H> for F
where
    F: FnMut(&NavSnapshot<T, S, H>) -> NavSnapshot<T, S, H>,
{
    fn transition(&mut self, target: &NavSnapshot<T, S, H>) -> NavSnapshot<T, S, H> {
        self(target)
    }
}

/// Displays the target immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantTransition;

impl<T, S, H> NavTransition<T, S, H> for InstantTransition {
    fn transition(&mut self, target: &NavSnapshot<T, S, H>) -> NavSnapshot<T, S, H> {
        target.clone()
    }
}

/// Keeps showing the previously settled snapshot for `frames` frames after
/// the target changes, then settles on it.
///
/// A target that changes again mid-transition restarts the count towards the
/// newest target. The first frame is always settled.
pub struct FrameTransition<T, S, H> {
    frames: usize,
    displayed: Option<NavSnapshot<T, S, H>>,
    pending: Option<(NavSnapshot<T, S, H>, usize)>,
}

impl<T, S, H> FrameTransition<T, S, H> {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            displayed: None,
            pending: None,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn set_frames(&mut self, frames: usize) {
        self.frames = frames;
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Skips whatever is left of the running transition on the next frame.
    pub fn finish_now(&mut self) {
        if let Some((_, remaining)) = self.pending.as_mut() {
            *remaining = 0;
        }
    }
}

impl<T, S, H> FrameTransition<T, S, H> {
    fn settle(&mut self, target: &NavSnapshot<T, S, H>) -> NavSnapshot<T, S, H> {
        self.pending = None;
        self.displayed = Some(target.clone());
        target.clone()
    }
}

impl<T, S, H> NavTransition<T, S, H> for FrameTransition<T, S, H> {
    fn transition(&mut self, target: &NavSnapshot<T, S, H>) -> NavSnapshot<T, S, H> {
        let displayed = match self.displayed.as_ref() {
            Some(displayed) if displayed != target => displayed.clone(),
            _ => return self.settle(target),
        };

        let restart = self
            .pending
            .as_ref()
            .map_or(true, |(pending, _)| pending != target);
        if restart {
            self.pending = Some((target.clone(), self.frames));
        }

        match self.pending.as_mut() {
            Some((_, remaining)) if *remaining > 0 => {
                *remaining -= 1;
                displayed
            }
            _ => self.settle(target),
        }
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
