/// Which half of the debounce the detector is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Settled on `confirmed_index`, watching for the index to move.
    AwaitingChange,
    /// Index moved to `candidate_index`, waiting for motion to stop there.
    AwaitingStability,
}

#[derive(Debug, Clone)]
struct TransitionState {
    phase: Phase,
    confirmed_index: usize,
    candidate_index: usize,
    stable_streak: u32,
    last_offset: f64,
}

/// Debounced slide-transition detector fed with one offset sample per frame.
///
/// Owned by the sampling loop only.
#[derive(Debug, Clone)]
pub struct TransitionDetector {
    stable_frames: u32,
    velocity_eps: f64,
    slide_width: f64,
    state: TransitionState,
}

/// Discrete slot for an offset: `round(|offset| / width)`.
pub fn slide_index(offset: f64, slide_width: f64) -> usize {
    let offset = if offset.is_finite() { offset.abs() } else { 0.0 };
    let width = if slide_width.is_finite() && slide_width > 0.0 {
        slide_width
    } else {
        1.0
    };
    (offset / width).round() as usize
}

impl TransitionDetector {
    pub fn new(stable_frames: u32, velocity_eps: f64, slide_width: f64, initial_offset: f64) -> Self {
        let index = slide_index(initial_offset, slide_width);
        Self {
            stable_frames: stable_frames.max(1),
            velocity_eps,
            slide_width,
            state: TransitionState {
                phase: Phase::AwaitingChange,
                confirmed_index: index,
                candidate_index: index,
                stable_streak: 0,
                last_offset: initial_offset,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn confirmed_index(&self) -> usize {
        self.state.confirmed_index
    }

    pub fn candidate_index(&self) -> usize {
        self.state.candidate_index
    }

    pub fn stable_streak(&self) -> u32 {
        self.state.stable_streak
    }

    /// Feed one frame's offset. Returns the newly confirmed index, if any.
    pub fn observe(&mut self, offset: f64) -> Option<usize> {
        let index = slide_index(offset, self.slide_width);
        let velocity = (offset - self.state.last_offset).abs();
        self.state.last_offset = offset;

        let state = &mut self.state;
        match state.phase {
            Phase::AwaitingChange => {
                if index != state.confirmed_index {
                    state.phase = Phase::AwaitingStability;
                    state.candidate_index = index;
                    state.stable_streak = 0;
                }
                None
            }
            Phase::AwaitingStability => {
                if index != state.candidate_index {
                    // Overshoot or bounce: chase the new slot from scratch.
                    state.candidate_index = index;
                    state.stable_streak = 0;
                    return None;
                }
                // NaN velocity is never at rest.
                let at_rest = velocity <= self.velocity_eps;
                if !at_rest {
                    state.stable_streak = 0;
                    return None;
                }

                state.stable_streak += 1;
                if state.stable_streak < self.stable_frames {
                    return None;
                }

                state.confirmed_index = state.candidate_index;
                state.phase = Phase::AwaitingChange;
                state.stable_streak = 0;
                Some(state.confirmed_index)
            }
        }
    }
}
