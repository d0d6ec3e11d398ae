//! Arithmetic progression with the sequencer's cap and reset rules.

use crate::limit::{Phase, StepLimit};

/// Inputs of [`NumberCounter::count`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountRequest {
    pub start_value: f64,
    /// Increment per emission; may be negative or fractional.
    pub step: f64,
    pub max_steps: i64,
    pub auto_reset: bool,
    pub reset: bool,
}

impl Default for CountRequest {
    fn default() -> Self {
        Self {
            start_value: 0.0,
            step: 1.0,
            max_steps: -1,
            auto_reset: false,
            reset: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountOutput {
    pub value: f64,
    pub step_index: u64,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CounterConfig {
    start_value: f64,
    step: f64,
    max_steps: i64,
    auto_reset: bool,
}

impl CounterConfig {
    fn of(request: &CountRequest) -> Self {
        Self {
            start_value: request.start_value,
            step: request.step,
            max_steps: request.max_steps,
            auto_reset: request.auto_reset,
        }
    }

    fn limit(&self) -> StepLimit {
        StepLimit::from_max_steps(self.max_steps)
    }
}

#[derive(Debug, Clone, Copy)]
struct CounterState {
    config: CounterConfig,
    next_value: f64,
    last_value: f64,
    emitted_steps: u64,
}

impl CounterState {
    fn fresh(config: CounterConfig) -> Self {
        Self {
            config,
            next_value: config.start_value,
            last_value: config.start_value,
            emitted_steps: 0,
        }
    }
}

/// Stateful counter owned by one host node.
#[derive(Debug, Default)]
pub struct NumberCounter {
    state: Option<CounterState>,
}

impl NumberCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the next value of the progression.
    ///
    /// Once the cap is reached without auto-reset, every call returns
    /// `(last_value, emitted_steps, true)`.
    pub fn count(&mut self, request: &CountRequest) -> CountOutput {
        let config = CounterConfig::of(request);
        if request.reset || self.state.as_ref().is_none_or(|s| s.config != config) {
            tracing::debug!(start = config.start_value, step = config.step, "resetting counter");
            self.state = None;
        }
        let state = self
            .state
            .get_or_insert_with(|| CounterState::fresh(config));

        let limit = config.limit();
        if limit.is_reached(state.emitted_steps) {
            if !config.auto_reset {
                return CountOutput {
                    value: state.last_value,
                    step_index: state.emitted_steps,
                    done: true,
                };
            }
            *state = CounterState::fresh(config);
        }

        let value = state.next_value;
        state.last_value = value;
        state.emitted_steps += 1;
        state.next_value = value + config.step;

        CountOutput {
            value,
            step_index: state.emitted_steps,
            done: limit.is_reached(state.emitted_steps),
        }
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::Uninitialized,
            Some(state) => state.config.limit().phase(state.emitted_steps),
        }
    }
}
