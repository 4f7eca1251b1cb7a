//! Native backend contracts, one per supported simulation family.
//!
//! A backend is the externally supplied simulation being wrapped. The
//! wrappers in this crate hold a backend by value and never manage its
//! lifecycle beyond caching the first observation where the family calls
//! for it.
use rlbridge_core::{RawSpec, Record, Space, TensorBatch, Value};

/// Accelerator API generation, declared by the adapter at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcceleratorApi {
    /// Raw observation buffers.
    Preview2,
    /// Structured observation map with an `"obs"` entry.
    Preview3,
}

/// Output of one accelerator step, as the backend produces it.
pub struct AccelOutput {
    /// Observation buffer, already batched.
    pub obs: Value,
    /// Per-environment rewards.
    pub reward: Vec<f32>,
    /// Per-environment reset flags (non-zero means done).
    pub is_done: Vec<i8>,
    /// Auxiliary information.
    pub info: Record,
}

/// Batched simulation running many environments in lockstep on a device.
///
/// These backends reset individual environments automatically as episodes
/// end; the global `reset` is meaningful only once, at the start of the
/// run. Observation and action spaces are already canonical.
pub trait AcceleratorBackend {
    /// Resets all environments and returns the initial observation buffer.
    fn reset(&mut self) -> Value;

    /// Advances all environments by one step.
    fn step(&mut self, act: &TensorBatch) -> AccelOutput;

    /// Number of environments run in lockstep.
    fn num_envs(&self) -> usize;

    /// Observation space.
    fn observation_space(&self) -> Space;

    /// Privileged state space, if distinct from the observation space.
    fn state_space(&self) -> Option<Space> {
        None
    }

    /// Action space.
    fn action_space(&self) -> Space;

    /// API generation declared by the adapter.
    fn generation(&self) -> AcceleratorApi {
        AcceleratorApi::Preview3
    }
}

/// Single-instance simulation with scalar step conventions.
///
/// Observations and actions cross the boundary as plain scalars or arrays;
/// rewards are native floats and done is a plain flag.
pub trait GenericBackend {
    /// Resets the simulation and returns the initial observation.
    fn reset(&mut self) -> Value;

    /// Advances the simulation by one step.
    ///
    /// Returns the observation, the reward, the done flag and auxiliary
    /// information.
    fn step(&mut self, act: &Value) -> (Value, f64, bool, Record);

    /// Renders the current state.
    fn render(&mut self) {}

    /// Observation space.
    fn observation_space(&self) -> Space;

    /// Action space.
    fn action_space(&self) -> Space;
}

/// Position of a timestep within an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepType {
    /// First step of an episode.
    First,
    /// Any step between the first and the last.
    Mid,
    /// Final step of an episode.
    Last,
}

/// One transition emitted by an episodic backend.
#[derive(Clone, Debug)]
pub struct TimeStep {
    /// Position within the episode.
    pub step_type: StepType,
    /// Native reward.
    pub reward: f64,
    /// Observation matching the backend's observation spec.
    pub observation: Value,
}

impl TimeStep {
    /// Timestep opening an episode.
    pub fn restart(observation: Value) -> Self {
        Self {
            step_type: StepType::First,
            reward: 0.0,
            observation,
        }
    }

    /// Intermediate timestep.
    pub fn transition(reward: f64, observation: Value) -> Self {
        Self {
            step_type: StepType::Mid,
            reward,
            observation,
        }
    }

    /// Timestep closing an episode.
    pub fn termination(reward: f64, observation: Value) -> Self {
        Self {
            step_type: StepType::Last,
            reward,
            observation,
        }
    }

    /// Whether this timestep closes the episode.
    pub fn last(&self) -> bool {
        self.step_type == StepType::Last
    }
}

/// Episodic timestep protocol with explicit spec objects.
pub trait EpisodicBackend {
    /// Starts a new episode.
    fn reset(&mut self) -> TimeStep;

    /// Advances the episode by one step.
    fn step(&mut self, act: &Value) -> TimeStep;

    /// Native observation spec. May be queried on every conversion.
    fn observation_spec(&self) -> RawSpec;

    /// Native action spec. May be queried on every conversion.
    fn action_spec(&self) -> RawSpec;

    /// Renders the current state.
    fn render(&mut self) {}

    /// Number of environment instances behind the handle.
    fn num_envs(&self) -> usize {
        1
    }
}
