//! The uniform environment surface.
use crate::record::Record;
use crate::space::Space;
use crate::tensor::TensorBatch;
use anyhow::Result;

/// Result of a single interaction step, in canonical batched form.
pub struct Step {
    /// Observation, `(num_envs, feature_dim)`.
    pub obs: TensorBatch,
    /// Reward, `(num_envs, 1)`.
    pub reward: TensorBatch,
    /// Done flags, `(num_envs, 1)`.
    pub done: TensorBatch,
    /// Backend-supplied auxiliary information.
    pub info: Record,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(obs: TensorBatch, reward: TensorBatch, done: TensorBatch, info: Record) -> Self {
        Step {
            obs,
            reward,
            done,
            info,
        }
    }
}

/// Uniform surface a wrapped environment exposes to the training loop.
///
/// All operations execute to completion on the calling thread; none suspend
/// or block on I/O. Errors are fatal configuration errors, never transient
/// faults.
pub trait Env {
    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<TensorBatch>;

    /// Performs one environment step.
    fn step(&mut self, act: &TensorBatch) -> Result<Step>;

    /// Renders the current state, if the backend supports it.
    fn render(&mut self) {}

    /// Number of parallel environment instances behind the handle.
    fn num_envs(&self) -> usize {
        1
    }

    /// Observation space.
    fn observation_space(&self) -> Space;

    /// Privileged state space; falls back to the observation space.
    fn state_space(&self) -> Space {
        self.observation_space()
    }

    /// Action space.
    fn action_space(&self) -> Space;
}
