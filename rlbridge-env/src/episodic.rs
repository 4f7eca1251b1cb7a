//! Wrapper of episodic timestep backends.
use crate::backend::EpisodicBackend;
use anyhow::Result;
use log::trace;
use ndarray::Array2;
use rlbridge_core::{decode, encode, Env, RawSpec, Record, Space, Step, TensorBatch, Value};
use std::convert::TryFrom;

/// Wrapper of an episodic backend.
///
/// Observations are flattened recursively against the backend's observation
/// spec; actions are decoded against the live action spec on every step.
/// The timestep's last flag is the done signal and `info` is always empty.
/// Rewards keep their native f64 precision.
pub struct EpisodicEnv {
    env: Box<dyn EpisodicBackend>,
    observation_space: Space,
    action_space: Space,
}

impl EpisodicEnv {
    /// Wraps the given backend, deriving canonical spaces from its specs.
    pub fn new(env: Box<dyn EpisodicBackend>) -> Result<Self> {
        let observation_space = Space::try_from(&env.observation_spec())?;
        let action_space = Space::try_from(&env.action_spec())?;
        Ok(Self {
            env,
            observation_space,
            action_space,
        })
    }

    /// Encodes an observation against a spec, defaulting to the backend's
    /// live observation spec when none is supplied.
    pub fn observation_to_batch(
        &self,
        obs: &Value,
        spec: Option<&RawSpec>,
    ) -> Result<TensorBatch> {
        let live;
        let spec = match spec {
            Some(s) => s,
            None => {
                live = self.env.observation_spec();
                &live
            }
        };
        let space = Space::try_from(spec)?;
        Ok(encode(obs, &space, self.env.num_envs())?)
    }
}

impl Env for EpisodicEnv {
    fn reset(&mut self) -> Result<TensorBatch> {
        trace!("EpisodicEnv::reset()");
        let ts = self.env.reset();
        self.observation_to_batch(&ts.observation, None)
    }

    fn step(&mut self, act: &TensorBatch) -> Result<Step> {
        trace!("EpisodicEnv::step()");
        // decoded against the live spec, not the space cached at construction
        let space = Space::try_from(&self.env.action_spec())?;
        let a = decode(act, &space)?;
        let ts = self.env.step(&a);

        let num_envs = self.env.num_envs();
        let obs = self.observation_to_batch(&ts.observation, None)?;
        let reward = TensorBatch::F64(Array2::from_elem((num_envs, 1), ts.reward));
        let done = TensorBatch::Bool(Array2::from_elem((num_envs, 1), ts.last()));
        Ok(Step::new(obs, reward, done, Record::empty()))
    }

    fn render(&mut self) {
        self.env.render();
    }

    fn num_envs(&self) -> usize {
        self.env.num_envs()
    }

    fn observation_space(&self) -> Space {
        self.observation_space.clone()
    }

    fn action_space(&self) -> Space {
        self.action_space.clone()
    }
}
