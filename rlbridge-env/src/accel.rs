//! Wrappers of accelerator backends.
use crate::backend::AcceleratorBackend;
use anyhow::Result;
use log::trace;
use ndarray::Array1;
use rlbridge_core::{BridgeError, Env, Space, Step, TensorBatch, Value};

/// One-time reset contract of accelerator backends.
///
/// These backends reset environments individually as episodes end, so the
/// global reset transitions this latch exactly once per handle lifetime;
/// it is never cleared.
#[derive(Clone, Debug)]
enum ResetLatch {
    /// The backend's reset has not run yet.
    NotYetReset,
    /// Reset ran; the first observation is served from here ever after.
    Reset(TensorBatch),
}

impl ResetLatch {
    fn observe(&mut self, reset: impl FnOnce() -> Result<TensorBatch>) -> Result<TensorBatch> {
        if let ResetLatch::Reset(obs) = self {
            return Ok(obs.clone());
        }
        let obs = reset()?;
        *self = ResetLatch::Reset(obs.clone());
        Ok(obs)
    }
}

fn obs_to_batch(obs: Value, num_envs: usize) -> Result<TensorBatch, BridgeError> {
    match obs {
        Value::Batch(b) => Ok(b),
        Value::F32(a) => TensorBatch::from_f32_array(a, num_envs),
        Value::F64(a) => TensorBatch::from_f64_array(a, num_envs),
        Value::I64(a) => TensorBatch::from_i64_array(a, num_envs),
        other => Err(BridgeError::UnsupportedSpec(format!(
            "{} observation buffer",
            other.type_name()
        ))),
    }
}

fn unwrap_obs_entry(obs: Value) -> Result<Value, BridgeError> {
    match obs {
        Value::Dict(items) => items
            .into_iter()
            .find(|(k, _)| k == "obs")
            .map(|(_, v)| v)
            .ok_or_else(|| {
                BridgeError::UnsupportedSpec("observation map without an \"obs\" entry".into())
            }),
        other => Err(BridgeError::UnsupportedSpec(format!(
            "{} observation, expected a map",
            other.type_name()
        ))),
    }
}

fn column_f32(v: Vec<f32>, num_envs: usize) -> Result<TensorBatch, BridgeError> {
    if v.len() != num_envs {
        return Err(BridgeError::ShapeMismatch(format!(
            "{} rewards for {} environments",
            v.len(),
            num_envs
        )));
    }
    TensorBatch::from_f32_array(Array1::from(v).into_dyn(), num_envs)
}

/// Wrapper of an accelerator backend returning raw observation buffers.
///
/// The action is forwarded untouched (the backend already speaks batched
/// containers); reward and done come back reshaped to `(num_envs, 1)`.
pub struct AccelEnv2 {
    env: Box<dyn AcceleratorBackend>,
    latch: ResetLatch,
}

impl AccelEnv2 {
    /// Wraps the given backend.
    pub fn new(env: Box<dyn AcceleratorBackend>) -> Self {
        Self {
            env,
            latch: ResetLatch::NotYetReset,
        }
    }
}

impl Env for AccelEnv2 {
    fn reset(&mut self) -> Result<TensorBatch> {
        trace!("AccelEnv2::reset()");
        let env = &mut self.env;
        self.latch.observe(|| {
            let n = env.num_envs();
            Ok(obs_to_batch(env.reset(), n)?)
        })
    }

    fn step(&mut self, act: &TensorBatch) -> Result<Step> {
        trace!("AccelEnv2::step()");
        let num_envs = self.env.num_envs();
        let out = self.env.step(act);
        let obs = obs_to_batch(out.obs, num_envs)?;
        let reward = column_f32(out.reward, num_envs)?;
        let done = TensorBatch::from_flags(out.is_done, num_envs)?;
        Ok(Step::new(obs, reward, done, out.info))
    }

    fn num_envs(&self) -> usize {
        self.env.num_envs()
    }

    fn observation_space(&self) -> Space {
        self.env.observation_space()
    }

    fn state_space(&self) -> Space {
        self.env
            .state_space()
            .unwrap_or_else(|| self.env.observation_space())
    }

    fn action_space(&self) -> Space {
        self.env.action_space()
    }
}

/// Wrapper of an accelerator backend returning a structured observation map.
///
/// Identical to [`AccelEnv2`] except that the backend wraps its observation
/// buffer in a map, of which only the `"obs"` entry is exposed.
pub struct AccelEnv3 {
    env: Box<dyn AcceleratorBackend>,
    latch: ResetLatch,
}

impl AccelEnv3 {
    /// Wraps the given backend.
    pub fn new(env: Box<dyn AcceleratorBackend>) -> Self {
        Self {
            env,
            latch: ResetLatch::NotYetReset,
        }
    }
}

impl Env for AccelEnv3 {
    fn reset(&mut self) -> Result<TensorBatch> {
        trace!("AccelEnv3::reset()");
        let env = &mut self.env;
        self.latch.observe(|| {
            let n = env.num_envs();
            Ok(obs_to_batch(unwrap_obs_entry(env.reset())?, n)?)
        })
    }

    fn step(&mut self, act: &TensorBatch) -> Result<Step> {
        trace!("AccelEnv3::step()");
        let num_envs = self.env.num_envs();
        let out = self.env.step(act);
        let obs = obs_to_batch(unwrap_obs_entry(out.obs)?, num_envs)?;
        let reward = column_f32(out.reward, num_envs)?;
        let done = TensorBatch::from_flags(out.is_done, num_envs)?;
        Ok(Step::new(obs, reward, done, out.info))
    }

    fn num_envs(&self) -> usize {
        self.env.num_envs()
    }

    fn observation_space(&self) -> Space {
        self.env.observation_space()
    }

    fn state_space(&self) -> Space {
        self.env
            .state_space()
            .unwrap_or_else(|| self.env.observation_space())
    }

    fn action_space(&self) -> Space {
        self.env.action_space()
    }
}
