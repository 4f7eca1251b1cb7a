//! Wrapper of single-instance backends with scalar step conventions.
use crate::backend::GenericBackend;
use anyhow::Result;
use log::{info, trace};
use ndarray::{Array1, Array2};
use rlbridge_core::{BridgeError, Env, Space, Step, TensorBatch, Value};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GenericEnv`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenericEnvConfig {
    pub(crate) max_steps: Option<usize>,
}

impl GenericEnvConfig {
    /// Sets the maximum number of steps before the done flag is forced.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of generic wrapper from {}", path_.display());
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(self)?.as_bytes())?;
        info!("Save config of generic wrapper to {}", path_.display());
        Ok(())
    }
}

/// Wrapper of a single-instance backend.
///
/// Actions leave as the backend's native scalars or arrays; observations,
/// rewards and done flags come back re-wrapped into `(1, -1)`-shaped
/// containers. Rewards are always cast to f32.
pub struct GenericEnv {
    env: Box<dyn GenericBackend>,
    max_steps: Option<usize>,
    count_steps: usize,
}

impl GenericEnv {
    /// Wraps the given backend with the default configuration.
    pub fn new(env: Box<dyn GenericBackend>) -> Self {
        Self::with_config(env, GenericEnvConfig::default())
    }

    /// Wraps the given backend.
    pub fn with_config(env: Box<dyn GenericBackend>, config: GenericEnvConfig) -> Self {
        Self {
            env,
            max_steps: config.max_steps,
            count_steps: 0,
        }
    }

    /// Converts an action batch to the backend's native convention.
    ///
    /// Discrete actions become a plain scalar; continuous actions a 1-D
    /// array when the batch has a single row, an N-D array otherwise.
    fn convert_action(&self, act: &TensorBatch) -> Result<Value, BridgeError> {
        match self.env.action_space() {
            Space::Box { .. } => {
                let a = act.to_f32();
                if act.num_envs() == 1 {
                    Ok(Value::F32(Array1::from(a.into_raw_vec()).into_dyn()))
                } else {
                    Ok(Value::F32(a.into_dyn()))
                }
            }
            Space::Discrete { .. } => Ok(Value::Int(act.item_i64()?)),
            space => Err(BridgeError::UnsupportedSpec(format!(
                "{} action space",
                space.type_name()
            ))),
        }
    }
}

fn rewrap_obs(obs: Value) -> Result<TensorBatch, BridgeError> {
    match obs {
        Value::F32(a) => TensorBatch::from_f32_array(a, 1),
        Value::F64(a) => TensorBatch::from_f64_array(a, 1),
        Value::I64(a) => TensorBatch::from_i64_array(a, 1),
        Value::Int(v) => Ok(TensorBatch::I64(Array2::from_elem((1, 1), v))),
        Value::Batch(b) => {
            let len = b.num_envs() * b.feature_dim();
            b.reshaped(1, len)
        }
        Value::Dict(_) => Err(BridgeError::UnsupportedSpec(
            "Dict observation from a generic backend".into(),
        )),
    }
}

fn rewrap_initial_obs(obs: Value) -> Result<TensorBatch, BridgeError> {
    // Arrays of any dtype start the run as f32; plain integers as i64.
    match obs {
        Value::F64(a) => TensorBatch::from_f32_array(a.mapv(|x| x as f32), 1),
        Value::I64(a) => TensorBatch::from_f32_array(a.mapv(|x| x as f32), 1),
        other => rewrap_obs(other),
    }
}

impl Env for GenericEnv {
    fn reset(&mut self) -> Result<TensorBatch> {
        trace!("GenericEnv::reset()");
        self.count_steps = 0;
        Ok(rewrap_initial_obs(self.env.reset())?)
    }

    fn step(&mut self, act: &TensorBatch) -> Result<Step> {
        trace!("GenericEnv::step()");
        let a = self.convert_action(act)?;
        let (obs, reward, done, info) = self.env.step(&a);

        let mut done = done;
        self.count_steps += 1;
        if let Some(max_steps) = self.max_steps {
            if self.count_steps >= max_steps {
                done = true;
                self.count_steps = 0;
            }
        }

        Ok(Step::new(
            rewrap_obs(obs)?,
            TensorBatch::F32(Array2::from_elem((1, 1), reward as f32)),
            TensorBatch::Bool(Array2::from_elem((1, 1), done)),
            info,
        ))
    }

    fn render(&mut self) {
        self.env.render();
    }

    fn observation_space(&self) -> Space {
        self.env.observation_space()
    }

    fn action_space(&self) -> Space {
        self.env.action_space()
    }
}
