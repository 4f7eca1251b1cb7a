use anyhow::Result;
use log::info;
use ndarray::{arr1, arr2};
use rlbridge_core::{DType, Env as _, Record, Space, TensorBatch, Value};
use rlbridge_env::{wrap_env, Backend, GenericBackend, WrapperKind};

/// A point on a line that must be driven back to the origin.
struct LineSim {
    pos: f64,
}

impl GenericBackend for LineSim {
    fn reset(&mut self) -> Value {
        self.pos = 4.0;
        Value::F64(arr1(&[self.pos]).into_dyn())
    }

    fn step(&mut self, act: &Value) -> (Value, f64, bool, Record) {
        let dir = match act {
            Value::Int(0) => -1.0,
            _ => 1.0,
        };
        self.pos += dir;
        let done = self.pos <= 0.0;
        let reward = if done { 1.0 } else { -0.1 };
        (
            Value::F64(arr1(&[self.pos]).into_dyn()),
            reward,
            done,
            Record::empty(),
        )
    }

    fn observation_space(&self) -> Space {
        Space::unbounded(&[1], DType::F32)
    }

    fn action_space(&self) -> Space {
        Space::Discrete { n: 2 }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let mut env = wrap_env(
        Backend::Generic(Box::new(LineSim { pos: 0.0 })),
        WrapperKind::Auto,
    )?;

    for episode in 0..2 {
        let _ = env.reset()?;
        let mut total = 0.0f32;
        let mut steps = 0;
        loop {
            let a = fastrand::usize(0..2) as i64;
            let step = env.step(&TensorBatch::I64(arr2(&[[a]])))?;
            total += step.reward.to_vec::<f32>()[0];
            steps += 1;
            if step.done.to_vec::<i64>()[0] == 1 || steps >= 200 {
                break;
            }
        }
        info!("Episode {}: {} steps, reward = {:.1}", episode, steps, total);
    }

    Ok(())
}
