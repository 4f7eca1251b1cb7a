#![warn(missing_docs)]
//! Core abstractions for normalizing heterogeneous RL environments.
//!
//! Simulation backends disagree on almost everything: how observations and
//! actions are represented, whether values arrive batched, and what a spec
//! looks like. This crate provides the backend-agnostic vocabulary used to
//! reconcile them:
//!
//! * [`Space`]: canonical descriptors for observation/action layouts, with
//!   conversion from the episodic backend family's native [`RawSpec`] trees.
//! * [`TensorBatch`]: the uniform `(num_envs, feature_dim)` container every
//!   wrapped environment speaks.
//! * [`encode`]/[`decode`]: the codec between raw backend [`Value`]s and
//!   batches. Nested mappings are flattened in lexicographically sorted key
//!   order so repeated encodes are reproducible.
//! * [`Env`]: the uniform `reset`/`step`/`render` surface consumed by a
//!   training loop.
//!
//! Wrappers for the concrete backend families live in the `rlbridge-env`
//! crate.
pub mod record;

mod base;
mod codec;
mod error;
mod space;
mod tensor;
mod value;

pub use base::{Env, Step};
pub use codec::{decode, encode};
pub use error::BridgeError;
pub use record::{Record, RecordValue};
pub use space::{DType, RawSpec, Space};
pub use tensor::TensorBatch;
pub use value::Value;
