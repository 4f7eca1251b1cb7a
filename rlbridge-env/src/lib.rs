#![warn(missing_docs)]
//! Wrappers normalizing heterogeneous simulation backends behind
//! [`rlbridge_core::Env`].
//!
//! Each supported backend family has its own calling convention, and each
//! gets a wrapper variant that reconciles it with the uniform surface:
//!
//! * [`AccelEnv2`] and [`AccelEnv3`] wrap batched accelerator simulations
//!   ([`AcceleratorBackend`]). These backends reset environments
//!   individually as episodes end, so the global reset runs exactly once
//!   per handle lifetime; later calls return the cached first observation.
//!   [`AccelEnv3`] additionally unwraps the structured observation map,
//!   exposing its `"obs"` entry.
//! * [`GenericEnv`] wraps single-instance simulations with scalar
//!   conventions ([`GenericBackend`]). Actions leave as plain scalars or
//!   arrays; observations, rewards and done flags come back re-wrapped as
//!   `(1, -1)` batches.
//! * [`EpisodicEnv`] wraps backends speaking an episodic timestep protocol
//!   ([`EpisodicBackend`]), flattening structured observations against the
//!   backend's spec tree and decoding actions against the live action spec.
//!
//! [`wrap_env`] selects a variant from the backend's declared family (or an
//! explicit [`WrapperKind`]); spec and value conversion is done by the codec
//! in `rlbridge-core`. An unrecognized spec or selector is a fatal
//! configuration error, surfaced immediately and never retried.
mod accel;
mod backend;
mod dispatch;
mod episodic;
mod generic;

pub use accel::{AccelEnv2, AccelEnv3};
pub use backend::{
    AccelOutput, AcceleratorApi, AcceleratorBackend, EpisodicBackend, GenericBackend, StepType,
    TimeStep,
};
pub use dispatch::{wrap_env, Backend, WrapperKind};
pub use episodic::EpisodicEnv;
pub use generic::{GenericEnv, GenericEnvConfig};
