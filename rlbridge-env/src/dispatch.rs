//! Wrapper selection.
use crate::accel::{AccelEnv2, AccelEnv3};
use crate::backend::{AcceleratorApi, AcceleratorBackend, EpisodicBackend, GenericBackend};
use crate::episodic::EpisodicEnv;
use crate::generic::GenericEnv;
use anyhow::Result;
use log::info;
use rlbridge_core::{BridgeError, Env};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A backend handle with its family declared at registration time.
///
/// The chosen variant is the capability tag the dispatcher works from;
/// nothing is inferred from the backend's type at runtime.
pub enum Backend {
    /// Single-instance simulation with scalar conventions.
    Generic(Box<dyn GenericBackend>),
    /// Episodic timestep protocol.
    Episodic(Box<dyn EpisodicBackend>),
    /// Batched accelerator simulation.
    Accelerator(Box<dyn AcceleratorBackend>),
}

impl Backend {
    fn family(&self) -> &'static str {
        match self {
            Backend::Generic(_) => "generic",
            Backend::Episodic(_) => "episodic",
            Backend::Accelerator(_) => "accelerator",
        }
    }
}

/// Wrapper selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapperKind {
    /// Pick the variant matching the backend's declared family.
    Auto,
    /// Force the generic single-instance wrapper.
    Generic,
    /// Force the structured-step wrapper.
    StructuredStep,
    /// Force the accelerator wrapper over raw observation buffers.
    AcceleratorPreview2,
    /// Force the accelerator wrapper over structured observation maps.
    AcceleratorPreview3,
}

impl Default for WrapperKind {
    fn default() -> Self {
        WrapperKind::Auto
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WrapperKind::Auto => "auto",
            WrapperKind::Generic => "generic",
            WrapperKind::StructuredStep => "structured-step",
            WrapperKind::AcceleratorPreview2 => "accelerator-2",
            WrapperKind::AcceleratorPreview3 => "accelerator-3",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for WrapperKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(WrapperKind::Auto),
            "generic" => Ok(WrapperKind::Generic),
            "structured-step" => Ok(WrapperKind::StructuredStep),
            "accelerator-2" => Ok(WrapperKind::AcceleratorPreview2),
            "accelerator-3" => Ok(WrapperKind::AcceleratorPreview3),
            other => Err(BridgeError::UnknownWrapper(other.into())),
        }
    }
}

fn wrap_accelerator(env: Box<dyn AcceleratorBackend>, api: AcceleratorApi) -> Box<dyn Env> {
    match api {
        AcceleratorApi::Preview2 => {
            info!("Wrapper: accelerator (preview 2)");
            Box::new(AccelEnv2::new(env))
        }
        AcceleratorApi::Preview3 => {
            info!("Wrapper: accelerator (preview 3)");
            Box::new(AccelEnv3::new(env))
        }
    }
}

/// Wraps a backend behind the uniform [`Env`] surface.
///
/// An explicit selector constructs that variant directly and fails with
/// [`BridgeError::IncompatibleBackend`] when it names a different family
/// than the handle declares. [`WrapperKind::Auto`] follows the declared
/// family, using the accelerator backend's declared API generation to pick
/// between the two accelerator variants.
pub fn wrap_env(backend: Backend, kind: WrapperKind) -> Result<Box<dyn Env>> {
    match (kind, backend) {
        (WrapperKind::Auto, Backend::Generic(env))
        | (WrapperKind::Generic, Backend::Generic(env)) => {
            info!("Wrapper: generic");
            Ok(Box::new(GenericEnv::new(env)))
        }
        (WrapperKind::Auto, Backend::Episodic(env))
        | (WrapperKind::StructuredStep, Backend::Episodic(env)) => {
            info!("Wrapper: structured-step");
            Ok(Box::new(EpisodicEnv::new(env)?))
        }
        (WrapperKind::Auto, Backend::Accelerator(env)) => {
            let api = env.generation();
            Ok(wrap_accelerator(env, api))
        }
        (WrapperKind::AcceleratorPreview2, Backend::Accelerator(env)) => {
            Ok(wrap_accelerator(env, AcceleratorApi::Preview2))
        }
        (WrapperKind::AcceleratorPreview3, Backend::Accelerator(env)) => {
            Ok(wrap_accelerator(env, AcceleratorApi::Preview3))
        }
        (kind, backend) => Err(BridgeError::IncompatibleBackend {
            kind: kind.to_string(),
            backend: backend.family().into(),
        }
        .into()),
    }
}
