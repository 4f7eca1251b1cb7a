//! Space descriptors and conversion from backend-native specs.
use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Element type of a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// 64-bit signed integer.
    I64,
}

/// Canonical, backend-agnostic description of an observation or action.
///
/// Descriptors are derived once at wrapper construction and immutable
/// thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// A discrete set of `n` choices.
    Discrete {
        /// Number of choices.
        n: i64,
    },
    /// A continuous box with per-element bounds.
    Box {
        /// Native shape, batch dimension excluded.
        shape: Vec<usize>,
        /// Lower bounds, one per element.
        low: Vec<f64>,
        /// Upper bounds, one per element.
        high: Vec<f64>,
        /// Element type.
        dtype: DType,
    },
    /// Named subspaces, kept in declaration order.
    Dict(Vec<(String, Space)>),
}

impl Space {
    /// Box with infinite bounds broadcast over the shape.
    pub fn unbounded(shape: &[usize], dtype: DType) -> Self {
        let n = shape.iter().product::<usize>().max(1);
        Space::Box {
            shape: shape.to_vec(),
            low: vec![f64::NEG_INFINITY; n],
            high: vec![f64::INFINITY; n],
            dtype,
        }
    }

    /// Length of the flattened feature axis.
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Discrete { .. } => 1,
            Space::Box { shape, .. } => shape.iter().product(),
            Space::Dict(entries) => entries.iter().map(|(_, s)| s.flat_dim()).sum(),
        }
    }

    /// Tag name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Space::Discrete { .. } => "Discrete",
            Space::Box { .. } => "Box",
            Space::Dict(_) => "Dict",
        }
    }
}

/// Spec tree as reported by an episodic backend.
///
/// This is the native vocabulary of that backend family; [`Space`] is this
/// crate's canonical form. Conversion copies shapes, bounds and dtypes
/// verbatim and never reorders mapping entries.
#[derive(Clone, Debug, PartialEq)]
pub enum RawSpec {
    /// Integer choice among `num_values`.
    Discrete {
        /// Cardinality of the choice set.
        num_values: i64,
        /// Native integer dtype of submitted actions.
        dtype: DType,
    },
    /// Bounded numeric array.
    Bounded {
        /// Array shape.
        shape: Vec<usize>,
        /// Per-element lower bounds.
        minimum: Vec<f64>,
        /// Per-element upper bounds.
        maximum: Vec<f64>,
        /// Element type.
        dtype: DType,
    },
    /// Unbounded numeric array.
    Array {
        /// Array shape.
        shape: Vec<usize>,
        /// Element type.
        dtype: DType,
    },
    /// Textual payload. Carried for completeness of the native protocol;
    /// never convertible to a [`Space`].
    Text,
    /// Insertion-ordered mapping of named children.
    Ordered(Vec<(String, RawSpec)>),
}

impl RawSpec {
    /// Tag name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawSpec::Discrete { .. } => "Discrete",
            RawSpec::Bounded { .. } => "Bounded",
            RawSpec::Array { .. } => "Array",
            RawSpec::Text => "Text",
            RawSpec::Ordered(_) => "Ordered",
        }
    }
}

impl TryFrom<&RawSpec> for Space {
    type Error = BridgeError;

    fn try_from(spec: &RawSpec) -> Result<Self, Self::Error> {
        match spec {
            RawSpec::Discrete { num_values, .. } => Ok(Space::Discrete { n: *num_values }),
            RawSpec::Bounded {
                shape,
                minimum,
                maximum,
                dtype,
            } => Ok(Space::Box {
                shape: shape.clone(),
                low: minimum.clone(),
                high: maximum.clone(),
                dtype: *dtype,
            }),
            RawSpec::Array { shape, dtype } => Ok(Space::unbounded(shape, *dtype)),
            RawSpec::Ordered(children) => {
                let entries = children
                    .iter()
                    .map(|(key, child)| Ok((key.clone(), Space::try_from(child)?)))
                    .collect::<Result<Vec<_>, BridgeError>>()?;
                Ok(Space::Dict(entries))
            }
            RawSpec::Text => Err(BridgeError::UnsupportedSpec(spec.type_name().into())),
        }
    }
}
