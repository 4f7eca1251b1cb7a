//! Raw backend values.
use crate::tensor::TensorBatch;
use ndarray::ArrayD;

/// A value as produced or consumed by a backend, before tensorization.
///
/// Backends disagree on what a "value" is: a plain scalar, an array of some
/// dtype and rank, an already-batched container, or a named tree of any of
/// these. The codec reconciles all of them into [`TensorBatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Plain scalar integer (e.g. a discrete observation or action).
    Int(i64),
    /// 32-bit float array of any rank.
    F32(ArrayD<f32>),
    /// 64-bit float array of any rank.
    F64(ArrayD<f64>),
    /// 64-bit integer array of any rank.
    I64(ArrayD<i64>),
    /// Already-batched container, forwarded as-is.
    Batch(TensorBatch),
    /// Named nested values in declaration order.
    Dict(Vec<(String, Value)>),
}

impl Value {
    /// Tag name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::I64(_) => "I64",
            Value::Batch(_) => "Batch",
            Value::Dict(_) => "Dict",
        }
    }

    /// Looks up a named child of a [`Value::Dict`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Dict(items) => items.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<ArrayD<f32>> for Value {
    fn from(a: ArrayD<f32>) -> Self {
        Value::F32(a)
    }
}

impl From<ArrayD<f64>> for Value {
    fn from(a: ArrayD<f64>) -> Self {
        Value::F64(a)
    }
}

impl From<ArrayD<i64>> for Value {
    fn from(a: ArrayD<i64>) -> Self {
        Value::I64(a)
    }
}

impl From<TensorBatch> for Value {
    fn from(b: TensorBatch) -> Self {
        Value::Batch(b)
    }
}
