//! Conversion between raw backend values and batched containers.
use crate::error::BridgeError;
use crate::space::{DType, Space};
use crate::tensor::TensorBatch;
use crate::value::Value;
use log::trace;
use ndarray::{Array2, ArrayD, IxDyn};

fn check_len(len: usize, num_envs: usize, dim: usize) -> Result<(), BridgeError> {
    if len != num_envs * dim {
        return Err(BridgeError::ShapeMismatch(format!(
            "cannot view {} elements as ({}, {})",
            len, num_envs, dim
        )));
    }
    Ok(())
}

fn encode_leaf(value: &Value, space: &Space, num_envs: usize) -> Result<TensorBatch, BridgeError> {
    let dim = space.flat_dim();
    match value {
        Value::Int(v) => {
            check_len(1, num_envs, dim)?;
            Ok(TensorBatch::I64(Array2::from_elem((1, 1), *v)))
        }
        Value::F32(a) => {
            check_len(a.len(), num_envs, dim)?;
            TensorBatch::from_f32_array(a.clone(), num_envs)
        }
        Value::F64(a) => {
            check_len(a.len(), num_envs, dim)?;
            TensorBatch::from_f64_array(a.clone(), num_envs)
        }
        Value::I64(a) => {
            check_len(a.len(), num_envs, dim)?;
            TensorBatch::from_i64_array(a.clone(), num_envs)
        }
        Value::Batch(b) => {
            check_len(b.num_envs() * b.feature_dim(), num_envs, dim)?;
            b.reshaped(num_envs, dim)
        }
        Value::Dict(_) => Err(BridgeError::UnsupportedSpec(format!(
            "Dict value for {} space",
            space.type_name()
        ))),
    }
}

/// Converts a raw backend value into a `(num_envs, feature_dim)` batch.
///
/// Discrete and box leaves keep the value's native dtype. Mapping
/// descriptors are flattened by encoding each child in lexicographically
/// sorted key order and concatenating along the feature axis; the fixed
/// ordering makes repeated encodes reproducible bit-for-bit.
pub fn encode(value: &Value, space: &Space, num_envs: usize) -> Result<TensorBatch, BridgeError> {
    trace!("encode {} as {}", value.type_name(), space.type_name());
    match space {
        Space::Dict(entries) => {
            let mut sorted: Vec<&(String, Space)> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            let mut parts = Vec::with_capacity(sorted.len());
            for (key, child_space) in sorted.iter().map(|e| (&e.0, &e.1)) {
                let child = value.get(key).ok_or_else(|| {
                    BridgeError::UnsupportedSpec(format!(
                        "{} value has no entry {:?}",
                        value.type_name(),
                        key
                    ))
                })?;
                parts.push(encode(child, child_space, num_envs)?);
            }
            TensorBatch::concat(&parts)
        }
        _ => encode_leaf(value, space, num_envs),
    }
}

/// Converts an action batch back into the backend's native value.
///
/// Discrete spaces extract the single scalar action (single-action
/// submission assumes `num_envs == 1` semantics). Box spaces reshape the
/// batch to the descriptor's native shape and cast to its dtype. Mapping
/// descriptors are not decodable.
pub fn decode(batch: &TensorBatch, space: &Space) -> Result<Value, BridgeError> {
    trace!("decode {} elements as {}", batch.feature_dim(), space.type_name());
    match space {
        Space::Discrete { .. } => Ok(Value::Int(batch.item_i64()?)),
        Space::Box { shape, dtype, .. } => {
            let total: usize = shape.iter().product();
            let (n, d) = batch.dim();
            check_len(n * d, 1, total)?;
            let dims = IxDyn(shape);
            let value = match dtype {
                DType::F32 => ArrayD::from_shape_vec(dims, batch.to_vec::<f32>())
                    .map(Value::F32),
                DType::F64 => ArrayD::from_shape_vec(dims, batch.to_vec::<f64>())
                    .map(Value::F64),
                DType::I64 => ArrayD::from_shape_vec(dims, batch.to_vec::<i64>())
                    .map(Value::I64),
            };
            value.map_err(|e| BridgeError::ShapeMismatch(e.to_string()))
        }
        Space::Dict(_) => Err(BridgeError::UnsupportedSpec(space.type_name().into())),
    }
}
