//! Batched numeric container.
use crate::error::BridgeError;
use ndarray::{concatenate, Array2, ArrayD, Axis};
use num_traits::AsPrimitive;

/// 2-D numeric container with a leading environment dimension.
///
/// Every conversion in this crate produces or consumes exactly this
/// `(num_envs, feature_dim)` layout, regardless of how nested the source
/// structure was. Batches are transient and owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum TensorBatch {
    /// 32-bit float elements.
    F32(Array2<f32>),
    /// 64-bit float elements.
    F64(Array2<f64>),
    /// 64-bit integer elements.
    I64(Array2<i64>),
    /// Boolean flags (done signals).
    Bool(Array2<bool>),
}

fn split<T>(v: Vec<T>, num_envs: usize) -> Result<Array2<T>, BridgeError> {
    if num_envs == 0 || v.len() % num_envs != 0 {
        return Err(BridgeError::ShapeMismatch(format!(
            "cannot split {} elements across {} environments",
            v.len(),
            num_envs
        )));
    }
    let dim = v.len() / num_envs;
    Array2::from_shape_vec((num_envs, dim), v)
        .map_err(|e| BridgeError::ShapeMismatch(e.to_string()))
}

impl TensorBatch {
    /// Rows and columns of the container.
    pub fn dim(&self) -> (usize, usize) {
        match self {
            TensorBatch::F32(a) => a.dim(),
            TensorBatch::F64(a) => a.dim(),
            TensorBatch::I64(a) => a.dim(),
            TensorBatch::Bool(a) => a.dim(),
        }
    }

    /// Number of parallel environments (leading dimension).
    pub fn num_envs(&self) -> usize {
        self.dim().0
    }

    /// Flattened feature dimension (trailing dimension).
    pub fn feature_dim(&self) -> usize {
        self.dim().1
    }

    /// Views a float array as `(num_envs, -1)`, flattening trailing axes.
    pub fn from_f32_array(a: ArrayD<f32>, num_envs: usize) -> Result<Self, BridgeError> {
        Ok(TensorBatch::F32(split(a.iter().cloned().collect(), num_envs)?))
    }

    /// Views a double array as `(num_envs, -1)`, flattening trailing axes.
    pub fn from_f64_array(a: ArrayD<f64>, num_envs: usize) -> Result<Self, BridgeError> {
        Ok(TensorBatch::F64(split(a.iter().cloned().collect(), num_envs)?))
    }

    /// Views an integer array as `(num_envs, -1)`, flattening trailing axes.
    pub fn from_i64_array(a: ArrayD<i64>, num_envs: usize) -> Result<Self, BridgeError> {
        Ok(TensorBatch::I64(split(a.iter().cloned().collect(), num_envs)?))
    }

    /// Arranges per-environment done flags into a `(num_envs, 1)` column.
    pub fn from_flags(flags: Vec<i8>, num_envs: usize) -> Result<Self, BridgeError> {
        let v = flags.iter().map(|x| *x != 0).collect::<Vec<_>>();
        if v.len() != num_envs {
            return Err(BridgeError::ShapeMismatch(format!(
                "{} flags for {} environments",
                v.len(),
                num_envs
            )));
        }
        Ok(TensorBatch::Bool(split(v, num_envs)?))
    }

    /// Returns the container with a fresh `(num_envs, feature_dim)` layout.
    pub fn reshaped(&self, num_envs: usize, feature_dim: usize) -> Result<Self, BridgeError> {
        let (n, d) = self.dim();
        if n * d != num_envs * feature_dim {
            return Err(BridgeError::ShapeMismatch(format!(
                "cannot view ({}, {}) as ({}, {})",
                n, d, num_envs, feature_dim
            )));
        }
        let batch = match self {
            TensorBatch::F32(a) => {
                TensorBatch::F32(split(a.iter().cloned().collect(), num_envs)?)
            }
            TensorBatch::F64(a) => {
                TensorBatch::F64(split(a.iter().cloned().collect(), num_envs)?)
            }
            TensorBatch::I64(a) => {
                TensorBatch::I64(split(a.iter().cloned().collect(), num_envs)?)
            }
            TensorBatch::Bool(a) => {
                TensorBatch::Bool(split(a.iter().cloned().collect(), num_envs)?)
            }
        };
        Ok(batch)
    }

    /// Casts to f32, keeping the layout.
    pub fn to_f32(&self) -> Array2<f32> {
        match self {
            TensorBatch::F32(a) => a.clone(),
            TensorBatch::F64(a) => a.mapv(|x| x as f32),
            TensorBatch::I64(a) => a.mapv(|x| x as f32),
            TensorBatch::Bool(a) => a.mapv(|x| if x { 1.0 } else { 0.0 }),
        }
    }

    /// Elements in row-major order, cast to `T`.
    pub fn to_vec<T>(&self) -> Vec<T>
    where
        T: Copy + 'static,
        f32: AsPrimitive<T>,
        f64: AsPrimitive<T>,
        i64: AsPrimitive<T>,
    {
        match self {
            TensorBatch::F32(a) => a.iter().map(|x| x.as_()).collect(),
            TensorBatch::F64(a) => a.iter().map(|x| x.as_()).collect(),
            TensorBatch::I64(a) => a.iter().map(|x| x.as_()).collect(),
            TensorBatch::Bool(a) => a.iter().map(|x| (*x as i64).as_()).collect(),
        }
    }

    /// The single element of a one-element batch, as an integer.
    ///
    /// Single-action submission semantics: the batch must hold exactly one
    /// element.
    pub fn item_i64(&self) -> Result<i64, BridgeError> {
        let (n, d) = self.dim();
        if n * d != 1 {
            return Err(BridgeError::ShapeMismatch(format!(
                "expected a single-element batch, got ({}, {})",
                n, d
            )));
        }
        Ok(self.to_vec::<i64>()[0])
    }

    /// Concatenates along the feature axis, promoting elements to f32.
    pub fn concat(parts: &[TensorBatch]) -> Result<Self, BridgeError> {
        if parts.is_empty() {
            return Err(BridgeError::ShapeMismatch(
                "cannot concatenate zero parts".into(),
            ));
        }
        let owned = parts.iter().map(|p| p.to_f32()).collect::<Vec<_>>();
        let views = owned.iter().map(|a| a.view()).collect::<Vec<_>>();
        concatenate(Axis(1), &views)
            .map(TensorBatch::F32)
            .map_err(|e| BridgeError::ShapeMismatch(e.to_string()))
    }
}

impl From<Array2<f32>> for TensorBatch {
    fn from(a: Array2<f32>) -> Self {
        TensorBatch::F32(a)
    }
}

impl From<Array2<f64>> for TensorBatch {
    fn from(a: Array2<f64>) -> Self {
        TensorBatch::F64(a)
    }
}

impl From<Array2<i64>> for TensorBatch {
    fn from(a: Array2<i64>) -> Self {
        TensorBatch::I64(a)
    }
}

impl From<Array2<bool>> for TensorBatch {
    fn from(a: Array2<bool>) -> Self {
        TensorBatch::Bool(a)
    }
}
