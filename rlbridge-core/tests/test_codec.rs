use ndarray::{arr1, arr2, ArrayD, IxDyn};
use rlbridge_core::{decode, encode, BridgeError, DType, Space, TensorBatch, Value};

fn box_f32(shape: Vec<usize>, low: f64, high: f64) -> Space {
    let n = shape.iter().product::<usize>();
    Space::Box {
        shape,
        low: vec![low; n],
        high: vec![high; n],
        dtype: DType::F32,
    }
}

#[test]
fn test_encode_box_batch() {
    let space = box_f32(vec![3], -1.0, 1.0);
    let value = Value::F32(
        ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
    );
    let batch = encode(&value, &space, 2).unwrap();

    assert_eq!(batch.dim(), (2, 3));
    assert_eq!(batch.feature_dim(), space.flat_dim());
    assert_eq!(batch.to_vec::<f32>(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_encode_discrete_scalar() {
    let space = Space::Discrete { n: 4 };
    let batch = encode(&Value::Int(2), &space, 1).unwrap();

    assert_eq!(batch.dim(), (1, 1));
    assert_eq!(batch.to_vec::<i64>(), vec![2]);
}

#[test]
fn test_encode_dict_sorted_order() {
    // Declared as "b" then "a"; flattening must visit "a" first.
    let space = Space::Dict(vec![
        ("b".to_string(), box_f32(vec![2], -1.0, 1.0)),
        ("a".to_string(), Space::Discrete { n: 3 }),
    ]);
    let value = Value::Dict(vec![
        ("b".to_string(), Value::F32(arr1(&[0.5f32, 1.5]).into_dyn())),
        ("a".to_string(), Value::Int(2)),
    ]);
    let batch = encode(&value, &space, 1).unwrap();

    assert_eq!(batch.dim(), (1, 3));
    assert_eq!(batch.to_vec::<f32>(), vec![2.0, 0.5, 1.5]);
}

#[test]
fn test_encode_nested_dict_feature_dim() {
    let inner = Space::Dict(vec![
        ("pos".to_string(), box_f32(vec![2, 2], -1.0, 1.0)),
        ("vel".to_string(), box_f32(vec![3], -1.0, 1.0)),
    ]);
    let space = Space::Dict(vec![
        ("state".to_string(), inner),
        ("switch".to_string(), Space::Discrete { n: 2 }),
    ]);
    let value = Value::Dict(vec![
        (
            "state".to_string(),
            Value::Dict(vec![
                ("pos".to_string(), Value::F32(arr1(&[1.0f32; 4]).into_dyn())),
                ("vel".to_string(), Value::F32(arr1(&[2.0f32; 3]).into_dyn())),
            ]),
        ),
        ("switch".to_string(), Value::Int(1)),
    ]);
    let batch = encode(&value, &space, 1).unwrap();

    assert_eq!(space.flat_dim(), 8);
    assert_eq!(batch.dim(), (1, 8));
}

#[test]
fn test_encode_is_reproducible() {
    let space = Space::Dict(vec![
        ("b".to_string(), box_f32(vec![2], -1.0, 1.0)),
        ("a".to_string(), Space::Discrete { n: 3 }),
    ]);
    let value = Value::Dict(vec![
        ("b".to_string(), Value::F32(arr1(&[0.25f32, 0.75]).into_dyn())),
        ("a".to_string(), Value::Int(1)),
    ]);

    let first = encode(&value, &space, 1).unwrap();
    let second = encode(&value, &space, 1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_encode_missing_entry() {
    let space = Space::Dict(vec![("a".to_string(), Space::Discrete { n: 3 })]);
    let value = Value::Dict(vec![("b".to_string(), Value::Int(0))]);

    let err = encode(&value, &space, 1).unwrap_err();
    assert!(matches!(err, BridgeError::UnsupportedSpec(_)));
}

#[test]
fn test_encode_rejects_bad_length() {
    let space = box_f32(vec![3], -1.0, 1.0);
    let value = Value::F32(arr1(&[0.0f32, 1.0]).into_dyn());

    let err = encode(&value, &space, 1).unwrap_err();
    assert!(matches!(err, BridgeError::ShapeMismatch(_)));
}

#[test]
fn test_encode_rebatches_tensor_value() {
    let space = box_f32(vec![2], -1.0, 1.0);
    let value = Value::Batch(TensorBatch::F32(arr2(&[[1.0f32], [2.0]])));
    let batch = encode(&value, &space, 1).unwrap();

    assert_eq!(batch.dim(), (1, 2));
}

#[test]
fn test_decode_discrete_item() {
    let space = Space::Discrete { n: 5 };
    let batch = TensorBatch::I64(arr2(&[[3i64]]));

    assert_eq!(decode(&batch, &space).unwrap(), Value::Int(3));
}

#[test]
fn test_decode_discrete_rejects_batch() {
    let space = Space::Discrete { n: 5 };
    let batch = TensorBatch::I64(arr2(&[[3i64], [1]]));

    let err = decode(&batch, &space).unwrap_err();
    assert!(matches!(err, BridgeError::ShapeMismatch(_)));
}

#[test]
fn test_decode_box_reshapes_and_casts() {
    let space = Space::Box {
        shape: vec![2, 2],
        low: vec![-1.0; 4],
        high: vec![1.0; 4],
        dtype: DType::F64,
    };
    let batch = TensorBatch::F32(arr2(&[[1.0f32, 2.0, 3.0, 4.0]]));

    match decode(&batch, &space).unwrap() {
        Value::F64(a) => {
            assert_eq!(a.shape(), &[2, 2]);
            assert_eq!(a.iter().cloned().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0]);
        }
        other => panic!("unexpected value: {:?}", other),
    }
}

#[test]
fn test_decode_dict_unsupported() {
    let space = Space::Dict(vec![("a".to_string(), Space::Discrete { n: 2 })]);
    let batch = TensorBatch::F32(arr2(&[[0.0f32]]));

    let err = decode(&batch, &space).unwrap_err();
    assert!(matches!(err, BridgeError::UnsupportedSpec(_)));
}
