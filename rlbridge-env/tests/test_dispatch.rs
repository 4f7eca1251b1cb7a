use ndarray::{arr1, Array1};
use rlbridge_core::{BridgeError, DType, Env, RawSpec, Record, Space, TensorBatch, Value};
use rlbridge_env::{
    wrap_env, AccelOutput, AcceleratorApi, AcceleratorBackend, Backend, EpisodicBackend,
    GenericBackend, TimeStep, WrapperKind,
};
use std::cell::Cell;
use std::rc::Rc;

struct CountingAccel {
    calls: Rc<Cell<usize>>,
    api: AcceleratorApi,
}

impl CountingAccel {
    fn new(api: AcceleratorApi) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: calls.clone(),
                api,
            },
            calls,
        )
    }

    fn obs(&self) -> Value {
        let buf = Value::F32(Array1::from(vec![0.0f32; 2]).into_dyn());
        match self.api {
            AcceleratorApi::Preview2 => buf,
            AcceleratorApi::Preview3 => Value::Dict(vec![("obs".to_string(), buf)]),
        }
    }
}

impl AcceleratorBackend for CountingAccel {
    fn reset(&mut self) -> Value {
        self.calls.set(self.calls.get() + 1);
        self.obs()
    }

    fn step(&mut self, _act: &TensorBatch) -> AccelOutput {
        self.calls.set(self.calls.get() + 1);
        AccelOutput {
            obs: self.obs(),
            reward: vec![0.0],
            is_done: vec![0],
            info: Record::empty(),
        }
    }

    fn num_envs(&self) -> usize {
        1
    }

    fn observation_space(&self) -> Space {
        Space::unbounded(&[2], DType::F32)
    }

    fn action_space(&self) -> Space {
        Space::unbounded(&[1], DType::F32)
    }

    fn generation(&self) -> AcceleratorApi {
        self.api
    }
}

struct OneStateSim;

impl GenericBackend for OneStateSim {
    fn reset(&mut self) -> Value {
        Value::F32(arr1(&[0.0f32]).into_dyn())
    }

    fn step(&mut self, _act: &Value) -> (Value, f64, bool, Record) {
        (
            Value::F32(arr1(&[0.0f32]).into_dyn()),
            0.0,
            false,
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

struct OneStateEpisodic;

impl EpisodicBackend for OneStateEpisodic {
    fn reset(&mut self) -> TimeStep {
        TimeStep::restart(Value::F32(arr1(&[0.0f32]).into_dyn()))
    }

    fn step(&mut self, _act: &Value) -> TimeStep {
        TimeStep::transition(0.0, Value::F32(arr1(&[0.0f32]).into_dyn()))
    }

    fn observation_spec(&self) -> RawSpec {
        RawSpec::Array {
            shape: vec![1],
            dtype: DType::F32,
        }
    }

    fn action_spec(&self) -> RawSpec {
        RawSpec::Discrete {
            num_values: 2,
            dtype: DType::I64,
        }
    }
}

#[test]
fn test_unknown_wrapper_kind() {
    let (sim, calls) = CountingAccel::new(AcceleratorApi::Preview2);
    let _backend = Backend::Accelerator(Box::new(sim));

    // selection fails while parsing the selector, before any backend interaction
    let err = "bogus".parse::<WrapperKind>().unwrap_err();
    match err {
        BridgeError::UnknownWrapper(name) => assert_eq!(name, "bogus"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_selector_strings_round_trip() {
    let kinds = [
        WrapperKind::Auto,
        WrapperKind::Generic,
        WrapperKind::StructuredStep,
        WrapperKind::AcceleratorPreview2,
        WrapperKind::AcceleratorPreview3,
    ];
    for kind in kinds.iter() {
        assert_eq!(kind.to_string().parse::<WrapperKind>().unwrap(), *kind);
    }
}

#[test]
fn test_auto_selects_generic() {
    let mut env = wrap_env(Backend::Generic(Box::new(OneStateSim)), WrapperKind::Auto).unwrap();
    assert_eq!(env.num_envs(), 1);
    assert_eq!(env.reset().unwrap().dim(), (1, 1));
}

#[test]
fn test_auto_selects_structured_step() {
    let mut env = wrap_env(Backend::Episodic(Box::new(OneStateEpisodic)), WrapperKind::Auto)
        .unwrap();
    assert_eq!(env.reset().unwrap().dim(), (1, 1));
}

#[test]
fn test_auto_follows_declared_generation() {
    for api in [AcceleratorApi::Preview2, AcceleratorApi::Preview3].iter() {
        let (sim, _) = CountingAccel::new(*api);
        let mut env = wrap_env(Backend::Accelerator(Box::new(sim)), WrapperKind::Auto).unwrap();
        // the matching variant reads the declared observation convention
        assert_eq!(env.reset().unwrap().dim(), (1, 2));
    }
}

#[test]
fn test_explicit_generation_overrides_declaration() {
    // a preview-3 backend forced through the raw-buffer wrapper cannot
    // read the structured observation map
    let (sim, _) = CountingAccel::new(AcceleratorApi::Preview3);
    let mut env = wrap_env(
        Backend::Accelerator(Box::new(sim)),
        WrapperKind::AcceleratorPreview2,
    )
    .unwrap();

    let err = env.reset().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BridgeError>(),
        Some(BridgeError::UnsupportedSpec(_))
    ));
}

#[test]
fn test_incompatible_selector_fails() {
    let (sim, calls) = CountingAccel::new(AcceleratorApi::Preview2);
    let err = wrap_env(Backend::Accelerator(Box::new(sim)), WrapperKind::Generic)
        .err()
        .unwrap();

    assert!(matches!(
        err.downcast_ref::<BridgeError>(),
        Some(BridgeError::IncompatibleBackend { .. })
    ));
    assert_eq!(calls.get(), 0);
}
