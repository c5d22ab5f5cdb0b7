use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use sigmock::*;

use crate::fixture::{Obj, Parent};

#[test]
fn unregistered_calls_respond_with_default() {
    let obj = Obj::default();

    assert_eq!(obj.func_arg(42), 0);
    assert_eq!(obj.greet("x", 1), "");
    obj.act::<String>();

    assert_eq!(obj.call_count(&Obj::func_arg_call(Arg::val(42))), None);
    assert_eq!(obj.count_of_mocks(), 0);
}

#[test]
fn unregistered_calls_are_not_verifiable() {
    let obj = Obj::default();
    obj.func_arg(42);

    let call = Obj::func_arg_call(Arg::val(42));
    match obj.check(&call, 1) {
        Err(error @ MockError::UnregisteredSignature { .. }) => {
            assert_eq!(
                error.to_string(),
                "i32 func_arg(i32): signature was never registered"
            );
        }
        other => panic!("expected UnregisteredSignature, got {other:?}"),
    }
}

#[test]
fn calls_are_counted_per_signature() {
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_call::<i32>()).unwrap();
    obj.register::<i32>(&Obj::func_call::<String>()).unwrap();

    obj.func::<i32>();
    obj.func::<i32>();
    obj.func::<String>();
    obj.func::<u8>();

    assert_eq!(obj.call_count(&Obj::func_call::<i32>()), Some(2));
    assert_eq!(obj.call_count(&Obj::func_call::<String>()), Some(1));
    assert_eq!(obj.call_count(&Obj::func_call::<u8>()), None);
}

#[test]
fn reads_are_evaluated_when_forwarded() {
    let mut mock = Mock::new();
    let current = Arc::new(AtomicI32::new(1));

    let read = {
        let current = current.clone();
        move || current.load(Ordering::SeqCst)
    };
    let call = CallDescriptor::function::<i32>("func_arg").arg::<i32>(Arg::read(read));

    mock.register::<i32>(&call).unwrap();
    current.store(2, Ordering::SeqCst);
    mock.call::<i32>(&call);

    // the expectation was captured at registration
    assert!(matches!(
        mock.check(&call, 1),
        Err(MockError::ArgumentMismatch { .. })
    ));
}

#[test]
fn wildcard_cannot_be_forwarded() {
    let mut mock = Mock::new();
    let call = CallDescriptor::function::<i32>("func_arg").arg::<i32>(Arg::any_of::<i32>());
    mock.register::<i32>(&call).unwrap();

    assert!(matches!(
        mock.try_call::<i32>(&call),
        Err(MockError::UnsupportedArgumentShape { index: 0, .. })
    ));
    assert_eq!(mock.call_count(&call), Some(0));
}

#[test]
#[should_panic(expected = "() act_with_parent(Parent): argument 0 has unsupported shape")]
fn forwarding_a_wildcard_panics() {
    let mut mock = Mock::new();
    let call = Obj::act_with_parent_call(Arg::any_of::<Parent>());
    mock.register_action(&call).unwrap();

    mock.call_action(&call);
}
