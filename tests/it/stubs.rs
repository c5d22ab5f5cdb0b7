use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sigmock::*;

use crate::fixture::{Child, Obj, Parent};

#[test]
fn unstubbed_call_returns_default() {
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_call::<i32>()).unwrap();
    obj.register::<String>(&Obj::greet_call(Arg::any_of::<String>(), Arg::any_of::<u32>()))
        .unwrap();

    assert_eq!(obj.func::<i32>(), 0);
    assert_eq!(obj.greet("a", 1), "");
}

#[test]
fn fixed_value_is_returned() {
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_call::<String>())
        .unwrap()
        .returns(42);
    obj.register::<String>(&Obj::greet_call(Arg::any_of::<String>(), Arg::any_of::<u32>()))
        .unwrap()
        .returns("hello");

    assert_eq!(obj.func::<String>(), 42);
    assert_eq!(obj.func::<String>(), 42);
    assert_eq!(obj.func::<i32>(), 0);
    assert_eq!(obj.greet("a", 1), "hello");
}

#[test]
fn computed_without_arguments() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_call::<u8>())
        .unwrap()
        .returns_with({
            let counter = counter.clone();
            move || counter.fetch_add(1, Ordering::SeqCst) as i32 + 1
        });

    assert_eq!(obj.func::<u8>(), 1);
    assert_eq!(obj.func::<u8>(), 2);
}

#[test]
fn computed_from_arguments() {
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_arg_call(Arg::any_of::<i32>()))
        .unwrap()
        .answers(|(k,): (i32,)| 25 + k);
    obj.register::<String>(&Obj::greet_call(Arg::any_of::<String>(), Arg::any_of::<u32>()))
        .unwrap()
        .answers(|(name, times): (String, u32)| name.repeat(times as usize));

    assert_eq!(obj.func_arg(2), 27);
    assert_eq!(obj.greet("ab", 3), "ababab");
}

#[test]
fn callback_runs_and_computed_value_is_returned() {
    let seen = Arc::new(Mutex::new(vec![]));
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_arg_call(Arg::any_of::<i32>()))
        .unwrap()
        .returns(1)
        .answers(|(k,): (i32,)| k * 10)
        .callback({
            let seen = seen.clone();
            move |(k,): (i32,)| seen.lock().unwrap().push(k)
        });

    assert_eq!(obj.func_arg(4), 40);
    assert_eq!(obj.func_arg(5), 50);
    assert_eq!(*seen.lock().unwrap(), vec![4, 5]);
}

#[test]
fn last_stub_wins() {
    let mut obj = Obj::default();
    obj.register::<i32>(&Obj::func_call::<i32>())
        .unwrap()
        .answers(|(): ()| 3)
        .returns(7);

    assert_eq!(obj.func::<i32>(), 7);
}

#[test]
fn stubs_are_dropped_on_re_registration() {
    let mut obj = Obj::default();
    let call = Obj::func_call::<i32>();
    obj.register::<i32>(&call).unwrap().returns(7);
    obj.register::<i32>(&call).unwrap();

    assert_eq!(obj.func::<i32>(), 0);
}

#[test]
fn action_callback_receives_arguments() {
    let seen = Arc::new(Mutex::new(vec![]));
    let mut obj = Obj::default();
    obj.register_action(&Obj::act_with_parent_call(Arg::any_of::<Parent>()))
        .unwrap()
        .callback({
            let seen = seen.clone();
            move |(parent,): (Parent,)| seen.lock().unwrap().push(parent)
        });

    obj.act_with_parent(Parent);

    assert_eq!(*seen.lock().unwrap(), vec![Parent]);
}

#[test]
fn action_callback_with_no_arguments() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut obj = Obj::default();
    obj.register_action(&Obj::act_call::<String>())
        .unwrap()
        .callback({
            let calls = calls.clone();
            move |(): ()| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

    obj.act::<String>();
    obj.act::<String>();
    obj.act::<i32>();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn callback_arguments_must_have_the_recorded_types() {
    let mut mock = Mock::new();
    let call = Obj::act_with_parent_call(Arg::any_of::<Parent>());
    mock.register_action(&call)
        .unwrap()
        .callback(|(_,): (Parent,)| {});

    let forwarded = Obj::act_with_parent_call(Arg::val(Child));
    match mock.try_call_action(&forwarded) {
        Err(error @ MockError::AnswerArguments { .. }) => {
            assert!(error
                .to_string()
                .starts_with("() act_with_parent(Parent): cannot pass recorded arguments"));
        }
        other => panic!("expected AnswerArguments, got {other:?}"),
    }

    // the call was still recorded
    assert_eq!(mock.call_count(&call), Some(1));
}

#[test]
fn answer_arity_is_checked() {
    let mut mock = Mock::new();
    let call = Obj::func_arg_call(Arg::any_of::<i32>());
    mock.register::<i32>(&call)
        .unwrap()
        .answers(|(a, b): (i32, i32)| a + b);

    assert!(matches!(
        mock.try_call::<i32>(&Obj::func_arg_call(Arg::val(1))),
        Err(MockError::AnswerArguments {
            reason: ArgsError::Arity {
                expected: 2,
                actual: 1
            },
            ..
        })
    ));
}

#[test]
fn requested_output_type_must_match_the_stub() {
    let mut mock = Mock::new();
    let call = Obj::func_call::<i32>();
    mock.register::<i32>(&call).unwrap().returns(5);

    assert!(matches!(
        mock.try_call::<u64>(&call),
        Err(MockError::ReturnTypeMismatch { .. })
    ));
}
