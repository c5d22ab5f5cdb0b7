use sigmock::*;

use crate::fixture::Obj;

#[test]
fn registered_signature_is_known() {
    let mut obj = Obj::default();
    let call = Obj::func_arg_call(Arg::val(42));

    assert!(!obj.is_registered(&call));
    obj.register::<i32>(&call).unwrap();

    assert!(obj.is_registered(&call));
    assert!(obj.is_registered(&Obj::func_arg_call(Arg::val(7))));
    assert_eq!(obj.count_of_mocks(), 1);
}

#[test]
fn count_of_mocks_counts_distinct_signatures() {
    let mut obj = Obj::default();

    obj.register::<i32>(&Obj::func_call::<i32>()).unwrap();
    obj.register::<i32>(&Obj::func_call::<String>()).unwrap();
    obj.register_action(&Obj::act_call::<i32>()).unwrap();
    obj.register::<i32>(&Obj::func_call::<i32>()).unwrap();

    assert_eq!(obj.count_of_mocks(), 3);
    assert!(!obj.is_registered(&Obj::act_call::<String>()));
}

#[test]
fn re_registering_resets_history() {
    let mut obj = Obj::default();
    let call = Obj::func_arg_call(Arg::val(42));

    obj.register::<i32>(&call).unwrap();
    obj.func_arg(42);
    obj.func_arg(42);
    assert_eq!(obj.call_count(&call), Some(2));

    obj.register::<i32>(&call).unwrap();

    assert_eq!(obj.call_count(&call), Some(0));
    assert_eq!(obj.count_of_mocks(), 1);
    obj.check(&call, 0).unwrap();
}

#[test]
fn re_registering_replaces_expectations() {
    let mut obj = Obj::default();

    obj.register::<i32>(&Obj::func_arg_call(Arg::val(1))).unwrap();
    obj.register::<i32>(&Obj::func_arg_call(Arg::val(2))).unwrap();
    obj.func_arg(2);

    obj.check(&Obj::func_arg_call(Arg::val(2)), 1).unwrap();
}

#[test]
fn signatures_are_listed_in_key_order() {
    let mut obj = Obj::default();

    obj.register_action(&Obj::act_call::<u8>()).unwrap();
    obj.register::<i32>(&Obj::func_arg_call(Arg::any_of::<i32>()))
        .unwrap();
    obj.register::<i32>(&Obj::func_call::<String>()).unwrap();

    let signatures: Vec<String> = obj.signatures().iter().map(|key| key.to_string()).collect();

    assert_eq!(
        signatures,
        vec!["() act<u8>()", "i32 func<String>()", "i32 func_arg(i32)"]
    );
}

#[test]
fn method_name_must_be_an_identifier() {
    let mut mock = Mock::new();

    match mock.register_action(&CallDescriptor::action("obj.act")) {
        Err(MockError::InvalidRegistration {
            reason: InvalidRegistration::NotACall(method),
            ..
        }) => assert_eq!(method, "obj.act"),
        _ => panic!("expected InvalidRegistration"),
    }
    assert_eq!(mock.count_of_mocks(), 0);
}

#[test]
fn registered_return_type_must_match_the_call() {
    let mut mock = Mock::new();

    let result = mock.register::<String>(&Obj::func_arg_call(Arg::val(1)));
    assert!(matches!(
        result,
        Err(MockError::InvalidRegistration {
            reason: InvalidRegistration::ReturnType { .. },
            ..
        })
    ));

    let result = mock.register_action(&Obj::func_arg_call(Arg::val(1)));
    assert!(matches!(result, Err(MockError::InvalidRegistration { .. })));
    assert_eq!(mock.count_of_mocks(), 0);
}

#[test]
fn nested_call_arguments_cannot_be_registered() {
    let mut mock = Mock::new();
    let call = CallDescriptor::action("store")
        .arg::<String>(Arg::call::<String>("make_name"))
        .arg::<u64>(Arg::val(1_u64));

    match mock.register_action(&call) {
        Err(error @ MockError::UnsupportedArgumentShape { .. }) => {
            assert_eq!(
                error.to_string(),
                "() store(String, u64): argument 0 has unsupported shape make_name()"
            );
        }
        _ => panic!("expected UnsupportedArgumentShape"),
    }
    assert!(!mock.is_registered(&call));
}

mod first {
    #[derive(sigmock::MockType, Clone, PartialEq, Debug)]
    pub struct Thing(pub i32);
}

mod second {
    #[derive(sigmock::MockType, Clone, PartialEq, Debug)]
    pub struct Thing(pub i32);
}

#[test]
fn same_named_types_from_different_modules_are_distinct_signatures() {
    let mut mock = Mock::new();
    let first = CallDescriptor::action("f").arg::<first::Thing>(Arg::any_of::<first::Thing>());
    let second = CallDescriptor::action("f").arg::<second::Thing>(Arg::any_of::<second::Thing>());

    mock.register_action(&first).unwrap();
    mock.register_action(&second).unwrap();
    assert_eq!(mock.count_of_mocks(), 2);

    mock.call_action(&CallDescriptor::action("f").arg::<first::Thing>(Arg::val(first::Thing(1))));

    mock.check(&first, 1).unwrap();
    mock.check(&second, 0).unwrap();
    assert_eq!(first.signature_key().to_string(), "() f(Thing)");
}
