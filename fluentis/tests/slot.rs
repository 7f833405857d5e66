use fluentis::{ResultSlot, TaskError};

#[test]
fn test_read_before_write_fails() {
    let slot = ResultSlot::<u32>::new();

    assert!(!slot.has_value());
    assert!(matches!(slot.take(), Err(TaskError::ValueNotSet)));
}

#[test]
fn test_value_write_then_read() {
    let slot = ResultSlot::new();

    slot.set_value(42u32);

    assert!(slot.has_value());
    assert_eq!(slot.take().unwrap(), 42);
}

#[test]
fn test_error_is_returned_verbatim() {
    let slot = ResultSlot::<u32>::new();

    slot.set_error(Box::new("boom"));

    assert!(slot.has_value());
    match slot.take() {
        Err(TaskError::Panicked(payload)) => {
            assert_eq!(*payload.downcast::<&str>().unwrap(), "boom");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
#[should_panic(expected = "result slot written twice")]
fn test_double_write_is_a_contract_violation() {
    let slot = ResultSlot::new();

    slot.set_value(1u32);
    slot.set_value(2u32);
}

#[test]
#[should_panic(expected = "result slot written twice")]
fn test_error_after_value_is_a_contract_violation() {
    let slot = ResultSlot::new();

    slot.set_value(1u32);
    slot.set_error(Box::new("late"));
}
