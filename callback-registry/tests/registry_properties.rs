// Behavioral scenarios for the public registry API
use callback_registry::{Callable, Registry, RegistryError};
use std::sync::{Arc, Mutex};

type CallLog = Arc<Mutex<Vec<usize>>>;

fn tagged(log: &CallLog, tag: usize) -> Callable<i32, i32> {
    let log = Arc::clone(log);
    Callable::new(move |x: i32| {
        log.lock().unwrap().push(tag);
        x + tag as i32
    })
}

#[test]
fn invoke_calls_each_once_in_insertion_order() {
    for count in 0..6 {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::new();
        for tag in 0..count {
            registry.add(tagged(&log, tag));
        }

        let results = registry.invoke(100);

        assert_eq!(*log.lock().unwrap(), (0..count).collect::<Vec<_>>());
        assert_eq!(results, (0..count).map(|t| 100 + t as i32).collect::<Vec<_>>());
    }
}

#[test]
fn duplicates_are_invoked_independently() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let a = tagged(&log, 7);
    let mut registry = Registry::with_callable(a.clone());
    registry.add(a.clone());
    registry.add(a);

    assert_eq!(registry.invoke(0), vec![7, 7, 7]);
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[test]
fn empty_registry_yields_no_results() {
    let registry: Registry<i32, i32> = Registry::new();
    assert_eq!(registry.invoke(5), Vec::<i32>::new());
    assert_eq!(registry.invoke_last(5), None);
}

#[test]
fn removed_callable_is_never_invoked() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let a = tagged(&log, 1);
    let b = tagged(&log, 2);
    let mut registry = Registry::new();
    registry.add(a.clone());
    registry.add(b);

    assert!(registry.remove(&a));
    registry.invoke(0);
    registry.invoke(0);

    assert_eq!(*log.lock().unwrap(), vec![2, 2]);
}

#[test]
fn removing_absent_callable_leaves_registry_unchanged() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::with_callable(tagged(&log, 1));
    let before = registry.clone();

    assert!(!registry.remove(&tagged(&log, 1)));
    assert_eq!(registry, before);
}

#[test]
fn invoke_one_matches_full_invocation() {
    let mut registry = Registry::new();
    registry.add(Callable::new(|x: i32| x + 1));
    registry.add(Callable::new(|x: i32| x * 2));
    registry.add(Callable::new(|x: i32| x - 10));

    let all = registry.invoke(3);
    for (index, expected) in all.iter().enumerate() {
        assert_eq!(registry.invoke_one(index, 3).unwrap(), *expected);
    }
}

#[test]
fn invoke_one_outside_range_fails() {
    let registry = Registry::with_callable(Callable::new(|x: i32| x));

    assert_eq!(
        registry.invoke_one(1, 0),
        Err(RegistryError::OutOfRange { index: 1, len: 1 })
    );
    assert_eq!(
        registry.invoke_one(usize::MAX, 0),
        Err(RegistryError::OutOfRange { index: usize::MAX, len: 1 })
    );

    let empty: Registry<i32, i32> = Registry::new();
    assert!(matches!(empty.invoke_one(0, 0), Err(RegistryError::OutOfRange { .. })));
}

#[test]
fn add_one_and_double_scenario() {
    let add_one = Callable::new(|x: i32| x + 1);
    let double = Callable::new(|x: i32| x * 2);
    let mut registry = Registry::with_callable(add_one);
    registry.add(double);

    assert_eq!(registry.invoke(3), vec![4, 6]);
}

#[test]
fn add_then_remove_restores_registry() {
    let mut registry = Registry::new();
    registry.add(Callable::new(|x: i32| x + 1));
    registry.add(Callable::new(|x: i32| x * 2));
    let before = registry.clone();

    let extra = Callable::new(|x: i32| x);
    registry.add(extra.clone());
    assert_ne!(registry, before);

    registry.remove(&extra);
    assert_eq!(registry, before);
}

#[test]
fn removing_a_duplicate_drops_the_earliest_entry() {
    let add_one = Callable::new(|x: i32| x + 1);
    let double = Callable::new(|x: i32| x * 2);
    let mut registry = Registry::with_callable(add_one.clone());
    registry.add(double.clone());
    let before = registry.clone();

    registry.add(add_one.clone());
    assert!(registry.remove(&add_one));

    // Same entries, but the surviving duplicate sits where it was appended
    assert_ne!(registry, before);
    assert_eq!(registry.position(&double), Some(0));
    assert_eq!(registry.position(&add_one), Some(1));
    assert_eq!(registry.invoke(3), vec![6, 4]);
}

#[test]
fn absent_callable_is_rejected() {
    let mut registry: Registry<i32, i32> = Registry::new();
    assert!(matches!(
        registry.try_add(None),
        Err(RegistryError::InvalidArgument(_))
    ));
}
