use std::cell::{Cell, RefCell};
use std::rc::Rc;

use perhaps::{Candidate, Config, Error, Fallback, Maybe, Resolved, Visitor};

type Thunk = Rc<dyn Fn() -> i32>;

fn observed(hits: &Rc<Cell<u32>>) -> Thunk {
    let hits = Rc::clone(hits);
    Rc::new(move || {
        hits.set(hits.get() + 1);
        7
    })
}

#[test]
fn of_present_value_round_trips() -> anyhow::Result<()> {
    let maybe = Maybe::of(Some("payload".to_string()));
    assert!(!maybe.is_empty()?);
    assert_eq!(maybe.get()?, "payload");
    assert_eq!(maybe.raw()?, Some("payload".to_string()));
    Ok(())
}

#[test]
fn none_is_absent() -> anyhow::Result<()> {
    let none = Maybe::<u32>::none();
    assert!(none.is_empty()?);
    assert_eq!(none.get().unwrap_err(), Error::empty());
    assert_eq!(none.raw()?, None);
    assert!(none.just(Vec::<Fallback<u32>>::new()).unwrap_err().is_empty());
    Ok(())
}

#[test]
fn or_is_left_to_right() -> anyhow::Result<()> {
    let none = Maybe::<i32>::none();
    let empty_a = Maybe::<i32>::none();
    let empty_b = Maybe::<i32>::lazy(|| None::<i32>);

    let first: [Fallback<i32>; 4] =
        [empty_a.clone().into(), empty_b.clone().into(), Some(5).into(), Some(6).into()];
    assert_eq!(none.or(first)?.get()?, &5);

    let swapped: [Fallback<i32>; 4] = [empty_a.into(), empty_b.into(), Some(6).into(), Some(5).into()];
    assert_eq!(none.or(swapped)?.get()?, &6);
    Ok(())
}

#[test]
fn exhausted_or_returns_the_same_absent() -> anyhow::Result<()> {
    let none = Maybe::<i32>::none();
    let before = none.resolved()?;
    let after = none.or([None, None])?;
    assert!(after.ptr_eq(&before));
    Ok(())
}

#[test]
fn just_never_returns_absent() -> anyhow::Result<()> {
    let none = Maybe::<i32>::none();
    assert!(none.just([None::<i32>]).unwrap_err().is_empty());
    assert!(none.just_get([Candidate::producer(|| None::<i32>)]).unwrap_err().is_empty());
    assert_eq!(none.just([None, Some(3)])?.get(), &3);
    Ok(())
}

#[test]
fn nullable_keeps_null_values() -> anyhow::Result<()> {
    let strict = Maybe::<Option<u8>>::of(Some(None));
    assert!(strict.is_empty()?);

    let nullable = Maybe::<Option<u8>>::of_nullable(Some(None));
    assert!(!nullable.is_empty()?);
    assert_eq!(nullable.get()?, None);

    // Unset is absent under both policies.
    assert!(Maybe::<Option<u8>>::of_nullable(None).is_empty()?);
    Ok(())
}

#[test]
fn map_on_absent_keeps_identity() -> anyhow::Result<()> {
    let none = Maybe::<i32>::none();
    let calls = Cell::new(0);
    let mapped = none.map(|v| {
        calls.set(calls.get() + 1);
        Some(*v)
    })?;
    assert!(mapped.ptr_eq(&none.resolved()?));
    assert_eq!(calls.get(), 0);
    Ok(())
}

#[test]
fn map_to_empty_value_downgrades_to_absent() -> anyhow::Result<()> {
    let five = Maybe::of(Some(5i32));
    let gone = five.map(|_| None::<i32>)?;
    assert!(gone.is_empty());

    let zero_is_empty = Config::<i32>::builder().is_empty(|v| *v == 0).build();
    let five = Maybe::of_with(zero_is_empty, Some(5));
    assert!(five.map(|v| Some(v - 5))?.is_empty());
    assert_eq!(five.map(|v| Some(v + 1))?.get()?, &6);
    Ok(())
}

#[test]
fn flat_map_passes_through_mapper_result() -> anyhow::Result<()> {
    let five = Maybe::of(Some(5i32));
    let config = five.config().clone();
    let out = five.flat_map(|v| config.wrap(Some(v * 3)))?;
    assert_eq!(out.get()?, &15);

    let none = Maybe::<i32>::none();
    let out = none.flat_map(|_| -> Resolved<i32> { unreachable!("mapper must not run") })?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn or_get_invokes_producers_but_or_does_not() -> anyhow::Result<()> {
    let hits = Rc::new(Cell::new(0));

    let none = Maybe::<Thunk>::nullable();
    let held = none.or([Some(observed(&hits))])?;
    assert_eq!(hits.get(), 0);
    // The callable itself became the present value.
    let thunk = held.get()?;
    assert_eq!(thunk(), 7);
    assert_eq!(hits.get(), 1);

    let counted = Rc::new(Cell::new(0));
    let ints = Maybe::<i32>::none();
    let counter = Rc::clone(&counted);
    let out = ints.or_get([Candidate::producer(move || {
        counter.set(counter.get() + 1);
        Some(11)
    })])?;
    assert_eq!(out.get()?, &11);
    assert_eq!(counted.get(), 1);
    Ok(())
}

#[test]
fn nested_instances_are_resolved_not_wrapped() -> anyhow::Result<()> {
    let present = Maybe::of(Some(true));
    let none = Maybe::<bool>::none();
    assert!(none.or([present.clone()])?.ptr_eq(&present.resolved()?));
    assert!(none.or([Maybe::<bool>::none()])?.is_empty());

    let getter = {
        let present = present.clone();
        move || present
    };
    assert_eq!(none.or_get([Candidate::producer(getter)])?.get()?, &true);
    Ok(())
}

#[test]
fn visit_forces_lazy_facade_once_and_dispatches_on_absent() -> anyhow::Result<()> {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let lazy = Maybe::<u32>::lazy(move || {
        counter.set(counter.get() + 1);
        None::<u32>
    });
    assert!(lazy.peek().is_none());

    let seen = RefCell::new(Vec::new());
    let out = lazy.visit(
        Visitor::new()
            .present(|v| seen.borrow_mut().push(format!("present {v}")))
            .absent(|| seen.borrow_mut().push("absent".to_string())),
    )?;
    assert!(out.is_empty());
    assert_eq!(runs.get(), 1);

    lazy.if_absent(|| seen.borrow_mut().push("again".to_string()))?;
    assert_eq!(lazy.if_present(|_| seen.borrow_mut().push("never".to_string())).unwrap_err(), Error::empty());
    assert_eq!(seen.into_inner(), vec!["absent".to_string(), "again".to_string()]);
    assert_eq!(lazy.get_with(|v| *v + 1).unwrap_err(), Error::empty());
    assert_eq!(lazy.raw_with(|v| v.copied().or(Some(0)))?, Some(0));
    assert_eq!(runs.get(), 1);
    Ok(())
}

#[test]
fn visit_on_present_facade_runs_no_handler() -> anyhow::Result<()> {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let lazy = Maybe::<u32>::lazy(move || {
        counter.set(counter.get() + 1);
        Some(9u32)
    });

    let calls = Cell::new(0);
    let out = lazy.visit(Visitor::new().present(|_| calls.set(calls.get() + 1)))?;
    lazy.if_present(|_| calls.set(calls.get() + 1))?;
    lazy.if_absent(|| calls.set(calls.get() + 1))?;
    assert_eq!(calls.get(), 0);
    assert!(out.ptr_eq(&lazy.resolved()?));

    assert_eq!(lazy.get_with(|v| *v * 2)?, 18);
    assert_eq!(lazy.raw_with(|v| v.copied())?, Some(9));
    assert_eq!(runs.get(), 1);
    Ok(())
}

#[test]
fn expected_uses_message_or_caller_error() {
    #[derive(Debug, PartialEq)]
    enum AppError {
        MissingPort,
        Lib(Error),
    }

    impl From<Error> for AppError {
        fn from(error: Error) -> Self { AppError::Lib(error) }
    }

    let none = Maybe::<u16>::none();
    assert_eq!(none.expected(Some("port is required")).unwrap_err().to_string(), "port is required");
    assert_eq!(none.expected(None).unwrap_err(), Error::empty());
    assert_eq!(none.expected_with(|| AppError::MissingPort).unwrap_err(), AppError::MissingPort);

    let placeholder = Maybe::<u16>::placeholder(Config::default());
    assert_eq!(
        placeholder.expected_with(|| AppError::MissingPort).unwrap_err(),
        AppError::Lib(Error::Lazy)
    );
    let present = Maybe::of(Some(1u16)).expected_with(|| AppError::MissingPort);
    assert_eq!(present.map(|p| *p.get()), Ok(1));
}

#[test]
fn custom_resolver_can_treat_nested_cycles_as_absent() -> anyhow::Result<()> {
    // Resolver that refuses to force anything still pending.
    let config = Config::<u8>::builder()
        .resolve(|maybe| {
            Ok(match maybe.peek() {
                Some(resolved) => Maybe::from(resolved),
                None => Maybe::none_with(maybe.config().clone()),
            })
        })
        .build();

    let slot: Rc<RefCell<Option<Maybe<u8>>>> = Rc::new(RefCell::new(None));
    let inner = Rc::clone(&slot);
    let looped = Maybe::lazy_with(config, move || match inner.borrow_mut().take() {
        Some(this) => Fallback::Nested(this),
        None => Fallback::Unset,
    });
    *slot.borrow_mut() = Some(looped.clone());

    assert!(looped.is_empty()?);
    assert_eq!(looped.or([Some(4)])?.get()?, &4);
    Ok(())
}

#[test]
fn bad_resolver_surfaces_resolution_error() {
    let config = Config::<u8>::builder()
        .resolve(|maybe| Ok(Maybe::placeholder(maybe.config().clone())))
        .build();
    let none = Maybe::none_with(config);
    assert_eq!(none.or([Maybe::of(Some(1u8))]).unwrap_err(), Error::Resolution);
}
