#![allow(unused_imports)]
use {
    ::futures::{
        channel::oneshot,
        executor::block_on,
    },
    ::serde_json::json,
    ::core::future::Future,
    ::std::{
        collections::BTreeMap,
        sync::{Arc, Mutex},
    },
    crate::{
        prelude::*,
        bag_to_future,
        sequence_to_future,
        thunk_to_future,
        to_future,
        Callback,
        Coerced,
        Instance,
        Shape,
        Thunk,
    },
};

fn run (generator: Handle)
  -> Result<Value, Error>
{
    block_on(drive(generator, Context::none(), vec![]))
}

/// A promise settled from the outside, through the returned sender.
fn deferred ()
  -> (oneshot::Sender<Result<Value, Error>>, Promise)
{
    let (tx, rx) = oneshot::channel();
    let promise = Promise::new(async move {
        rx.await.unwrap_or(Err(Error::CallbackDropped))
    });
    (tx, promise)
}

fn rejection (result: Result<Value, Error>)
  -> Value
{
    match result {
        | Err(Error::Rejected(value)) => value,
        | other => panic!("expected a rejection, got {:?}", other),
    }
}

#[test]
fn returns_immediately ()
{
    let generator = GeneratorFn::boxed(|_co| async move {
        Ok(json!("V"))
    });
    assert_eq!(run(generator).unwrap(), "V");
}

#[test]
fn yields_fulfilled_future ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        let x = co.yield_(Promise::resolved(42.into())).await?;
        Ok(x)
    });
    assert_eq!(run(generator).unwrap(), 42);
}

#[test]
fn uncaught_rejection_propagates ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        co.yield_(Promise::rejected(json!("E").into())).await?;
        Ok(json!("unreachable"))
    });
    assert_eq!(rejection(run(generator)), "E");
}

#[test]
fn caught_rejection_resumes ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        let recovered = match co.yield_(Promise::rejected(json!("E").into())).await {
            | Ok(_) => json!("no error?"),
            | Err(err) => json!({ "caught": err.rejection().cloned() }),
        };
        let next = co.yield_(Promise::resolved(1.into())).await?;
        Ok(json!([recovered, next]))
    });
    assert_eq!(run(generator).unwrap(), json!([{ "caught": "E" }, 1]));
}

#[test]
fn generator_error_rejects_verbatim ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        let _ = co.yield_(Promise::resolved(1.into())).await?;
        Err(Error::from(json!({ "code": 7 })))
    });
    assert_eq!(rejection(run(generator)), json!({ "code": 7 }));
}

#[test]
fn coercing_a_future_is_a_no_op ()
{
    let promise = Promise::resolved(json!("x"));
    let addr = promise.addr();
    match to_future(promise.into(), &Context::none()) {
        | Coerced::Future(same) => {
            assert_eq!(same.addr(), addr);
            assert_eq!(block_on(same).unwrap(), "x");
        },
        | Coerced::Plain(value) => panic!("coerced into {:?}", value),
    }
}

#[test]
fn shapes ()
{
    let shape = |y: Yieldable| y.shape();
    assert_eq!(shape(Value::Null.into()), Shape::Falsy);
    assert_eq!(shape(json!(false).into()), Shape::Falsy);
    assert_eq!(shape(json!(0).into()), Shape::Falsy);
    assert_eq!(shape(json!("").into()), Shape::Falsy);
    assert_eq!(shape(json!(5).into()), Shape::Scalar);
    assert_eq!(shape(json!("text").into()), Shape::Scalar);
    assert_eq!(shape(json!(true).into()), Shape::Scalar);
    assert_eq!(shape(json!([]).into()), Shape::Sequence);
    assert_eq!(shape(json!({}).into()), Shape::Bag);
    assert_eq!(shape(Promise::resolved(Value::Null).into()), Shape::Future);
    assert_eq!(shape(Thunk::new(|_, _| ()).into()), Shape::Thunk);
    assert_eq!(shape(Factory::new(|_, _| Value::Null).into()), Shape::Factory);
    assert_eq!(
        shape(GeneratorFn::boxed(|_co| async { Ok(Value::Null) }).into()),
        Shape::Generator,
    );
    assert_eq!(shape(Vec::<Yieldable>::new().into()), Shape::Sequence);
    assert_eq!(shape(BTreeMap::<String, Yieldable>::new().into()), Shape::Bag);
    assert!(!Shape::Falsy.is_future_like());
    assert!(!Shape::Scalar.is_future_like());
    assert!(Shape::Thunk.is_future_like());
}

#[test]
fn plain_values_are_not_coerced ()
{
    for value in vec![Value::Null, json!(0), json!(5), json!("s")] {
        match to_future(value.clone().into(), &Context::none()) {
            | Coerced::Plain(same) => assert_eq!(same, value),
            | Coerced::Future(_) => panic!("{} was coerced", value),
        }
    }
}

#[test]
fn invalid_yield ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        co.yield_(json!(5)).await?;
        Ok(Value::Null)
    });
    match run(generator) {
        | Err(err @ Error::InvalidYield { .. }) => {
            assert!(err.to_string().contains("\"5\""), "{}", err);
        },
        | other => panic!("expected an invalid yield, got {:?}", other),
    }
}

#[test]
fn invalid_yield_is_not_thrown_in ()
{
    let recovered = Arc::new(Mutex::new(false));
    let generator = GeneratorFn::boxed({
        let recovered = Arc::clone(&recovered);
        |co| async move {
            if co.yield_(Value::Null).await.is_err() {
                *recovered.lock().unwrap() = true;
            }
            Ok(json!("recovered"))
        }
    });
    assert!(matches!(run(generator), Err(Error::InvalidYield { ref shown }) if shown == "null"));
    assert!(!*recovered.lock().unwrap());
}

#[test]
fn sequence_keeps_positions ()
{
    let (tx1, first) = deferred();
    let (tx3, third) = deferred();
    let all = sequence_to_future(
        vec![first.into(), json!(2).into(), third.into()],
        &Context::none(),
    );
    // settle out of order
    tx3.send(Ok(json!(3))).unwrap();
    tx1.send(Ok(json!(1))).unwrap();
    assert_eq!(block_on(all).unwrap(), json!([1, 2, 3]));
}

#[test]
fn sequence_rejects_with_first_rejection ()
{
    let (_never, pending) = deferred();
    let (tx, failing) = deferred();
    let all = sequence_to_future(
        vec![pending.into(), failing.into()],
        &Context::none(),
    );
    tx.send(Err(json!("boom").into())).unwrap();
    assert_eq!(rejection(block_on(all)), "boom");
}

#[test]
fn sequence_of_plain_values ()
{
    let all = sequence_to_future(
        vec![json!(0).into(), Value::Null.into(), json!("a").into()],
        &Context::none(),
    );
    assert_eq!(block_on(all).unwrap(), json!([0, null, "a"]));
    let none = sequence_to_future(vec![], &Context::none());
    assert_eq!(block_on(none).unwrap(), json!([]));
}

#[test]
fn bag_keeps_keys ()
{
    let mut bag = BTreeMap::new();
    bag.insert("a".to_owned(), Yieldable::from(Promise::resolved(1.into())));
    bag.insert("b".to_owned(), json!(2).into());
    let bag = bag_to_future(bag, &Context::none());
    assert_eq!(block_on(bag).unwrap(), json!({ "a": 1, "b": 2 }));
}

#[test]
fn bag_rejects_regardless_of_pending_keys ()
{
    let (_never, a) = deferred();
    let mut bag = BTreeMap::new();
    bag.insert("a".to_owned(), Yieldable::from(a));
    bag.insert("b".to_owned(), Promise::rejected(json!("boom").into()).into());
    assert_eq!(rejection(block_on(bag_to_future(bag, &Context::none()))), "boom");
}

fn poll_once (promise: &'_ mut Promise)
  -> ::core::task::Poll<Result<Value, Error>>
{
    let waker = ::futures::task::noop_waker();
    let mut cx = ::core::task::Context::from_waker(&waker);
    Pin::new(promise).poll(&mut cx)
}

#[test]
fn long_sequence_rejects_past_a_pending_head ()
{
    let (_never, head) = deferred();
    let mut elements = vec![Yieldable::from(head)];
    elements.extend((0 .. 40).map(|_| Yieldable::from(Promise::resolved(1.into()))));
    elements.push(Promise::rejected(json!("boom").into()).into());
    let mut all = sequence_to_future(elements, &Context::none());
    match poll_once(&mut all) {
        | ::core::task::Poll::Ready(result) => assert_eq!(rejection(result), "boom"),
        | ::core::task::Poll::Pending => panic!("rejection held back by the pending head"),
    }
}

#[test]
fn long_sequence_keeps_positions ()
{
    let (tx, head) = deferred();
    let mut elements = vec![Yieldable::from(head)];
    elements.extend((1_i64 .. 50).map(|i| Yieldable::from(Promise::resolved(i.into()))));
    let mut all = sequence_to_future(elements, &Context::none());
    assert!(poll_once(&mut all).is_pending());
    tx.send(Ok(json!(0))).unwrap();
    assert_eq!(block_on(all).unwrap(), Value::Array((0_i64 .. 50).map(Value::from).collect()));
}

#[test]
fn large_bag_rejects_past_a_pending_key ()
{
    let (_never, a) = deferred();
    let mut bag = BTreeMap::new();
    bag.insert("a".to_owned(), Yieldable::from(a));
    for i in 0_i64 .. 40 {
        bag.insert(format!("k{:02}", i), Promise::resolved(i.into()).into());
    }
    bag.insert("z".to_owned(), Promise::rejected(json!("boom").into()).into());
    let mut all = bag_to_future(bag, &Context::none());
    match poll_once(&mut all) {
        | ::core::task::Poll::Ready(result) => assert_eq!(rejection(result), "boom"),
        | ::core::task::Poll::Pending => panic!("rejection held back by the pending key"),
    }
}

#[test]
fn sequence_rejects_with_earliest_settled ()
{
    let (tx_a, a) = deferred();
    let (tx_b, b) = deferred();
    let mut all = sequence_to_future(vec![a.into(), b.into()], &Context::none());
    assert!(poll_once(&mut all).is_pending());
    tx_b.send(Err(json!("b first").into())).unwrap();
    tx_a.send(Err(json!("a second").into())).unwrap();
    assert_eq!(rejection(block_on(all)), "b first");
}

#[test]
fn bag_rejects_with_earliest_settled ()
{
    let (tx_a, a) = deferred();
    let (tx_b, b) = deferred();
    let mut bag = BTreeMap::new();
    bag.insert("a".to_owned(), Yieldable::from(a));
    bag.insert("b".to_owned(), Yieldable::from(b));
    let mut all = bag_to_future(bag, &Context::none());
    assert!(poll_once(&mut all).is_pending());
    tx_b.send(Err(json!("b first").into())).unwrap();
    tx_a.send(Err(json!("a second").into())).unwrap();
    assert_eq!(rejection(block_on(all)), "b first");
}

#[test]
fn coercion_agrees_with_shape ()
{
    let yieldables: Vec<Yieldable> = vec![
        Value::Null.into(),
        json!(0).into(),
        json!("").into(),
        json!(false).into(),
        json!(5).into(),
        json!("s").into(),
        json!([]).into(),
        json!({ "k": 1 }).into(),
        Promise::resolved(Value::Null).into(),
        Thunk::new(|_, done| done.resolve(Value::Null)).into(),
        Factory::new(|_, _| Value::Null).into(),
        GeneratorFn::boxed(|_co| async { Ok(Value::Null) }).into(),
        Vec::<Yieldable>::new().into(),
        BTreeMap::<String, Yieldable>::new().into(),
    ];
    for yieldable in yieldables {
        let shape = yieldable.shape();
        let coerced = to_future(yieldable, &Context::none());
        assert_eq!(
            matches!(coerced, Coerced::Future(_)),
            shape.is_future_like(),
            "{:?}",
            shape,
        );
    }
}

#[test]
fn nested_collections ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        let mut bag = BTreeMap::new();
        bag.insert("list".to_owned(), Yieldable::Sequence(vec![
            Promise::resolved(1.into()).into(),
            json!({ "plain": [true] }).into(),
        ]));
        bag.insert("json".to_owned(), json!([1, 2]).into());
        co.yield_(bag).await
    });
    assert_eq!(
        run(generator).unwrap(),
        json!({ "list": [1, { "plain": [true] }], "json": [1, 2] }),
    );
}

#[test]
fn thunk_results ()
{
    let ctx = Context::none();
    let pair = thunk_to_future(
        Thunk::new(|_, done| done.call(Value::Null, vec![json!("x"), json!("y")])),
        &ctx,
    );
    assert_eq!(block_on(pair).unwrap(), json!(["x", "y"]));

    let single = thunk_to_future(
        Thunk::new(|_, done| done.call(json!(false), vec![json!("x")])),
        &ctx,
    );
    assert_eq!(block_on(single).unwrap(), "x");

    let empty = thunk_to_future(
        Thunk::new(|_, done| done.call(Value::Null, vec![])),
        &ctx,
    );
    assert_eq!(block_on(empty).unwrap(), Value::Null);

    let failure = thunk_to_future(
        Thunk::new(|_, done| done.call(json!("err"), vec![])),
        &ctx,
    );
    assert_eq!(rejection(block_on(failure)), "err");
}

#[test]
fn thunk_settles_once ()
{
    let kept: Arc<Mutex<Option<Callback>>> = Arc::default();
    let promise = thunk_to_future(
        Thunk::new({
            let kept = Arc::clone(&kept);
            move |_, done| {
                done.resolve(json!("first"));
                done.reject(json!("second").into());
                *kept.lock().unwrap() = Some(done);
            }
        }),
        &Context::none(),
    );
    assert_eq!(block_on(promise).unwrap(), "first");
    // late calls after the promise is gone are absorbed too
    kept.lock().unwrap().as_ref().unwrap().resolve(json!("third"));
}

#[test]
fn thunk_dropping_its_callback ()
{
    let promise = thunk_to_future(Thunk::new(|_, done| drop(done)), &Context::none());
    assert!(matches!(block_on(promise), Err(Error::CallbackDropped)));
}

#[test]
fn thunk_sees_context ()
{
    struct Prefix(&'static str);

    let generator = GeneratorFn::boxed(|co| async move {
        co.yield_(Thunk::new(|ctx, done| {
            let prefix = ctx.get::<Prefix>().map_or("?", |p| p.0);
            done.resolve(format!("{}-thunk", prefix).into());
        })).await
    });
    let out = block_on(drive(generator, Context::new(Prefix("ctx")), vec![]));
    assert_eq!(out.unwrap(), "ctx-thunk");
}

#[test]
fn factory_gets_context_and_args ()
{
    let factory = Factory::new(|ctx: &Context, args: Vec<Value>| {
        let base = ctx.get::<i64>().copied().unwrap_or(0);
        GeneratorFn::boxed(move |co| async move {
            let n = co.yield_(Promise::resolved(args[0].clone())).await?;
            Ok((base + n.as_i64().unwrap_or(0)).into())
        })
    });
    let out = block_on(drive(factory, Context::new(40_i64), vec![json!(2)]));
    assert_eq!(out.unwrap(), 42);
}

#[test]
fn factory_pass_through ()
{
    let factory = Factory::new(|_, _| json!({ "not": "a generator" }));
    assert!(matches!(factory.call(&Context::none(), vec![]), Instance::Value(_)));
    let out = block_on(drive(factory, Context::none(), vec![]));
    assert_eq!(out.unwrap(), json!({ "not": "a generator" }));
}

#[test]
fn nested_generators_and_factories ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        let inner = GeneratorFn::boxed(|co| async move {
            co.yield_(Promise::resolved(1.into())).await
        });
        let a = co.yield_(inner).await?;
        let b = co.yield_(Factory::new(|_, args: Vec<Value>| {
            assert!(args.is_empty());
            GeneratorFn::boxed(|_co| async { Ok(json!(2)) })
        })).await?;
        Ok(json!([a, b]))
    });
    assert_eq!(run(generator).unwrap(), json!([1, 2]));
}

#[test]
fn nested_rejection_is_thrown_into_parent ()
{
    let generator = GeneratorFn::boxed(|co| async move {
        let inner = GeneratorFn::boxed(|_co| async move {
            Err(Error::from(json!("inner")))
        });
        match co.yield_(inner).await {
            | Err(err) => Ok(json!({ "parent caught": err.rejection().cloned() })),
            | Ok(_) => Ok(Value::Null),
        }
    });
    assert_eq!(run(generator).unwrap(), json!({ "parent caught": "inner" }));
}

#[test]
fn strict_sequencing ()
{
    let log = Arc::new(Mutex::new(Vec::<&'static str>::new()));
    let (tx, first) = deferred();
    let generator = GeneratorFn::boxed({
        let log = Arc::clone(&log);
        move |co| async move {
            log.lock().unwrap().push("yield first");
            let a = co.yield_(first).await?;
            log.lock().unwrap().push("build second");
            let b = co.yield_(Promise::resolved(json!(2))).await?;
            Ok(json!([a, b]))
        }
    });
    let mut driving = drive(generator, Context::none(), vec![]);
    let waker = ::futures::task::noop_waker();
    let mut cx = ::core::task::Context::from_waker(&waker);
    assert!(Pin::new(&mut driving).poll(&mut cx).is_pending());
    assert_eq!(*log.lock().unwrap(), ["yield first"]);
    tx.send(Ok(json!(1))).unwrap();
    assert_eq!(block_on(driving).unwrap(), json!([1, 2]));
    assert_eq!(*log.lock().unwrap(), ["yield first", "build second"]);
}

#[test]
fn wrapped_is_reusable ()
{
    let factory = Factory::new(|_, args: Vec<Value>| {
        GeneratorFn::boxed(move |co| async move {
            co.yield_(Promise::resolved(Value::Array(args))).await
        })
    });
    let wrapped = wrap(factory);
    let _: &Factory = wrapped.generator_factory();
    assert_eq!(block_on(wrapped.call(Context::none(), vec![json!(1)])).unwrap(), json!([1]));
    assert_eq!(block_on(wrapped.call(Context::none(), vec![])).unwrap(), json!([]));
    let out = block_on(drive(wrapped, Context::none(), vec![json!("via drive")]));
    assert_eq!(out.unwrap(), json!(["via drive"]));
}

mod generator_fn {
    use super::*;

    fn step (generator: &'_ mut Handle, arg: Resume)
      -> GeneratorState<Yieldable, Result<Value, Error>>
    {
        generator.as_mut().resume(arg)
    }

    #[test]
    fn throw_into_fresh_generator_skips_body ()
    {
        let ran = Arc::new(Mutex::new(false));
        let mut generator = GeneratorFn::boxed({
            let ran = Arc::clone(&ran);
            move |_co| async move {
                *ran.lock().unwrap() = true;
                Ok(Value::Null)
            }
        });
        match step(&mut generator, Resume::Throw(json!("early").into())) {
            | GeneratorState::Returned(ret) => assert_eq!(rejection(ret), "early"),
            | GeneratorState::Yielded(_) => panic!("yielded"),
        }
        assert!(!*ran.lock().unwrap());
    }

    #[test]
    fn resuming_a_completed_generator ()
    {
        let mut generator = GeneratorFn::boxed(|_co| async { Ok(json!(1)) });
        assert!(matches!(
            step(&mut generator, Resume::Next(Value::Null)),
            GeneratorState::Returned(Ok(ref v)) if *v == 1,
        ));
        assert!(matches!(
            step(&mut generator, Resume::Next(json!(2))),
            GeneratorState::Returned(Ok(Value::Null)),
        ));
        match step(&mut generator, Resume::Throw(json!("late").into())) {
            | GeneratorState::Returned(ret) => assert_eq!(rejection(ret), "late"),
            | GeneratorState::Yielded(_) => panic!("yielded"),
        }
    }

    #[test]
    fn resume_args_reach_the_body ()
    {
        let mut generator = GeneratorFn::boxed(|co| async move {
            let mut seen = vec![];
            loop {
                match co.yield_(Value::Null).await {
                    | Ok(Value::Null) => break,
                    | Ok(value) => seen.push(value),
                    | Err(err) => seen.push(json!({ "thrown": err.rejection().cloned() })),
                }
            }
            Ok(Value::Array(seen))
        });
        assert!(!step(&mut generator, Resume::Next(json!("ignored"))).is_done());
        assert!(!step(&mut generator, Resume::Next(json!(12))).is_done());
        assert!(!step(&mut generator, Resume::Throw(json!(17).into())).is_done());
        match step(&mut generator, Resume::Next(Value::Null)) {
            | GeneratorState::Returned(ret) => {
                assert_eq!(ret.unwrap(), json!([12, { "thrown": 17 }]));
            },
            | GeneratorState::Yielded(_) => panic!("yielded"),
        }
    }

    #[test]
    fn resume_through_pinned_pointers ()
    {
        let mut generator = GeneratorFn::boxed(|co| async move {
            co.yield_(Value::Null).await
        });
        // `Pin<Box<G>>`
        assert!(!generator.resume_unpin(Resume::Next(Value::Null)).is_done());
        // `Pin<&mut G>`
        match generator.as_mut().resume_unpin(Resume::Next(json!(3))) {
            | GeneratorState::Returned(ret) => assert_eq!(ret.unwrap(), 3),
            | GeneratorState::Yielded(_) => panic!("yielded"),
        }
    }

    #[test]
    fn foreign_await ()
    {
        let mut generator = GeneratorFn::boxed(|_co| async move {
            ::futures::future::pending::<()>().await;
            Ok(Value::Null)
        });
        assert!(matches!(
            step(&mut generator, Resume::Next(Value::Null)),
            GeneratorState::Returned(Err(Error::ForeignAwait)),
        ));
    }

    #[test]
    fn panicking_body_is_completed ()
    {
        let mut generator = GeneratorFn::boxed(|_co| async move {
            if true {
                panic!("body panicked");
            }
            Ok(Value::Null)
        });
        let panicked = ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| {
            step(&mut generator, Resume::Next(Value::Null))
        }));
        assert!(panicked.is_err());
        assert!(matches!(
            step(&mut generator, Resume::Next(Value::Null)),
            GeneratorState::Returned(Ok(Value::Null)),
        ));
    }
}
