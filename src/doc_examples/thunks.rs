fn main ()
{
    use ::co_gen::{prelude::*, Thunk};
    use ::futures::executor::block_on;
    use ::serde_json::json;
    use ::std::collections::BTreeMap;

    struct Config {
        retries: u64,
    }

    /// A callback-style read, completing through `done`.
    fn read (key: &'static str)
      -> Thunk
    {
        Thunk::new(move |ctx, done| {
            let retries = ctx.get::<Config>().map_or(0, |cfg| cfg.retries);
            if key.is_empty() {
                done.call("empty key".into(), vec![]);
            } else {
                done.call(Value::Null, vec![key.into(), retries.into()]);
            }
        })
    }

    let load = wrap(Factory::new(|_, _| {
        GeneratorFn::boxed(|co| async move {
            make_yield!(co);
            let mut bag = BTreeMap::new();
            bag.insert("a".to_owned(), Yieldable::from(read("a")));
            bag.insert("b".to_owned(), read("b").into());
            bag.insert("plain".to_owned(), json!(3).into());
            let both = yield_!(bag)?;
            let missing = yield_!(read("")).unwrap_err();
            Ok(json!({ "both": both, "missing": missing.to_string() }))
        })
    }));

    let out = block_on(load.call(Context::new(Config { retries: 2 }), vec![]));
    assert_eq!(
        out.unwrap(),
        json!({
            "both": { "a": ["a", 2], "b": ["b", 2], "plain": 3 },
            "missing": "rejected: empty key",
        }),
    );
}
