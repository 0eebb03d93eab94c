fn main ()
{
    use ::co_gen::prelude::*;
    use ::futures::executor::block_on;
    use ::serde_json::json;

    #[generator]
    fn fetch_user (id: u64)
    {
        let name = yield_!(Promise::resolved(format!("user-{}", id).into()))?;
        Ok(json!({ "id": id, "name": name }))
    }

    #[generator]
    fn dashboard (ids: Vec<u64>)
    {
        // all users at once, in order
        let users = yield_!(
            ids .into_iter()
                .map(|id| Yieldable::from(fetch_user(id)))
                .collect::<Vec<_>>()
        )?;
        let fallback = match yield_!(Promise::rejected(json!("offline").into())) {
            | Ok(value) => value,
            | Err(_) => json!("cached"),
        };
        Ok(json!({ "users": users, "status": fallback }))
    }

    let out = block_on(drive(dashboard(vec![1, 2]), Context::none(), vec![]));
    assert_eq!(
        out.unwrap(),
        json!({
            "users": [
                { "id": 1, "name": "user-1" },
                { "id": 2, "name": "user-2" },
            ],
            "status": "cached",
        }),
    );
}
