use serde_json::{Value, json};

/// A response body of the shape typical API tests assert against
pub fn order_response() -> Value {
    json!({
        "id": "a9f7a56b-8d5c-455c-9d13-808461d17b91",
        "status": "SHIPPED",
        "total": 42.50,
        "customer": {
            "name": "Ada",
            "email": "ada@example.com",
            "vip": true
        },
        "lines": [
            {"sku": "A-1", "qty": 2, "price": 10.25},
            {"sku": "B-7", "qty": 1, "price": 22.00}
        ],
        "notes": null
    })
}

/// Fuzzy expectation for [`order_response`]
pub fn order_expectation() -> Value {
    json!({
        "id": "#uuid",
        "status": "#regex [A-Z]+",
        "total": "#number",
        "customer": {"name": "#string", "email": "#string", "vip": "#boolean"},
        "lines": "#[2] #object",
        "notes": "#null",
        "coupon": "##string"
    })
}

/// `count` records for throughput-style tests
pub fn records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| json!({"id": i, "name": format!("item-{}", i), "tags": ["a", "b"]}))
            .collect(),
    )
}
