//! Building values with the xml! macro and walking decoded documents.
//!
//! Run with: cargo run --example dynamic_values

use serde_xmldoc::{encode, from_str, to_string_pretty, xml, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let catalog = xml!({
        "@attributes": {"updated": "2024-05-01"},
        "book": [
            {"@attributes": {"id": 1}, "title": "Dune", "price": 9.5},
            {"@attributes": {"id": 2}, "title": "Emma", "price": 4.25}
        ],
        "note": {"@value": "prices in <EUR>", "@cdata": true}
    });

    let root = encode(&catalog)?;
    println!("{}\n", to_string_pretty(&root)?);

    // Text is untyped; boxing recovers numbers and booleans
    let parsed = from_str(&root.to_string())?;
    let mut total = 0.0;
    for book in parsed.children_by_name("book") {
        if let Some(price) = book.child("price").map(|p| p.boxed_value()) {
            total += price.as_f64().unwrap_or(0.0);
        }
    }
    println!("total price: {}", total);

    match parsed.to_value() {
        Value::Map(map) => {
            for (key, value) in &map {
                println!("{} => {:?}", key, value);
            }
        }
        other => println!("unexpected shape: {:?}", other),
    }

    Ok(())
}
