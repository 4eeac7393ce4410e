//! Encoding a struct as XML and reading it back.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_xmldoc::{from_str, to_xml_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Team {
    title: String,
    user: Vec<User>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let team = Team {
        title: "Platform".to_string(),
        user: vec![
            User {
                id: 42,
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
            },
            User {
                id: 43,
                name: "Bob Smith".to_string(),
                email: "bob@example.com".to_string(),
            },
        ],
    };

    // Serialize to XML
    let xml = to_xml_string(&team)?;
    println!("XML output:\n{}\n", xml);

    // Parse and inspect the element tree
    let root = from_str(&xml)?;
    for user in root.children_by_name("user") {
        let name = user.child("name").and_then(|n| n.value()).unwrap_or("?");
        println!("found user {}", name);
    }

    // Back to a struct, with JSON as the typed bridge
    let value = serde_json::to_value(root.to_value())?;
    let team_back: Team = serde_json::from_value(value)?;
    assert_eq!(team, team_back);
    println!("✓ Round-trip successful");

    Ok(())
}
