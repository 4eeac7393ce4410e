//! Customizing XML output with XmlOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_xmldoc::{encode_with_options, to_string_with_options, to_value, XmlOptions};
use std::error::Error;

#[derive(Debug, Serialize)]
struct DataRow {
    id: u32,
    value: String,
    active: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let rows = to_value(&vec![
        DataRow {
            id: 1,
            value: "alpha".to_string(),
            active: true,
        },
        DataRow {
            id: 2,
            value: "beta".to_string(),
            active: false,
        },
    ])?;

    // Defaults: <root>, <item>, declaration, compact
    println!("Default:");
    let options = XmlOptions::new();
    println!("{}\n", to_string_with_options(&encode_with_options(&rows, &options)?, &options)?);

    // Custom root and item names
    println!("Named rows:");
    let options = XmlOptions::new().with_root_name("table").with_item_name("row");
    println!("{}\n", to_string_with_options(&encode_with_options(&rows, &options)?, &options)?);

    // Indented, two spaces, no declaration
    println!("Pretty:");
    let options = XmlOptions::pretty()
        .with_root_name("table")
        .with_item_name("row")
        .with_indent(2)
        .without_declaration();
    println!("{}\n", to_string_with_options(&encode_with_options(&rows, &options)?, &options)?);

    // Legacy declaration
    println!("Declaration:");
    let options = XmlOptions::new().with_declaration("1.0", "ISO-8859-1");
    println!("{}", to_string_with_options(&encode_with_options(&rows, &options)?, &options)?);

    Ok(())
}
