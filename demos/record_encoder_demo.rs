// Example demonstrating record encoding built from composed accessors
//
// This example walks through lifting a JSON document into the dynamic
// value plane, building extractors from property plucks, and encoding a
// flat summary mapping out of a nested source.

use recompose::compose::{compose_type_safe, Step};
use recompose::encoder::{encode_property, record_encoder};
use recompose::ops::predicates::is_string;
use recompose::property::{get_property, pluck_property};
use recompose::value::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Record Encoder Demo ===\n");

    // Setup: a nested source document, as it would arrive off the wire
    let source = Value::from(serde_json::json!({
        "orderId": 981,
        "customer": {
            "name": "foo",
            "address": { "city": "Utrecht" }
        },
        "total": 125.5
    }));
    println!("Source: {}", serde_json::to_string_pretty(&source)?);

    // A predicate-gated pipeline: uppercase the city, but only while the
    // value stays in the string domain.
    let steps: Vec<Step<Value>> = vec![Box::new(|value| match value {
        Value::Str(s) => Value::Str(s.to_uppercase()),
        other => other,
    })];
    let shout = compose_type_safe(is_string(), steps)?;
    let city = pluck_property(["customer", "address", "city"]);

    // Declare the output field-by-field.
    let mapper = record_encoder(Value::empty_mapping())?
        .with_all([
            encode_property("id", get_property("orderId")),
            encode_property("customer", pluck_property(["customer", "name"])),
            encode_property("city", move |source: &Value| {
                city(source).and_then(|value| shout(value))
            }),
            encode_property("fax", get_property("fax")),
        ])?
        .build();

    println!("\nEncoding with 4 directives: id, customer, city, fax");
    let output = mapper(&source);

    println!("\nOutput: {}", serde_json::to_string_pretty(&output)?);
    println!("\nNote how the missing 'fax' property arrived as null");
    println!("rather than being omitted, and the source is untouched.");

    // The same mapper works on any number of independent sources.
    let other = Value::from(serde_json::json!({
        "orderId": 982,
        "customer": { "name": "bar" }
    }));
    println!(
        "\nSecond source (no address): {}",
        serde_json::to_string(&mapper(&other))?
    );

    Ok(())
}
