// Reshape a flat record into a nested document
// Usage: cargo run --example reshape

use reshaper_core::{Input, ObjectTransformer};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let transformer = ObjectTransformer::from_value(&json!({
        "contract": {
            "_id": "contract_id",
            "reference": "ref_number"
        },
        "customer": {
            "name": "customer_name",
            "address": {"city": "city", "zip": "postal_code"}
        }
    }))?;

    let record: Input = serde_json::from_value(json!({
        "contract_id": 42,
        "ref_number": "C-2024-001",
        "customer_name": "Ada",
        "city": "Berlin",
        "unused": true
    }))?;

    let report = transformer.transform_with_report(Some(&record), None)?;
    println!("{}", serde_json::to_string_pretty(&report.output)?);

    for field in &report.missing {
        println!("missing: {} <- {}", field.path, field.source_key);
    }

    Ok(())
}
