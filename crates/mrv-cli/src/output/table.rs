use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Two-column field/value table. Nested sections such as
/// `detailed_analysis` appear as dotted field names.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(_) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in flatten(value) {
                builder.push_record([key, format_scalar(&val)]);
            }
            println!("{}", Table::from(builder));

            if let Some(Value::String(notes)) = value.get("validation_notes") {
                println!("\nNotes: {}", notes);
            }
        }
        _ => println!("{}", format_scalar(value)),
    }
}
