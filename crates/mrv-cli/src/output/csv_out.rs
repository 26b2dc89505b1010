use serde_json::Value;
use std::io;

use super::{flatten, format_scalar};

/// Write output as a two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if value.is_object() {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in flatten(value) {
            let _ = wtr.write_record([key, format_scalar(&val)]);
        }
    } else {
        let _ = wtr.write_record([format_scalar(value)]);
    }

    let _ = wtr.flush();
}
