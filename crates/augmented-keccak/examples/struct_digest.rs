use augmented_keccak::{create, TypeHint, Value};
use serde_json::json;

fn main() {
    let order = json!({
        "buyer": "0x8ba1f109551bd432803012645ac136ddd64dba72",
        "item": "widget",
        "quantity": 3,
        "price": { "type": "uint64", "data": 1999 },
        "gift": false
    });
    let hint = json!({ "quantity": "uint16" });

    let value = match Value::from_json(&order) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("invalid value: {}", err);
            std::process::exit(1);
        }
    };
    let hint = match TypeHint::from_json(&hint) {
        Ok(hint) => hint,
        Err(err) => {
            eprintln!("invalid hint: {}", err);
            std::process::exit(1);
        }
    };

    let mut encoder = create();
    match encoder.update_with(&value, &hint) {
        Ok(()) => println!("{}", encoder.digest()),
        Err(err) => {
            eprintln!("encoding failed: {}", err);
            std::process::exit(1);
        }
    }
}
