use anyhow::{Context as _, Result};
use serde_json::Value;

use super::Context;
use crate::cli::PrefAction;

pub fn cmd_pref(ctx: &Context, action: PrefAction) -> Result<()> {
    let mut store = ctx.open_store()?;

    match action {
        PrefAction::Get { key: Some(key) } => {
            let value = store.preference(&key);
            if ctx.json {
                return super::print_json(&value);
            }
            match value {
                Some(value) => println!("{} = {}", key, value),
                None => println!("Preference '{}' is not set", key),
            }
        }
        PrefAction::Get { key: None } => {
            if ctx.json {
                let all: serde_json::Map<String, Value> = store
                    .preferences()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect();
                return super::print_json(&all);
            }

            let mut any = false;
            for (key, value) in store.preferences() {
                println!("{} = {}", key, value);
                any = true;
            }
            if !any {
                println!("No preferences set.");
            }
        }
        PrefAction::Set { key, value } => {
            let value = parse_value(&value);
            store
                .set_preference(&key, value.clone())
                .with_context(|| format!("Failed to save preference '{}'", key))?;
            println!("✓ {} = {}", key, value);
        }
    }

    Ok(())
}

/// JSON literal when it parses as one, plain string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
