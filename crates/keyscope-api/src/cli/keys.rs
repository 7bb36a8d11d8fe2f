//! Key subcommands: list, get, set, delete.
//!
//! Each command prints styled text by default and a single JSON document with
//! `--json`.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use keyscope_types::error::ConsoleError;

use crate::state::AppState;

/// Values longer than this are cut in the list table.
const PREVIEW_CHARS: usize = 60;

/// List keys containing `search`, optionally with a value preview column.
pub async fn list_keys(
    state: &AppState,
    search: Option<&str>,
    limit: Option<i64>,
    values: bool,
    json: bool,
) -> Result<()> {
    if values {
        return list_entries(state, search, limit, json).await;
    }

    let keys = state
        .console
        .list_keys(search, limit)
        .await
        .context("Failed to fetch keys")?;

    if json {
        let result = serde_json::json!({
            "keys": keys,
            "count": keys.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if keys.is_empty() {
        print_no_keys(search);
        return Ok(());
    }

    println!();
    println!("  Keys ({} shown)", keys.len());
    println!();
    for key in &keys {
        println!("  {}", style(key).cyan());
    }
    println!();

    Ok(())
}

async fn list_entries(
    state: &AppState,
    search: Option<&str>,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let entries = state
        .console
        .list_entries(search, limit)
        .await
        .context("Failed to fetch entries")?;

    if json {
        let result = serde_json::json!({
            "entries": entries,
            "count": entries.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if entries.is_empty() {
        print_no_keys(search);
        return Ok(());
    }

    println!();
    println!("  Keys ({} shown)", entries.len());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Key").fg(Color::White),
        Cell::new("Value Preview").fg(Color::White),
    ]);

    for entry in &entries {
        let preview = match &entry.value {
            Some(value) => preview(value),
            None => "(unreadable)".to_string(),
        };
        table.add_row(vec![
            Cell::new(&entry.key).fg(Color::Cyan),
            Cell::new(&preview).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// Print the display text of one key's value.
pub async fn get_value(state: &AppState, key: &str, json: bool) -> Result<()> {
    match state.console.get_value(key).await {
        Ok(value) => {
            let text = value.display();
            if json {
                let result = serde_json::json!({
                    "key": key,
                    "type": value_type_name(&value),
                    "value": text,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!();
                println!("  {} = {}", style(key).cyan().bold(), style(text).white());
                println!();
            }
            Ok(())
        }
        Err(ConsoleError::KeyNotFound(_)) => {
            if json {
                let result = serde_json::json!({
                    "key": key,
                    "value": null,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!();
                println!(
                    "  {} Key '{}' not found",
                    style("i").blue().bold(),
                    style(key).cyan(),
                );
                println!();
            }
            Ok(())
        }
        Err(e) => Err(e).context("Failed to fetch value"),
    }
}

/// Create or overwrite a string value.
pub async fn set_value(state: &AppState, key: &str, value: &str, json: bool) -> Result<()> {
    state
        .console
        .set_value(key, value)
        .await
        .context("Failed to set key-value pair")?;

    if json {
        let result = serde_json::json!({
            "key": key,
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  {} Set '{}'", style("ok").green(), style(key).cyan());
        println!();
    }

    Ok(())
}

/// Delete a key. A missing key is reported as an error.
pub async fn delete_key(state: &AppState, key: &str, json: bool) -> Result<()> {
    state
        .console
        .delete_key(key)
        .await
        .with_context(|| format!("Failed to delete key '{key}'"))?;

    if json {
        let result = serde_json::json!({ "deleted": key });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Deleted key '{}'",
            style("ok").green(),
            style(key).cyan(),
        );
        println!();
    }

    Ok(())
}

fn print_no_keys(search: Option<&str>) {
    println!();
    match search.filter(|s| !s.is_empty()) {
        Some(term) => println!(
            "  {} No keys containing '{}'.",
            style("i").blue().bold(),
            style(term).cyan(),
        ),
        None => println!("  {} No keys found.", style("i").blue().bold()),
    }
    println!("     Set one with: keyscope set <key> <value>");
    println!();
}

fn value_type_name(value: &keyscope_types::value::Value) -> &'static str {
    use keyscope_types::value::Value;
    match value {
        Value::Scalar(_) => "string",
        Value::List(_) => "list",
        Value::Set(_) => "set",
        Value::Mapping(_) => "hash",
        Value::Unsupported(_) => "unsupported",
    }
}

/// Single-line preview, cut on a char boundary.
fn preview(value: &str) -> String {
    let flat = value.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
