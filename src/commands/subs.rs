//! Substitution table subcommands handler

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use toml_edit::{value, DocumentMut, Item, Table};

use kbpack::{Config, SubstitutionTable};

/// Print the rules in application order (longest pattern first).
pub fn handle_list(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let table = config
        .substitution_table()
        .context("Invalid substitution table")?;

    if table.is_empty() {
        println!("No substitutions configured.");
        return Ok(());
    }

    let width = table
        .rules()
        .iter()
        .map(|r| r.pattern.len())
        .max()
        .unwrap_or(0);
    for rule in table.rules() {
        println!("  {:width$} -> {}", rule.pattern, rule.replacement);
    }
    Ok(())
}

/// Validate the table and report the result.
pub fn handle_check(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let table = config
        .substitution_table()
        .context("Invalid substitution table")?;
    println!("Substitution table OK ({} rules).", table.len());
    Ok(())
}

/// Add or update a rule, preserving the config file's formatting.
pub fn handle_add(config_path: &Path, pattern: &str, replacement: &str) -> Result<()> {
    let mut doc = load_document(config_path)?;
    let subs = subs_table(&mut doc)?;
    subs[pattern] = value(replacement);

    // Validate the edited table before anything reaches disk.
    validate(subs)?;

    fs::write(config_path, doc.to_string())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Added: {} -> {}", pattern, replacement);
    Ok(())
}

/// Remove a rule by pattern, preserving the config file's formatting.
pub fn handle_remove(config_path: &Path, pattern: &str) -> Result<()> {
    let mut doc = load_document(config_path)?;
    let subs = subs_table(&mut doc)?;
    if subs.remove(pattern).is_none() {
        bail!("no substitution rule for pattern '{}'", pattern);
    }

    fs::write(config_path, doc.to_string())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Removed: {}", pattern);
    Ok(())
}

fn load_document(config_path: &Path) -> Result<DocumentMut> {
    let content = if config_path.exists() {
        fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };
    content
        .parse::<DocumentMut>()
        .with_context(|| format!("Failed to parse {}", config_path.display()))
}

fn subs_table(doc: &mut DocumentMut) -> Result<&mut Table> {
    let item = doc
        .entry("substitutions")
        .or_insert(Item::Table(Table::new()));
    item.as_table_mut()
        .context("[substitutions] is not a table")
}

fn validate(subs: &Table) -> Result<()> {
    let pairs: Vec<(String, String)> = subs
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.to_string(), s.to_string())))
        .collect();
    SubstitutionTable::new(pairs).context("Invalid substitution table")?;
    Ok(())
}
