use attrgrid::attributes::AttributeDescriptor;
use attrgrid::config::ResolverConfig;
use attrgrid::error::Result;
use console::style;
use indexmap::IndexMap;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 4] = ["NAME", "TYPE", "DEFAULT", "FLAGS"];
const GAP: &str = "  ";

pub(super) fn print_models(models: &[&str]) {
    if models.is_empty() {
        println!("No models found.");
        return;
    }
    for model in models {
        println!("{}", model);
    }
}

pub(super) fn print_config(config: &ResolverConfig) {
    let width = ResolverConfig::keys().iter().map(|k| k.width()).max().unwrap_or(0);
    for key in ResolverConfig::keys() {
        let value = config.get(key).unwrap_or_default();
        println!("{}{}{}", style(pad(key, width)).bold(), GAP, value);
    }
}

pub(super) fn print_descriptors_json(resolved: &[(String, Arc<[AttributeDescriptor]>)]) -> Result<()> {
    let by_model: IndexMap<&str, &[AttributeDescriptor]> = resolved
        .iter()
        .map(|(model, descriptors)| (model.as_str(), &**descriptors))
        .collect();
    println!("{}", serde_json::to_string_pretty(&by_model)?);
    Ok(())
}

pub(super) fn print_descriptor_tables(resolved: &[(String, Arc<[AttributeDescriptor]>)]) {
    for (i, (model, descriptors)) in resolved.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", style(model).bold().cyan());
        print_table(descriptors);
    }
}

fn print_table(descriptors: &[AttributeDescriptor]) {
    if descriptors.is_empty() {
        println!("{}", style("(no attributes)").dim());
        return;
    }

    let rows: Vec<[String; 4]> = descriptors.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect();
    println!("{}", style(header.join(GAP).trim_end()).bold());

    for row in rows {
        let line: Vec<String> = row.iter().zip(widths).map(|(c, w)| pad(c, w)).collect();
        println!("{}", line.join(GAP).trim_end());
    }
}

fn row(descriptor: &AttributeDescriptor) -> [String; 4] {
    let default = descriptor
        .default_value
        .as_ref()
        .and_then(|v| serde_json::to_string(v).ok())
        .unwrap_or_default();
    [
        descriptor.name.clone(),
        descriptor.attr_type.to_string(),
        default,
        flags(descriptor),
    ]
}

fn flags(descriptor: &AttributeDescriptor) -> String {
    let mut flags = Vec::new();
    if descriptor.is_virtual {
        flags.push("virtual".to_string());
    }
    if !descriptor.included {
        flags.push("hidden".to_string());
    }
    if descriptor.accessor.has_getter() {
        flags.push("getter".to_string());
    }
    if descriptor.accessor.has_setter() {
        flags.push("setter".to_string());
    }
    for (key, value) in &descriptor.options {
        match value {
            serde_json::Value::Bool(true) => flags.push(key.clone()),
            serde_json::Value::Bool(false) => {}
            other => flags.push(format!("{}={}", key, other)),
        }
    }
    flags.join(",")
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}
