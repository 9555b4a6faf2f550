//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::Context;
use comfy_table::Table;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;

use cellmap_cli::dump::read_row_dump;
use cellmap_decode::DecoderRegistry;
use cellmap_engine::{MappingConfig, MappingEngine, MappingRule, SharedExtractorList, ValueSource};
use cellmap_model::Record;

use crate::cli::{ApplyArgs, RulesArgs};

pub fn run_apply(args: &ApplyArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let registry = DecoderRegistry::default();
    let columns = SharedExtractorList::new();

    let engine = MappingEngine::compile(&config, &registry, Some(&columns))
        .context("invalid mapping configuration")?;

    let row = read_row_dump(&args.cells, args.hex_values)?;
    tracing::info!(
        cells = row.cell_count(),
        rules = engine.len(),
        "applying mapping"
    );

    let mut record = Record::with_row(row);
    engine
        .apply(&mut record)
        .context("failed to map the row")?;

    let json = serde_json::to_string_pretty(&record).context("failed to render the record")?;
    println!("{json}");

    if args.show_columns {
        eprintln!();
        eprintln!("consumed columns:");
        for extractor in columns.snapshot() {
            eprintln!("  {}", extractor.column());
        }
    }
    Ok(())
}

pub fn run_rules(args: &RulesArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let registry = DecoderRegistry::default();
    let engine = MappingEngine::compile(&config, &registry, None)
        .context("invalid mapping configuration")?;

    println!("{}", rules_table(engine.rules()));
    Ok(())
}

pub fn run_decoders() -> anyhow::Result<()> {
    let registry = DecoderRegistry::default();
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<MappingConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read mapping configuration {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid mapping configuration {}", path.display()))
}

fn rules_table(rules: &[MappingRule]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(["Column", "Source", "Output", "Decoder", "Allow empty"]);

    for rule in rules {
        table.add_row([
            rule.column().to_string(),
            source_label(rule.source()).to_string(),
            rule.output().to_string(),
            rule.decoder_type().to_string(),
            if rule.allow_empty() { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

fn source_label(source: ValueSource) -> &'static str {
    match source {
        ValueSource::Value => "value",
        ValueSource::Qualifier => "qualifier",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn rules_table_renders_one_row_per_mapping() {
        let config: MappingConfig = serde_json::from_str(
            r#"{"mappings": [
                {"inputColumn": "info:name", "outputField": "name", "type": "string"},
                {"inputColumn": "tags:t*", "outputField": "tag*", "isAllowEmpty": false}
            ]}"#,
        )
        .unwrap();
        let engine = MappingEngine::compile(&config, &DecoderRegistry::default(), None).unwrap();

        let rendered = rules_table(engine.rules()).to_string();
        assert!(rendered.contains("info:name"));
        assert!(rendered.contains("tags:t*"));
        assert!(rendered.contains("tag*"));
        assert!(rendered.contains("string"));
        assert!(rendered.contains("no"));
    }

    #[test]
    fn load_config_rejects_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let error = load_config(file.path()).unwrap_err();
        assert!(error.to_string().contains("invalid mapping configuration"));
    }

    #[test]
    fn source_labels_are_lowercase() {
        assert_eq!(source_label(ValueSource::Value), "value");
        assert_eq!(source_label(ValueSource::Qualifier), "qualifier");
    }
}
