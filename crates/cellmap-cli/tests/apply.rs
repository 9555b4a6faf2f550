use std::io::Write;

use tempfile::NamedTempFile;

use cellmap_cli::dump::read_row_dump;
use cellmap_decode::DecoderRegistry;
use cellmap_engine::{MappingConfig, MappingEngine};
use cellmap_model::Record;

#[test]
fn maps_a_row_dump_end_to_end() {
    let mut cells = NamedTempFile::new().unwrap();
    write!(
        cells,
        "family,qualifier,value\ninfo,name,alice\ninfo,city,utrecht\n"
    )
    .unwrap();

    let config: MappingConfig = serde_json::from_str(
        r#"{"mappings": [
            {"inputColumn": "info:name", "outputField": "name", "type": "string"},
            {"inputColumn": "info:city", "outputField": "city", "type": "string"}
        ]}"#,
    )
    .unwrap();
    let engine = MappingEngine::compile(&config, &DecoderRegistry::default(), None).unwrap();

    let row = read_row_dump(cells.path(), false).unwrap();
    let mut record = Record::with_row(row);
    engine.apply(&mut record).unwrap();

    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"city":[{"kind":"Text","value":"utrecht"}],"name":[{"kind":"Text","value":"alice"}]}"#
    );
}

#[test]
fn maps_hex_dumps_with_typed_decoders() {
    let mut cells = NamedTempFile::new().unwrap();
    write!(
        cells,
        "family,qualifier,value\ninfo,age,00000029\ninfo,active,01\n"
    )
    .unwrap();

    let config: MappingConfig = serde_json::from_str(
        r#"{"mappings": [
            {"inputColumn": "info:age", "outputField": "age", "type": "int"},
            {"inputColumn": "info:active", "outputField": "active", "type": "boolean"}
        ]}"#,
    )
    .unwrap();
    let engine = MappingEngine::compile(&config, &DecoderRegistry::default(), None).unwrap();

    let row = read_row_dump(cells.path(), true).unwrap();
    let mut record = Record::with_row(row);
    engine.apply(&mut record).unwrap();

    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"active":[{"kind":"Bool","value":true}],"age":[{"kind":"Int","value":41}]}"#
    );
}
