use cellmap_decode::DecoderRegistry;
use cellmap_engine::{ApplyError, MappingConfig, MappingEngine, SharedExtractorList};
use cellmap_model::{Record, Row, Value};

fn compile(json: &str) -> MappingEngine {
    let config: MappingConfig = serde_json::from_str(json).unwrap();
    MappingEngine::compile(&config, &DecoderRegistry::default(), None).unwrap()
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

#[test]
fn dynamic_fields_pair_values_with_qualifier_tails() {
    let engine = compile(
        r#"{"mappings": [{"inputColumn": "cf:q*", "outputField": "out*", "type": "string"}]}"#,
    );
    let row = Row::builder()
        .cell("cf", "q1", "A")
        .cell("cf", "q2", "B")
        .cell("cf", "other", "C")
        .build();
    let mut record = Record::with_row(row);

    engine.apply(&mut record).unwrap();

    assert_eq!(record.get("out1"), &[text("A")]);
    assert_eq!(record.get("out2"), &[text("B")]);
    assert!(record.get("out").is_empty());
    assert!(record.get("outother").is_empty());

    let fields: Vec<&str> = record.fields().map(|(name, _)| name).collect();
    assert_eq!(fields, vec!["out1", "out2"]);
}

#[test]
fn dynamic_fields_from_qualifier_source() {
    // Qualifier-sourced dynamic naming: the qualifier bytes are both the
    // value and the name source.
    let engine = compile(
        r#"{"mappings": [{
            "inputColumn": "tags:t_*",
            "outputField": "tag_*",
            "source": "qualifier",
            "type": "string"
        }]}"#,
    );
    let row = Row::builder()
        .cell("tags", "t_red", b"".as_slice())
        .cell("tags", "t_blue", b"".as_slice())
        .build();
    let mut record = Record::with_row(row);

    engine.apply(&mut record).unwrap();

    assert_eq!(record.get("tag_blue"), &[text("t_blue")]);
    assert_eq!(record.get("tag_red"), &[text("t_red")]);
}

#[test]
fn strict_empty_policy_drops_blank_values() {
    let strict = compile(
        r#"{"mappings": [{
            "inputColumn": "cf:q",
            "outputField": "out",
            "type": "string",
            "isAllowEmpty": false
        }]}"#,
    );
    let row = Row::builder().cell("cf", "q", "   ").build();

    let mut record = Record::with_row(row.clone());
    strict.apply(&mut record).unwrap();
    assert!(record.get("out").is_empty());

    // The default policy writes the same value.
    let lenient = compile(
        r#"{"mappings": [{"inputColumn": "cf:q", "outputField": "out", "type": "string"}]}"#,
    );
    let mut record = Record::with_row(row);
    lenient.apply(&mut record).unwrap();
    assert_eq!(record.get("out"), &[text("   ")]);
}

#[test]
fn positional_names_shorter_than_matches_drop_the_surplus() {
    let engine = compile(
        r#"{"mappings": [{
            "inputColumn": "cf:q*",
            "outputFields": ["first", "second"],
            "type": "string"
        }]}"#,
    );
    let row = Row::builder()
        .cell("cf", "q1", "A")
        .cell("cf", "q2", "B")
        .cell("cf", "q3", "C")
        .build();
    let mut record = Record::with_row(row);

    engine.apply(&mut record).unwrap();

    assert_eq!(record.get("first"), &[text("A")]);
    assert_eq!(record.get("second"), &[text("B")]);
    assert_eq!(record.len(), 2);
}

#[test]
fn positional_names_longer_than_matches_stay_unused() {
    let engine = compile(
        r#"{"mappings": [{
            "inputColumn": "cf:q*",
            "outputFields": ["first", "second", "third"],
            "type": "string"
        }]}"#,
    );
    let row = Row::builder().cell("cf", "q1", "A").build();
    let mut record = Record::with_row(row);

    engine.apply(&mut record).unwrap();

    assert_eq!(record.get("first"), &[text("A")]);
    assert_eq!(record.len(), 1);
}

#[test]
fn positional_empty_name_discards_that_position() {
    let engine = compile(
        r#"{"mappings": [{
            "inputColumn": "cf:q*",
            "outputFields": ["first", "", "third"],
            "type": "string"
        }]}"#,
    );
    let row = Row::builder()
        .cell("cf", "q1", "A")
        .cell("cf", "q2", "B")
        .cell("cf", "q3", "C")
        .build();
    let mut record = Record::with_row(row);

    engine.apply(&mut record).unwrap();

    assert_eq!(record.get("first"), &[text("A")]);
    assert_eq!(record.get("third"), &[text("C")]);
    assert_eq!(record.len(), 2);
}

#[test]
fn each_compile_registers_every_extractor() {
    let json = r#"{"mappings": [
        {"inputColumn": "cf:a*", "outputField": "a*"},
        {"inputColumn": "cf:b*", "outputField": "b", "source": "qualifier"},
        {"inputColumn": "cf:c", "outputField": "c"}
    ]}"#;
    let config: MappingConfig = serde_json::from_str(json).unwrap();
    let registry = DecoderRegistry::default();
    let sink = SharedExtractorList::new();

    MappingEngine::compile(&config, &registry, Some(&sink)).unwrap();
    assert_eq!(sink.len(), 3);

    // A second compile appends again; the list is accumulate-only.
    MappingEngine::compile(&config, &registry, Some(&sink)).unwrap();
    assert_eq!(sink.len(), 6);

    let columns: Vec<String> = sink
        .snapshot()
        .iter()
        .take(3)
        .map(|extractor| extractor.column().to_string())
        .collect();
    assert_eq!(columns, vec!["cf:a*", "cf:b*", "cf:c"]);
}

#[test]
fn repeated_application_carries_no_state_between_records() {
    let engine = compile(
        r#"{"mappings": [{"inputColumn": "cf:q*", "outputField": "out", "type": "string"}]}"#,
    );

    let mut first = Record::with_row(Row::builder().cell("cf", "q1", "A").build());
    engine.apply(&mut first).unwrap();

    let mut second = Record::with_row(
        Row::builder()
            .cell("cf", "q1", "X")
            .cell("cf", "q2", "Y")
            .build(),
    );
    engine.apply(&mut second).unwrap();

    assert_eq!(first.get("out"), &[text("A")]);
    assert_eq!(second.get("out"), &[text("X"), text("Y")]);
}

#[test]
fn second_apply_on_the_same_record_has_no_row() {
    let engine = compile(
        r#"{"mappings": [{"inputColumn": "cf:q", "outputField": "out", "type": "string"}]}"#,
    );
    let mut record = Record::with_row(Row::builder().cell("cf", "q", "v").build());

    engine.apply(&mut record).unwrap();
    assert_eq!(engine.apply(&mut record), Err(ApplyError::MissingRow));
}

#[test]
fn typed_decoding_end_to_end() {
    let engine = compile(
        r#"{"mappings": [
            {"inputColumn": "info:age", "outputField": "age", "type": "int"},
            {"inputColumn": "info:score", "outputField": "score", "type": "double"},
            {"inputColumn": "info:active", "outputField": "active", "type": "boolean"},
            {"inputColumn": "info:raw", "outputField": "raw"}
        ]}"#,
    );
    let row = Row::builder()
        .cell("info", "age", 41i32.to_be_bytes().as_slice())
        .cell("info", "score", 0.5f64.to_be_bytes().as_slice())
        .cell("info", "active", [1u8].as_slice())
        .cell("info", "raw", [0u8, 0xFF].as_slice())
        .build();
    let mut record = Record::with_row(row);

    engine.apply(&mut record).unwrap();

    assert_eq!(record.get("age"), &[Value::Int(41)]);
    assert_eq!(record.get("score"), &[Value::Double(0.5)]);
    assert_eq!(record.get("active"), &[Value::Bool(true)]);
    assert_eq!(record.get("raw"), &[Value::Bytes(vec![0, 0xFF])]);
}

#[test]
fn a_compiled_engine_is_shareable_across_threads() {
    let engine = compile(
        r#"{"mappings": [{"inputColumn": "cf:q*", "outputField": "out", "type": "string"}]}"#,
    );

    std::thread::scope(|scope| {
        for i in 0..4 {
            let engine = &engine;
            scope.spawn(move || {
                let value = format!("v{i}");
                let row = Row::builder().cell("cf", "q1", value.as_str()).build();
                let mut record = Record::with_row(row);
                engine.apply(&mut record).unwrap();
                assert_eq!(record.get("out"), &[Value::Text(value)]);
            });
        }
    });
}
