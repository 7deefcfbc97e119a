//! End-to-end tests driving the translation engine over the JSON
//! fixtures in `testdata/`.

use octranslate::config::{self, LeafPath, Mappings, Rules, VendorOids};
use octranslate::{EngineError, LeafResolver, ResolveError, TranslationEngine, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn fixture_engine() -> TranslationEngine {
    TranslationEngine::from_files(
        "testdata/mappings.json",
        "testdata/rules.json",
        "testdata/vendor_oids.json",
    )
    .expect("fixtures should build an engine")
}

#[test]
fn uptime_resolves_for_any_vendor() {
    let engine = fixture_engine();
    // to_int("2000000000") / 100, over a standard (vendor-neutral) OID.
    assert_eq!(
        engine.evaluate("/system/state/uptime", "switch-1", "cisco").unwrap(),
        Value::Float(2.0e7)
    );
    assert_eq!(
        engine.evaluate("/system/state/uptime", "ap-7", "aruba").unwrap(),
        Value::Float(2.0e7)
    );
}

#[test]
fn boot_time_picks_the_vendor_specific_alternative() {
    let engine = fixture_engine();
    // Aruba targets take the wall-clock alternative:
    // 2018-12-18 15:15:59 UTC = 1545146159, minus 20000000s of uptime.
    assert_eq!(
        engine.evaluate("/system/state/boot-time", "ap-7", "aruba").unwrap(),
        Value::Float(1_525_146_159.0)
    );
    // Cisco targets fall through to the NTP alternative:
    // dfc40b68... = 1545178344, minus the same uptime.
    assert_eq!(
        engine.evaluate("/system/state/boot-time", "switch-1", "cisco").unwrap(),
        Value::Float(1_525_178_344.0)
    );
}

#[test]
fn rules_compose_through_sub_rule_references() {
    let engine = fixture_engine();
    // last_change_absolute = boot_time + last_change_relative, where both
    // operands are themselves rules.
    assert_eq!(
        engine
            .evaluate("/interfaces/interface/state/last-change", "switch-1", "cisco")
            .unwrap(),
        Value::Float(1_525_183_344.0)
    );
    assert_eq!(
        engine
            .evaluate("/interfaces/interface/state/last-change", "ap-7", "aruba")
            .unwrap(),
        Value::Float(1_525_151_159.0)
    );
}

#[test]
fn vendor_inadmissible_rules_surface_as_no_alternative() {
    let engine = fixture_engine();
    // cpu_name only knows an Aruba OID.
    assert_eq!(
        engine.evaluate("/system/state/cpu-name", "ap-7", "aruba").unwrap(),
        Value::String("Network Processor CPU10".to_string())
    );
    let err = engine
        .evaluate("/system/state/cpu-name", "switch-1", "cisco")
        .unwrap_err();
    match err {
        EngineError::NoAlternative { rule } => assert_eq!(rule, "cpu_name"),
        other => panic!("expected NoAlternative, got {other}"),
    }
}

#[test]
fn unknown_paths_error() {
    let engine = fixture_engine();
    assert!(matches!(
        engine.evaluate("/system/state/no-such-leaf", "t", "cisco"),
        Err(EngineError::PathNotFound { .. })
    ));
    // A structural node exists but carries no binding.
    assert!(matches!(
        engine.evaluate("/system/state", "t", "cisco"),
        Err(EngineError::PathNotFound { .. })
    ));
}

#[test]
fn print_renders_the_namespace() {
    let engine = fixture_engine();
    let rendered = engine.render_paths("root").unwrap();
    assert!(rendered.starts_with("root\n"));
    assert!(rendered.contains("boot-time"));
    assert!(rendered.contains("last-change"));

    let subtree = engine.render_paths("/system/state").unwrap();
    assert!(subtree.starts_with("state\n"));
    assert!(subtree.contains("uptime"));
    assert!(!subtree.contains("interfaces"));
}

/// Resolver that records which leaves were fetched and can be told to
/// fail specific leaves.
struct RecordingResolver {
    calls: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
}

impl RecordingResolver {
    fn new(calls: Arc<Mutex<Vec<String>>>, failing: &[&str]) -> Self {
        Self {
            calls,
            failing: failing.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LeafResolver for RecordingResolver {
    fn resolve(&self, leaf: &LeafPath, _target: &str) -> Result<Value, ResolveError> {
        self.calls.lock().unwrap().push(leaf.bind.clone());
        if self.failing.contains(&leaf.bind) {
            return Err(ResolveError(format!("leaf `{}` unreachable", leaf.bind)));
        }
        Ok(Value::String("5".to_string()))
    }
}

fn selection_documents() -> (Mappings, Rules, VendorOids) {
    let mappings = serde_json::from_value(serde_json::json!({
        "nodes": [ { "subpath": "/value", "bind": "pick_first" } ]
    }))
    .unwrap();
    let rules = serde_json::from_value(serde_json::json!({
        "rules": [{
            "bind": "pick_first",
            "expressions": [
                "to_int(leaf_a) * 10",
                "to_int(leaf_b) * 100"
            ],
            "leaves": [
                { "bind": "leaf_a", "oids": ["1.3.6.1.2.1.1.1"] },
                { "bind": "leaf_b", "oids": ["1.3.6.1.2.1.1.2"] }
            ]
        }]
    }))
    .unwrap();
    let vendors = serde_json::from_value(serde_json::json!({
        "vendor_root": "1.3.6.1.4.1",
        "vendors": { "cisco": "9" }
    }))
    .unwrap();
    (mappings, rules, vendors)
}

#[test]
fn first_evaluable_alternative_wins_and_later_leaves_stay_unresolved() {
    let (mappings, rules, vendors) = selection_documents();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let engine = TranslationEngine::new(&mappings, rules, vendors)
        .unwrap()
        .with_resolver(Box::new(RecordingResolver::new(calls.clone(), &[])));

    assert_eq!(
        engine.evaluate("/value", "t", "cisco").unwrap(),
        Value::Float(50.0)
    );
    // The second alternative was never tried, so its leaf was never fetched.
    assert_eq!(*calls.lock().unwrap(), vec!["leaf_a".to_string()]);
}

#[test]
fn failing_first_alternative_falls_through_to_the_second() {
    let (mappings, rules, vendors) = selection_documents();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let engine = TranslationEngine::new(&mappings, rules, vendors)
        .unwrap()
        .with_resolver(Box::new(RecordingResolver::new(calls.clone(), &["leaf_a"])));

    assert_eq!(
        engine.evaluate("/value", "t", "cisco").unwrap(),
        Value::Float(500.0)
    );
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["leaf_a".to_string(), "leaf_b".to_string()]
    );
}

#[test]
fn config_documents_load_from_disk() {
    let mappings = config::load_mappings("testdata/mappings.json").unwrap();
    assert_eq!(mappings.nodes.len(), 2);
    let rules = config::load_rules("testdata/rules.json").unwrap();
    assert_eq!(rules.rules.len(), 5);
    let vendors = config::load_vendor_oids("testdata/vendor_oids.json").unwrap();
    assert_eq!(vendors.vendor_root, "1.3.6.1.4.1");
    assert_eq!(vendors.vendors["aruba"], "14823");
}

#[test]
fn missing_config_files_error() {
    assert!(config::load_rules("testdata/absent.json").is_err());
    assert!(
        TranslationEngine::from_files(
            "testdata/mappings.json",
            "testdata/absent.json",
            "testdata/vendor_oids.json",
        )
        .is_err()
    );
}
