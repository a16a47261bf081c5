//! Integration tests for config-driven gates.

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use extension_gate::config::{load_project_config, PresentationMode};
use extension_gate::diagnostics::SharedBuffer;
use extension_gate::gate::{EntryPoints, ExtensionGate, GateState};
use extension_gate::hooks::{HookRegistry, EXTENSIONS_LOADED, STYLES};
use extension_gate::requirements::HostEnvironment;
use extension_gate::GateError;
use tempfile::TempDir;

fn write_config(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("extension-gate.yml"), content).unwrap();
    temp
}

#[test]
fn config_gate_boots_named_entry_point() {
    let temp = write_config(
        r#"
extension:
  id: reports
  entry_point: boot
requirements:
  host: "6.0"
"#,
    );
    let config = load_project_config(temp.path()).unwrap();

    let booted = Rc::new(Cell::new(false));
    let flag = Rc::clone(&booted);
    let mut entry_points = EntryPoints::new();
    entry_points.register("boot", move || {
        flag.set(true);
        Ok(())
    });

    let bus = Rc::new(HookRegistry::new());
    let gate = ExtensionGate::from_config(
        &config,
        &mut entry_points,
        Rc::new(HostEnvironment::new().with_host("6.4")),
        bus.clone(),
    )
    .unwrap();
    gate.register();

    bus.fire(EXTENSIONS_LOADED).unwrap();
    assert!(booted.get());
    assert_eq!(gate.state(), GateState::Met);
}

#[test]
fn config_gate_requires_registered_entry_point() {
    let temp = write_config("extension: { id: reports, entry_point: boot }");
    let config = load_project_config(temp.path()).unwrap();

    let mut entry_points = EntryPoints::new();
    entry_points.register("main", || Ok(()));

    let err = ExtensionGate::from_config(
        &config,
        &mut entry_points,
        Rc::new(HostEnvironment::new()),
        Rc::new(HookRegistry::new()),
    )
    .unwrap_err();

    match err {
        GateError::InvalidCallback { extension, reason } => {
            assert_eq!(extension, "reports");
            assert!(reason.contains("boot"));
        }
        other => panic!("Expected InvalidCallback, got {:?}", other),
    }
}

#[test]
fn malformed_requirement_degrades_to_unmet() {
    let temp = write_config(
        r#"
requirements:
  runtime: "7.4"
  broken: [1, 2, 3]
"#,
    );
    let config = load_project_config(temp.path()).unwrap();

    let mut entry_points = EntryPoints::new();
    entry_points.register("main", || Ok(()));
    let gate = ExtensionGate::from_config(
        &config,
        &mut entry_points,
        Rc::new(HostEnvironment::new().with_runtime("8.1")),
        Rc::new(HookRegistry::new()),
    )
    .unwrap();

    assert_eq!(gate.evaluate().unwrap(), GateState::Unmet);
    let errors = gate.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors.get("broken").is_some());
}

#[test]
fn unquoted_float_minimum_never_passes() {
    let temp = write_config(
        r#"
requirements:
  runtime: 7.10
"#,
    );
    let config = load_project_config(temp.path()).unwrap();

    let mut entry_points = EntryPoints::new();
    entry_points.register("main", || Ok(()));
    let gate = ExtensionGate::from_config(
        &config,
        &mut entry_points,
        Rc::new(HostEnvironment::new().with_runtime("7.5")),
        Rc::new(HookRegistry::new()),
    )
    .unwrap();

    assert_eq!(gate.evaluate().unwrap(), GateState::Unmet);
    assert!(gate.errors().get("runtime").is_some());
}

#[test]
fn row_presentation_from_config() {
    let temp = write_config(
        r#"
extension: { id: reports, name: Advanced Reports }
presentation: row
requirements: { companion-product: "3.0" }
"#,
    );
    let config = load_project_config(temp.path()).unwrap();
    assert_eq!(config.presentation, PresentationMode::Row);

    let mut entry_points = EntryPoints::new();
    entry_points.register("main", || Ok(()));
    let bus = Rc::new(HookRegistry::new());
    let gate = ExtensionGate::from_config(
        &config,
        &mut entry_points,
        Rc::new(HostEnvironment::new()),
        bus.clone(),
    )
    .unwrap();
    let buffer = SharedBuffer::new();
    gate.add_sink(config.presentation.sink(buffer.clone(), false));
    gate.register();

    bus.fire(EXTENSIONS_LOADED).unwrap();
    bus.fire("extension_row:reports").unwrap();
    bus.fire(STYLES).unwrap();

    let out = buffer.contents();
    assert!(out.contains("Advanced Reports 1 unmet requirement"));
    assert!(out.contains("Missing Companion product: minimum required 3.0"));
    assert!(out.contains(r#"[data-extension="reports"]"#));
}

#[cfg(unix)]
#[test]
fn command_probe_supplies_current_version() {
    let temp = write_config(
        r#"
requirements:
  tool:
    name: Tool
    minimum: "2.0"
    command: echo tool version 1.4.2
"#,
    );
    let config = load_project_config(temp.path()).unwrap();

    let mut entry_points = EntryPoints::new();
    entry_points.register("main", || Ok(()));
    let gate = ExtensionGate::from_config(
        &config,
        &mut entry_points,
        Rc::new(HostEnvironment::new()),
        Rc::new(HookRegistry::new()),
    )
    .unwrap();

    assert_eq!(gate.evaluate().unwrap(), GateState::Unmet);
    assert_eq!(
        gate.errors().get("tool").unwrap().message(),
        "Tool: minimum required 2.0 (you have 1.4.2)"
    );
}
