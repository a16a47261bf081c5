//! Library integration tests.

use extension_gate::GateError;

#[test]
fn error_types_are_public() {
    let err = GateError::InvalidCallback {
        extension: "reports".into(),
        reason: "no callback supplied".into(),
    };
    assert!(err.to_string().contains("reports"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> extension_gate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use extension_gate::cli::{Cli, Commands};

    let cli = Cli::parse_from(["extension-gate", "check", "--json"]);
    if let Commands::Check(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn version_helpers_are_public() {
    use extension_gate::requirements::version::{is_comparable, meets_minimum, Version};

    assert!(meets_minimum("v2.0", "1.9"));
    assert!(is_comparable("7.4.0-rc1"));
    assert!(Version::parse("7.4").unwrap() == Version::parse("7.4.0").unwrap());
}
