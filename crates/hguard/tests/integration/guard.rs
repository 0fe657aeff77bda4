use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::hguard_in;

fn write_headers(directory: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(directory.join("include/foo"))?;
    fs::create_dir_all(directory.join("src/detail"))?;
    fs::write(directory.join("include/foo/bar.h"), "")?;
    fs::write(directory.join("src/detail/impl-util.hpp"), "")?;
    fs::write(directory.join("src/main.cpp"), "")?;
    Ok(())
}

#[test]
fn test_default_style() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    write_headers(directory)?;

    let output = hguard_in(directory).args(["guard", "."]).run();

    assert!(output.status.success(), "{output}");
    let stdout = output.clean_stdout();
    assert!(stdout.contains("include/foo/bar.h: FOO_BAR_H (#endif // FOO_BAR_H)"), "{output}");
    assert!(
        stdout.contains(
            "src/detail/impl-util.hpp: _SRC_DETAIL_IMPL_UTIL_HPP (#endif // _SRC_DETAIL_IMPL_UTIL_HPP)"
        ),
        "{output}"
    );
    assert!(!stdout.contains("main.cpp"), "{output}");
    assert!(stdout.contains("Computed 2 header guards."), "{output}");
    Ok(())
}

#[test]
fn test_cli_overrides() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    write_headers(directory)?;

    let output = hguard_in(directory)
        .args(["guard", "src", "--base-dirs", "src/", "--rename-dirs", "detail/=internal/"])
        .args(["--end-if", "no"])
        .run();

    assert!(output.status.success(), "{output}");
    let stdout = output.clean_stdout();
    assert!(stdout.contains("src/detail/impl-util.hpp: INTERNAL_IMPL_UTIL_HPP\n"), "{output}");
    assert!(!stdout.contains("#endif"), "{output}");
    Ok(())
}

#[test]
fn test_explicit_file_is_always_used() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include"))?;
    fs::write(directory.join("include/generated.def"), "")?;

    let output = hguard_in(directory)
        .args(["guard", "include/generated.def"])
        .run();

    assert!(output.status.success(), "{output}");
    assert!(output.clean_stdout().contains("GENERATED_DEF"), "{output}");
    Ok(())
}

#[test]
fn test_no_headers_found() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::write(directory.join("main.c"), "")?;

    let output = hguard_in(directory).args(["guard", "."]).run();

    assert!(output.status.success(), "{output}");
    assert!(
        output
            .clean_stdout()
            .contains("Warning: No header files found under the given path(s).")
    );
    Ok(())
}

#[test]
fn test_json_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    write_headers(directory)?;

    let output = hguard_in(directory)
        .args(["guard", "include", "--output-format", "json", "--end-if", ""])
        .run();

    assert!(output.status.success(), "{output}");
    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
    let guards = value["guards"].as_array().unwrap();
    assert_eq!(guards.len(), 1);
    assert_eq!(guards[0]["guard"], "FOO_BAR_H");
    assert_eq!(guards[0]["endif_comment"], serde_json::Value::Null);
    assert!(value["errors"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_unknown_style_falls_back_to_default() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    write_headers(directory)?;

    let output = hguard_in(directory)
        .args(["guard", "include", "--style", "nonexistent"])
        .run();

    assert!(output.status.success(), "{output}");
    assert!(output.clean_stdout().contains("include/foo/bar.h: FOO_BAR_H"), "{output}");
    assert!(output.clean_stderr().contains("Unknown header guard style 'nonexistent'"), "{output}");
    Ok(())
}
