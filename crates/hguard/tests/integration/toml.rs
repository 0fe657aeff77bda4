use std::fs;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::hguard_in;

#[test]
fn test_toml_options_are_used() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include/llvm/ADT"))?;
    fs::write(directory.join("include/llvm/ADT/StringRef.h"), "")?;
    fs::write(
        directory.join("hguard.toml"),
        r#"
[header-guard]
style = "llvm"
end-if = ""
"#,
    )?;

    let output = hguard_in(directory).args(["guard", "."]).run();

    assert!(output.status.success(), "{output}");
    assert!(
        output
            .clean_stdout()
            .contains("include/llvm/ADT/StringRef.h: LLVM_ADT_STRINGREF_H\n"),
        "{output}"
    );
    Ok(())
}

#[test]
fn test_cli_takes_precedence_over_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include/llvm"))?;
    fs::write(directory.join("include/llvm/a.h"), "")?;
    fs::write(
        directory.join("hguard.toml"),
        r#"
[header-guard]
style = "llvm"
base-dirs = "include/=PROJ_"
"#,
    )?;

    let output = hguard_in(directory)
        .args(["guard", ".", "--end-if", "off"])
        .run();

    assert!(output.status.success(), "{output}");
    assert!(
        output.clean_stdout().contains("include/llvm/a.h: PROJ_LLVM_A_H\n"),
        "{output}"
    );
    Ok(())
}

#[test]
fn test_nested_toml_wins_for_its_directory() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include"))?;
    fs::create_dir_all(directory.join("lib/include"))?;
    fs::write(directory.join("include/a.h"), "")?;
    fs::write(directory.join("lib/include/b.h"), "")?;
    fs::write(directory.join("hguard.toml"), "[header-guard]\nend-if = \"\"\n")?;
    fs::write(
        directory.join("lib/hguard.toml"),
        "[header-guard]\nbase-dirs = \"include/=LIB_\"\n",
    )?;

    let output = hguard_in(directory)
        .args(["guard", "include", "lib"])
        .run();

    assert!(output.status.success(), "{output}");
    let stdout = output.clean_stdout();
    assert!(stdout.contains("include/a.h: A_H\n"), "{output}");
    assert!(
        stdout.contains("lib/include/b.h: LIB_B_H (#endif // LIB_B_H)"),
        "{output}"
    );
    Ok(())
}

#[test]
fn test_invalid_toml_is_an_error() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::write(directory.join("a.h"), "")?;
    fs::write(directory.join("hguard.toml"), "[header-guard]\nunknown = 1\n")?;

    let output = hguard_in(directory).args(["guard", "."]).run();

    assert_eq!(output.code(), 2, "{output}");
    let stderr = output.clean_stderr();
    assert!(stderr.contains("hguard failed"), "{output}");
    assert!(stderr.contains("Failed to parse"), "{output}");
    Ok(())
}

#[test]
fn test_exclude_patterns() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include"))?;
    fs::create_dir_all(directory.join("generated"))?;
    fs::write(directory.join("include/a.h"), "")?;
    fs::write(directory.join("generated/b.h"), "")?;
    fs::write(
        directory.join("hguard.toml"),
        "[header-guard]\nexclude = [\"generated/\"]\n",
    )?;

    let output = hguard_in(directory).args(["guard", "."]).run();

    assert!(output.status.success(), "{output}");
    let stdout = output.clean_stdout();
    assert!(stdout.contains("include/a.h"), "{output}");
    assert!(!stdout.contains("generated/b.h"), "{output}");
    Ok(())
}

#[test]
fn test_nested_toml_is_discovered() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include"))?;
    fs::create_dir_all(directory.join("lib/include"))?;
    fs::create_dir_all(directory.join("lib/vendor"))?;
    fs::write(directory.join("include/a.h"), "")?;
    fs::write(directory.join("lib/include/b.h"), "")?;
    fs::write(directory.join("lib/vendor/c.h"), "")?;
    fs::write(
        directory.join("lib/hguard.toml"),
        r#"
[header-guard]
base-dirs = "include/=LIB_"
end-if = ""
exclude = ["vendor/"]
"#,
    )?;

    let output = hguard_in(directory).args(["guard", "."]).run();

    assert!(output.status.success(), "{output}");
    let stdout = output.clean_stdout();
    assert!(stdout.contains("include/a.h: A_H (#endif // A_H)"), "{output}");
    assert!(stdout.contains("lib/include/b.h: LIB_B_H\n"), "{output}");
    assert!(!stdout.contains("c.h"), "{output}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_user_config_is_used_outside_of_projects() -> anyhow::Result<()> {
    let config_home = TempDir::new()?;
    fs::create_dir_all(config_home.path().join("hguard"))?;
    fs::write(
        config_home.path().join("hguard/hguard.toml"),
        "[header-guard]\nend-if = \"\"\nexclude = [\"generated/\"]\n",
    )?;

    let directory = TempDir::new()?;
    let directory = directory.path();
    fs::create_dir_all(directory.join("include"))?;
    fs::create_dir_all(directory.join("generated"))?;
    fs::write(directory.join("include/a.h"), "")?;
    fs::write(directory.join("generated/b.h"), "")?;

    let output = hguard_in(directory)
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["guard", "."])
        .run();

    assert!(output.status.success(), "{output}");
    let stdout = output.clean_stdout();
    assert!(stdout.contains("include/a.h: A_H\n"), "{output}");
    assert!(!stdout.contains("#endif"), "{output}");
    assert!(!stdout.contains("generated/b.h"), "{output}");
    Ok(())
}
