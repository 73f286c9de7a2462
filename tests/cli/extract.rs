use anyhow::Result;

use crate::{CliTest, run};

const ORBIT_VIEWER: &str = r#"package demo.ui;

public class OrbitViewer {
    void build() {
        Button start = new Button("Start Simulation");
        title.setText("Orbital Period");
        Label icon = new Label("icons/orbit.png");
    }
}
"#;

fn setup(test: &CliTest) -> Result<()> {
    test.write_file("src/demo/ui/OrbitViewer.java", ORBIT_VIEWER)?;
    test.write_file("src/demo/ui/OrbitMath.java", r#"new Label("Not a role file");"#)?;
    test.write_file("i18n/messages_en.properties", "app.title=Orbits\n")
}

#[test]
fn test_extract_dry_run_previews_without_writing() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let (code, stdout) = run(test.extract_command())?;

    assert_eq!(code, 1, "pending work fails a dry-run:\n{}", stdout);
    assert!(stdout.contains("--> src/demo/ui/OrbitViewer.java:5:35"));
    assert!(stdout.contains(
        r#"= becomes: I18n.getInstance().get("generated.orbit.start.simulation", "Start Simulation")"#
    ));
    assert!(stdout.contains("+ generated.orbit.orbital.period"));
    assert!(stdout.contains("Would rewrite 2 call site(s) in 1 file(s), 2 key(s) for 1 catalog(s)."));
    assert!(stdout.contains("Run with --apply to rewrite these call sites."));

    assert_eq!(test.read_file("src/demo/ui/OrbitViewer.java")?, ORBIT_VIEWER);
    assert_eq!(test.read_file("i18n/messages_en.properties")?, "app.title=Orbits\n");
    Ok(())
}

#[test]
fn test_extract_apply_rewrites_sources_and_primary_catalog() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let (code, stdout) = run({
        let mut cmd = test.extract_command();
        cmd.arg("--apply");
        cmd
    })?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains("Rewrote 2 call site(s) in 1 file(s), 2 key(s) for 1 catalog(s)."));

    let java = test.read_file("src/demo/ui/OrbitViewer.java")?;
    assert!(java.contains(
        r#"new Button(I18n.getInstance().get("generated.orbit.start.simulation", "Start Simulation"));"#
    ));
    assert!(java.contains(
        r#"title.setText(I18n.getInstance().get("generated.orbit.orbital.period", "Orbital Period"));"#
    ));
    assert!(java.contains(r#"new Label("icons/orbit.png");"#));
    assert_eq!(
        test.read_file("src/demo/ui/OrbitMath.java")?,
        r#"new Label("Not a role file");"#
    );

    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "app.title=Orbits\n\
         # Extracted by locsync\n\
         generated.orbit.start.simulation=Start Simulation\n\
         generated.orbit.orbital.period=Orbital Period\n"
    );
    assert!(!test.root().join("i18n/messages_fr.properties").exists());
    Ok(())
}

#[test]
fn test_extract_second_run_has_nothing_to_do() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;
    let mut first = test.extract_command();
    first.arg("--apply");
    run(first)?;

    let (code, stdout) = run(test.extract_command())?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains("Checked 1 source file - no hardcoded text to extract"));
    Ok(())
}

#[test]
fn test_extract_reports_unsupported_template() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "src/MassDemo.java",
        r#"class MassDemo {
    void f() {
        l.setText("Mass " + m + " kg" + unit);
    }
}
"#,
    )?;

    let mut cmd = test.extract_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "warnings do not fail --apply:\n{}", stdout);
    assert!(stdout.contains("warning: \"Mass \"  unsupported-template"));
    assert!(stdout.contains("--> src/MassDemo.java:3:19"));
    assert!(stdout.contains("no hardcoded text to extract"));
    Ok(())
}

#[test]
fn test_extract_skips_unreadable_role_file() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;
    let mut legacy = br#"class LegacyApp { void a() { new Label("Caf"#.to_vec();
    legacy.extend_from_slice(&[0xE9, b'"', b')', b';', b'}', b'}']);
    test.write_bytes("src/demo/ui/LegacyApp.java", &legacy)?;

    let mut cmd = test.extract_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 1, "an unreadable file is an error:\n{}", stdout);
    assert!(stdout.contains("unreadable-file"));
    assert!(stdout.contains("--> src/demo/ui/LegacyApp.java\n"));
    assert!(stdout.contains("Rewrote 2 call site(s) in 1 file(s), 2 key(s) for 1 catalog(s)."));
    assert!(
        test.read_file("src/demo/ui/OrbitViewer.java")?
            .contains(r#"get("generated.orbit.start.simulation", "Start Simulation")"#)
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_extract_write_failure_exits_with_error() -> Result<()> {
    use std::{fs, os::unix::fs::PermissionsExt};

    let test = CliTest::with_config()?;
    setup(&test)?;
    let dir = test.root().join("src/demo/ui");
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555))?;
    if fs::write(dir.join("writable"), "").is_ok() {
        // running as root: directory permissions are not enforced
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut cmd = test.extract_command();
    cmd.arg("--apply");
    let output = cmd.output()?;
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755))?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Error: Failed to rewrite src/demo/ui/OrbitViewer.java"));
    assert_eq!(test.read_file("src/demo/ui/OrbitViewer.java")?, ORBIT_VIEWER);
    assert!(
        test.read_file("i18n/messages_en.properties")?
            .contains("generated.orbit.start.simulation=Start Simulation\n")
    );
    Ok(())
}
