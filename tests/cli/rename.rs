use anyhow::Result;

use crate::{CliTest, run};

const VIEWER: &str = r#"class MasterControlViewer {
    void build() {
        grid.setText(I18n.getInstance().get("dashboard.view.grid", "Grid"));
        tab.setText(i18n.get("dashboard.tab." + id));
        other.setText(i18n.get("dashboards.title"));
    }
}
"#;

fn setup(test: &CliTest) -> Result<()> {
    test.write_file("src/MasterControlViewer.java", VIEWER)?;
    test.write_file(
        "i18n/messages_en.properties",
        "dashboard.view.grid=Grid\ndashboard.tab.main=Main\ndashboards.title=Boards\n",
    )?;
    test.write_file(
        "i18n/messages_fr.properties",
        "dashboard.view.grid=Grille\ndashboard.tab.main=Principal\n",
    )
}

#[test]
fn test_rename_apply_moves_keys_everywhere() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let mut cmd = test.rename_command("dashboard", "mastercontrol");
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains(
        "Renamed \"dashboard\" to \"mastercontrol\": 2 reference(s) in 1 source file(s), 4 entry(ies) in 2 catalog(s)."
    ));

    let java = test.read_file("src/MasterControlViewer.java")?;
    assert!(java.contains(r#"get("mastercontrol.view.grid", "Grid")"#));
    assert!(java.contains(r#"get("mastercontrol.tab." + id)"#));
    assert!(java.contains(r#"get("dashboards.title")"#));
    assert!(!java.contains("\"dashboard."));

    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "mastercontrol.view.grid=Grid\nmastercontrol.tab.main=Main\ndashboards.title=Boards\n"
    );
    assert_eq!(
        test.read_file("i18n/messages_fr.properties")?,
        "mastercontrol.view.grid=Grille\nmastercontrol.tab.main=Principal\n"
    );
    Ok(())
}

#[test]
fn test_rename_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let (code, stdout) = run(test.rename_command("dashboard", "mastercontrol"))?;

    assert_eq!(code, 1, "{}", stdout);
    assert!(stdout.contains("Run with --apply to rename these keys."));
    assert_eq!(test.read_file("src/MasterControlViewer.java")?, VIEWER);
    Ok(())
}

#[test]
fn test_rename_rejects_invalid_prefix() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let output = test
        .rename_command("dashboard", "master control")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("is not a valid key prefix"), "{}", stderr);
    Ok(())
}

#[test]
fn test_rename_refuses_when_a_source_is_unreadable() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;
    let mut legacy = br#"class Legacy { String s = i18n.get("dashboard.view.grid"); // "#.to_vec();
    legacy.extend_from_slice(&[0xE9, b'\n', b'}']);
    test.write_bytes("src/Legacy.java", &legacy)?;

    let mut cmd = test.rename_command("dashboard", "mastercontrol");
    cmd.arg("--apply");
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(
        stderr.contains("Error: Cannot rename, 1 source file(s) could not be read:"),
        "{}",
        stderr
    );
    assert!(stderr.contains("  src/Legacy.java"));
    assert_eq!(test.read_file("src/MasterControlViewer.java")?, VIEWER);
    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "dashboard.view.grid=Grid\ndashboard.tab.main=Main\ndashboards.title=Boards\n"
    );
    Ok(())
}

