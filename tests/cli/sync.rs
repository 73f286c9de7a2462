use anyhow::Result;

use crate::{CliTest, run};

fn setup(test: &CliTest) -> Result<()> {
    test.write_file(
        "src/Status.java",
        r#"class Status {
    String ok = I18n.getInstance().get("status.ok");
    String error = I18n.getInstance().get("status.error");
}
"#,
    )?;
    test.write_file(
        "i18n/messages_en.properties",
        "status.ok=OK\nstatus.error=Internal Error\nold.title=Old\n",
    )?;
    test.write_file("i18n/messages_fr.properties", "status.ok=D'accord\nold.title=Vieux\n")
}

#[test]
fn test_sync_apply_audits_and_backfills() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let mut cmd = test.sync_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains("Deleted 2 key(s) and added 1 key(s) in 2 file(s)."));
    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "status.ok=OK\nstatus.error=Internal Error\n"
    );
    assert_eq!(
        test.read_file("i18n/messages_fr.properties")?,
        "status.ok=D'accord\n# pending translation\nstatus.error=Internal Error\n"
    );

    // a second run finds nothing to do
    let (code, stdout) = run(test.sync_command())?;
    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains("catalogs are in sync"));
    Ok(())
}

#[test]
fn test_sync_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let (code, stdout) = run(test.sync_command())?;

    assert_eq!(code, 1, "{}", stdout);
    assert!(stdout.contains("i18n/messages_fr.properties:\n  - old.title\n  + status.error\n"));
    assert!(stdout.contains("Would delete 2 key(s) and add 1 key(s) in 2 file(s)."));
    assert!(stdout.contains("Run with --apply to update these catalogs."));
    assert_eq!(
        test.read_file("i18n/messages_fr.properties")?,
        "status.ok=D'accord\nold.title=Vieux\n"
    );
    Ok(())
}

#[test]
fn test_sync_creates_missing_locale_file() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "src/Status.java",
        r#"class Status { String ok = i18n.get("status.ok"); }"#,
    )?;
    test.write_file("i18n/messages_en.properties", "status.ok=OK\n")?;

    let mut cmd = test.sync_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "{}", stdout);
    assert_eq!(
        test.read_file("i18n/messages_fr.properties")?,
        "# pending translation\nstatus.ok=OK\n"
    );
    Ok(())
}

#[test]
fn test_sync_primary_locale_override() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "src/Status.java",
        r#"class Status { String ok = i18n.get("status.ok"); }"#,
    )?;
    test.write_file("i18n/messages_fr.properties", "status.ok=D'accord\n")?;

    let mut cmd = test.sync_command();
    cmd.args(["--apply", "--primary-locale", "fr"]);
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "{}", stdout);
    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "# pending translation\nstatus.ok=D'accord\n"
    );
    Ok(())
}

#[test]
fn test_sync_leaves_other_module_catalogs_alone() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;
    test.write_file("i18n/messages_app_en.properties", "app.title=Orbits\n")?;

    let mut cmd = test.sync_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(!stdout.contains("messages_app_en"));
    assert_eq!(
        test.read_file("i18n/messages_app_en.properties")?,
        "app.title=Orbits\n"
    );
    Ok(())
}

