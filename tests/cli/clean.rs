use anyhow::Result;

use crate::{CliTest, run};

fn setup(test: &CliTest) -> Result<()> {
    test.write_file(
        "src/app/ReactorViewer.java",
        r#"class ReactorViewer {
    void build() {
        start.setText(I18n.getInstance().get("reactor.start", "Start"));
        menu.setText(i18n.get("menu." + section));
    }
}
"#,
    )?;
    test.write_file(
        "i18n/messages_en.properties",
        "# Reactor\nreactor.start=Start\nreactor.stop=Stop\nmenu.file=File\n",
    )?;
    test.write_file(
        "i18n/messages_fr.properties",
        "reactor.start=D\u{e9}marrer\nreactor.stop=Arr\u{ea}ter\n",
    )
}

#[test]
fn test_clean_dry_run_lists_unused_keys() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let (code, stdout) = run(test.clean_command())?;

    assert_eq!(code, 1, "{}", stdout);
    assert!(stdout.contains("i18n/messages_en.properties:\n  - reactor.stop\n"));
    assert!(stdout.contains("i18n/messages_fr.properties:\n  - reactor.stop\n"));
    assert!(stdout.contains("Would delete 2 key(s) in 2 file(s)."));
    assert!(stdout.contains("Run with --apply to delete these keys."));
    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "# Reactor\nreactor.start=Start\nreactor.stop=Stop\nmenu.file=File\n"
    );
    Ok(())
}

#[test]
fn test_clean_apply_removes_only_unused_keys() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;

    let mut cmd = test.clean_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains("Deleted 2 key(s) in 2 file(s)."));
    // comments stay, prefix-root keys stay, nothing is back-filled
    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "# Reactor\nreactor.start=Start\nmenu.file=File\n"
    );
    assert_eq!(
        test.read_file("i18n/messages_fr.properties")?,
        "reactor.start=D\u{e9}marrer\n"
    );
    Ok(())
}

#[test]
fn test_clean_nothing_to_delete() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "src/Main.java",
        r#"class Main { String s = i18n.get("status.ok"); }"#,
    )?;
    test.write_file("i18n/messages_en.properties", "status.ok=OK\n")?;

    let (code, stdout) = run(test.clean_command())?;

    assert_eq!(code, 0, "{}", stdout);
    assert!(stdout.contains("Checked 1 source file, 2 catalog files - no unused keys"));
    Ok(())
}

#[test]
fn test_clean_keeps_keys_when_a_source_is_unreadable() -> Result<()> {
    let test = CliTest::with_config()?;
    setup(&test)?;
    let mut legacy = br#"class Legacy { String s = i18n.get("reactor.stop"); // "#.to_vec();
    legacy.extend_from_slice(&[0xE9, b'\n', b'}']);
    test.write_bytes("src/app/Legacy.java", &legacy)?;

    let mut cmd = test.clean_command();
    cmd.arg("--apply");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 1, "{}", stdout);
    assert!(stdout.contains("--> src/app/Legacy.java\n"));
    assert!(stdout.contains("warning: unused keys were kept, 1 source file(s) could not be read"));
    assert!(!stdout.contains("Deleted"));
    assert_eq!(
        test.read_file("i18n/messages_en.properties")?,
        "# Reactor\nreactor.start=Start\nreactor.stop=Stop\nmenu.file=File\n"
    );
    Ok(())
}

