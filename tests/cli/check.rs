use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_check_reports_all_issue_kinds() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "src/ThermoApp.java",
        r#"class ThermoApp {
    void build() {
        new Label("Heat Capacity");
        status.setText(I18n.getInstance().get("status.ok", "OK"));
        error.setText(I18n.getInstance().get("status.error", "Error"));
    }
}
"#,
    )?;
    test.write_file(
        "i18n/messages_en.properties",
        "status.ok=OK\nstatus.error=Internal Error\nold.title=Old\n",
    )?;
    test.write_file("i18n/messages_fr.properties", "status.ok=D'accord\n")?;

    let (code, stdout) = run(test.check_command())?;

    assert_eq!(code, 1, "{}", stdout);
    assert!(stdout.contains("error: \"Heat Capacity\"  hardcoded"));
    assert!(stdout.contains("--> src/ThermoApp.java:3:19"));
    assert!(stdout.contains("warning: \"status.error\"  missing-key"));
    assert!(stdout.contains("= note: missing in: fr"));
    assert!(stdout.contains("warning: \"old.title\"  unused-key"));
    assert!(stdout.contains("--> i18n/messages_en.properties:3:1"));
    assert!(stdout.contains("3 problems (1 error, 2 warnings)"));
    Ok(())
}

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "src/ThermoApp.java",
        r#"class ThermoApp { void f() { new Label(I18n.getInstance().get("heat.capacity", "Heat Capacity")); } }"#,
    )?;
    test.write_file("i18n/messages_en.properties", "heat.capacity=Heat Capacity\n")?;
    test.write_file("i18n/messages_fr.properties", "heat.capacity=Capacit\u{e9} thermique\n")?;

    let (code, stdout) = run(test.check_command())?;

    assert_eq!(code, 0, "{}", stdout);
    assert_eq!(
        stdout,
        "\u{2713} Checked 1 source file, 2 catalog files - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_check_finds_config_from_subdirectory() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file("src/deep/pkg/OpticsDemo.java", r#"new Button("Focus");"#)?;

    let mut cmd = test.check_command();
    cmd.current_dir(test.root().join("src/deep"));
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 1, "{}", stdout);
    assert!(stdout.contains("--> src/deep/pkg/OpticsDemo.java:1:12"));
    Ok(())
}

#[test]
fn test_check_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", r#"{ "ignores": ["[unclosed"] }"#)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
