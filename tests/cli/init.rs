use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, stdout) = run(cmd)?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "\u{2713} Created .locsyncrc.json\n");

    let content = test.read_file(".locsyncrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["primaryLocale"], "en");
    assert_eq!(parsed["rootPaths"][0], "src/main/java");
    assert_eq!(parsed["moduleDefinitions"][0]["prefix"], "messages");
    assert!(parsed.get("lookupExpression").is_some());
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains(".locsyncrc.json already exists"));
    assert_eq!(test.read_file(".locsyncrc.json")?, "{}");
    Ok(())
}
