use std::path::PathBuf;
use std::time::Duration;

use scribe::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".scriberc");
    let content = r"
# comment
--skip-login

--endpoint http://10.0.0.2:8080/proc

--log-file=scribe.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.skip_login);
    assert_eq!(flags.endpoint.as_deref(), Some("http://10.0.0.2:8080/proc"));
    assert_eq!(flags.log_file, Some(PathBuf::from("scribe.log")));
    assert_eq!(flags.timeout(), None);
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".scriberc");
    let content = "--skip-login\n--endpoint http://a/proc\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "scribe".to_string(),
        "--endpoint".to_string(),
        "http://b/proc".to_string(),
        "--timeout".to_string(),
        "20".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.skip_login, "file flags should remain enabled");
    assert_eq!(
        effective.endpoint.as_deref(),
        Some("http://b/proc"),
        "cli should override endpoint"
    );
    assert_eq!(effective.timeout(), Some(Duration::from_secs(20)));
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_wins_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".scriberc");
    std::fs::write(&global, "--endpoint http://global/proc\n--timeout 5\n").unwrap();
    std::fs::write(&local, "--timeout 0\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.endpoint.as_deref(), Some("http://global/proc"));
    assert_eq!(merged.timeout_secs, Some(0));
    assert_eq!(merged.timeout(), None);
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
