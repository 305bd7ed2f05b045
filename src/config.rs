use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

/// Flags that can be saved as defaults and merged with the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub skip_login: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            endpoint: other.endpoint.clone().or_else(|| self.endpoint.clone()),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
            skip_login: self.skip_login || other.skip_login,
        }
    }

    /// Request timeout; unset or zero means wait indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

pub fn global_config_path() -> PathBuf {
    platform_dir("XDG_CONFIG_HOME", ".config").map_or_else(local_override_path, |dir| {
        dir.join("config")
    })
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".scriberc")
}

/// Where diagnostics go when no `--log-file` is given.
pub fn default_log_path() -> PathBuf {
    platform_dir("XDG_STATE_HOME", ".local/state")
        .map_or_else(|| PathBuf::from("scribe.log"), |dir| dir.join("scribe.log"))
}

fn platform_dir(xdg_var: &str, home_fallback: &str) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let _ = (xdg_var, home_fallback);
        std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join("scribe"))
    }

    #[cfg(target_os = "macos")]
    {
        let _ = (xdg_var, home_fallback);
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("scribe")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os(xdg_var) {
            return Some(PathBuf::from(xdg).join("scribe"));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback).join("scribe"))
    }
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# scribe defaults (saved with --save)".to_string());
    if let Some(endpoint) = &flags.endpoint {
        lines.push(format!("--endpoint {endpoint}"));
    }
    if let Some(secs) = flags.timeout_secs {
        lines.push(format!("--timeout {secs}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if flags.skip_login {
        lines.push("--skip-login".to_string());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of raw argv-style tokens. Unknown tokens are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--skip-login" {
            flags.skip_login = true;
        } else if token == "--endpoint" {
            if let Some(next) = tokens.get(i + 1) {
                flags.endpoint = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--endpoint=") {
            flags.endpoint = Some(value.to_string());
        } else if token == "--timeout" {
            if let Some(next) = tokens.get(i + 1) {
                flags.timeout_secs = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--timeout=") {
            flags.timeout_secs = value.parse().ok();
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "scribe".to_string(),
            "--endpoint".to_string(),
            "http://localhost:9000/proc".to_string(),
            "--timeout=15".to_string(),
            "--log-file".to_string(),
            "scribe.log".to_string(),
            "--skip-login".to_string(),
            "--unknown".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.endpoint.as_deref(), Some("http://localhost:9000/proc"));
        assert_eq!(flags.timeout_secs, Some(15));
        assert_eq!(flags.log_file, Some(PathBuf::from("scribe.log")));
        assert!(flags.skip_login);
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let flags = parse_flag_tokens(&["--timeout".to_string(), "soon".to_string()]);
        assert_eq!(flags.timeout_secs, None);
        assert_eq!(flags.timeout(), None);
    }

    #[test]
    fn test_zero_timeout_means_no_timeout() {
        let flags = ConfigFlags {
            timeout_secs: Some(0),
            ..ConfigFlags::default()
        };
        assert_eq!(flags.timeout(), None);
        let flags = ConfigFlags {
            timeout_secs: Some(3),
            ..ConfigFlags::default()
        };
        assert_eq!(flags.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_config_union_prefers_later_options() {
        let file = ConfigFlags {
            endpoint: Some("http://a/proc".to_string()),
            timeout_secs: Some(10),
            skip_login: true,
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            endpoint: Some("http://b/proc".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.endpoint.as_deref(), Some("http://b/proc"));
        assert_eq!(merged.timeout_secs, Some(10));
        assert!(merged.skip_login);
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            endpoint: Some("http://127.0.0.1:9999/proc".to_string()),
            timeout_secs: Some(30),
            log_file: Some(PathBuf::from("out.log")),
            skip_login: true,
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
