use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_mouse: bool,
    pub tab_width: Option<usize>,
    pub wheel_lines: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches add up, values from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_mouse: self.no_mouse || other.no_mouse,
            tab_width: other.tab_width.or(self.tab_width),
            wheel_lines: other.wheel_lines.or(self.wheel_lines),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("bed").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("bed")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("bed").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("bed").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".bedrc")
}

/// Read flags from an rc file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
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

/// Write `flags` as an rc file, creating its directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# bed defaults (saved with --save)".to_string()];
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if let Some(width) = flags.tab_width {
        lines.push(format!("--tab-width {width}"));
    }
    if let Some(step) = flags.wheel_lines {
        lines.push(format!("--wheel-lines {step}"));
    }
    if let Some(log) = &flags.log_file {
        lines.push(format!("--log-file {}", log.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove an rc file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens and values that
/// do not parse are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let takes_value = matches!(name, "--tab-width" | "--wheel-lines" | "--log-file");
        let value = if takes_value && inline.is_none() {
            i += 1;
            tokens.get(i).map(String::as_str)
        } else {
            inline
        };
        match name {
            "--no-mouse" => flags.no_mouse = true,
            "--tab-width" => flags.tab_width = value.and_then(parse_count).or(flags.tab_width),
            "--wheel-lines" => {
                flags.wheel_lines = value.and_then(parse_count).or(flags.wheel_lines);
            }
            "--log-file" => {
                if let Some(value) = value {
                    flags.log_file = Some(PathBuf::from(value));
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_count(s: &str) -> Option<usize> {
    s.parse().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "bed".to_string(),
            "--no-mouse".to_string(),
            "--tab-width".to_string(),
            "8".to_string(),
            "--wheel-lines=5".to_string(),
            "--log-file=bed.log".to_string(),
            "notes.txt".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.no_mouse);
        assert_eq!(flags.tab_width, Some(8));
        assert_eq!(flags.wheel_lines, Some(5));
        assert_eq!(flags.log_file, Some(PathBuf::from("bed.log")));
    }

    #[test]
    fn test_parse_flag_tokens_skips_bad_counts() {
        let args = vec![
            "--tab-width".to_string(),
            "wide".to_string(),
            "--wheel-lines=0".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.tab_width, None);
        assert_eq!(flags.wheel_lines, None);
    }

    #[test]
    fn test_trailing_value_flag_without_value() {
        let flags = parse_flag_tokens(&["--log-file".to_string()]);
        assert_eq!(flags.log_file, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            no_mouse: true,
            tab_width: Some(2),
            wheel_lines: Some(6),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            tab_width: Some(8),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.no_mouse);
        assert_eq!(merged.tab_width, Some(8));
        assert_eq!(merged.wheel_lines, Some(6));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".bedrc");
        let flags = ConfigFlags {
            no_mouse: true,
            tab_width: Some(2),
            wheel_lines: Some(1),
            log_file: Some(PathBuf::from("bed.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
