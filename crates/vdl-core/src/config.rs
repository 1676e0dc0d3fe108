use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::tools::ToolPaths;

pub const DEFAULT_OUTPUT_DIR: &str = "/dl";

/// External tool locations (optional `[tools]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub yt_dlp: PathBuf,
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let paths = ToolPaths::default();
        Self {
            yt_dlp: paths.yt_dlp,
            ffprobe: paths.ffprobe,
            ffmpeg: paths.ffmpeg,
        }
    }
}

impl From<ToolsConfig> for ToolPaths {
    fn from(cfg: ToolsConfig) -> Self {
        Self {
            yt_dlp: cfg.yt_dlp,
            ffprobe: cfg.ffprobe,
            ffmpeg: cfg.ffmpeg,
        }
    }
}

/// Global configuration loaded from `~/.config/vdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdlConfig {
    /// Directory downloads land in; also where `.netrc`, `cookies.txt` and `urls.txt` are looked up.
    pub output_dir: PathBuf,
    /// Cap on jobs running at once (None = every job starts immediately).
    #[serde(default)]
    pub max_parallel_jobs: Option<usize>,
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Default for VdlConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_parallel_jobs: None,
            tools: ToolsConfig::default(),
        }
    }
}

/// Command-line values that win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub max_parallel_jobs: Option<usize>,
    pub yt_dlp: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
}

impl VdlConfig {
    pub fn apply_overrides(mut self, o: ConfigOverrides) -> Self {
        if let Some(dir) = o.output_dir {
            self.output_dir = dir;
        }
        if o.max_parallel_jobs.is_some() {
            self.max_parallel_jobs = o.max_parallel_jobs;
        }
        if let Some(p) = o.yt_dlp {
            self.tools.yt_dlp = p;
        }
        if let Some(p) = o.ffprobe {
            self.tools.ffprobe = p;
        }
        if let Some(p) = o.ffmpeg {
            self.tools.ffmpeg = p;
        }
        self
    }

    pub fn tool_paths(&self) -> ToolPaths {
        self.tools.clone().into()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = VdlConfig::default();
        assert_eq!(cfg.output_dir, PathBuf::from("/dl"));
        assert!(cfg.max_parallel_jobs.is_none());
        assert_eq!(cfg.tools.ffmpeg, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = VdlConfig {
            max_parallel_jobs: Some(3),
            ..VdlConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: VdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_minimal_uses_tool_defaults() {
        let cfg: VdlConfig = toml::from_str(r#"output_dir = "/srv/videos""#).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/srv/videos"));
        assert!(cfg.max_parallel_jobs.is_none());
        assert_eq!(cfg.tools, ToolsConfig::default());
    }

    #[test]
    fn config_toml_partial_tools_section() {
        let toml = r#"
            output_dir = "/dl"
            max_parallel_jobs = 2

            [tools]
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
        "#;
        let cfg: VdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_parallel_jobs, Some(2));
        assert_eq!(cfg.tools.ffmpeg, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(cfg.tools.yt_dlp, PathBuf::from("yt-dlp"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let cfg = VdlConfig {
            max_parallel_jobs: Some(4),
            ..VdlConfig::default()
        }
        .apply_overrides(ConfigOverrides {
            output_dir: Some("/tmp/out".into()),
            yt_dlp: Some("/usr/local/bin/yt-dlp".into()),
            ..ConfigOverrides::default()
        });
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.max_parallel_jobs, Some(4));
        let tools = cfg.tool_paths();
        assert_eq!(tools.yt_dlp, PathBuf::from("/usr/local/bin/yt-dlp"));
        assert_eq!(tools.ffprobe, PathBuf::from("ffprobe"));
    }
}
