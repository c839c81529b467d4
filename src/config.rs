use std::path::PathBuf;

pub const DEFAULT_ORG_NAME: &str = "Golden English Bekasi";
pub const DEFAULT_EXPORT_PREFIX: &str = "GE-Bekasi-Report";
pub const MIN_RENDER_WIDTH: usize = 40;

/// Session settings. Logging reads its own variables (see `logging`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory that receives exported report files.
    pub export_dir: PathBuf,
    /// Title shown on the cover slide.
    pub org_name: String,
    /// Export file name prefix, followed by `-{month}-{year}.json`.
    pub export_prefix: String,
    /// Text renderer line width.
    pub render_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            org_name: DEFAULT_ORG_NAME.to_string(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            render_width: 72,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            org_name: std::env::var("ORG_NAME").unwrap_or_else(|_| DEFAULT_ORG_NAME.to_string()),
            export_prefix: std::env::var("EXPORT_PREFIX")
                .unwrap_or_else(|_| DEFAULT_EXPORT_PREFIX.to_string()),
            render_width: std::env::var("RENDER_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(72),
        }
        .normalized()
    }

    /// Clamp values the renderer cannot work with.
    pub fn normalized(mut self) -> Self {
        self.render_width = self.render_width.max(MIN_RENDER_WIDTH);
        if self.export_prefix.trim().is_empty() {
            self.export_prefix = DEFAULT_EXPORT_PREFIX.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_width_is_clamped() {
        let cfg = Config {
            render_width: 10,
            ..Config::default()
        }
        .normalized();
        assert_eq!(cfg.render_width, MIN_RENDER_WIDTH);
    }

    #[test]
    fn blank_prefix_falls_back() {
        let cfg = Config {
            export_prefix: "  ".to_string(),
            ..Config::default()
        }
        .normalized();
        assert_eq!(cfg.export_prefix, DEFAULT_EXPORT_PREFIX);
    }
}
