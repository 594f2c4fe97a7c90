// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Command line and config file handling.
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file given with `--config`, and command line flags. Later layers win.
//!
//! ```toml
//! font = "DejaVuSansMono"
//! output = "bitmaps"
//! point_size = 16
//! block = "glyphs"
//! max_point_size = 72
//! font_dirs = ["~/fonts"]
//! log_file = "log/font_viewer.log"
//! log_level = "info"
//! frame_sleep_ms = 1
//! seed = 42
//! ```

use crate::error::{Result, ViewerError};
use crate::text::sizing::{MAX_POINT_SIZE, MIN_POINT_SIZE};
use crate::text::TextBlockId;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FONT: &str = "Deferral-Regular";
pub const DEFAULT_POINT_SIZE: u32 = 16;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "font-viewer", version, about = "View a font's glyphs at any point size")]
pub struct Args {
    /// Font name or path to a TTF/OTF/PNG/BMP file
    #[arg(value_name = "FONT")]
    pub font: Option<String>,

    /// Save path for rendered bitmaps
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Font point size to start with
    #[arg(short, long, value_name = "SIZE")]
    pub point_size: Option<u32>,

    /// Text block shown first: cp437, cp850, glyphs, test or code
    #[arg(short, long, value_name = "NAME")]
    pub block: Option<String>,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Extra directories searched for font names
    #[arg(long = "font-dir", value_name = "DIR")]
    pub font_dirs: Vec<PathBuf>,

    /// Seed for glyph colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save every text block as PNG and exit without opening a window
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub font: String,
    pub output: PathBuf,
    pub point_size: u32,
    pub max_point_size: u32,
    /// Name of the text block shown first
    pub block: String,
    pub font_dirs: Vec<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: String,
    pub frame_sleep_ms: u64,
    pub seed: Option<u64>,
    pub headless: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            output: PathBuf::from("bitmaps"),
            point_size: DEFAULT_POINT_SIZE,
            max_point_size: MAX_POINT_SIZE,
            block: TextBlockId::Glyphs.name().to_string(),
            font_dirs: vec![],
            log_file: PathBuf::from("log").join("font_viewer.log"),
            log_level: "info".to_string(),
            frame_sleep_ms: 1,
            seed: None,
            headless: false,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ViewerError::Config(format!("can not read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Defaults, then the config file, then the flags.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        cfg.merge_args(args);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn merge_args(&mut self, args: &Args) {
        if let Some(font) = &args.font {
            self.font = font.clone();
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if let Some(ps) = args.point_size {
            self.point_size = ps;
        }
        if let Some(block) = &args.block {
            self.block = block.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        self.font_dirs.extend(args.font_dirs.iter().cloned());
        self.headless |= args.headless;
    }

    pub fn validate(&self) -> Result<()> {
        if self.point_size == 0 {
            return Err(ViewerError::Config("point size must be at least 1".into()));
        }
        if self.max_point_size < MIN_POINT_SIZE {
            return Err(ViewerError::Config(format!(
                "max_point_size must be at least {}",
                MIN_POINT_SIZE
            )));
        }
        if self.start_block().is_none() {
            return Err(ViewerError::Config(format!(
                "unknown text block '{}', expected one of: {}",
                self.block,
                TextBlockId::ALL.map(TextBlockId::name).join(", ")
            )));
        }
        if self.font.is_empty() {
            return Err(ViewerError::Config("font name is empty".into()));
        }
        Ok(())
    }

    pub fn start_block(&self) -> Option<TextBlockId> {
        TextBlockId::from_name(&self.block)
    }

    pub fn frame_sleep(&self) -> Duration {
        Duration::from_millis(self.frame_sleep_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["font-viewer"]).unwrap();
        let cfg = ViewerConfig::from_args(&args).unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.font, "Deferral-Regular");
        assert_eq!(cfg.point_size, 16);
        assert_eq!(cfg.frame_sleep(), Duration::from_millis(1));
    }

    #[test]
    fn test_cli_flags() {
        let args = Args::try_parse_from([
            "font-viewer",
            "Hack-Regular",
            "-o",
            "out",
            "-p",
            "22",
            "--font-dir",
            "a",
            "--font-dir",
            "b",
            "--headless",
            "--seed",
            "9",
            "-b",
            "code",
        ])
        .unwrap();
        let cfg = ViewerConfig::from_args(&args).unwrap();
        assert_eq!(cfg.font, "Hack-Regular");
        assert_eq!(cfg.output, PathBuf::from("out"));
        assert_eq!(cfg.point_size, 22);
        assert_eq!(cfg.font_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(cfg.headless);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.start_block(), Some(TextBlockId::Code));
    }

    #[test]
    fn test_file_then_flags() {
        let mut cfg = ViewerConfig::parse(
            r#"
            font = "FromFile"
            point_size = 30
            max_point_size = 40
            frame_sleep_ms = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.output, PathBuf::from("bitmaps"));
        assert_eq!(cfg.max_point_size, 40);

        let args = Args::try_parse_from(["font-viewer", "-p", "12"]).unwrap();
        cfg.merge_args(&args);
        assert_eq!(cfg.font, "FromFile");
        assert_eq!(cfg.point_size, 12);
        assert_eq!(cfg.frame_sleep_ms, 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            ViewerConfig::parse("fnt = \"typo\""),
            Err(ViewerError::Config(_))
        ));
    }

    #[test]
    fn test_zero_point_size_rejected() {
        let args = Args::try_parse_from(["font-viewer", "-p", "0"]).unwrap();
        assert!(matches!(
            ViewerConfig::from_args(&args),
            Err(ViewerError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_block_rejected() {
        let args = Args::try_parse_from(["font-viewer", "--block", "cp1252"]).unwrap();
        match ViewerConfig::from_args(&args) {
            Err(ViewerError::Config(msg)) => assert!(msg.contains("cp437, cp850, glyphs, test, code")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(ViewerConfig::default().start_block(), Some(TextBlockId::Glyphs));
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::try_parse_from(["font-viewer", "-c", "/no/such/viewer.toml"]).unwrap();
        assert!(matches!(
            ViewerConfig::from_args(&args),
            Err(ViewerError::Config(_))
        ));
    }
}
