// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Font file lookup.
//!
//! A font is given either as a path or as a bare name. Names are looked up
//! with each supported extension in the font homes: the working directory
//! first, then user supplied directories, then the platform font folders.
//! Each home is searched one directory level deep, and when several
//! candidates exist the most recently modified file wins.

use crate::error::{Result, ViewerError};
use itertools::{iproduct, Itertools};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions tried for bare font names, in order.
pub const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "png", "bmp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Platform {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// Directories searched for bare font names, most specific first.
pub fn font_homes(
    platform: Platform,
    home: Option<PathBuf>,
    system_root: Option<PathBuf>,
    extra: &[PathBuf],
) -> Vec<PathBuf> {
    let mut homes = vec![PathBuf::from("."), PathBuf::from("fonts")];
    homes.extend(extra.iter().cloned());
    match platform {
        Platform::MacOs => {
            if let Some(h) = home {
                homes.push(h.join("Library/Fonts"));
            }
            homes.push(PathBuf::from("/Library/Fonts"));
            homes.push(PathBuf::from("/Network/Library/Fonts"));
            homes.push(PathBuf::from("/System/Library/Fonts"));
        }
        Platform::Windows => {
            if let Some(root) = system_root {
                homes.push(root.join("Fonts"));
            }
        }
        Platform::Linux => {
            if let Some(h) = home {
                homes.push(h.join(".fonts/truetype"));
                homes.push(h.join(".local/share/fonts/truetype"));
            }
            homes.push(PathBuf::from("/usr/local/share/fonts/truetype"));
            homes.push(PathBuf::from("/usr/share/fonts/truetype"));
        }
    }
    homes
}

/// Resolves a font path or name to an existing file.
pub fn find_font(name: &str, extra: &[PathBuf]) -> Result<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }
    let homes = font_homes(
        Platform::current(),
        dirs_next::home_dir(),
        std::env::var_os("SYSTEMROOT").map(PathBuf::from),
        extra,
    );
    search_homes(name, &homes).ok_or_else(|| ViewerError::FontNotFound(name.to_string()))
}

/// Newest `name.ext` found in `homes` or their immediate subdirectories.
pub fn search_homes(name: &str, homes: &[PathBuf]) -> Option<PathBuf> {
    let dirs = homes
        .iter()
        .filter(|h| h.is_dir())
        .flat_map(|h| std::iter::once(h.clone()).chain(subdirs(h)))
        .unique()
        .collect::<Vec<_>>();

    iproduct!(dirs.iter(), FONT_EXTENSIONS.iter())
        .map(|(dir, ext)| dir.join(format!("{}.{}", name, ext)))
        .filter_map(|p| modified(&p).map(|t| (t, p)))
        .inspect(|(_, p)| debug!("font candidate {}", p.display()))
        .max_by_key(|(t, _)| *t)
        .map(|(_, p)| p)
}

fn subdirs(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .sorted()
            .collect(),
        Err(_) => vec![],
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    let meta = fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    meta.modified().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("font_viewer_locate_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path, age_secs: u64) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let file = fs::File::create(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .unwrap();
    }

    #[test]
    fn test_linux_homes() {
        let homes = font_homes(Platform::Linux, Some(PathBuf::from("/home/u")), None, &[]);
        assert_eq!(homes[0], PathBuf::from("."));
        assert!(homes.contains(&PathBuf::from("/home/u/.fonts/truetype")));
        assert!(homes.contains(&PathBuf::from("/home/u/.local/share/fonts/truetype")));
        assert_eq!(homes.last(), Some(&PathBuf::from("/usr/share/fonts/truetype")));
    }

    #[test]
    fn test_macos_and_windows_homes() {
        let mac = font_homes(Platform::MacOs, Some(PathBuf::from("/Users/u")), None, &[]);
        assert!(mac.contains(&PathBuf::from("/Users/u/Library/Fonts")));
        assert!(mac.contains(&PathBuf::from("/System/Library/Fonts")));

        let win = font_homes(
            Platform::Windows,
            None,
            Some(PathBuf::from("C:\\Windows")),
            &[PathBuf::from("extra")],
        );
        assert_eq!(win[2], PathBuf::from("extra"));
        assert_eq!(win.last(), Some(&PathBuf::from("C:\\Windows").join("Fonts")));
    }

    #[test]
    fn test_newest_candidate_wins() {
        let dir = scratch("newest");
        let a = dir.join("a");
        let b = dir.join("b");
        touch(&a.join("Mono.ttf"), 3600);
        touch(&b.join("nested").join("Mono.otf"), 10);
        touch(&a.join("Other.ttf"), 0);

        let found = search_homes("Mono", &[a.clone(), b.clone()]).unwrap();
        assert_eq!(found, b.join("nested").join("Mono.otf"));
        assert_eq!(search_homes("Missing", &[a, b]), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_find_font_direct_path() {
        let dir = scratch("direct");
        let font = dir.join("Sheet.png");
        touch(&font, 0);
        assert_eq!(find_font(font.to_str().unwrap(), &[]).unwrap(), font);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_find_font_in_extra_dir() {
        let dir = scratch("extra");
        touch(&dir.join("ViewerTestFont.bmp"), 0);
        assert_eq!(
            find_font("ViewerTestFont", &[dir.clone()]).unwrap(),
            dir.join("ViewerTestFont.bmp")
        );
        assert!(matches!(
            find_font("NoSuchFontAnywhere-42", &[dir.clone()]),
            Err(ViewerError::FontNotFound(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
