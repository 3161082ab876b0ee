//! Preferences file loading and parsing.
//!
//! Parses `vellum.toml` (or an override path supplied by the host),
//! extracting the editor tunables: wrap columns, tab stop, page-motion
//! length and undo depth. Every field defaults to the built-in constants
//! when absent, an unreadable or unparseable file falls back to defaults
//! wholesale, and unknown fields are ignored so older binaries tolerate
//! newer files.
//!
//! Raw parsed values are retained; [`Config::effective`] applies floors and
//! caps (a 3-column wrap width or a zero-entry history would wedge the
//! editor) and logs an `info!` event whenever a value had to be clamped.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

/// Default wrap width in chars.
pub const DEFAULT_COLUMNS: usize = 80;
/// Default soft-tab stop.
pub const DEFAULT_TAB_STOP: usize = 8;
/// Default lines a page motion travels.
pub const DEFAULT_PAGE_LINES: usize = 20;
/// Default undo history depth.
pub const DEFAULT_MAX_UNDO: usize = 500;

const MIN_COLUMNS: usize = 20;
const MAX_COLUMNS: usize = 1000;
const MAX_UNDO_CAP: usize = 10_000;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSection {
    #[serde(default = "EditorSection::default_columns")]
    pub columns: usize,
    #[serde(default = "EditorSection::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorSection::default_page_lines")]
    pub page_lines: usize,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            columns: Self::default_columns(),
            tab_stop: Self::default_tab_stop(),
            page_lines: Self::default_page_lines(),
        }
    }
}

impl EditorSection {
    const fn default_columns() -> usize {
        DEFAULT_COLUMNS
    }
    const fn default_tab_stop() -> usize {
        DEFAULT_TAB_STOP
    }
    const fn default_page_lines() -> usize {
        DEFAULT_PAGE_LINES
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistorySection {
    #[serde(default = "HistorySection::default_max_undo")]
    pub max_undo: usize,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            max_undo: Self::default_max_undo(),
        }
    }
}

impl HistorySection {
    const fn default_max_undo() -> usize {
        DEFAULT_MAX_UNDO
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorSection,
    #[serde(default)]
    pub history: HistorySection,
}

/// Clamped, ready-to-use values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    pub columns: usize,
    pub tab_stop: usize,
    pub page_lines: usize,
    pub max_undo: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Original file string, when one was read.
    pub raw: Option<String>,
    /// Parsed (or default) data, pre-clamp.
    pub file: ConfigFile,
}

/// Best-effort config path: a local `vellum.toml` wins, then the platform
/// config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("vellum.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vellum").join("vellum.toml");
    }
    PathBuf::from("vellum.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config {
                raw: Some(content),
                file,
            }),
            Err(err) => {
                info!(target: "config", path = %path.display(), error = %err, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

impl Config {
    /// Apply floors and caps to the raw values. Logged per field when the
    /// raw value was out of range.
    pub fn effective(&self) -> Effective {
        let columns = self.file.editor.columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        if columns != self.file.editor.columns {
            info!(
                target: "config",
                raw = self.file.editor.columns,
                clamped = columns,
                "wrap_columns_clamped"
            );
        }
        let tab_stop = self.file.editor.tab_stop.clamp(1, columns);
        if tab_stop != self.file.editor.tab_stop {
            info!(
                target: "config",
                raw = self.file.editor.tab_stop,
                clamped = tab_stop,
                "tab_stop_clamped"
            );
        }
        let page_lines = self.file.editor.page_lines.max(1);
        if page_lines != self.file.editor.page_lines {
            info!(
                target: "config",
                raw = self.file.editor.page_lines,
                clamped = page_lines,
                "page_lines_clamped"
            );
        }
        let max_undo = self.file.history.max_undo.clamp(1, MAX_UNDO_CAP);
        if max_undo != self.file.history.max_undo {
            info!(
                target: "config",
                raw = self.file.history.max_undo,
                clamped = max_undo,
                "max_undo_clamped"
            );
        }
        Effective {
            columns,
            tab_stop,
            page_lines,
            max_undo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\ncolumns = 2\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let eff = with_default(subscriber, || cfg.effective());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("wrap_columns_clamped"));
        assert_eq!(eff.columns, 20);
    }

    #[test]
    fn defaults_when_file_missing() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        let eff = cfg.effective();
        assert_eq!(eff.columns, DEFAULT_COLUMNS);
        assert_eq!(eff.tab_stop, DEFAULT_TAB_STOP);
        assert_eq!(eff.page_lines, DEFAULT_PAGE_LINES);
        assert_eq!(eff.max_undo, DEFAULT_MAX_UNDO);
    }

    #[test]
    fn parses_editor_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\ncolumns = 72\ntab_stop = 4\npage_lines = 40\n[history]\nmax_undo = 50\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let eff = cfg.effective();
        assert_eq!(eff.columns, 72);
        assert_eq!(eff.tab_stop, 4);
        assert_eq!(eff.page_lines, 40);
        assert_eq!(eff.max_undo, 50);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\ncolumns = 100\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let eff = cfg.effective();
        assert_eq!(eff.columns, 100);
        assert_eq!(eff.tab_stop, DEFAULT_TAB_STOP);
        assert_eq!(eff.max_undo, DEFAULT_MAX_UNDO);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\ncolumns = 2\npage_lines = 0\n[history]\nmax_undo = 0\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let eff = cfg.effective();
        assert_eq!(eff.columns, 20);
        assert_eq!(eff.page_lines, 1);
        assert_eq!(eff.max_undo, 1);
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "this is not toml [[[").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.effective().columns, DEFAULT_COLUMNS);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\ncolumns = 64\nfuture_feature = true\n[theme]\nname = \"dark\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.effective().columns, 64);
    }
}
