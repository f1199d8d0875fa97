//! Env File Config Store - 自选股列表持久化
//!
//! 读写 dotenv 格式文件中的 `STOCK_LIST=` 行，其余行原样保留

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::{ConfigStoreError, ConfigStorePort};

const STOCK_LIST_KEY: &str = "STOCK_LIST";

/// 归一化自选股列表：按逗号/空白切分，去空、大小写不敏感去重，逗号拼接
pub fn normalize_stock_list(raw: &str) -> String {
    let mut seen = HashSet::new();
    raw.split(|c: char| c == ',' || c == '，' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect::<Vec<_>>()
        .join(",")
}

/// dotenv 文件存储
pub struct EnvFileConfigStore {
    path: PathBuf,
    /// 串行化读-改-写
    write_lock: Mutex<()>,
}

impl EnvFileConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_lines(&self) -> Result<Vec<String>, ConfigStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ConfigStoreError::IoError(e.to_string())),
        }
    }

    /// 匹配 `STOCK_LIST=...` 或 `export STOCK_LIST=...`，返回值部分
    fn parse_entry(line: &str) -> Option<&str> {
        let line = line.trim_start();
        let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
        let rest = line.strip_prefix(STOCK_LIST_KEY)?;
        let value = rest.trim_start().strip_prefix('=')?;
        Some(value.trim().trim_matches(|c| c == '"' || c == '\''))
    }
}

impl ConfigStorePort for EnvFileConfigStore {
    fn stock_list(&self) -> Result<String, ConfigStoreError> {
        let lines = self.read_lines()?;
        Ok(lines
            .iter()
            .find_map(|line| Self::parse_entry(line))
            .map(normalize_stock_list)
            .unwrap_or_default())
    }

    fn set_stock_list(&self, raw: &str) -> Result<String, ConfigStoreError> {
        let normalized = normalize_stock_list(raw);
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut lines = self.read_lines()?;
        let entry = format!("{}={}", STOCK_LIST_KEY, normalized);
        match lines.iter().position(|line| Self::parse_entry(line).is_some()) {
            Some(index) => lines[index] = entry,
            None => lines.push(entry),
        }

        let mut content = lines.join("\n");
        content.push('\n');
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigStoreError::IoError(e.to_string()))?;
        }
        std::fs::write(&self.path, content).map_err(|e| ConfigStoreError::IoError(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "Stock list persisted");
        Ok(normalized)
    }

    fn env_filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_stock_list() {
        assert_eq!(
            normalize_stock_list(" 600519, hk00700\nAAPL，aapl  000001,,"),
            "600519,hk00700,AAPL,000001"
        );
        assert_eq!(normalize_stock_list("   "), "");
    }

    #[test]
    fn test_missing_file_is_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvFileConfigStore::new(dir.path().join(".env"));
        assert_eq!(store.stock_list().unwrap(), "");
        assert_eq!(store.env_filename(), ".env");
    }

    #[test]
    fn test_set_preserves_other_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "# comment\nAPI_KEY=secret\nexport STOCK_LIST=\"600519\"\nLOG=debug\n")
            .unwrap();

        let store = EnvFileConfigStore::new(&path);
        assert_eq!(store.stock_list().unwrap(), "600519");

        let saved = store.set_stock_list("600519 hk00700").unwrap();
        assert_eq!(saved, "600519,hk00700");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# comment\nAPI_KEY=secret\nSTOCK_LIST=600519,hk00700\nLOG=debug\n"
        );
        assert_eq!(store.stock_list().unwrap(), "600519,hk00700");
    }

    #[test]
    fn test_set_appends_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/.env");
        let store = EnvFileConfigStore::new(&path);

        store.set_stock_list("AAPL").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "STOCK_LIST=AAPL\n");
    }

    #[test]
    fn test_similar_keys_untouched() {
        assert!(EnvFileConfigStore::parse_entry("STOCK_LIST_EXTRA=1").is_none());
        assert_eq!(EnvFileConfigStore::parse_entry("STOCK_LIST = a,b"), Some("a,b"));
    }
}
