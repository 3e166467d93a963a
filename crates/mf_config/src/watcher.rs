// crates/mf_config/src/watcher.rs

//! 配置快照来源与热加载
//!
//! 求解循环在每个时间步开始时向 [`CaseSource`] 取一次快照，步内只使用该快照。
//! [`CaseWatcher`] 在文件修改时间变化后重新加载，产生新快照；
//! 加载失败时保留旧快照并返回错误。

use crate::case::CaseConfig;
use crate::error::ConfigError;
use mf_foundation::MfResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// 配置快照来源
pub trait CaseSource {
    /// 当前时间步使用的快照
    fn snapshot(&mut self) -> MfResult<Arc<CaseConfig>>;
}

/// 固定快照
#[derive(Debug, Clone)]
pub struct StaticCase(Arc<CaseConfig>);

impl StaticCase {
    /// 创建
    pub fn new(case: CaseConfig) -> Self {
        Self(Arc::new(case))
    }
}

impl CaseSource for StaticCase {
    fn snapshot(&mut self) -> MfResult<Arc<CaseConfig>> {
        Ok(Arc::clone(&self.0))
    }
}

/// 监视配置文件的快照来源
#[derive(Debug)]
pub struct CaseWatcher {
    path: PathBuf,
    modified: Option<SystemTime>,
    current: Arc<CaseConfig>,
}

impl CaseWatcher {
    /// 加载配置文件并开始监视
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let modified = Self::modified_time(&path)?;
        let current = Arc::new(CaseConfig::from_file(&path)?);
        Ok(Self {
            path,
            modified,
            current,
        })
    }

    fn modified_time(path: &Path) -> Result<Option<SystemTime>, ConfigError> {
        let meta = std::fs::metadata(path)?;
        Ok(meta.modified().ok())
    }

    /// 当前快照
    pub fn current(&self) -> Arc<CaseConfig> {
        Arc::clone(&self.current)
    }

    /// 文件修改时间变化时重新加载
    ///
    /// 返回 `Some(新快照)` 表示发生了重新加载。
    pub fn reload_if_modified(&mut self) -> Result<Option<Arc<CaseConfig>>, ConfigError> {
        let modified = Self::modified_time(&self.path)?;
        if modified.is_some() && modified == self.modified {
            return Ok(None);
        }
        let case = Arc::new(CaseConfig::from_file(&self.path)?);
        self.modified = modified;
        self.current = Arc::clone(&case);
        log::info!("重新加载配置: {}", self.path.display());
        Ok(Some(case))
    }
}

impl CaseSource for CaseWatcher {
    fn snapshot(&mut self) -> MfResult<Arc<CaseConfig>> {
        if self.current.run_time_modifiable {
            self.reload_if_modified()?;
        }
        Ok(self.current())
    }
}
