//! 游戏配置
//!
//! 配置文件位于 `<config_dir>/reversi/config.json`，缺失或无效时使用默认值。
//! 环境变量优先于配置文件。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use protocol::Difficulty;
use reversi_ai::llm::{LlmAdvisor, LlmConfig};
use reversi_ai::{Advisor, AiBackend, RandomAdvisor};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 难度环境变量
pub const DIFFICULTY_ENV: &str = "REVERSI_DIFFICULTY";
/// 后端环境变量
pub const BACKEND_ENV: &str = "REVERSI_BACKEND";
/// 随机种子环境变量
pub const SEED_ENV: &str = "REVERSI_SEED";

/// 游戏配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// AI 难度标签
    pub difficulty: Difficulty,
    /// AI 后端
    pub backend: AiBackend,
    /// LLM 设置
    pub llm: LlmConfig,
    /// 等待顾问的最长时间（秒），超时走随机兜底
    pub advisor_timeout_secs: u64,
    /// 兜底随机数种子，None 表示使用系统熵
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            backend: AiBackend::default(),
            llm: LlmConfig::default(),
            advisor_timeout_secs: 90,
            seed: None,
        }
    }
}

impl GameConfig {
    /// 获取配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("reversi");
            path.push("config.json");
            path
        })
    }

    /// 从默认路径加载配置，并叠加环境变量
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            None => {
                warn!("Could not determine config directory, using defaults");
                Self::default()
            }
            Some(path) if !path.exists() => {
                info!("No config file at {:?}, using defaults", path);
                Self::default()
            }
            Some(path) => match Self::load_from(&path) {
                Ok(config) => {
                    info!("Loaded config: {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Invalid config file: {:#}, using defaults", e);
                    Self::default()
                }
            },
        };
        config.apply_env();
        config
    }

    /// 从指定文件加载配置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// 保存配置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))?;

        info!("Config saved: {:?}", path);
        Ok(())
    }

    /// 用环境变量覆盖配置
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
        self.llm.apply_env();
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(label) = var(DIFFICULTY_ENV).filter(|v| !v.trim().is_empty()) {
            self.difficulty = Difficulty::new(label.trim());
        }
        if let Some(value) = var(BACKEND_ENV) {
            match value.parse() {
                Ok(backend) => self.backend = backend,
                Err(e) => warn!("Ignoring {}: {}", BACKEND_ENV, e),
            }
        }
        if let Some(value) = var(SEED_ENV) {
            match value.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(e) => warn!("Ignoring {}={:?}: {}", SEED_ENV, value, e),
            }
        }
    }

    /// 顾问超时
    pub fn advisor_timeout(&self) -> Duration {
        Duration::from_secs(self.advisor_timeout_secs)
    }

    /// 按配置创建顾问；LLM 客户端创建失败时退回随机顾问
    pub fn build_advisor(&self) -> Box<dyn Advisor> {
        let random = || -> Box<dyn Advisor> {
            match self.seed {
                Some(seed) => Box::new(RandomAdvisor::with_seed(seed)),
                None => Box::new(RandomAdvisor::new()),
            }
        };

        match self.backend {
            AiBackend::Random => random(),
            AiBackend::Llm => {
                if !cfg!(feature = "llm") {
                    warn!("Built without the `llm` feature, every advisor call will fall back to a random move");
                }
                if self.llm.api_key.is_none() {
                    warn!("No API key configured for the LLM backend");
                }
                match LlmAdvisor::new(self.llm.clone()) {
                    Ok(advisor) => Box::new(advisor),
                    Err(e) => {
                        warn!("Failed to create LLM advisor: {:#}, using random advisor", e);
                        random()
                    }
                }
            }
        }
    }
}
