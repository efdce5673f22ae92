//! 随机顾问
//!
//! 未配置 LLM 时使用：在合法落子中均匀随机选择。

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::advisor::{Advisor, AdvisorRequest, Recommendation};

/// 随机顾问
pub struct RandomAdvisor {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomAdvisor {
    /// 使用系统熵创建
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// 使用固定种子创建（可复现）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Advisor for RandomAdvisor {
    fn name(&self) -> &str {
        "random"
    }

    async fn recommend(&self, request: &AdvisorRequest<'_>) -> Result<Recommendation> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow!("random advisor state poisoned"))?;
        let pos = request
            .legal_moves
            .choose(&mut *rng)
            .ok_or_else(|| anyhow!("no legal moves to choose from"))?;

        Ok(Recommendation::new(
            Some((pos.row as i64, pos.col as i64)),
            format!("Randomly selected {} from {} legal moves.", pos, request.legal_moves.len()),
        ))
    }
}
