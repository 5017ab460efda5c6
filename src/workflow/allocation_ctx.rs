//! 单次组卷的上下文
//!
//! 持有本次组卷唯一的随机数发生器、已选题目集合与警告列表。
//! 所有打乱与抽样都从同一个发生器取数，相同种子、相同题库得到完全相同的结果。

use crate::models::difficulty::{classify, DifficultyBand};
use crate::models::exam_config::CountMode;
use crate::models::question::Question;
use crate::services::bin_filler;
use crate::services::cost::{total_cost, Pick};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{self, Display};
use tracing::warn;

/// 配额未满足的维度
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningScope {
    /// 总量
    Total,
    /// 某个题型
    Mode { mode: String },
    /// 某个难度档（可限定在某题型内）
    Band {
        band: DifficultyBand,
        mode: Option<String>,
    },
    /// 超量修正后仍无法对齐总量
    Overflow,
}

impl Display for WarningScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningScope::Total => write!(f, "总量"),
            WarningScope::Mode { mode } => write!(f, "题型 {}", mode),
            WarningScope::Band { band, mode: None } => write!(f, "难度 {}", band),
            WarningScope::Band {
                band,
                mode: Some(mode),
            } => write!(f, "{} 难度 {}", mode, band),
            WarningScope::Overflow => write!(f, "超量修正"),
        }
    }
}

/// 组卷警告：某个维度的目标与实际不一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationWarning {
    pub scope: WarningScope,
    pub target: usize,
    pub achieved: usize,
}

impl AllocationWarning {
    /// 缺口（超量时为 0）
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.achieved)
    }
}

impl Display for AllocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            WarningScope::Overflow => write!(
                f,
                "{}: 目标 {}，修正后 {}",
                self.scope, self.target, self.achieved
            ),
            _ => write!(
                f,
                "{}: 目标 {}，实际 {}，缺 {}",
                self.scope,
                self.target,
                self.achieved,
                self.shortfall()
            ),
        }
    }
}

/// 组卷上下文
pub struct AllocationCtx<'a> {
    pool: &'a [Question],
    count_mode: CountMode,
    rng: ChaCha8Rng,
    used: HashSet<usize>,
    warnings: Vec<AllocationWarning>,
}

impl<'a> AllocationCtx<'a> {
    /// `seed` 为 `None` 时使用系统熵，结果不可复现
    pub fn new(pool: &'a [Question], count_mode: CountMode, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            pool,
            count_mode,
            rng,
            used: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    pub fn pool(&self) -> &'a [Question] {
        self.pool
    }

    pub fn count_mode(&self) -> CountMode {
        self.count_mode
    }

    /// 打乱后装箱，见 [`bin_filler::fill`]
    pub fn fill(&mut self, candidates: &[usize], target: usize) -> Vec<Pick> {
        bin_filler::fill(
            self.pool,
            candidates,
            target,
            &mut self.used,
            self.count_mode,
            &mut self.rng,
        )
    }

    /// 按给定顺序装箱，见 [`bin_filler::fill_ordered`]
    pub fn fill_ordered(&mut self, ordered: &[usize], target: usize) -> Vec<Pick> {
        bin_filler::fill_ordered(self.pool, ordered, target, &mut self.used, self.count_mode)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    pub fn cost(&self, picks: &[Pick]) -> usize {
        total_cost(picks, self.count_mode)
    }

    pub fn pick_cost(&self, pick: &Pick) -> usize {
        self.count_mode.pick_cost(pick)
    }

    pub fn question(&self, idx: usize) -> &'a Question {
        &self.pool[idx]
    }

    /// 难度档位，每次调用都重新计算
    pub fn band(&self, idx: usize) -> DifficultyBand {
        classify(&self.pool[idx])
    }

    /// 记录一条警告并同步输出到日志
    pub fn warn(&mut self, scope: WarningScope, target: usize, achieved: usize) {
        let warning = AllocationWarning {
            scope,
            target,
            achieved,
        };
        warn!("⚠️ {} ({})", warning, self.count_mode.unit_label());
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[AllocationWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<AllocationWarning> {
        self.warnings
    }
}
