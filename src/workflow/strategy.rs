//! 组卷策略
//!
//! 策略只由配额中填写了哪些维度决定：
//!
//! | per_mode | difficulty | 策略 |
//! |---|---|---|
//! | 否 | 否 | [`Strategy::Total`] |
//! | 是 | 否 | [`Strategy::PerMode`] |
//! | 否 | 是 | [`Strategy::ByDifficulty`] |
//! | 是 | 是 (per_mode) | [`Strategy::PerModeThenDifficulty`] |
//! | 是 | 是 (global) | [`Strategy::GlobalDifficultyThenMode`] |

use crate::models::exam_config::{DifficultyMode, ExamQuota};
use crate::services::cost::Pick;
use crate::workflow::allocation_ctx::{AllocationCtx, WarningScope};
use crate::workflow::{by_difficulty, global_cross};
use serde::Serialize;
use tracing::{debug, info};

/// 组卷策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// 整个候选池装箱到总量
    Total,
    /// 各题型独立装箱
    PerMode,
    /// 按难度分档装箱，缺额从全池补齐
    ByDifficulty,
    /// 先题型后难度
    PerModeThenDifficulty,
    /// 先难度后题型的交叉分配
    GlobalDifficultyThenMode,
}

impl Strategy {
    pub fn select(quota: &ExamQuota) -> Self {
        match (!quota.per_mode.is_empty(), quota.difficulty.is_some()) {
            (false, false) => Strategy::Total,
            (true, false) => Strategy::PerMode,
            (false, true) => Strategy::ByDifficulty,
            (true, true) => match quota.difficulty_mode {
                DifficultyMode::PerMode => Strategy::PerModeThenDifficulty,
                DifficultyMode::Global => Strategy::GlobalDifficultyThenMode,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Total => "按总量",
            Strategy::PerMode => "按题型",
            Strategy::ByDifficulty => "按难度",
            Strategy::PerModeThenDifficulty => "先题型后难度",
            Strategy::GlobalDifficultyThenMode => "先难度后题型",
        }
    }

    /// 在筛选后的候选池上执行策略
    pub fn run(self, ctx: &mut AllocationCtx<'_>, candidates: &[usize], quota: &ExamQuota) -> Vec<Pick> {
        let weights = quota.difficulty.as_deref().unwrap_or(&[]);
        match self {
            Strategy::Total => sample_total(ctx, candidates, quota.count),
            Strategy::PerMode => sample_per_mode(ctx, candidates, &quota.per_mode),
            Strategy::ByDifficulty => {
                let picks = by_difficulty::allocate(ctx, candidates, quota.count, weights, None);
                report_total(ctx, &picks, quota.count);
                picks
            }
            Strategy::PerModeThenDifficulty => {
                let mut selected = Vec::new();
                for (mode, need) in &quota.per_mode {
                    let sub_pool = mode_pool(ctx, candidates, mode);
                    debug!("题型 {}: 候选 {} 道，目标 {}", mode, sub_pool.len(), need);
                    let picks = by_difficulty::allocate(ctx, &sub_pool, *need, weights, Some(mode.as_str()));
                    report_mode(ctx, mode, &picks, *need);
                    selected.extend(picks);
                }
                selected
            }
            Strategy::GlobalDifficultyThenMode => {
                global_cross::allocate(ctx, candidates, &quota.per_mode, weights)
            }
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 候选池中属于某题型的题目
pub(crate) fn mode_pool(ctx: &AllocationCtx<'_>, candidates: &[usize], mode: &str) -> Vec<usize> {
    candidates
        .iter()
        .copied()
        .filter(|&idx| ctx.question(idx).mode == mode)
        .collect()
}

fn sample_total(ctx: &mut AllocationCtx<'_>, candidates: &[usize], count: usize) -> Vec<Pick> {
    let picks = ctx.fill(candidates, count);
    report_total(ctx, &picks, count);
    picks
}

fn sample_per_mode(
    ctx: &mut AllocationCtx<'_>,
    candidates: &[usize],
    per_mode: &[(String, usize)],
) -> Vec<Pick> {
    let mut selected = Vec::new();
    for (mode, need) in per_mode {
        let sub_pool = mode_pool(ctx, candidates, mode);
        let picks = ctx.fill(&sub_pool, *need);
        info!(
            "题型 {}: 候选 {} 道，选中 {} 道 (成本 {}/{})",
            mode,
            sub_pool.len(),
            picks.len(),
            ctx.cost(&picks),
            need
        );
        report_mode(ctx, mode, &picks, *need);
        selected.extend(picks);
    }
    selected
}

fn report_total(ctx: &mut AllocationCtx<'_>, picks: &[Pick], target: usize) {
    let achieved = ctx.cost(picks);
    if achieved < target {
        ctx.warn(WarningScope::Total, target, achieved);
    }
}

fn report_mode(ctx: &mut AllocationCtx<'_>, mode: &str, picks: &[Pick], target: usize) {
    let achieved = ctx.cost(picks);
    if achieved < target {
        ctx.warn(
            WarningScope::Mode {
                mode: mode.to_string(),
            },
            target,
            achieved,
        );
    }
}
