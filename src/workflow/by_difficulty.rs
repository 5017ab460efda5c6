//! 按难度分档组卷
//!
//! 候选池按难度分桶，按权重计算各档目标后逐档装箱；
//! 任何一档不足都先记警告，最后从整个候选池（不限难度）补齐。

use crate::models::difficulty::DifficultyBand;
use crate::services::cost::Pick;
use crate::services::ratio::distribute;
use crate::workflow::allocation_ctx::{AllocationCtx, WarningScope};
use tracing::{debug, info};

/// 候选池按难度分桶，桶顺序固定为 easy → extreme
pub(crate) fn bucket_by_band(ctx: &AllocationCtx<'_>, candidates: &[usize]) -> Vec<(DifficultyBand, Vec<usize>)> {
    let mut buckets: Vec<(DifficultyBand, Vec<usize>)> =
        DifficultyBand::ALL.iter().map(|b| (*b, Vec::new())).collect();
    for &idx in candidates {
        let band = ctx.band(idx);
        if let Some((_, bucket)) = buckets.iter_mut().find(|(b, _)| *b == band) {
            bucket.push(idx);
        }
    }
    buckets
}

/// 在 `candidates` 上按难度权重装箱到 `target`
///
/// `mode` 仅用于警告中标注题型。
pub fn allocate(
    ctx: &mut AllocationCtx<'_>,
    candidates: &[usize],
    target: usize,
    weights: &[(DifficultyBand, u32)],
    mode: Option<&str>,
) -> Vec<Pick> {
    let buckets = bucket_by_band(ctx, candidates);
    let band_targets = distribute(target, weights);

    let mut selected = Vec::new();
    for (band, band_target) in band_targets {
        let bucket: &[usize] = buckets
            .iter()
            .find(|(b, _)| *b == band)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[]);
        let picks = ctx.fill(bucket, band_target);
        let achieved = ctx.cost(&picks);
        debug!(
            "难度 {}: 候选 {} 道，目标 {}，实际 {}",
            band,
            bucket.len(),
            band_target,
            achieved
        );
        if achieved < band_target {
            ctx.warn(
                WarningScope::Band {
                    band,
                    mode: mode.map(str::to_string),
                },
                band_target,
                achieved,
            );
        }
        selected.extend(picks);
    }

    let achieved = ctx.cost(&selected);
    if achieved < target {
        let extra = ctx.fill(candidates, target - achieved);
        let gained = ctx.cost(&extra);
        if gained > 0 {
            info!("难度配额不足，从剩余题目中补齐 {} (目标 {})", gained, target);
        }
        selected.extend(extra);
    }

    selected
}
