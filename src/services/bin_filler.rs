//! 贪心装箱
//!
//! 从候选题中选出总成本尽量等于 `target` 的子集，总成本永远不超过 `target`。
//!
//! 三个阶段依次执行，每个阶段只在仍有缺口时进行：
//!
//! 1. **贪心**：打乱候选顺序，能放下就立即选中，放不下的暂存；缺口为 0 时立即停止
//! 2. **最佳适配**：反复从暂存中选出不超过缺口的最大成本项
//! 3. **精确截断**（仅按小题计数）：暂存中小题数恰好等于缺口的直接整题选中；
//!    否则在成本大于缺口的暂存项中取成本最小者，截断到恰好等于缺口

use crate::models::exam_config::CountMode;
use crate::models::question::Question;
use crate::services::cost::Pick;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// 打乱候选后装箱
pub fn fill<R: Rng + ?Sized>(
    pool: &[Question],
    candidates: &[usize],
    target: usize,
    used: &mut HashSet<usize>,
    count_mode: CountMode,
    rng: &mut R,
) -> Vec<Pick> {
    let mut order: Vec<usize> = candidates.to_vec();
    order.shuffle(rng);
    fill_ordered(pool, &order, target, used, count_mode)
}

/// 按给定顺序装箱，不再打乱
///
/// 调用方需要自行决定候选顺序（例如先打乱再做软偏置排序）。
/// 已在 `used` 中的候选会被跳过，选中的题目会写入 `used`。
pub fn fill_ordered(
    pool: &[Question],
    ordered: &[usize],
    target: usize,
    used: &mut HashSet<usize>,
    count_mode: CountMode,
) -> Vec<Pick> {
    let mut picks = Vec::new();
    let mut gap = target;
    if gap == 0 {
        return picks;
    }

    // ① 贪心
    let mut deferred: Vec<usize> = Vec::new();
    for &idx in ordered {
        if gap == 0 {
            break;
        }
        if used.contains(&idx) {
            continue;
        }
        let cost = count_mode.cost(&pool[idx]);
        if cost <= gap {
            take(pool, idx, used, &mut picks);
            gap -= cost;
        } else {
            deferred.push(idx);
        }
    }

    // ② 最佳适配
    while gap > 0 {
        let best = deferred
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, count_mode.cost(&pool[idx])))
            .filter(|&(_, cost)| cost <= gap)
            // 同成本取最先暂存的
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)));
        let Some((pos, cost)) = best else {
            break;
        };
        let idx = deferred.remove(pos);
        take(pool, idx, used, &mut picks);
        gap -= cost;
        debug!("最佳适配: 选中 #{} (成本 {})，剩余缺口 {}", idx, cost, gap);
    }

    // ③ 精确截断
    if gap > 0 && count_mode.allows_truncation() && !deferred.is_empty() {
        if let Some(pos) = deferred
            .iter()
            .position(|&idx| pool[idx].sub_count() == gap)
        {
            let idx = deferred.remove(pos);
            take(pool, idx, used, &mut picks);
            gap = 0;
        } else if let Some((pos, cost)) = deferred
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, count_mode.cost(&pool[idx])))
            .filter(|&(_, cost)| cost > gap)
            .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        {
            let idx = deferred.remove(pos);
            let mut pick = Pick::whole(idx, &pool[idx]);
            pick.truncate(gap);
            used.insert(idx);
            picks.push(pick);
            debug!("精确截断: #{} 由 {} 个小题截为 {} 个", idx, cost, gap);
            gap = 0;
        }
    }

    if gap > 0 {
        debug!("装箱未满: 目标 {}，缺口 {}", target, gap);
    }

    picks
}

fn take(pool: &[Question], idx: usize, used: &mut HashSet<usize>, picks: &mut Vec<Pick>) {
    used.insert(idx);
    picks.push(Pick::whole(idx, &pool[idx]));
}
