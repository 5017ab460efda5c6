//! 先难度后题型的交叉分配
//!
//! 1. 单小题题型：每个题型的目标按难度权重拆分到各难度档，逐格装箱
//! 2. 多小题题型：不按难度拆格（避免把一道复合题拆散到不同难度），
//!    整个题型一次装箱，候选顺序让目标难度的题目靠前（软偏置）
//! 3. 题型补齐：任何题型成本不足目标时，从该题型剩余候选中补齐
//! 4. 超量修正：总成本超出各题型目标之和时从选择末尾修剪
//! 5. 最终核对：任何题型成本不足目标都记录警告
//!
//! 超量修正只处理超出自身目标的题型，越晚加入的越先处理。第一遍（仅按小题计数）
//! 截掉多小题题目末尾的小题，第二遍整题移除成本不超过剩余超量的题目；
//! 每次修剪都不超过该题型自身的超出量。

use crate::models::difficulty::DifficultyBand;
use crate::services::cost::Pick;
use crate::services::ratio::distribute;
use crate::workflow::allocation_ctx::{AllocationCtx, WarningScope};
use crate::workflow::strategy::mode_pool;
use tracing::{debug, info};

/// 参与分配的一个题型
struct ModeSlot {
    mode: String,
    target: usize,
    pool: Vec<usize>,
    multi_sub: bool,
}

pub fn allocate(
    ctx: &mut AllocationCtx<'_>,
    candidates: &[usize],
    per_mode: &[(String, usize)],
    weights: &[(DifficultyBand, u32)],
) -> Vec<Pick> {
    let mut slots = Vec::with_capacity(per_mode.len());
    for (mode, target) in per_mode {
        let pool = mode_pool(ctx, candidates, mode);
        let multi_sub = pool.iter().any(|&idx| ctx.question(idx).sub_count() > 1);
        slots.push(ModeSlot {
            mode: mode.clone(),
            target: *target,
            pool,
            multi_sub,
        });
    }
    let combined: usize = slots.iter().map(|s| s.target).sum();

    let mut selected = Vec::new();
    selected.extend(fill_single_sub_cells(ctx, &slots, weights));
    for slot in slots.iter().filter(|s| s.multi_sub) {
        selected.extend(fill_multi_sub(ctx, slot, weights));
    }
    backfill_modes(ctx, &slots, &mut selected);
    correct_overflow(ctx, &slots, &mut selected, combined);
    report_modes(ctx, &slots, &selected);

    selected
}

/// 单小题题型：难度 × 题型逐格装箱
///
/// 每个题型的目标单独按难度权重拆分，同一题型各格之和恰好等于该题型目标；
/// 难度档的目标是该档所有格子之和。
fn fill_single_sub_cells(
    ctx: &mut AllocationCtx<'_>,
    slots: &[ModeSlot],
    weights: &[(DifficultyBand, u32)],
) -> Vec<Pick> {
    let singles: Vec<&ModeSlot> = slots.iter().filter(|s| !s.multi_sub).collect();
    if singles.is_empty() {
        return Vec::new();
    }

    let cell_targets: Vec<Vec<(DifficultyBand, usize)>> = singles
        .iter()
        .map(|s| distribute(s.target, weights))
        .collect();

    let mut selected = Vec::new();
    for (band_pos, (band, _)) in weights.iter().enumerate() {
        let band = *band;
        let mut band_target = 0;
        let mut band_achieved = 0;
        for (slot, targets) in singles.iter().zip(&cell_targets) {
            let cell_target = targets[band_pos].1;
            if cell_target == 0 {
                continue;
            }
            let cell: Vec<usize> = slot
                .pool
                .iter()
                .copied()
                .filter(|&idx| ctx.band(idx) == band)
                .collect();
            let picks = ctx.fill(&cell, cell_target);
            let achieved = ctx.cost(&picks);
            debug!(
                "[{} × {}] 候选 {} 道，目标 {}，实际 {}",
                band,
                slot.mode,
                cell.len(),
                cell_target,
                achieved
            );
            band_target += cell_target;
            band_achieved += achieved;
            selected.extend(picks);
        }
        if band_achieved < band_target {
            ctx.warn(WarningScope::Band { band, mode: None }, band_target, band_achieved);
        }
    }
    selected
}

/// 多小题题型：整题型装箱，目标难度的题目排在前面
fn fill_multi_sub(
    ctx: &mut AllocationCtx<'_>,
    slot: &ModeSlot,
    weights: &[(DifficultyBand, u32)],
) -> Vec<Pick> {
    let preferred = |band: DifficultyBand| weights.iter().any(|(b, w)| *b == band && *w > 0);

    let mut order = slot.pool.clone();
    ctx.shuffle(&mut order);
    // 稳定排序，保持打乱后的相对顺序
    order.sort_by_key(|&idx| !preferred(ctx.band(idx)));

    let picks = ctx.fill_ordered(&order, slot.target);
    debug!(
        "[{}] 多小题题型: 候选 {} 道，目标 {}，实际 {}",
        slot.mode,
        order.len(),
        slot.target,
        ctx.cost(&picks)
    );
    picks
}

fn mode_cost(ctx: &AllocationCtx<'_>, selected: &[Pick], mode: &str) -> usize {
    selected
        .iter()
        .filter(|p| ctx.question(p.index).mode == mode)
        .map(|p| ctx.pick_cost(p))
        .sum()
}

/// 题型补齐
fn backfill_modes(ctx: &mut AllocationCtx<'_>, slots: &[ModeSlot], selected: &mut Vec<Pick>) {
    for slot in slots {
        let achieved = mode_cost(ctx, selected, &slot.mode);
        if achieved >= slot.target {
            continue;
        }
        let extra = ctx.fill(&slot.pool, slot.target - achieved);
        let gained = ctx.cost(&extra);
        if gained > 0 {
            info!("[{}] 题型补齐 {} (目标 {})", slot.mode, gained, slot.target);
        }
        selected.extend(extra);
    }
}

/// 修剪候选：只取仍超出自身目标的题型，越晚加入越靠前，附带该题型的超出量
fn trim_order(ctx: &AllocationCtx<'_>, slots: &[ModeSlot], selected: &[Pick]) -> Vec<(usize, usize)> {
    let over: Vec<(&str, usize)> = slots
        .iter()
        .filter_map(|s| {
            let cost = mode_cost(ctx, selected, &s.mode);
            (cost > s.target).then(|| (s.mode.as_str(), cost - s.target))
        })
        .collect();

    (0..selected.len())
        .rev()
        .filter_map(|pos| {
            let mode = ctx.question(selected[pos].index).mode.as_str();
            over.iter()
                .find(|(m, _)| *m == mode)
                .map(|&(_, excess)| (pos, excess))
        })
        .collect()
}

/// 超量修正
///
/// 只修剪超出自身目标的题型，修剪量不超过该题型的超出量，
/// 因此不会让已达标的题型变得不足。
fn correct_overflow(ctx: &mut AllocationCtx<'_>, slots: &[ModeSlot], selected: &mut Vec<Pick>, combined: usize) {
    let before = ctx.cost(selected);
    if before <= combined {
        return;
    }
    let mut total = before;

    // ① 截掉多小题题目末尾的小题
    if ctx.count_mode().allows_truncation() {
        while total > combined {
            let Some((pos, mode_excess)) = trim_order(ctx, slots, selected)
                .into_iter()
                .find(|&(p, _)| selected[p].keep > 1)
            else {
                break;
            };
            let cut = (selected[pos].keep - 1).min(total - combined).min(mode_excess);
            let keep = selected[pos].keep - cut;
            selected[pos].truncate(keep);
            total -= cut;
        }
    }

    // ② 整题移除
    while total > combined {
        let excess = total - combined;
        let Some((pos, _)) = trim_order(ctx, slots, selected)
            .into_iter()
            .find(|&(p, mode_excess)| ctx.pick_cost(&selected[p]) <= excess.min(mode_excess))
        else {
            break;
        };
        let removed = selected.remove(pos);
        total -= ctx.pick_cost(&removed);
    }

    info!("超量修正: {} → {} (目标 {})", before, total, combined);
    if total > combined {
        ctx.warn(WarningScope::Overflow, combined, total);
    }
}

/// 各题型最终成本不足目标时记录警告
fn report_modes(ctx: &mut AllocationCtx<'_>, slots: &[ModeSlot], selected: &[Pick]) {
    for slot in slots {
        let achieved = mode_cost(ctx, selected, &slot.mode);
        if achieved < slot.target {
            ctx.warn(
                WarningScope::Mode {
                    mode: slot.mode.clone(),
                },
                slot.target,
                achieved,
            );
        }
    }
}
