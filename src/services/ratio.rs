//! 按比例分配整数配额
//!
//! 除最后一个键外，每个键分到 `round(total * weight / sum)`；最后一个键吸收全部余数，
//! 保证各桶之和严格等于 `total`。哪个桶吸收余数取决于输入顺序，
//! 因此输入是有序的 `(key, weight)` 序列而不是无序映射。

/// 按权重把 `total` 拆成整数配额，返回与输入同序的 `(key, count)`
///
/// - 权重全为 0（或输入为空）时每个键分到 0
/// - 舍入采用四舍六入五成双
/// - 非末位桶不超过剩余量，因此任何桶都不会为负
pub fn distribute<K: Clone>(total: usize, weights: &[(K, u32)]) -> Vec<(K, usize)> {
    let sum: u64 = weights.iter().map(|(_, w)| u64::from(*w)).sum();
    if sum == 0 {
        return weights.iter().map(|(k, _)| (k.clone(), 0)).collect();
    }

    let mut out = Vec::with_capacity(weights.len());
    let mut allocated = 0usize;
    let last = weights.len() - 1;

    for (i, (key, weight)) in weights.iter().enumerate() {
        let remaining = total - allocated;
        let n = if i == last {
            remaining
        } else {
            let exact = total as f64 * f64::from(*weight) / sum as f64;
            (exact.round_ties_even() as usize).min(remaining)
        };
        allocated += n;
        out.push((key.clone(), n));
    }

    out
}
