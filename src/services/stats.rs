//! 题库统计
//!
//! 与组卷时的分档不同，统计时没有正确率数据的题目单独记为"未知"。

use crate::models::difficulty::{average_rate, parse_rate, DifficultyBand};
use crate::models::question::Question;
use crate::utils::logging::truncate_text;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 低正确率阈值（百分比）
const LOW_RATE_THRESHOLD: f64 = 50.0;
/// 低正确率列表保留条数
const LOW_RATE_TOP: usize = 10;
/// 低正确率列表中题干预览的字符数
const LOW_RATE_TEXT_CHARS: usize = 60;

/// 低正确率小题
#[derive(Debug, Clone, Serialize)]
pub struct LowRateItem {
    pub text: String,
    pub rate: f64,
    pub answer: String,
    pub unit: String,
    pub mode: String,
}

/// 题库统计结果，各计数按出现次数降序
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    pub total: usize,
    pub total_subs: usize,
    pub by_mode: Vec<(String, usize)>,
    pub by_unit: Vec<(String, usize)>,
    pub by_pkg: Vec<(String, usize)>,
    pub by_cls: Vec<(String, usize)>,
    /// 四个档位按固定顺序，只列出非零档位
    pub by_difficulty: Vec<(DifficultyBand, usize)>,
    /// 没有正确率数据的题目数
    pub unknown_difficulty: usize,
    pub low_rate_count: usize,
    pub low_rate_top: Vec<LowRateItem>,
}

/// 生成题库统计
pub fn summarize(questions: &[Question]) -> PoolStats {
    let mut by_mode = HashMap::new();
    let mut by_unit = HashMap::new();
    let mut by_pkg = HashMap::new();
    let mut by_cls = HashMap::new();
    let mut by_difficulty: HashMap<DifficultyBand, usize> = HashMap::new();
    let mut unknown_difficulty = 0;
    let mut low_rate = Vec::new();
    let mut total_subs = 0;

    for q in questions {
        *by_mode.entry(q.mode.as_str()).or_insert(0) += 1;
        *by_unit.entry(q.unit.as_str()).or_insert(0) += 1;
        *by_pkg.entry(q.pkg.as_str()).or_insert(0) += 1;
        *by_cls.entry(q.cls.as_str()).or_insert(0) += 1;
        total_subs += q.sub_count();

        match average_rate(&q.sub_questions) {
            Some(avg) => *by_difficulty.entry(DifficultyBand::from_average(avg)).or_insert(0) += 1,
            None => unknown_difficulty += 1,
        }

        for sq in &q.sub_questions {
            if let Some(rate) = parse_rate(&sq.rate) {
                if rate < LOW_RATE_THRESHOLD {
                    low_rate.push(LowRateItem {
                        text: truncate_text(&sq.text, LOW_RATE_TEXT_CHARS),
                        rate,
                        answer: sq.answer.clone(),
                        unit: q.unit.clone(),
                        mode: q.mode.clone(),
                    });
                }
            }
        }
    }

    let low_rate_count = low_rate.len();
    low_rate.sort_by(|a, b| a.rate.total_cmp(&b.rate));
    low_rate.truncate(LOW_RATE_TOP);

    PoolStats {
        total: questions.len(),
        total_subs,
        by_mode: most_common(by_mode),
        by_unit: most_common(by_unit),
        by_pkg: most_common(by_pkg),
        by_cls: most_common(by_cls),
        by_difficulty: DifficultyBand::ALL
            .iter()
            .filter_map(|b| by_difficulty.get(b).map(|&n| (*b, n)))
            .filter(|(_, n)| *n > 0)
            .collect(),
        unknown_difficulty,
        low_rate_count,
        low_rate_top: low_rate,
    }
}

/// 计数降序，同计数按名称升序
pub(crate) fn most_common(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut rows: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "📊 题目统计")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "总题数: {} (小题 {})", self.total, self.total_subs)?;

        writeln!(f, "\n按题型:")?;
        for (mode, n) in &self.by_mode {
            writeln!(f, "  {}: {}", mode, n)?;
        }

        writeln!(f, "\n按难度:")?;
        let pct = |n: usize| if self.total > 0 { n as f64 / self.total as f64 * 100.0 } else { 0.0 };
        for (band, n) in &self.by_difficulty {
            let p = pct(*n);
            writeln!(f, "  {}: {} ({:.1}%) {}", band.label(), n, p, "█".repeat((p / 2.0) as usize))?;
        }
        if self.unknown_difficulty > 0 {
            let p = pct(self.unknown_difficulty);
            writeln!(f, "  未知 (无正确率): {} ({:.1}%)", self.unknown_difficulty, p)?;
        }

        writeln!(f, "\n按题库:")?;
        for (cls, n) in &self.by_cls {
            writeln!(f, "  {}: {}", cls, n)?;
        }

        writeln!(f, "\n按章节 (Top 10 / 共 {} 个):", self.by_unit.len())?;
        for (unit, n) in self.by_unit.iter().take(10) {
            writeln!(f, "  {}: {}", unit, n)?;
        }
        if self.by_unit.len() > 10 {
            writeln!(f, "  ... 还有 {} 个章节", self.by_unit.len() - 10)?;
        }

        if self.low_rate_count > 0 {
            writeln!(f, "\n⚠️  正确率 < 50% 的小题: {} 道", self.low_rate_count)?;
            for item in &self.low_rate_top {
                writeln!(f, "  [{:.1}%] {}", item.rate, item.text)?;
            }
        }
        write!(f, "{}", "=".repeat(50))
    }
}
