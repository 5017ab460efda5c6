//! 试卷摘要
//!
//! 统计题型/章节/难度分布，并计算每小题分值。

use crate::models::difficulty::{classify, DifficultyBand};
use crate::models::mode::mode_priority;
use crate::orchestrator::exam_allocator::ExamPaper;
use crate::services::stats::most_common;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 计分规则
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRule {
    /// 固定的每小题分值，优先使用
    pub score_per_sub: Option<f64>,
    /// 未指定每小题分值时按小题数均分的总分
    pub total_score: f64,
}

impl ScoreRule {
    /// 每小题分值；没有小题时为 0
    pub fn per_sub(&self, total_subs: usize) -> f64 {
        match self.score_per_sub {
            Some(score) => score,
            None if total_subs > 0 => self.total_score / total_subs as f64,
            None => 0.0,
        }
    }
}

/// 单个题型的统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeRow {
    pub mode: String,
    /// 复合题数量
    pub questions: usize,
    /// 小题数量
    pub subs: usize,
}

/// 试卷摘要
#[derive(Debug, Clone, Serialize)]
pub struct ExamSummary {
    pub title: String,
    pub strategy: String,
    pub total_questions: usize,
    pub total_subs: usize,
    /// 按题型排序表排列
    pub by_mode: Vec<ModeRow>,
    /// 按数量降序
    pub by_unit: Vec<(String, usize)>,
    /// 配置了难度分布时列出全部四档（含 0）
    pub by_difficulty: Option<Vec<(DifficultyBand, usize)>>,
    pub score_per_sub: f64,
    pub total_score: f64,
    pub warnings: Vec<String>,
}

impl ExamSummary {
    pub fn build(title: &str, paper: &ExamPaper<'_>, rule: ScoreRule) -> Self {
        let mut modes: HashMap<&str, ModeRow> = HashMap::new();
        let mut units: HashMap<&str, usize> = HashMap::new();
        let mut bands: HashMap<DifficultyBand, usize> = HashMap::new();

        for selected in paper.questions() {
            let row = modes.entry(selected.mode()).or_insert_with(|| ModeRow {
                mode: selected.mode().to_string(),
                questions: 0,
                subs: 0,
            });
            row.questions += 1;
            row.subs += selected.keep;
            *units.entry(selected.unit()).or_insert(0) += 1;
            *bands.entry(classify(selected.question)).or_insert(0) += 1;
        }

        let mut by_mode: Vec<ModeRow> = modes.into_values().collect();
        by_mode.sort_by(|a, b| {
            mode_priority(&a.mode)
                .cmp(&mode_priority(&b.mode))
                .then_with(|| a.mode.cmp(&b.mode))
        });

        let by_difficulty = paper.difficulty_used.then(|| {
            DifficultyBand::ALL
                .iter()
                .map(|b| (*b, bands.get(b).copied().unwrap_or(0)))
                .collect()
        });

        let total_subs = paper.total_subs();
        let score_per_sub = rule.per_sub(total_subs);

        Self {
            title: title.to_string(),
            strategy: paper.strategy.name().to_string(),
            total_questions: paper.len(),
            total_subs,
            by_mode,
            by_unit: most_common(units),
            by_difficulty,
            score_per_sub,
            total_score: score_per_sub * total_subs as f64,
            warnings: paper.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExamSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "试卷: {}", self.title)?;
        writeln!(f, "组卷策略: {}", self.strategy)?;
        writeln!(f, "总题数: {} (小题 {})", self.total_questions, self.total_subs)?;

        let modes: Vec<String> = self
            .by_mode
            .iter()
            .map(|r| format!("{}: {}题/{}小题", r.mode, r.questions, r.subs))
            .collect();
        writeln!(f, "题型分布: {}", modes.join(", "))?;

        let units: Vec<String> = self
            .by_unit
            .iter()
            .take(10)
            .map(|(u, n)| format!("{}: {}", u, n))
            .collect();
        writeln!(f, "章节分布: {}", units.join(", "))?;

        if let Some(bands) = &self.by_difficulty {
            let bands: Vec<String> = bands
                .iter()
                .map(|(b, n)| format!("{}: {}", b.label(), n))
                .collect();
            writeln!(f, "难度分布: {}", bands.join(", "))?;
        }

        for w in &self.warnings {
            writeln!(f, "⚠️ {}", w)?;
        }

        write!(
            f,
            "每小题 {:.2} 分，共 {} 小题，总分 {:.1}",
            self.score_per_sub, self.total_subs, self.total_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rule() {
        let fixed = ScoreRule {
            score_per_sub: Some(2.0),
            total_score: 100.0,
        };
        assert_eq!(fixed.per_sub(30), 2.0);

        let even = ScoreRule {
            score_per_sub: None,
            total_score: 100.0,
        };
        assert_eq!(even.per_sub(40), 2.5);
        assert_eq!(even.per_sub(0), 0.0);
    }
}
