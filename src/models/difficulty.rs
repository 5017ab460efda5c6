//! 难度分档
//!
//! 由复合题所有小题正确率的平均值推出，不持久化，每次按需重新计算。

use crate::models::question::{Question, SubQuestion};
use serde::{Deserialize, Serialize};

/// 难度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    /// 简单 (≥80%)
    Easy,
    /// 中等 (60-80%)
    Medium,
    /// 较难 (40-60%)
    Hard,
    /// 困难 (<40%)
    Extreme,
}

impl DifficultyBand {
    /// 固定顺序，配额分配时按此顺序迭代
    pub const ALL: [DifficultyBand; 4] = [
        DifficultyBand::Easy,
        DifficultyBand::Medium,
        DifficultyBand::Hard,
        DifficultyBand::Extreme,
    ];

    /// 配置中使用的键名
    pub fn key(self) -> &'static str {
        match self {
            DifficultyBand::Easy => "easy",
            DifficultyBand::Medium => "medium",
            DifficultyBand::Hard => "hard",
            DifficultyBand::Extreme => "extreme",
        }
    }

    /// 展示名称
    pub fn label(self) -> &'static str {
        match self {
            DifficultyBand::Easy => "简单 (≥80%)",
            DifficultyBand::Medium => "中等 (60-80%)",
            DifficultyBand::Hard => "较难 (40-60%)",
            DifficultyBand::Extreme => "困难 (<40%)",
        }
    }

    /// 从配置键解析（大小写不敏感）
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(DifficultyBand::Easy),
            "medium" => Some(DifficultyBand::Medium),
            "hard" => Some(DifficultyBand::Hard),
            "extreme" => Some(DifficultyBand::Extreme),
            _ => None,
        }
    }

    /// 按平均正确率分档
    pub fn from_average(avg: f64) -> Self {
        if avg >= 80.0 {
            DifficultyBand::Easy
        } else if avg >= 60.0 {
            DifficultyBand::Medium
        } else if avg >= 40.0 {
            DifficultyBand::Hard
        } else {
            DifficultyBand::Extreme
        }
    }
}

impl std::fmt::Display for DifficultyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 解析正确率字符串，去掉末尾 `%` 后必须落在 0-100 之间
pub fn parse_rate(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let v: f64 = s.trim_end_matches('%').trim().parse().ok()?;
    (0.0..=100.0).contains(&v).then_some(v)
}

/// 可解析正确率的平均值；没有任何有效数据时返回 `None`
pub fn average_rate(subs: &[SubQuestion]) -> Option<f64> {
    let rates: Vec<f64> = subs.iter().filter_map(|sq| parse_rate(&sq.rate)).collect();
    if rates.is_empty() {
        return None;
    }
    Some(rates.iter().sum::<f64>() / rates.len() as f64)
}

/// 为组卷分档：没有正确率数据时归为中等，保证每道题都能落入某个档位
pub fn classify(question: &Question) -> DifficultyBand {
    average_rate(&question.sub_questions)
        .map(DifficultyBand::from_average)
        .unwrap_or(DifficultyBand::Medium)
}
