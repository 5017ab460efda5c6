//! 组卷配置
//!
//! `ExamConfig` 是用户编写的 TOML 配置；`ExamQuota` 是经过校验、顺序固定的
//! 不可变配额，组卷引擎只接受后者。

use crate::error::ConfigError;
use crate::models::difficulty::DifficultyBand;
use crate::models::mode::{is_known_mode, mode_priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 计数方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// 按小题计数，复合题的成本为其小题数
    #[default]
    Sub,
    /// 按整题计数，每道复合题成本为 1
    Question,
}

/// 难度与题型同时配置时的解析顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyMode {
    /// 先难度后题型
    #[default]
    Global,
    /// 先题型后难度
    PerMode,
}

/// 组卷配置文件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    pub title: String,
    pub subtitle: String,
    /// 考试时长（分钟）
    pub time_limit: u32,
    pub total_score: f64,

    // 抽题规则
    pub cls_list: Vec<String>,
    pub units: Vec<String>,
    pub modes: Vec<String>,
    pub count: usize,
    pub count_mode: CountMode,
    /// 例: { "A1型题" = 20, "A2型题" = 15, "A3/A4型题" = 10 }
    pub per_mode: BTreeMap<String, usize>,
    /// 例: { easy = 50, medium = 30, hard = 15, extreme = 5 }
    pub difficulty_dist: Option<BTreeMap<String, u32>>,
    pub difficulty_mode: DifficultyMode,
    pub seed: Option<u64>,

    // 渲染选项，组卷引擎不解读，原样交给下游
    pub show_answers: bool,
    pub answer_sheet: bool,
    pub show_discuss: bool,
    pub score_per_sub: Option<f64>,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            title: "模拟考试".to_string(),
            subtitle: String::new(),
            time_limit: 120,
            total_score: 100.0,
            cls_list: Vec::new(),
            units: Vec::new(),
            modes: Vec::new(),
            count: 50,
            count_mode: CountMode::Sub,
            per_mode: BTreeMap::new(),
            difficulty_dist: None,
            difficulty_mode: DifficultyMode::Global,
            seed: None,
            show_answers: false,
            answer_sheet: true,
            show_discuss: false,
            score_per_sub: None,
        }
    }
}

impl ExamConfig {
    /// 校验配置并生成顺序固定的配额
    ///
    /// - `per_mode` 按题型排序表排序，同序号再按名称排序
    /// - `difficulty_dist` 按 easy → extreme 的固定顺序展开，权重为 0 或缺省的档位不保留
    pub fn to_quota(&self) -> Result<ExamQuota, ConfigError> {
        let mut per_mode = Vec::with_capacity(self.per_mode.len());
        for (mode, &count) in &self.per_mode {
            let mode = mode.trim();
            if mode.is_empty() {
                return Err(ConfigError::EmptyModeName);
            }
            if per_mode.iter().any(|(m, _)| m == mode) {
                return Err(ConfigError::DuplicateModeName {
                    mode: mode.to_string(),
                });
            }
            if !is_known_mode(mode) {
                tracing::warn!("题型 {} 不在排序表中，将排在最后", mode);
            }
            per_mode.push((mode.to_string(), count));
        }
        per_mode.sort_by(|(a, _), (b, _)| mode_priority(a).cmp(&mode_priority(b)).then_with(|| a.cmp(b)));

        let difficulty = match &self.difficulty_dist {
            Some(dist) => Some(difficulty_weights(dist)?),
            None => None,
        };

        Ok(ExamQuota {
            count: self.count,
            count_mode: self.count_mode,
            cls_list: self.cls_list.clone(),
            units: self.units.clone(),
            modes: self.modes.clone(),
            per_mode,
            difficulty,
            difficulty_mode: self.difficulty_mode,
            seed: self.seed,
        })
    }
}

fn difficulty_weights(
    dist: &BTreeMap<String, u32>,
) -> Result<Vec<(DifficultyBand, u32)>, ConfigError> {
    let mut weights: BTreeMap<DifficultyBand, u32> = BTreeMap::new();
    for (key, &weight) in dist {
        let band = DifficultyBand::from_key(key)
            .ok_or_else(|| ConfigError::UnknownDifficultyKey { key: key.clone() })?;
        *weights.entry(band).or_insert(0) += weight;
    }
    if weights.values().all(|&w| w == 0) {
        return Err(ConfigError::ZeroDifficultyWeights);
    }
    Ok(DifficultyBand::ALL
        .iter()
        .filter_map(|band| weights.get(band).filter(|&&w| w > 0).map(|&w| (*band, w)))
        .collect())
}

/// 单次组卷的配额，构造后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct ExamQuota {
    pub count: usize,
    pub count_mode: CountMode,
    pub cls_list: Vec<String>,
    pub units: Vec<String>,
    pub modes: Vec<String>,
    /// 题型目标，顺序即分配顺序
    pub per_mode: Vec<(String, usize)>,
    /// 难度权重，固定 easy → extreme 顺序，只含非零档位
    ///
    /// 零权重档位不参与分配，否则末位的零权重档位会吸收舍入余数。
    pub difficulty: Option<Vec<(DifficultyBand, u32)>>,
    pub difficulty_mode: DifficultyMode,
    pub seed: Option<u64>,
}

impl ExamQuota {
    pub fn new(count: usize, count_mode: CountMode) -> Self {
        Self {
            count,
            count_mode,
            cls_list: Vec::new(),
            units: Vec::new(),
            modes: Vec::new(),
            per_mode: Vec::new(),
            difficulty: None,
            difficulty_mode: DifficultyMode::Global,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_per_mode<S: Into<String>>(mut self, per_mode: impl IntoIterator<Item = (S, usize)>) -> Self {
        self.per_mode = per_mode.into_iter().map(|(m, n)| (m.into(), n)).collect();
        self
    }

    pub fn with_difficulty(mut self, weights: [u32; 4], mode: DifficultyMode) -> Self {
        self.difficulty = Some(
            DifficultyBand::ALL
                .iter()
                .copied()
                .zip(weights)
                .filter(|&(_, w)| w > 0)
                .collect(),
        );
        self.difficulty_mode = mode;
        self
    }

    /// 实际目标总量：配置了 per_mode 时为各题型之和，否则为 count
    pub fn effective_total(&self) -> usize {
        if self.per_mode.is_empty() {
            self.count
        } else {
            self.per_mode.iter().map(|(_, n)| n).sum()
        }
    }
}
