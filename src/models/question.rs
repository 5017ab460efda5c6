use serde::{Deserialize, Serialize};

/// 单个小题（A1/A2 整题也视为一个 SubQuestion）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    /// 历史正确率，如 "75%"，可能为空或无法解析
    pub rate: String,
    pub error_prone: String,
    pub discuss: String,
    pub point: String,

    // AI 补全结果（不覆盖正式字段）
    pub ai_answer: String,
    pub ai_discuss: String,
    pub ai_confidence: f64,
    pub ai_model: String,
    pub ai_status: String,
}

/// 答案/解析来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Official,
    Ai,
}

impl SubQuestion {
    pub fn new(text: impl Into<String>, answer: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
            rate: rate.into(),
            ..Default::default()
        }
    }

    /// 有效答案：优先用正式字段，为空时用 AI 补全结果
    pub fn eff_answer(&self) -> &str {
        first_non_blank(&self.answer, &self.ai_answer)
    }

    /// 有效解析：优先用正式字段，为空时用 AI 补全结果
    pub fn eff_discuss(&self) -> &str {
        first_non_blank(&self.discuss, &self.ai_discuss)
    }

    pub fn answer_source(&self) -> Option<ContentSource> {
        source_of(&self.answer, &self.ai_answer)
    }

    pub fn discuss_source(&self) -> Option<ContentSource> {
        source_of(&self.discuss, &self.ai_discuss)
    }
}

fn first_non_blank<'a>(official: &'a str, ai: &'a str) -> &'a str {
    let official = official.trim();
    if official.is_empty() {
        ai.trim()
    } else {
        official
    }
}

fn source_of(official: &str, ai: &str) -> Option<ContentSource> {
    if !official.trim().is_empty() {
        Some(ContentSource::Official)
    } else if !ai.trim().is_empty() {
        Some(ContentSource::Ai)
    } else {
        None
    }
}

/// 统一题目模型（复合题），所有 parser 输出都归一化到此结构
///
/// `sub_questions` 至少包含一个小题；A3/A4、B 型题可以有多个小题共享题干或选项。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    /// 去重指纹，由上游去重模块填充
    pub fingerprint: String,
    /// 原始文件名/时间戳
    pub name: String,
    /// 来源 app
    pub pkg: String,
    /// 题库分类
    pub cls: String,
    /// 章节
    pub unit: String,
    /// 题型：A1型题、A2型题、A3/A4型题、B1型题 ...
    pub mode: String,
    /// 题干（A3/A4 共享题干；B 型为空）
    pub stem: String,
    /// B 型共享选项
    pub shared_options: Vec<String>,
    pub sub_questions: Vec<SubQuestion>,
    /// 整题解析
    pub discuss: String,
    pub source_file: String,
}

impl Question {
    pub fn new(
        mode: impl Into<String>,
        unit: impl Into<String>,
        sub_questions: Vec<SubQuestion>,
    ) -> Self {
        Self {
            mode: mode.into(),
            unit: unit.into(),
            sub_questions,
            ..Default::default()
        }
    }

    pub fn with_cls(mut self, cls: impl Into<String>) -> Self {
        self.cls = cls.into();
        self
    }

    /// 小题数量
    pub fn sub_count(&self) -> usize {
        self.sub_questions.len()
    }
}
