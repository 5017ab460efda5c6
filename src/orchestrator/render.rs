//! 渲染交接
//!
//! 组卷结果交给下游渲染器（docx / pdf 等）时的数据格式。
//! 显示选项原样透传，答案与解析已按"正式优先、AI 兜底"取值。

use crate::models::exam_config::ExamConfig;
use crate::models::question::ContentSource;
use crate::orchestrator::exam_allocator::{ExamPaper, SelectedQuestion};
use crate::orchestrator::summary::ExamSummary;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RenderSubQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_source: Option<ContentSource>,
    pub discuss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discuss_source: Option<ContentSource>,
    pub rate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderQuestion {
    /// 试卷中的序号（从1开始）
    pub number: usize,
    pub fingerprint: String,
    pub mode: String,
    pub unit: String,
    pub stem: String,
    pub shared_options: Vec<String>,
    pub sub_questions: Vec<RenderSubQuestion>,
    pub discuss: String,
    /// 是否截断了末尾小题
    pub truncated: bool,
}

impl RenderQuestion {
    fn from_selected(number: usize, selected: &SelectedQuestion<'_>) -> Self {
        let q = selected.question;
        Self {
            number,
            fingerprint: q.fingerprint.clone(),
            mode: q.mode.clone(),
            unit: q.unit.clone(),
            stem: q.stem.clone(),
            shared_options: q.shared_options.clone(),
            sub_questions: selected
                .sub_questions()
                .iter()
                .map(|sq| RenderSubQuestion {
                    text: sq.text.clone(),
                    options: sq.options.clone(),
                    answer: sq.eff_answer().to_string(),
                    answer_source: sq.answer_source(),
                    discuss: sq.eff_discuss().to_string(),
                    discuss_source: sq.discuss_source(),
                    rate: sq.rate.clone(),
                })
                .collect(),
            discuss: q.discuss.clone(),
            truncated: selected.is_truncated(),
        }
    }
}

/// 渲染请求
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    pub title: String,
    pub subtitle: String,
    /// 考试时长（分钟）
    pub time_limit: u32,
    pub total_score: f64,
    pub score_per_sub: f64,
    pub show_answers: bool,
    pub answer_sheet: bool,
    pub show_discuss: bool,
    pub questions: Vec<RenderQuestion>,
}

impl RenderRequest {
    pub fn new(config: &ExamConfig, paper: &ExamPaper<'_>, summary: &ExamSummary) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            time_limit: config.time_limit,
            total_score: summary.total_score,
            score_per_sub: summary.score_per_sub,
            show_answers: config.show_answers,
            answer_sheet: config.answer_sheet,
            show_discuss: config.show_discuss,
            questions: paper
                .questions()
                .enumerate()
                .map(|(i, s)| RenderQuestion::from_selected(i + 1, &s))
                .collect(),
        }
    }
}
