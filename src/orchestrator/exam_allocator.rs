//! 组卷引擎 - 编排层
//!
//! ## 流程
//!
//! ```text
//! 题库 → PoolFilter → Strategy（四选一）→ 打乱 → 按题型排序表 + 章节稳定排序
//! ```
//!
//! 引擎是纯函数：题库和配额以引用传入，结果是新的选择列表，
//! 截断只记录在选择项上，题库本身不会被修改。

use crate::error::ExamGenerationError;
use crate::models::exam_config::{CountMode, ExamQuota};
use crate::models::mode::mode_priority;
use crate::models::question::{Question, SubQuestion};
use crate::services::cost::{total_cost, Pick};
use crate::services::pool_filter::PoolFilter;
use crate::workflow::allocation_ctx::{AllocationCtx, AllocationWarning};
use crate::utils::logging::log_strategy;
use crate::workflow::strategy::Strategy;
use tracing::info;

/// 组卷引擎
pub struct ExamAllocator<'a> {
    pool: &'a [Question],
    quota: &'a ExamQuota,
}

impl<'a> ExamAllocator<'a> {
    pub fn new(pool: &'a [Question], quota: &'a ExamQuota) -> Self {
        Self { pool, quota }
    }

    /// 生成试卷
    ///
    /// 筛选后题库为空时返回 [`ExamGenerationError::EmptyPool`]；
    /// 其余任何配额不足都只记录警告，返回尽力而为的结果。
    pub fn generate(&self) -> Result<ExamPaper<'a>, ExamGenerationError> {
        let quota = self.quota;
        let candidates = PoolFilter::new(&quota.cls_list, &quota.units, &quota.modes).apply(self.pool);
        if candidates.is_empty() {
            return Err(ExamGenerationError::EmptyPool {
                cls_list: quota.cls_list.clone(),
                units: quota.units.clone(),
                modes: quota.modes.clone(),
            });
        }

        let strategy = Strategy::select(quota);
        log_strategy(
            &strategy,
            candidates.len(),
            quota.effective_total(),
            quota.count_mode.unit_label(),
        );

        let mut ctx = AllocationCtx::new(self.pool, quota.count_mode, quota.seed);
        let mut picks = strategy.run(&mut ctx, &candidates, quota);

        ctx.shuffle(&mut picks);
        let pool = self.pool;
        picks.sort_by(|a, b| {
            let (qa, qb) = (&pool[a.index], &pool[b.index]);
            mode_priority(&qa.mode)
                .cmp(&mode_priority(&qb.mode))
                .then_with(|| qa.unit.cmp(&qb.unit))
        });

        let warnings = ctx.into_warnings();
        let paper = ExamPaper {
            pool: self.pool,
            picks,
            warnings,
            strategy,
            count_mode: quota.count_mode,
            target: quota.effective_total(),
            difficulty_used: quota.difficulty.is_some(),
        };
        info!(
            "✓ 组卷完成: {} 道题，成本 {}/{}，警告 {} 条",
            paper.len(),
            paper.total_cost(),
            paper.target,
            paper.warnings.len()
        );
        Ok(paper)
    }
}

/// 组卷便捷入口
pub fn generate_exam<'a>(
    pool: &'a [Question],
    quota: &'a ExamQuota,
) -> Result<ExamPaper<'a>, ExamGenerationError> {
    ExamAllocator::new(pool, quota).generate()
}

/// 组卷结果：有序的选择项及警告
#[derive(Debug, Clone)]
pub struct ExamPaper<'a> {
    pool: &'a [Question],
    picks: Vec<Pick>,
    pub warnings: Vec<AllocationWarning>,
    pub strategy: Strategy,
    pub count_mode: CountMode,
    /// 实际目标总量
    pub target: usize,
    /// 是否配置了难度分布
    pub difficulty_used: bool,
}

impl<'a> ExamPaper<'a> {
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    /// 按计数方式计算的总成本
    pub fn total_cost(&self) -> usize {
        total_cost(&self.picks, self.count_mode)
    }

    /// 实际保留的小题总数
    pub fn total_subs(&self) -> usize {
        self.picks.iter().map(|p| p.keep).sum()
    }

    /// 按最终顺序遍历选中的题目
    pub fn questions(&self) -> impl Iterator<Item = SelectedQuestion<'a>> + '_ {
        let pool = self.pool;
        self.picks.iter().map(move |p| SelectedQuestion {
            question: &pool[p.index],
            keep: p.keep,
        })
    }

    /// 复制出截断后的题目
    pub fn to_questions(&self) -> Vec<Question> {
        self.questions().map(|s| s.to_question()).collect()
    }
}

/// 选中的一道题：题库中原题的引用 + 实际保留的小题数
#[derive(Debug, Clone, Copy)]
pub struct SelectedQuestion<'a> {
    pub question: &'a Question,
    pub keep: usize,
}

impl<'a> SelectedQuestion<'a> {
    /// 保留的小题（原题的前 `keep` 个）
    pub fn sub_questions(&self) -> &'a [SubQuestion] {
        &self.question.sub_questions[..self.keep]
    }

    pub fn is_truncated(&self) -> bool {
        self.keep < self.question.sub_count()
    }

    pub fn mode(&self) -> &'a str {
        &self.question.mode
    }

    pub fn unit(&self) -> &'a str {
        &self.question.unit
    }

    /// 复制并应用截断
    pub fn to_question(&self) -> Question {
        let mut q = self.question.clone();
        q.sub_questions.truncate(self.keep);
        q
    }
}
