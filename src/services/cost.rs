//! 成本模型
//!
//! 复合题在配额中占用的"大小"：按小题计数时为小题数，按整题计数时恒为 1。
//! 所有分配策略都通过这里计算成本。

use crate::models::exam_config::CountMode;
use crate::models::question::Question;

/// 一次选中：题库下标 + 实际保留的前 `keep` 个小题
///
/// 截断只修改 `keep`，题库中的原题始终不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pick {
    /// 题目在题库中的下标，即题目身份
    pub index: usize,
    /// 保留的小题数
    pub keep: usize,
}

impl Pick {
    /// 整题选中
    pub fn whole(index: usize, question: &Question) -> Self {
        Self {
            index,
            keep: question.sub_count(),
        }
    }

    /// 截断到前 `keep_n` 个小题
    ///
    /// 仅在 `1 <= keep_n < keep` 时生效，返回是否发生了截断
    pub fn truncate(&mut self, keep_n: usize) -> bool {
        debug_assert!(keep_n >= 1, "截断后至少保留一个小题");
        if keep_n == 0 || keep_n >= self.keep {
            return false;
        }
        self.keep = keep_n;
        true
    }

    pub fn is_truncated(&self, pool: &[Question]) -> bool {
        self.keep < pool[self.index].sub_count()
    }
}

impl CountMode {
    /// 题目的完整成本
    pub fn cost(self, question: &Question) -> usize {
        match self {
            CountMode::Sub => question.sub_count(),
            CountMode::Question => 1,
        }
    }

    /// 选中项（可能已截断）的成本
    pub fn pick_cost(self, pick: &Pick) -> usize {
        match self {
            CountMode::Sub => pick.keep,
            CountMode::Question => 1,
        }
    }

    /// 是否允许截断小题
    pub fn allows_truncation(self) -> bool {
        matches!(self, CountMode::Sub)
    }

    /// 单位名称，用于日志
    pub fn unit_label(self) -> &'static str {
        match self {
            CountMode::Sub => "小题",
            CountMode::Question => "道",
        }
    }
}

/// 一组选中项的总成本
pub fn total_cost(picks: &[Pick], mode: CountMode) -> usize {
    picks.iter().map(|p| mode.pick_cost(p)).sum()
}
