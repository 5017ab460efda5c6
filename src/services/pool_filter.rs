/// 题库筛选
///
/// 每个列表非空时作为包含条件：题库分类与题型为大小写不敏感的精确匹配，
/// 章节为大小写不敏感的关键词包含匹配（任一关键词命中即可）。空列表不限制该维度。
use crate::models::question::Question;

/// 筛选条件
#[derive(Debug, Clone, Default)]
pub struct PoolFilter {
    cls_list: Vec<String>,
    unit_keywords: Vec<String>,
    modes: Vec<String>,
}

impl PoolFilter {
    pub fn new(cls_list: &[String], units: &[String], modes: &[String]) -> Self {
        Self {
            cls_list: normalize(cls_list),
            unit_keywords: normalize(units),
            modes: normalize(modes),
        }
    }

    /// 题目是否满足全部条件
    pub fn matches(&self, question: &Question) -> bool {
        let cls_ok = self.cls_list.is_empty() || self.cls_list.contains(&question.cls.to_lowercase());
        let mode_ok = self.modes.is_empty() || self.modes.contains(&question.mode.to_lowercase());
        let unit_ok = self.unit_keywords.is_empty() || {
            let unit = question.unit.to_lowercase();
            self.unit_keywords.iter().any(|kw| unit.contains(kw.as_str()))
        };
        cls_ok && mode_ok && unit_ok
    }

    /// 返回满足条件的题目下标，保持题库原顺序
    pub fn apply(&self, pool: &[Question]) -> Vec<usize> {
        pool.iter()
            .enumerate()
            .filter(|(_, q)| self.matches(q))
            .map(|(idx, _)| idx)
            .collect()
    }
}

fn normalize(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
