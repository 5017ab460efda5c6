//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层把各项能力串成完整的组卷流程，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `exam_allocator` - 组卷引擎
//! - 按 cls / unit / mode 筛选题库
//! - 根据配额选择策略并执行
//! - 打乱后按题型排序表和章节排序
//!
//! ### `summary` - 试卷摘要
//! - 题型、章节、难度分布
//! - 每小题分值与总分
//!
//! ### `render` - 渲染交接
//! - 组装交给下游渲染器的 `RenderRequest`
//!
//! ### `app` - 应用驱动
//! - 加载题库和组卷配置
//! - 输出摘要、渲染请求和日志
//!
//! ## 层次关系
//!
//! ```text
//! app (加载输入、写出结果)
//!     ↓
//! exam_allocator (筛选 → 策略 → 排序)
//!     ↓
//! workflow::Strategy (单次组卷的四种策略)
//!     ↓
//! services (能力层：ratio / cost / bin_filler / pool_filter)
//!     ↓
//! models (题目、难度、题型、配置)
//! ```
//!
//! ## 设计原则
//!
//! 1. **纯函数组卷**：题库以只读引用传入，不存在全局状态
//! 2. **向下依赖**：编排层 → workflow → services → models
//! 3. **尽力而为**：只有筛选后为空才报错，其余不足都记录为警告

pub mod app;
pub mod exam_allocator;
pub mod render;
pub mod summary;

// 重新导出主要类型
pub use app::App;
pub use exam_allocator::{generate_exam, ExamAllocator, ExamPaper, SelectedQuestion};
pub use render::{RenderQuestion, RenderRequest, RenderSubQuestion};
pub use summary::{ExamSummary, ModeRow, ScoreRule};
