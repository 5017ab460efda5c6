//! # Exam Assembler
//!
//! 从已导入的题库中按配额自动组卷的 Rust 库
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 题目、难度档位、题型排序表、组卷配置
//! - `Question` / `SubQuestion` - 复合题与小题
//! - `ExamConfig` → `ExamQuota` - 用户配置校验后得到不可变配额
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不持有状态
//! - `ratio` - 按权重分配整数配额
//! - `cost` / `bin_filler` - 成本模型与三阶段贪心装箱
//! - `pool_filter` / `stats` - 题库筛选与统计
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次组卷"的策略
//! - `AllocationCtx` - 上下文封装（随机数、已选集合、警告）
//! - `Strategy` - 总量 / 按题型 / 按难度 / 题型+难度
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/exam_allocator` - 筛选、执行策略、排序
//! - `orchestrator/app` - 加载输入、输出摘要与渲染请求
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ExamGenerationError};
pub use models::{CountMode, DifficultyBand, DifficultyMode, ExamConfig, ExamQuota, Question, SubQuestion};
pub use orchestrator::{generate_exam, App, ExamAllocator, ExamPaper, ExamSummary, RenderRequest};
pub use workflow::{AllocationWarning, Strategy, WarningScope};
