//! 应用驱动 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建日志文件，记录启动信息
//! 2. **加载输入**：题库 JSON 与组卷配置 TOML
//! 3. **组卷**：校验配置生成配额，委托 [`ExamAllocator`] 组卷
//! 4. **输出**：打印摘要，写出渲染请求 JSON，警告追加到日志文件

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{load_exam_config, load_question_pool, ExamConfig, Question};
use crate::orchestrator::exam_allocator::ExamAllocator;
use crate::orchestrator::render::RenderRequest;
use crate::orchestrator::summary::{ExamSummary, ScoreRule};
use crate::services::stats::summarize;
use crate::utils::logging::{
    append_log_line, init_log_file, log_pool_loaded, log_startup, print_final_stats,
};
use anyhow::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.log_file)?;
        log_startup(&config.pool_file, &config.exam_config);
        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let pool = self.load_pool().await?;
        let exam_config = load_exam_config(Path::new(&self.config.exam_config)).await?;
        let request = self.assemble(&pool, &exam_config)?;
        self.write_output(&request)?;

        Ok(())
    }

    /// 加载题库并输出统计
    async fn load_pool(&self) -> Result<Vec<Question>> {
        info!("\n📁 正在加载题库...");
        let pool = load_question_pool(Path::new(&self.config.pool_file)).await?;
        let stats = summarize(&pool);
        log_pool_loaded(stats.total, stats.total_subs);
        debug!("\n{}", stats);
        Ok(pool)
    }

    /// 组卷并生成渲染请求
    fn assemble(&self, pool: &[Question], exam_config: &ExamConfig) -> Result<RenderRequest> {
        let quota = exam_config.to_quota().map_err(AppError::from)?;
        let paper = ExamAllocator::new(pool, &quota)
            .generate()
            .map_err(AppError::from)?;

        let rule = ScoreRule {
            score_per_sub: exam_config.score_per_sub,
            total_score: exam_config.total_score,
        };
        let summary = ExamSummary::build(&exam_config.title, &paper, rule);
        info!("\n{}", summary);

        for w in &paper.warnings {
            if let Err(e) = append_log_line(&self.config.log_file, &format!("⚠️ {}", w)) {
                warn!("⚠️ 写入日志文件失败: {}", e);
            }
        }

        print_final_stats(
            paper.len(),
            paper.total_cost(),
            paper.target,
            paper.warnings.len(),
            &self.config.output_file,
        );

        Ok(RenderRequest::new(exam_config, &paper, &summary))
    }

    /// 写出渲染请求
    fn write_output(&self, request: &RenderRequest) -> AppResult<()> {
        let output = &self.config.output_file;
        let path = Path::new(output);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }

        let file = fs::File::create(path).map_err(|e| AppError::file_write_failed(output, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, request)
            .map_err(|e| AppError::file_write_failed(output, e.into()))?;
        writer
            .flush()
            .map_err(|e| AppError::file_write_failed(output, e))?;
        info!("💾 已写出 {} 道题到 {}", request.questions.len(), self.config.output_file);
        Ok(())
    }
}
