use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n组卷日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一行到日志文件
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(pool_file: &str, exam_config: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 自动组卷");
    info!("📚 题库文件: {}", pool_file);
    info!("📝 组卷配置: {}", exam_config);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
///
/// # 参数
/// - `total`: 题目总数
/// - `total_subs`: 小题总数
pub fn log_pool_loaded(total: usize, total_subs: usize) {
    info!("✓ 题库共 {} 道题目，{} 个小题", total, total_subs);
}

/// 记录选中的组卷策略
pub fn log_strategy(strategy: &impl std::fmt::Display, candidates: usize, target: usize, unit_label: &str) {
    info!(
        "🎯 组卷策略: {} | 候选 {} 道 | 目标 {} {}",
        strategy, candidates, target, unit_label
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `questions`: 选中题目数
/// - `achieved`: 实际成本
/// - `target`: 目标成本
/// - `warnings`: 警告数量
/// - `output_path`: 结果文件路径
pub fn print_final_stats(questions: usize, achieved: usize, target: usize, warnings: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 组卷完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 选中: {} 道题，{}/{}", questions, achieved, target);
    if warnings > 0 {
        info!("⚠️ 警告: {} 条", warnings);
    }
    info!("{}", "=".repeat(60));
    info!("\n试卷已保存至: {}", output_path);
}

/// 题干预览：保留前 `max_chars` 个字符，被截断时以 `...` 结尾
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("细胞的基本功能", 2), "细胞...");
        assert_eq!(truncate_text("短", 5), "短");
    }

    #[test]
    fn test_log_file_header_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        append_log_line(path, "⚠️ 题型 B1型题: 目标 6，实际 4，缺 2").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("组卷日志"));
        assert!(content.ends_with("缺 2\n"));
    }
}
