use crate::error::FileError;
use crate::models::question::Question;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载题库
///
/// 文件内容为已去重、已归一化的题目数组。没有小题的记录无法参与组卷，加载时跳过。
pub async fn load_question_pool(json_file_path: &Path) -> Result<Vec<Question>> {
    if !fs::try_exists(json_file_path).await.unwrap_or(false) {
        return Err(FileError::NotFound {
            path: json_file_path.display().to_string(),
        })
        .context("题库文件不存在");
    }

    let path = json_file_path.display().to_string();
    let content = fs::read_to_string(json_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path.clone(),
            source,
        })?;

    let questions: Vec<Question> = serde_json::from_str(&content)
        .map_err(|source| FileError::JsonParseFailed { path, source })
        .context("无法解析题库文件")?;

    let total = questions.len();
    let pool: Vec<Question> = questions
        .into_iter()
        .filter(|q| !q.sub_questions.is_empty())
        .collect();

    if pool.len() < total {
        tracing::warn!("跳过 {} 道没有小题的题目", total - pool.len());
    }
    tracing::info!(
        "成功加载 {} 道题目: {}",
        pool.len(),
        json_file_path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(pool)
}
