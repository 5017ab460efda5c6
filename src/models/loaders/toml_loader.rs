use crate::error::FileError;
use crate::models::exam_config::ExamConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载组卷配置
///
/// 文件不存在时使用默认配置
pub async fn load_exam_config(toml_file_path: &Path) -> Result<ExamConfig> {
    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        tracing::warn!(
            "组卷配置文件不存在: {}，使用默认配置",
            toml_file_path.display()
        );
        return Ok(ExamConfig::default());
    }

    let path = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path.clone(),
            source,
        })?;

    let config: ExamConfig = toml::from_str(&content)
        .map_err(|source| FileError::TomlParseFailed { path, source })
        .context("无法解析TOML文件")?;

    tracing::info!(
        "已加载组卷配置: {} (目标 {} / 计数方式 {:?})",
        config.title,
        config.count,
        config.count_mode
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam_config::CountMode;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_exam_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
title = "生理学期末"
count = 30
count_mode = "question"
units = ["细胞"]
"#
        )
        .unwrap();

        let cfg = load_exam_config(file.path()).await.unwrap();
        assert_eq!(cfg.title, "生理学期末");
        assert_eq!(cfg.count, 30);
        assert_eq!(cfg.count_mode, CountMode::Question);
        assert_eq!(cfg.units, vec!["细胞".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_config_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_exam_config(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(cfg.count, ExamConfig::default().count);
    }

    #[tokio::test]
    async fn test_invalid_config_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = \"many\"").unwrap();
        let err = load_exam_config(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("无法解析TOML文件"));
        assert!(matches!(
            err.downcast_ref::<FileError>(),
            Some(FileError::TomlParseFailed { .. })
        ));
    }
}
