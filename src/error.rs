use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 组卷失败
    #[error("组卷错误: {0}")]
    Generation(#[from] ExamGenerationError),
}

/// 组卷错误
///
/// 组卷过程中唯一的致命错误；配额不足只产生警告，不会返回此错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamGenerationError {
    /// 筛选后题库为空
    #[error("筛选后题库为空，请检查 cls_list / units / modes 条件 (cls_list={cls_list:?}, units={units:?}, modes={modes:?})")]
    EmptyPool {
        cls_list: Vec<String>,
        units: Vec<String>,
        modes: Vec<String>,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 难度分布包含未知档位
    #[error("未知难度档位 '{key}'，可选值: easy / medium / hard / extreme")]
    UnknownDifficultyKey { key: String },
    /// per_mode 中题型名称为空
    #[error("per_mode 中存在空的题型名称")]
    EmptyModeName,
    /// 去掉首尾空白后题型名称重复
    #[error("per_mode 中题型 '{mode}' 重复")]
    DuplicateModeName { mode: String },
    /// 难度分布全部为 0
    #[error("difficulty_dist 权重之和必须大于 0")]
    ZeroDifficultyWeights,
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_message_mentions_filters() {
        let err = ExamGenerationError::EmptyPool {
            cls_list: vec![],
            units: vec!["解剖".to_string()],
            modes: vec!["A1型题".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("筛选后题库为空"));
        assert!(msg.contains("解剖"));
    }

    #[test]
    fn test_generation_error_wraps_into_app_error() {
        let err: AppError = ExamGenerationError::EmptyPool {
            cls_list: vec![],
            units: vec![],
            modes: vec![],
        }
        .into();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(err.to_string().starts_with("组卷错误"));
    }
}
