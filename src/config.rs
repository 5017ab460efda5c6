/// 程序配置
///
/// 运行参数从环境变量读取，无法解析的值回退为默认值；组卷规则见 [`crate::models::ExamConfig`]。
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 JSON 文件
    pub pool_file: String,
    /// 组卷配置 TOML 文件
    pub exam_config: String,
    /// 组卷结果输出文件
    pub output_file: String,
    /// 运行日志文件
    pub log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_file: "data/questions.json".to_string(),
            exam_config: "exam.toml".to_string(),
            output_file: "output/exam.json".to_string(),
            log_file: "exam_log.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取，便于测试
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            pool_file: lookup("POOL_FILE").unwrap_or(default.pool_file),
            exam_config: lookup("EXAM_CONFIG").unwrap_or(default.exam_config),
            output_file: lookup("OUTPUT_FILE").unwrap_or(default.output_file),
            log_file: lookup("LOG_FILE").unwrap_or(default.log_file),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
