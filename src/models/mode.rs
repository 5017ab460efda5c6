/// 题型排序表
///
/// 试卷最终按此序号排列题型，未收录的题型统一排在最后
use phf::phf_map;

static MODE_ORDER: phf::Map<&'static str, u8> = phf_map! {
    "A1型题" => 0,
    "A2型题" => 1,
    "A3/A4型题" => 2,
    "A3型题" => 2,
    "A4型题" => 2,
    "B1型题" => 3,
    "B型题" => 3,
    "案例分析" => 4,
};

/// 未知题型的排序序号
pub const UNKNOWN_MODE_PRIORITY: u8 = 99;

/// 获取题型排序序号
pub fn mode_priority(mode: &str) -> u8 {
    MODE_ORDER
        .get(mode)
        .copied()
        .unwrap_or(UNKNOWN_MODE_PRIORITY)
}

/// 是否为已收录的题型
pub fn is_known_mode(mode: &str) -> bool {
    MODE_ORDER.contains_key(mode)
}
