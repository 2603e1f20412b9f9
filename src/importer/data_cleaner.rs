// ==========================================
// 商品目录馈送生成器 - 数据清洗器实现
// ==========================================
// 职责: 小数点本地化 / 列表拆分 / 按字符截断
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 逗号小数点 → 句点
    pub fn normalize_decimal(&self, value: &str) -> String {
        value.trim().replace(',', ".")
    }

    /// 本地化小数解析；不接受千分位空格、NaN、无穷大
    pub fn parse_decimal(&self, value: &str) -> Option<f64> {
        self.normalize_decimal(value)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// 逗号分隔列表拆分（去空白、丢弃空片段）
    pub fn split_list(&self, value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 按字符（而非字节）截断
    pub fn truncate_chars(&self, value: &str, max_chars: usize) -> String {
        value.chars().take(max_chars).collect()
    }
}
