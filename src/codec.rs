//! Praat 原始值的编码规则。
//!
//! 数值一律写出完整的十进制文本, 不做精度截断; 表格行中的数值字段
//! 右对齐到 24 列, 与 Praat 自带写出器的列宽一致, 便于逐行对比输出文件。

/// 将字符串编码为 Praat 可识别的带引号形式。
///
/// 内嵌的双引号按 Praat 的约定写作两个连续的双引号。
#[must_use]
pub fn praat_string(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// 将数值格式化为完整的十进制文本。
#[must_use]
pub fn praat_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_praat_string_wraps_in_quotes() {
        assert_eq!(praat_string("abc"), "\"abc\"");
        assert_eq!(praat_string(""), "\"\"");
    }

    #[test]
    fn test_praat_string_doubles_embedded_quotes() {
        assert_eq!(praat_string("a\"b\"c"), "\"a\"\"b\"\"c\"");
    }

    #[test]
    fn test_praat_number_is_untruncated() {
        assert_eq!(praat_number(0.0), "0");
        assert_eq!(praat_number(2.5), "2.5");
        assert_eq!(praat_number(1.125), "1.125");
        assert_eq!(praat_number(0.333_333_333_333_333_3), "0.3333333333333333");
    }
}
