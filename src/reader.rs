//! # Praat ooTextFile 读取器
//!
//! 将 Praat 文本文件的完整内容转换为一个扁平的原始值序列。
//! 长格式中的结构性标签 (`xmin =`、`size =`、`item [1]:`、`<exists>` 等)
//! 会被直接丢弃, 因此无论输入使用长格式还是短格式, 产出的值序列都相同。

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::TextGridError;

/// 匹配文件中的三类词法单元: 带引号的字符串、`!` 行注释、裸词。
///
/// 字符串以双引号开闭, 内嵌的双引号写作两个连续的双引号;
/// 引号之外的 `!` 将该行剩余部分变为注释。
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"]|"")*)"|(!.*)|([^\s"!]+)"#).expect("未能编译 TOKEN_REGEX")
});

/// 匹配 Praat 写出的数值字面量, 包括可选的科学计数法形式。
static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?$").expect("未能编译 NUMBER_REGEX")
});

/// 读取器产出的原始值: Praat 文件中除结构性标签之外的全部数据。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 一个数值。
    Number(f64),
    /// 一个已去除引号转义的字符串。
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "\"{text}\""),
        }
    }
}

/// 对 Praat 文本内容进行单遍扫描的惰性读取器。
///
/// 读取器持有扫描位置, 只能向前消费一次, 不可重置,
/// 也不应在多个消费者之间共享。
pub struct PraatReader<'a> {
    matches: regex::CaptureMatches<'static, 'a>,
}

impl<'a> PraatReader<'a> {
    /// 创建一个新的读取器, 自动跳过开头的字节序标记。
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self {
            matches: TOKEN_REGEX.captures_iter(content),
        }
    }
}

impl Iterator for PraatReader<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        for caps in self.matches.by_ref() {
            if let Some(text) = caps.get(1) {
                return Some(Value::Text(text.as_str().replace("\"\"", "\"")));
            }
            if caps.get(2).is_some() {
                continue;
            }
            if let Some(bare) = caps.get(3) {
                let token = bare.as_str();
                if NUMBER_REGEX.is_match(token)
                    && let Ok(number) = token.parse::<f64>()
                {
                    return Some(Value::Number(number));
                }
                // 结构性标签, 丢弃
                trace!("跳过结构性标签: {token}");
            }
        }
        None
    }
}

/// 从值序列中读取下一个数值。
pub fn expect_number(
    stream: &mut impl Iterator<Item = Value>,
    expected: &'static str,
) -> Result<f64, TextGridError> {
    match stream.next() {
        Some(Value::Number(number)) => Ok(number),
        Some(Value::Text(found)) => Err(TextGridError::ExpectedNumber { expected, found }),
        None => Err(TextGridError::UnexpectedEnd(expected)),
    }
}

/// 从值序列中读取下一个字符串。
pub fn expect_text(
    stream: &mut impl Iterator<Item = Value>,
    expected: &'static str,
) -> Result<String, TextGridError> {
    match stream.next() {
        Some(Value::Text(text)) => Ok(text),
        Some(Value::Number(found)) => Err(TextGridError::ExpectedText { expected, found }),
        None => Err(TextGridError::UnexpectedEnd(expected)),
    }
}

/// 从值序列中读取一个非负整数计数。
pub fn expect_count(
    stream: &mut impl Iterator<Item = Value>,
    expected: &'static str,
) -> Result<usize, TextGridError> {
    let number = expect_number(stream, expected)?;
    if number < 0.0 || number.fract() != 0.0 {
        return Err(TextGridError::InvalidCount(number));
    }
    Ok(number as usize)
}
