use std::{fmt, io};

use thiserror::Error;

/// 定义 TextGrid 解析和序列化过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum TextGridError {
    /// 文件开头缺少必需的标记字符串。
    #[error("缺少头部字符串 \"{0}\"")]
    MissingHeader(&'static str),
    /// 值序列在读取完所需的值之前就已耗尽。
    #[error("数据意外结束: 期望读取{0}")]
    UnexpectedEnd(&'static str),
    /// 期望读取数值, 但读取到了字符串。
    #[error("期望读取数值 ({expected}), 但读取到字符串 \"{found}\"")]
    ExpectedNumber {
        /// 期望值的描述。
        expected: &'static str,
        /// 实际读取到的字符串。
        found: String,
    },
    /// 期望读取字符串, 但读取到了数值。
    #[error("期望读取字符串 ({expected}), 但读取到数值 {found}")]
    ExpectedText {
        /// 期望值的描述。
        expected: &'static str,
        /// 实际读取到的数值。
        found: f64,
    },
    /// 声明的元素数量不是非负整数。
    #[error("无效的元素数量: {0}")]
    InvalidCount(f64),
    /// 层的类型标记无法识别。
    #[error("无法识别的层类型 \"{0}\"")]
    UnknownTierClass(String),
    /// 读取完声明数量的层之后, 值序列中仍有剩余的值。
    #[error("读取完所有层后发现多余的值: {0}")]
    TrailingData(String),
    /// 区间的结束时间早于开始时间。
    #[error("无效的区间 (xmin > xmax): [{xmin}, {xmax}]")]
    ReversedInterval {
        /// 区间的开始时间。
        xmin: f64,
        /// 区间的结束时间。
        xmax: f64,
    },
    /// 区间早于所属层的开始时间。
    #[error("位于 {0} 的区间早于层的开始时间")]
    IntervalBeforeTierStart(f64),
    /// 区间超出了所属层的结束时间。
    #[error("位于 {0} 的区间超出了层的结束时间")]
    IntervalPastTierEnd(f64),
    /// 两个区间在时间上重叠。
    #[error("区间重叠: {0} 与 {1}")]
    OverlappingIntervals(f64, f64),
    /// 点超出了所属层的时间范围。
    #[error("位于 {number} 的点超出了层的时间范围 [{xmin}, {xmax}]")]
    PointOutOfBounds {
        /// 点的时间。
        number: f64,
        /// 层的开始时间。
        xmin: f64,
        /// 层的结束时间。
        xmax: f64,
    },
    /// 同一时间上存在多个点。
    #[error("时间 {0} 处存在多个点")]
    DuplicatePoints(f64),
    /// 层的时间范围与所属 TextGrid 的时间范围不一致。
    #[error(
        "层 \"{name}\" 的时间范围 [{tier_xmin}, {tier_xmax}] 与 TextGrid 的 [{grid_xmin}, {grid_xmax}] 不一致"
    )]
    TierBoundsMismatch {
        /// 层的名称。
        name: String,
        /// 层的开始时间。
        tier_xmin: f64,
        /// 层的结束时间。
        tier_xmax: f64,
        /// TextGrid 的开始时间。
        grid_xmin: f64,
        /// TextGrid 的结束时间。
        grid_xmax: f64,
    },
    /// 文本解码失败。
    #[error("文本解码失败: {0}")]
    Decode(String),
    /// 从字节序列转换为 UTF-8 字符串失败。
    #[error("UTF-8 转换错误: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
    /// 字符串格式化错误。
    #[error("格式错误: {0}")]
    Format(#[from] fmt::Error),
    /// 文件读写等 IO 错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
    /// JSON 序列化错误。
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<TextGridError> for io::Error {
    fn from(err: TextGridError) -> Self {
        io::Error::other(err)
    }
}
