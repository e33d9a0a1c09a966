//! 区间与点: 两种带时间标注的原子元素。

use std::cmp::Ordering;

use serde::Serialize;

use crate::codec::praat_string;
use crate::error::TextGridError;
use crate::reader::{Value, expect_number, expect_text};

/// 层内元素的公共行为: 按时间排序、从值序列构造、序列化为 Praat 文本。
pub trait TierItem: Sized {
    /// Praat 长格式中该元素所属层的类型标记。
    const CLASS: &'static str;
    /// 摘要行中使用的复数名词。
    const PLURAL: &'static str;

    /// 按时间先后比较两个元素。
    fn cmp_time(&self, other: &Self) -> Ordering;

    /// 从值序列中消费构造一个元素所需的值。
    fn from_reader(stream: &mut impl Iterator<Item = Value>) -> Result<Self, TextGridError>;

    /// 将元素序列化为 Praat 长格式中的一行。
    fn to_praat(&self) -> String;
}

/// 区间层中的一个区间: 一段带文本标注的时间范围。
///
/// 相等是结构性的: 两个字段完全相同的区间视为相等。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    /// 区间的开始时间 (秒)。
    pub xmin: f64,
    /// 区间的结束时间 (秒)。
    pub xmax: f64,
    /// 区间的文本标注, 可以为空。
    pub text: String,
}

impl Interval {
    /// 创建一个新的区间。构造时不做任何边界检查。
    #[must_use]
    pub fn new(xmin: f64, xmax: f64, text: impl Into<String>) -> Self {
        Self {
            xmin,
            xmax,
            text: text.into(),
        }
    }

    /// 返回该区间的结构化字典表示。
    pub fn to_dict(&self) -> Result<serde_json::Value, TextGridError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl TierItem for Interval {
    const CLASS: &'static str = "IntervalTier";
    const PLURAL: &'static str = "intervals";

    fn cmp_time(&self, other: &Self) -> Ordering {
        self.xmin
            .total_cmp(&other.xmin)
            .then(self.xmax.total_cmp(&other.xmax))
    }

    fn from_reader(stream: &mut impl Iterator<Item = Value>) -> Result<Self, TextGridError> {
        let xmin = expect_number(stream, "区间的 xmin")?;
        let xmax = expect_number(stream, "区间的 xmax")?;
        let text = expect_text(stream, "区间的文本")?;

        Ok(Self { xmin, xmax, text })
    }

    fn to_praat(&self) -> String {
        format!(
            " {:>23}{:>24}    {} ",
            self.xmin,
            self.xmax,
            praat_string(&self.text)
        )
    }
}

/// 点层中的一个点: 一个带文本标记的时刻。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// 点的时间 (秒)。
    pub number: f64,
    /// 点的文本标记, 可以为空。
    pub mark: String,
}

impl Point {
    /// 创建一个新的点。
    #[must_use]
    pub fn new(number: f64, mark: impl Into<String>) -> Self {
        Self {
            number,
            mark: mark.into(),
        }
    }

    /// 返回该点的结构化字典表示。
    pub fn to_dict(&self) -> Result<serde_json::Value, TextGridError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl TierItem for Point {
    const CLASS: &'static str = "TextTier";
    const PLURAL: &'static str = "points";

    fn cmp_time(&self, other: &Self) -> Ordering {
        self.number.total_cmp(&other.number)
    }

    fn from_reader(stream: &mut impl Iterator<Item = Value>) -> Result<Self, TextGridError> {
        let number = expect_number(stream, "点的时间")?;
        let mark = expect_text(stream, "点的标记")?;

        Ok(Self { number, mark })
    }

    fn to_praat(&self) -> String {
        format!(" {:>23}    {} ", self.number, praat_string(&self.mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_order_by_xmin_then_xmax() {
        let a = Interval::new(0.0, 0.5, "a");
        let b = Interval::new(0.0, 0.8, "b");
        let c = Interval::new(0.2, 0.3, "c");
        assert_eq!(a.cmp_time(&b), Ordering::Less);
        assert_eq!(b.cmp_time(&c), Ordering::Less);
        assert_eq!(a.cmp_time(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_interval_from_reader_consumes_exactly_three_values() {
        let mut stream = vec![
            Value::Number(0.0),
            Value::Number(0.65),
            Value::Text("hello".to_string()),
            Value::Number(99.0),
        ]
        .into_iter();

        let interval = Interval::from_reader(&mut stream).unwrap();
        assert_eq!(interval, Interval::new(0.0, 0.65, "hello"));
        assert_eq!(stream.next(), Some(Value::Number(99.0)));
    }

    #[test]
    fn test_point_from_reader_consumes_exactly_two_values() {
        let mut stream = vec![
            Value::Number(0.75),
            Value::Text("click".to_string()),
            Value::Text("extra".to_string()),
        ]
        .into_iter();

        let point = Point::from_reader(&mut stream).unwrap();
        assert_eq!(point, Point::new(0.75, "click"));
        assert_eq!(stream.next(), Some(Value::Text("extra".to_string())));
    }

    #[test]
    fn test_to_praat_field_layout() {
        assert_eq!(
            Interval::new(0.0, 0.65, "hello").to_praat(),
            "                       0                    0.65    \"hello\" "
        );
        assert_eq!(
            Point::new(0.75, "click").to_praat(),
            "                    0.75    \"click\" "
        );
    }
}
