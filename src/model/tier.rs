//! 层: 有名称、有时间范围、按时间升序维护元素的有序容器。

use std::cmp::Ordering;
use std::ops::Index;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use crate::codec::{praat_number, praat_string};
use crate::error::TextGridError;
use crate::reader::{Value, expect_count, expect_number, expect_text};

use super::item::{Interval, Point, TierItem};

/// 层的通用主体: 名称、时间范围与元素序列。
///
/// 元素序列在构造时排序, `insert` 维持升序; 按下标替换或删除
/// 不会重新排序, 序列化前会再次按时间排序并校验。
#[derive(Debug, Clone, PartialEq)]
pub struct TierData<I> {
    /// 层的名称。
    pub name: String,
    /// 层的开始时间 (秒)。
    pub xmin: f64,
    /// 层的结束时间 (秒)。
    pub xmax: f64,
    items: Vec<I>,
}

/// 包含区间标注的层。区间在语义上划分 `[xmin, xmax)`,
/// 但只在序列化时校验与补齐, 构造时不做检查。
pub type IntervalTier = TierData<Interval>;

/// 包含点标注的层。点允许稀疏分布。
pub type TextTier = TierData<Point>;

impl<I: TierItem> TierData<I> {
    /// 创建一个新的层, 元素按时间升序排序后存储。
    #[must_use]
    pub fn new(name: impl Into<String>, xmin: f64, xmax: f64, items: Vec<I>) -> Self {
        let mut items = items;
        items.sort_by(I::cmp_time);

        Self {
            name: name.into(),
            xmin,
            xmax,
            items,
        }
    }

    /// 从值序列中构造一个层: 依次读取名称、xmin、xmax、元素数量与各元素。
    pub fn from_reader(stream: &mut impl Iterator<Item = Value>) -> Result<Self, TextGridError> {
        let name = expect_text(stream, "层的名称")?;
        let xmin = expect_number(stream, "层的 xmin")?;
        let xmax = expect_number(stream, "层的 xmax")?;
        let size = expect_count(stream, "层的元素数量")?;

        let mut items = Vec::with_capacity(size);
        for _ in 0..size {
            items.push(I::from_reader(stream)?);
        }

        Ok(Self::new(name, xmin, xmax, items))
    }

    /// 将元素插入到按时间排序后的位置, 与既有元素时间相同时插在其后。
    pub fn insert(&mut self, item: I) {
        let idx = self
            .items
            .partition_point(|existing| existing.cmp_time(&item) != Ordering::Greater);
        self.items.insert(idx, item);
    }

    /// 返回层内元素数量。
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 层内是否没有任何元素。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按下标访问元素。
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    /// 以新元素替换下标处的元素。替换不会重新排序。
    pub fn set(&mut self, index: usize, item: I) {
        self.items[index] = item;
    }

    /// 删除并返回下标处的元素。
    pub fn remove(&mut self, index: usize) -> I {
        self.items.remove(index)
    }

    /// 正向遍历元素。逆向遍历使用 `.iter().rev()`。
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.items.iter()
    }

    /// 以切片形式访问全部元素。
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// 返回该层的结构化字典表示。
    ///
    /// 与 `to_praat` 不同, 此方法不校验层的时间一致性。
    pub fn to_dict(&self) -> Result<serde_json::Value, TextGridError>
    where
        I: serde::Serialize,
    {
        Ok(serde_json::to_value(self)?)
    }

    fn header_lines(&self, count: usize) -> [String; 2] {
        [
            format!("{} named {} ", praat_string(I::CLASS), praat_string(&self.name)),
            format!(
                "From {} to {} seconds with {} {}",
                praat_number(self.xmin),
                praat_number(self.xmax),
                count,
                I::PLURAL
            ),
        ]
    }

    fn render(&self, items: &[I]) -> String {
        let [class_line, summary_line] = self.header_lines(items.len());
        let mut lines = Vec::with_capacity(items.len() + 2);
        lines.push(class_line);
        lines.push(summary_line);
        lines.extend(items.iter().map(TierItem::to_praat));
        lines.join("\n")
    }
}

impl<I: TierItem> Index<usize> for TierData<I> {
    type Output = I;

    fn index(&self, index: usize) -> &I {
        &self.items[index]
    }
}

impl<'a, I: TierItem> IntoIterator for &'a TierData<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<I: TierItem + serde::Serialize> Serialize for TierData<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut sorted: Vec<&I> = self.items.iter().collect();
        sorted.sort_by(|a, b| a.cmp_time(b));

        let mut state = serializer.serialize_struct("Tier", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("class", I::CLASS)?;
        state.serialize_field("xmin", &self.xmin)?;
        state.serialize_field("xmax", &self.xmax)?;
        state.serialize_field(I::PLURAL, &sorted)?;
        state.end()
    }
}

impl IntervalTier {
    /// 返回包含给定时间的区间。
    ///
    /// 区间按半开范围 `[xmin, xmax)` 判定: 恰好位于某区间 xmax 处的
    /// 时间属于下一个区间。时间落在间隙中或层范围之外时返回 `None`。
    #[must_use]
    pub fn interval_at(&self, time: f64) -> Option<&Interval> {
        let idx = self.items.partition_point(|interval| interval.xmax <= time);
        let interval = self.items.get(idx)?;
        (interval.xmin <= time).then_some(interval)
    }

    /// 校验全部区间并补齐间隙, 返回可直接序列化的完整区间列表。
    ///
    /// 任何未被区间覆盖的时间段都会以空文本区间补齐;
    /// 逆序、越界或相互重叠的区间会导致错误。
    fn check_items(&self) -> Result<Vec<Interval>, TextGridError> {
        let mut sorted: Vec<&Interval> = self.items.iter().collect();
        sorted.sort_by(|a, b| a.cmp_time(b));

        let mut intervals = Vec::with_capacity(sorted.len());
        let mut prev = self.xmin;

        for item in sorted {
            if item.xmin > item.xmax {
                return Err(TextGridError::ReversedInterval {
                    xmin: item.xmin,
                    xmax: item.xmax,
                });
            }
            if item.xmin < prev {
                if prev == self.xmin {
                    return Err(TextGridError::IntervalBeforeTierStart(item.xmin));
                }
                return Err(TextGridError::OverlappingIntervals(item.xmin, prev));
            }
            if item.xmax > self.xmax {
                return Err(TextGridError::IntervalPastTierEnd(item.xmin));
            }
            if item.xmin > prev {
                debug!("层 \"{}\": 以空白区间补齐 [{prev}, {}]", self.name, item.xmin);
                intervals.push(Interval::new(prev, item.xmin, ""));
            }
            intervals.push(item.clone());
            prev = item.xmax;
        }

        if prev < self.xmax {
            intervals.push(Interval::new(prev, self.xmax, ""));
        }

        Ok(intervals)
    }

    /// 将层序列化为 Praat 长格式文本, 序列化前校验并补齐区间。
    pub fn to_praat(&self) -> Result<String, TextGridError> {
        let items = self.check_items()?;
        Ok(self.render(&items))
    }
}

impl TextTier {
    /// 返回恰好位于给定时间上的点, 不存在时返回 `None`。
    #[must_use]
    pub fn point_at(&self, time: f64) -> Option<&Point> {
        let idx = self.items.partition_point(|point| point.number < time);
        self.items.get(idx).filter(|point| point.number == time)
    }

    /// 返回时间在 `[start, end]` (两端皆含) 内的全部点, 按时间升序。
    ///
    /// 范围超出层边界时只是收窄结果, 不会报错。
    #[must_use]
    pub fn points_between(&self, start: f64, end: f64) -> &[Point] {
        let lo = self.items.partition_point(|point| point.number < start);
        let hi = self.items.partition_point(|point| point.number <= end);
        &self.items[lo..hi.max(lo)]
    }

    /// 校验全部点的时间在层范围内且互不重复, 返回按时间排序的点列表。
    fn check_items(&self) -> Result<Vec<Point>, TextGridError> {
        let mut points = self.items.clone();
        points.sort_by(Point::cmp_time);

        for pair in points.windows(2) {
            if pair[0].number == pair[1].number {
                return Err(TextGridError::DuplicatePoints(pair[0].number));
            }
        }
        for point in &points {
            if point.number < self.xmin || point.number > self.xmax {
                return Err(TextGridError::PointOutOfBounds {
                    number: point.number,
                    xmin: self.xmin,
                    xmax: self.xmax,
                });
            }
        }

        Ok(points)
    }

    /// 将层序列化为 Praat 长格式文本, 序列化前校验全部点。
    pub fn to_praat(&self) -> Result<String, TextGridError> {
        let items = self.check_items()?;
        Ok(self.render(&items))
    }
}

/// TextGrid 中的一个层, 按元素种类分为区间层与点层。
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Tier {
    /// 区间层。
    Interval(IntervalTier),
    /// 点层。
    Text(TextTier),
}

impl Tier {
    /// 读取一个层类型标记, 并委派给相应层类型的 `from_reader`。
    pub fn from_reader(stream: &mut impl Iterator<Item = Value>) -> Result<Self, TextGridError> {
        let class = expect_text(stream, "层的类型标记")?;

        match class.as_str() {
            "IntervalTier" => Ok(Self::Interval(IntervalTier::from_reader(stream)?)),
            "TextTier" => Ok(Self::Text(TextTier::from_reader(stream)?)),
            _ => Err(TextGridError::UnknownTierClass(class)),
        }
    }

    /// 层的名称。
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Interval(tier) => &tier.name,
            Self::Text(tier) => &tier.name,
        }
    }

    /// 层的开始时间 (秒)。
    #[must_use]
    pub fn xmin(&self) -> f64 {
        match self {
            Self::Interval(tier) => tier.xmin,
            Self::Text(tier) => tier.xmin,
        }
    }

    /// 层的结束时间 (秒)。
    #[must_use]
    pub fn xmax(&self) -> f64 {
        match self {
            Self::Interval(tier) => tier.xmax,
            Self::Text(tier) => tier.xmax,
        }
    }

    /// 层内元素数量。
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Interval(tier) => tier.len(),
            Self::Text(tier) => tier.len(),
        }
    }

    /// 层内是否没有任何元素。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 若是区间层, 返回其引用。
    #[must_use]
    pub fn as_interval_tier(&self) -> Option<&IntervalTier> {
        match self {
            Self::Interval(tier) => Some(tier),
            Self::Text(_) => None,
        }
    }

    /// 若是点层, 返回其引用。
    #[must_use]
    pub fn as_text_tier(&self) -> Option<&TextTier> {
        match self {
            Self::Text(tier) => Some(tier),
            Self::Interval(_) => None,
        }
    }

    /// 将层序列化为 Praat 长格式文本。
    pub fn to_praat(&self) -> Result<String, TextGridError> {
        match self {
            Self::Interval(tier) => tier.to_praat(),
            Self::Text(tier) => tier.to_praat(),
        }
    }

    /// 返回该层的结构化字典表示。
    pub fn to_dict(&self) -> Result<serde_json::Value, TextGridError> {
        match self {
            Self::Interval(tier) => tier.to_dict(),
            Self::Text(tier) => tier.to_dict(),
        }
    }
}
