//! TextGrid 的内存数据模型: 标注元素、层与顶层容器。

pub mod item;
pub mod textgrid;
pub mod tier;

pub use item::{Interval, Point, TierItem};
pub use textgrid::{TextEncoding, TextGrid};
pub use tier::{IntervalTier, TextTier, Tier, TierData};
