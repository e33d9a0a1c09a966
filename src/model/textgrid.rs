//! TextGrid: 层的顶层容器, 以及文件级的读取与写出入口。

use std::fs;
use std::ops::{Index, IndexMut};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::codec::praat_number;
use crate::error::TextGridError;
use crate::reader::{PraatReader, Value, expect_count, expect_number};

use super::tier::Tier;

/// 读写 TextGrid 文件时使用的文本编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8。读取时忽略可选的 BOM。
    #[default]
    Utf8,
    /// UTF-16。读取时按 BOM 判断字节序, 无 BOM 时按小端处理;
    /// 写出为带 BOM 的小端形式。
    Utf16,
}

impl TextEncoding {
    /// 将文件的原始字节解码为字符串。
    fn decode(self, bytes: &[u8]) -> Result<String, TextGridError> {
        match self {
            Self::Utf8 => Ok(String::from_utf8(bytes.to_vec())?),
            Self::Utf16 => {
                let (payload, big_endian) = match bytes {
                    [0xFF, 0xFE, rest @ ..] => (rest, false),
                    [0xFE, 0xFF, rest @ ..] => (rest, true),
                    _ => (bytes, false),
                };
                if payload.len() % 2 != 0 {
                    return Err(TextGridError::Decode(
                        "UTF-16 数据的字节数不是偶数".to_string(),
                    ));
                }

                let units: Vec<u16> = payload
                    .chunks_exact(2)
                    .map(|pair| {
                        if big_endian {
                            u16::from_be_bytes([pair[0], pair[1]])
                        } else {
                            u16::from_le_bytes([pair[0], pair[1]])
                        }
                    })
                    .collect();

                String::from_utf16(&units).map_err(|e| TextGridError::Decode(e.to_string()))
            }
        }
    }

    /// 将字符串编码为待写出的原始字节。
    fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16 => {
                let mut bytes = vec![0xFF, 0xFE];
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                bytes
            }
        }
    }
}

/// 一个 Praat TextGrid 标注文件的内存表示。
///
/// 构造时不校验各层与整体时间范围的一致性, 全部跨层校验
/// 推迟到序列化时进行。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextGrid {
    /// 开始时间 (秒)。
    pub xmin: f64,
    /// 结束时间 (秒)。
    pub xmax: f64,
    /// 全部标注层, 按文件中出现的顺序排列。
    pub tiers: Vec<Tier>,
}

impl TextGrid {
    /// 创建一个新的 TextGrid。
    #[must_use]
    pub const fn new(xmin: f64, xmax: f64, tiers: Vec<Tier>) -> Self {
        Self { xmin, xmax, tiers }
    }

    /// 从值序列中构造一个 TextGrid: 依次读取 xmin、xmax、层数量与各层。
    ///
    /// 读取完声明数量的层之后值序列必须恰好耗尽, 否则视为格式错误。
    pub fn from_reader(stream: &mut impl Iterator<Item = Value>) -> Result<Self, TextGridError> {
        let xmin = expect_number(stream, "TextGrid 的 xmin")?;
        let xmax = expect_number(stream, "TextGrid 的 xmax")?;
        let size = expect_count(stream, "层的数量")?;

        let mut tiers = Vec::with_capacity(size);
        for _ in 0..size {
            tiers.push(Tier::from_reader(stream)?);
        }

        if let Some(extra) = stream.next() {
            return Err(TextGridError::TrailingData(extra.to_string()));
        }

        Ok(Self { xmin, xmax, tiers })
    }

    /// 解析一段完整的 TextGrid 文本内容。
    ///
    /// 接受长短两种格式。文件开头 (跳过结构性标签后) 必须依次出现
    /// 固定的 `"ooTextFile"` 与 `"TextGrid"` 标记。
    pub fn parse(content: &str) -> Result<Self, TextGridError> {
        let mut stream = PraatReader::new(content);

        for header in ["ooTextFile", "TextGrid"] {
            match stream.next() {
                Some(Value::Text(tag)) if tag == header => {}
                _ => return Err(TextGridError::MissingHeader(header)),
            }
        }

        Self::from_reader(&mut stream)
    }

    /// 从文件读取并解析一个 TextGrid, 使用 UTF-8 编码。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextGridError> {
        Self::from_file_with_encoding(path, TextEncoding::default())
    }

    /// 从文件读取并解析一个 TextGrid, 使用指定的文本编码。
    pub fn from_file_with_encoding(
        path: impl AsRef<Path>,
        encoding: TextEncoding,
    ) -> Result<Self, TextGridError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!("已读取 TextGrid 文件: {}", path.display());

        Self::parse(&encoding.decode(&bytes)?)
    }

    /// 返回该 TextGrid 的结构化字典表示。
    ///
    /// 与 `to_praat` 不同, 此方法不做任何一致性校验。
    pub fn to_dict(&self) -> Result<serde_json::Value, TextGridError> {
        Ok(serde_json::to_value(self)?)
    }

    /// 将 TextGrid 序列化为 Praat 长格式文本。
    ///
    /// 序列化前校验每个层的时间范围与 TextGrid 完全一致;
    /// 各层内部的校验由层自己的 `to_praat` 完成。
    pub fn to_praat(&self) -> Result<String, TextGridError> {
        for tier in &self.tiers {
            if tier.xmin() != self.xmin || tier.xmax() != self.xmax {
                return Err(TextGridError::TierBoundsMismatch {
                    name: tier.name().to_string(),
                    tier_xmin: tier.xmin(),
                    tier_xmax: tier.xmax(),
                    grid_xmin: self.xmin,
                    grid_xmax: self.xmax,
                });
            }
        }

        let mut output = format!(
            "\"ooTextFile\"\n\"TextGrid\"\n{} to {} seconds <exists>\n{} tiers\n\n",
            praat_number(self.xmin),
            praat_number(self.xmax),
            self.tiers.len(),
        );

        let rendered = self
            .tiers
            .iter()
            .map(Tier::to_praat)
            .collect::<Result<Vec<_>, _>>()?;
        output.push_str(&rendered.join("\n\n"));

        Ok(output)
    }

    /// 将 TextGrid 写出到文件, 使用 UTF-8 编码。
    pub fn to_praat_file(&self, path: impl AsRef<Path>) -> Result<(), TextGridError> {
        self.to_praat_file_with_encoding(path, TextEncoding::default())
    }

    /// 将 TextGrid 写出到文件, 使用指定的文本编码。
    pub fn to_praat_file_with_encoding(
        &self,
        path: impl AsRef<Path>,
        encoding: TextEncoding,
    ) -> Result<(), TextGridError> {
        let output = self.to_praat()?;
        fs::write(path.as_ref(), encoding.encode(&output))?;
        debug!("已写出 TextGrid 文件: {}", path.as_ref().display());

        Ok(())
    }

    /// 层的数量。
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// 是否不含任何层。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// 正向遍历全部层。逆向遍历使用 `.iter().rev()`。
    pub fn iter(&self) -> std::slice::Iter<'_, Tier> {
        self.tiers.iter()
    }
}

impl Index<usize> for TextGrid {
    type Output = Tier;

    fn index(&self, index: usize) -> &Tier {
        &self.tiers[index]
    }
}

impl IndexMut<usize> for TextGrid {
    fn index_mut(&mut self, index: usize) -> &mut Tier {
        &mut self.tiers[index]
    }
}

impl<'a> IntoIterator for &'a TextGrid {
    type Item = &'a Tier;
    type IntoIter = std::slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}
