// crates/fc_dict/src/value.rs

//! 字典值树
//!
//! 解析结果的内存表示。`Dictionary` 保持条目的声明顺序，
//! 因为 patch 的声明顺序在扁平化边界表示中具有语义。

use serde::{Deserialize, Serialize};

use crate::error::{DictError, DictResult};

/// 字典值树节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DictValue {
    /// 裸词（类型名、关键字等）
    Word(String),
    /// 带引号的字符串
    Str(String),
    /// 整数
    Int(i64),
    /// 浮点数
    Number(f64),
    /// 括号列表 `( ... )`
    List(Vec<DictValue>),
    /// 子字典 `{ ... }`
    Dict(Dictionary),
    /// 列表元素中的命名子字典 `name { ... }`（边界文件的 patch 记录形式）
    NamedDict {
        /// 记录名
        name: String,
        /// 记录内容
        dict: Dictionary,
    },
    /// 量纲向量 `[0 1 -1 0 0 0 0]`，7 个 SI 指数
    Dimensions([i32; 7]),
    /// 多 token 条目值，如 `uniform (1.5 0 0)`
    Compound(Vec<DictValue>),
}

impl DictValue {
    /// 值的类别名（用于诊断）
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Word(_) => "word",
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Dict(_) => "dictionary",
            Self::NamedDict { .. } => "named dictionary",
            Self::Dimensions(_) => "dimensions",
            Self::Compound(_) => "compound",
        }
    }

    /// 作为浮点数（整数自动提升）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// 作为整数
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// 作为非负索引
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Self::Int(i) if *i >= 0 => Some(*i as usize),
            _ => None,
        }
    }

    /// 作为词（字符串亦可）
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// 作为列表
    pub fn as_list(&self) -> Option<&[DictValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// 作为子字典
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Self::Dict(d) => Some(d),
            Self::NamedDict { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// 作为量纲向量
    pub fn as_dimensions(&self) -> Option<[i32; 7]> {
        match self {
            Self::Dimensions(d) => Some(*d),
            _ => None,
        }
    }

    /// 作为 3 分量数值向量 `(x y z)`
    pub fn as_vector3(&self) -> Option<[f64; 3]> {
        let items = self.as_list()?;
        if items.len() != 3 {
            return None;
        }
        Some([
            items[0].as_number()?,
            items[1].as_number()?,
            items[2].as_number()?,
        ])
    }

    /// 作为多 token 值的切片；单值视为长度 1
    pub fn as_tokens(&self) -> &[DictValue] {
        match self {
            Self::Compound(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

/// 保序的键值条目表
///
/// 条目按声明顺序存储，允许重复关键字（语义层负责查重），
/// 查找时取首个匹配。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    entries: Vec<(String, DictValue)>,
}

impl Dictionary {
    /// 创建空字典
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加条目
    pub fn insert(&mut self, key: impl Into<String>, value: DictValue) {
        self.entries.push((key.into(), value));
    }

    /// 按键查找
    pub fn get(&self, key: &str) -> Option<&DictValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// 是否包含键
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按声明顺序迭代条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 按键查找，缺失时报错
    pub fn expect(&self, key: &str) -> DictResult<&DictValue> {
        self.get(key).ok_or_else(|| DictError::missing(key))
    }

    /// 取浮点数条目
    pub fn get_number(&self, key: &str) -> DictResult<f64> {
        let v = self.expect(key)?;
        v.as_number()
            .ok_or_else(|| DictError::type_mismatch(key, "number", v.kind_name()))
    }

    /// 取非负整数条目
    pub fn get_usize(&self, key: &str) -> DictResult<usize> {
        let v = self.expect(key)?;
        v.as_usize()
            .ok_or_else(|| DictError::type_mismatch(key, "non-negative integer", v.kind_name()))
    }

    /// 取词条目
    pub fn get_word(&self, key: &str) -> DictResult<&str> {
        let v = self.expect(key)?;
        v.as_word()
            .ok_or_else(|| DictError::type_mismatch(key, "word", v.kind_name()))
    }

    /// 取列表条目
    pub fn get_list(&self, key: &str) -> DictResult<&[DictValue]> {
        let v = self.expect(key)?;
        v.as_list()
            .ok_or_else(|| DictError::type_mismatch(key, "list", v.kind_name()))
    }

    /// 取子字典条目
    pub fn get_dict(&self, key: &str) -> DictResult<&Dictionary> {
        let v = self.expect(key)?;
        v.as_dict()
            .ok_or_else(|| DictError::type_mismatch(key, "dictionary", v.kind_name()))
    }
}

/// 标准文件头（`FoamFile` 块）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    /// 格式版本
    pub version: Option<String>,
    /// 存储格式（ascii/binary）
    pub format: Option<String>,
    /// 内容类别（dictionary/polyBoundaryMesh/volVectorField 等）
    pub class: Option<String>,
    /// 所在目录
    pub location: Option<String>,
    /// 对象名
    pub object: Option<String>,
}

impl FileHeader {
    /// 从头部字典提取
    pub fn from_dict(dict: &Dictionary) -> Self {
        let field = |key: &str| {
            dict.get(key).and_then(|v| match v {
                DictValue::Word(w) => Some(w.clone()),
                DictValue::Str(s) => Some(s.clone()),
                DictValue::Number(n) => Some(format!("{}", n)),
                DictValue::Int(i) => Some(format!("{}", i)),
                _ => None,
            })
        };
        Self {
            version: field("version"),
            format: field("format"),
            class: field("class"),
            location: field("location"),
            object: field("object"),
        }
    }
}

/// 文件顶层内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Body {
    /// 键值条目（网格描述、场文件）
    Dict(Dictionary),
    /// 匿名顶层列表（生成后的边界文件）
    List(Vec<DictValue>),
}

/// 完整案例文件：可选文件头 + 顶层内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    /// 标准文件头
    pub header: Option<FileHeader>,
    /// 顶层内容
    pub body: Body,
}

impl CaseFile {
    /// 顶层内容作为字典
    pub fn as_dict(&self) -> DictResult<&Dictionary> {
        match &self.body {
            Body::Dict(d) => Ok(d),
            Body::List(_) => Err(DictError::type_mismatch(
                "<top-level>",
                "dictionary",
                "list",
            )),
        }
    }

    /// 顶层内容作为列表
    pub fn as_list(&self) -> DictResult<&[DictValue]> {
        match &self.body {
            Body::List(items) => Ok(items),
            Body::Dict(_) => Err(DictError::type_mismatch(
                "<top-level>",
                "list",
                "dictionary",
            )),
        }
    }
}
