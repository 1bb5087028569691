// crates/fc_field/src/field.rs

//! 场文件整体与读写
//!
//! 一个场文件由量纲向量、内部场默认值与 `boundaryField`
//! （patch 名 → 条件记录）构成。条目顺序保留声明顺序；
//! 对同一 patch 的重复声明在绑定阶段报 `DuplicateCondition`。

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use fc_dict::{Body, CaseFile, DictError, DictParser, DictValue, DictWriter, Dictionary, FileHeader};

use crate::condition::ConditionSpec;
use crate::dimensions::DimensionSet;
use crate::error::FieldResult;
use crate::value::{FieldValue, ValueRank};

/// 场文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFile {
    /// 场名（文件头 object，如 "U"）
    pub name: String,
    /// 物理量纲
    pub dimensions: DimensionSet,
    /// 内部场默认值
    pub internal: FieldValue,
    /// patch 名 → 条件记录（声明顺序）
    pub boundary: Vec<(String, ConditionSpec)>,
}

impl FieldFile {
    /// 场的秩（由内部场值决定）
    pub fn rank(&self) -> ValueRank {
        self.internal.rank()
    }

    /// 按名称查找条件
    pub fn condition(&self, patch: &str) -> Option<&ConditionSpec> {
        self.boundary
            .iter()
            .find(|(name, _)| name == patch)
            .map(|(_, spec)| spec)
    }
}

// ============================================================
// 读取
// ============================================================

/// 场文件加载器
pub struct FieldLoader;

impl FieldLoader {
    /// 从文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> FieldResult<FieldFile> {
        let file = File::open(path.as_ref())?;
        Self::load_from_reader(BufReader::new(file))
    }

    /// 从 reader 加载
    pub fn load_from_reader<R: Read>(reader: R) -> FieldResult<FieldFile> {
        let case = DictParser::parse_reader(reader)?;
        Self::decode(&case)
    }

    /// 从已解析的值树解码
    pub fn decode(case: &CaseFile) -> FieldResult<FieldFile> {
        let dict = case.as_dict()?;

        let name = case
            .header
            .as_ref()
            .and_then(|h| h.object.clone())
            .unwrap_or_else(|| "field".to_string());

        let dims_value = dict.expect("dimensions")?;
        let dimensions = dims_value
            .as_dimensions()
            .map(DimensionSet)
            .ok_or_else(|| {
                DictError::type_mismatch("dimensions", "dimensions", dims_value.kind_name())
            })?;

        let internal =
            FieldValue::decode_uniform("internalField", dict.expect("internalField")?.as_tokens())?;

        let mut boundary = Vec::new();
        let boundary_field = dict.get_dict("boundaryField")?;
        for (patch, value) in boundary_field.iter() {
            let sub = value.as_dict().ok_or_else(|| {
                DictError::type_mismatch(patch.to_string(), "dictionary", value.kind_name())
            })?;
            boundary.push((patch.to_string(), ConditionSpec::decode(patch, sub)?));
        }

        Ok(FieldFile {
            name,
            dimensions,
            internal,
            boundary,
        })
    }
}

// ============================================================
// 写出
// ============================================================

/// 场文件写出器
pub struct FieldWriter;

impl FieldWriter {
    /// 写入文件
    pub fn write<P: AsRef<Path>>(path: P, field: &FieldFile) -> FieldResult<()> {
        let out = File::create(path.as_ref())?;
        Self::write_to(&mut BufWriter::new(out), field)
    }

    /// 写入 writer
    pub fn write_to<W: Write>(writer: &mut W, field: &FieldFile) -> FieldResult<()> {
        let case = Self::encode(field);
        DictWriter::write_to(writer, &case)?;
        Ok(())
    }

    /// 编码为字典值树
    pub fn encode(field: &FieldFile) -> CaseFile {
        let class = match field.rank() {
            ValueRank::Scalar => "volScalarField",
            ValueRank::Vector => "volVectorField",
        };

        let mut root = Dictionary::new();
        root.insert(
            "dimensions",
            DictValue::Dimensions(field.dimensions.exponents()),
        );
        root.insert("internalField", field.internal.encode_uniform());

        let mut boundary_field = Dictionary::new();
        for (patch, spec) in &field.boundary {
            boundary_field.insert(patch.clone(), DictValue::Dict(spec.encode()));
        }
        root.insert("boundaryField", DictValue::Dict(boundary_field));

        CaseFile {
            header: Some(FileHeader {
                version: Some("2.0".into()),
                format: Some("ascii".into()),
                class: Some(class.into()),
                location: Some("0".into()),
                object: Some(field.name.clone()),
            }),
            body: Body::Dict(root),
        }
    }
}
