// crates/fc_field/src/value.rs

//! 均匀场值
//!
//! 内部场与常值边界条件的取值：标量或 3 分量向量，
//! 文件中以 `uniform 0` / `uniform (1.5 0 0)` 形式声明。

use glam::DVec3;
use serde::{Deserialize, Serialize};

use fc_dict::DictValue;

use crate::error::{FieldError, FieldResult};

/// 场值的秩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueRank {
    /// 标量场
    Scalar,
    /// 向量场
    Vector,
}

impl ValueRank {
    /// 秩名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vector => "vector",
        }
    }
}

/// 均匀场值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// 标量
    Scalar(f64),
    /// 3 分量向量
    Vector(DVec3),
}

impl FieldValue {
    /// 值的秩
    pub fn rank(&self) -> ValueRank {
        match self {
            Self::Scalar(_) => ValueRank::Scalar,
            Self::Vector(_) => ValueRank::Vector,
        }
    }

    /// 从 `uniform <v>` token 序列解码
    pub fn decode_uniform(keyword: &str, tokens: &[DictValue]) -> FieldResult<Self> {
        let mismatch = |found: &str| {
            FieldError::Dict(fc_dict::DictError::type_mismatch(
                keyword.to_string(),
                "uniform scalar/vector",
                found.to_string(),
            ))
        };

        match tokens {
            [kw, value] if kw.as_word() == Some("uniform") => {
                if let Some(x) = value.as_number() {
                    Ok(Self::Scalar(x))
                } else if let Some([x, y, z]) = value.as_vector3() {
                    Ok(Self::Vector(DVec3::new(x, y, z)))
                } else {
                    Err(mismatch(value.kind_name()))
                }
            }
            _ => Err(mismatch("token 序列")),
        }
    }

    /// 编码为 `uniform <v>` token 序列
    pub fn encode_uniform(&self) -> DictValue {
        let value = match self {
            Self::Scalar(x) => DictValue::Number(*x),
            Self::Vector(v) => DictValue::List(vec![
                DictValue::Number(v.x),
                DictValue::Number(v.y),
                DictValue::Number(v.z),
            ]),
        };
        DictValue::Compound(vec![DictValue::Word("uniform".into()), value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_dict::DictValue;

    #[test]
    fn test_decode_uniform_scalar() {
        let tokens = [
            DictValue::Word("uniform".into()),
            DictValue::Int(0),
        ];
        let v = FieldValue::decode_uniform("internalField", &tokens).unwrap();
        assert_eq!(v, FieldValue::Scalar(0.0));
        assert_eq!(v.rank(), ValueRank::Scalar);
    }

    #[test]
    fn test_decode_uniform_vector() {
        let tokens = [
            DictValue::Word("uniform".into()),
            DictValue::List(vec![
                DictValue::Number(1.5),
                DictValue::Int(0),
                DictValue::Int(0),
            ]),
        ];
        let v = FieldValue::decode_uniform("value", &tokens).unwrap();
        assert_eq!(v, FieldValue::Vector(DVec3::new(1.5, 0.0, 0.0)));
        assert_eq!(v.rank(), ValueRank::Vector);
    }

    #[test]
    fn test_decode_rejects_missing_uniform() {
        let tokens = [DictValue::Int(0)];
        assert!(FieldValue::decode_uniform("value", &tokens).is_err());
    }

    #[test]
    fn test_encode_roundtrip() {
        let v = FieldValue::Vector(DVec3::new(1.5, 0.0, 0.0));
        let encoded = v.encode_uniform();
        let decoded = FieldValue::decode_uniform("value", encoded.as_tokens()).unwrap();
        assert_eq!(v, decoded);
    }
}
