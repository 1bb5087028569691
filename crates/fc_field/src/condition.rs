// crates/fc_field/src/condition.rs

//! 边界条件记录
//!
//! 单个 patch 上的物理约束：常值、零梯度、无滑移、固定梯度、
//! 计算剖面或空条件。条件类型为封闭枚举，未知关键字在解码时
//! 即报 `UnknownConditionType`。

use serde::{Deserialize, Serialize};

use fc_dict::{DictValue, Dictionary};
use fc_mesh::PatchKind;

use crate::error::{FieldError, FieldResult};
use crate::expression::ParabolicProfile;
use crate::value::{FieldValue, ValueRank};

/// 每 patch 的边界条件记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionSpec {
    /// 常值条件
    FixedValue(FieldValue),
    /// 零法向梯度（自由外推）
    ZeroGradient,
    /// 无滑移固壁（速度恒为零）
    NoSlip,
    /// 固定法向梯度
    FixedGradient(FieldValue),
    /// 抛物线入口剖面（命名计算表达式，不在本层求值）
    ParabolicProfile(ParabolicProfile),
    /// 空条件（仅用于 2D 案例的空 patch）
    Empty,
}

impl ConditionSpec {
    /// 条件类型关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::FixedValue(_) => "fixedValue",
            Self::ZeroGradient => "zeroGradient",
            Self::NoSlip => "noSlip",
            Self::FixedGradient(_) => "fixedGradient",
            Self::ParabolicProfile(_) => ParabolicProfile::KEYWORD,
            Self::Empty => "empty",
        }
    }

    /// 条件携带值的秩；无值条件为 None
    pub fn value_rank(&self) -> Option<ValueRank> {
        match self {
            Self::FixedValue(v) | Self::FixedGradient(v) => Some(v.rank()),
            // 剖面沿流向给出标量分布，按向量场的流向分量使用
            Self::ParabolicProfile(_) => None,
            Self::ZeroGradient | Self::NoSlip | Self::Empty => None,
        }
    }

    /// 条件是否可施加在给定类型的 patch 上
    ///
    /// 入流剖面只能出现在通流 patch 上（固壁不能承载入流剖面）；
    /// 空条件与空 patch 一一对应；无滑移仅对固壁有意义。
    pub fn compatible_with(&self, kind: PatchKind) -> bool {
        match self {
            Self::ParabolicProfile(_) => kind.is_flow_through(),
            Self::Empty => kind == PatchKind::Empty,
            Self::NoSlip => kind == PatchKind::Wall,
            Self::FixedValue(_) | Self::ZeroGradient | Self::FixedGradient(_) => {
                kind != PatchKind::Empty
            }
        }
    }

    /// 声明参数的完备性校验（不求值）
    pub fn validate(&self) -> FieldResult<()> {
        match self {
            Self::ParabolicProfile(profile) => profile.validate(),
            _ => Ok(()),
        }
    }

    /// 从条件子字典解码
    pub fn decode(patch: &str, dict: &Dictionary) -> FieldResult<Self> {
        let keyword = dict.get_word("type")?;
        match keyword {
            "fixedValue" => {
                let tokens = dict.expect("value")?.as_tokens();
                Ok(Self::FixedValue(FieldValue::decode_uniform("value", tokens)?))
            }
            "zeroGradient" => Ok(Self::ZeroGradient),
            "noSlip" => Ok(Self::NoSlip),
            "fixedGradient" => {
                let tokens = dict.expect("gradient")?.as_tokens();
                Ok(Self::FixedGradient(FieldValue::decode_uniform(
                    "gradient", tokens,
                )?))
            }
            kw if kw == ParabolicProfile::KEYWORD => {
                let param = |name: &str| -> FieldResult<f64> {
                    dict.get(name)
                        .and_then(DictValue::as_number)
                        .ok_or_else(|| {
                            FieldError::malformed(format!(
                                "patch '{}' 的剖面缺少数值参数 {}",
                                patch, name
                            ))
                        })
                };
                let profile = ParabolicProfile {
                    center: param("center")?,
                    half_width: param("halfWidth")?,
                    peak: param("peak")?,
                };
                profile.validate()?;
                Ok(Self::ParabolicProfile(profile))
            }
            "empty" => Ok(Self::Empty),
            other => Err(FieldError::unknown_condition(patch, other)),
        }
    }

    /// 编码为条件子字典
    pub fn encode(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("type", DictValue::Word(self.keyword().into()));
        match self {
            Self::FixedValue(v) => dict.insert("value", v.encode_uniform()),
            Self::FixedGradient(v) => dict.insert("gradient", v.encode_uniform()),
            Self::ParabolicProfile(p) => {
                dict.insert("center", DictValue::Number(p.center));
                dict.insert("halfWidth", DictValue::Number(p.half_width));
                dict.insert("peak", DictValue::Number(p.peak));
            }
            Self::ZeroGradient | Self::NoSlip | Self::Empty => {}
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn decode_str(patch: &str, src: &str) -> FieldResult<ConditionSpec> {
        let file = fc_dict::DictParser::parse_str(src).unwrap();
        let dict = file.as_dict().unwrap();
        ConditionSpec::decode(patch, dict)
    }

    #[test]
    fn test_decode_fixed_value() {
        let spec = decode_str("inlet", "type fixedValue;\nvalue uniform (1.5 0 0);").unwrap();
        assert_eq!(
            spec,
            ConditionSpec::FixedValue(FieldValue::Vector(DVec3::new(1.5, 0.0, 0.0)))
        );
        assert_eq!(spec.value_rank(), Some(ValueRank::Vector));
    }

    #[test]
    fn test_decode_zero_gradient() {
        let spec = decode_str("walls", "type zeroGradient;").unwrap();
        assert_eq!(spec, ConditionSpec::ZeroGradient);
    }

    #[test]
    fn test_decode_profile() {
        let spec = decode_str(
            "inlet",
            "type parabolicProfile;\ncenter 0.0;\nhalfWidth 0.05;\npeak 1.5;",
        )
        .unwrap();
        match spec {
            ConditionSpec::ParabolicProfile(p) => {
                assert_eq!(p.half_width, 0.05);
                assert_eq!(p.peak, 1.5);
            }
            other => panic!("期望 ParabolicProfile, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_decode_profile_missing_param() {
        // 参数不完备必须报 MalformedExpression
        let err = decode_str("inlet", "type parabolicProfile;\ncenter 0.0;\npeak 1.5;")
            .unwrap_err();
        assert!(matches!(err, FieldError::MalformedExpression { .. }));
    }

    #[test]
    fn test_decode_unknown_condition() {
        let err = decode_str("inlet", "type totalPressure;").unwrap_err();
        match err {
            FieldError::UnknownConditionType { patch, keyword } => {
                assert_eq!(patch, "inlet");
                assert_eq!(keyword, "totalPressure");
            }
            other => panic!("期望 UnknownConditionType, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_compatibility() {
        let profile = ConditionSpec::ParabolicProfile(
            ParabolicProfile::new(0.0, 0.05, 1.5).unwrap(),
        );
        assert!(profile.compatible_with(PatchKind::Patch));
        // 固壁不能承载入流剖面
        assert!(!profile.compatible_with(PatchKind::Wall));

        assert!(ConditionSpec::NoSlip.compatible_with(PatchKind::Wall));
        assert!(!ConditionSpec::NoSlip.compatible_with(PatchKind::Patch));

        assert!(ConditionSpec::Empty.compatible_with(PatchKind::Empty));
        assert!(!ConditionSpec::Empty.compatible_with(PatchKind::Wall));
        assert!(!ConditionSpec::ZeroGradient.compatible_with(PatchKind::Empty));
    }

    #[test]
    fn test_encode_roundtrip() {
        let specs = [
            ConditionSpec::FixedValue(FieldValue::Scalar(0.0)),
            ConditionSpec::ZeroGradient,
            ConditionSpec::NoSlip,
            ConditionSpec::ParabolicProfile(ParabolicProfile::new(0.0, 0.05, 1.5).unwrap()),
            ConditionSpec::Empty,
        ];
        for spec in specs {
            let dict = spec.encode();
            let decoded = ConditionSpec::decode("p", &dict).unwrap();
            assert_eq!(spec, decoded);
        }
    }
}
