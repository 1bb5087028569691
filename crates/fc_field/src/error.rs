// crates/fc_field/src/error.rs

//! 场文件与绑定错误类型
//!
//! 绑定错误一律终止（快速失败），不产生部分绑定表。
//! 所有错误可转换为 `fc_foundation::FcError` 向上传播。

use fc_dict::DictError;
use fc_foundation::FcError;
use thiserror::Error;

/// 场模块结果类型
pub type FieldResult<T> = Result<T, FieldError>;

/// 场文件与绑定错误枚举
#[derive(Error, Debug)]
pub enum FieldError {
    /// 条件引用了网格描述符中不存在的 patch
    #[error("未知的 patch 引用: '{patch}'")]
    UnknownPatchReference {
        /// 被引用的名称
        patch: String,
    },

    /// 网格描述符中的 patch 没有绑定条件
    #[error("patch 未绑定条件: '{patch}'")]
    UnboundPatch {
        /// 未被覆盖的 patch 名称
        patch: String,
    },

    /// 同一场文件中对同一 patch 声明了多个条件
    #[error("重复的条件声明: patch '{patch}'")]
    DuplicateCondition {
        /// 重复声明的 patch 名称
        patch: String,
    },

    /// 条件类型与 patch 类型不兼容
    #[error("条件与 patch 类型不兼容: patch '{patch}' ({kind}) 不能承载 {condition}")]
    IncompatibleCondition {
        /// patch 名称
        patch: String,
        /// 条件类型关键字
        condition: &'static str,
        /// patch 类型关键字
        kind: &'static str,
    },

    /// 未知的条件类型关键字
    #[error("未知的条件类型: patch '{patch}' 声明类型 '{keyword}'")]
    UnknownConditionType {
        /// patch 名称
        patch: String,
        /// 未识别的关键字
        keyword: String,
    },

    /// 计算剖面的参数不完备或取值非法
    #[error("计算剖面参数错误: {message}")]
    MalformedExpression {
        /// 具体原因
        message: String,
    },

    /// 条件值与场的秩不符（标量场配了向量值等）
    #[error("场值秩不匹配: patch '{patch}' 期望 {expected}, 实际 {found}")]
    ValueRankMismatch {
        /// patch 名称
        patch: String,
        /// 场的秩
        expected: &'static str,
        /// 条件值的秩
        found: &'static str,
    },

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 字典层错误
    #[error("字典错误: {0}")]
    Dict(#[from] DictError),
}

/// 便捷构造函数
impl FieldError {
    /// 未知 patch 引用
    pub fn unknown_patch(patch: impl Into<String>) -> Self {
        Self::UnknownPatchReference {
            patch: patch.into(),
        }
    }

    /// 未绑定的 patch
    pub fn unbound_patch(patch: impl Into<String>) -> Self {
        Self::UnboundPatch {
            patch: patch.into(),
        }
    }

    /// 重复条件
    pub fn duplicate_condition(patch: impl Into<String>) -> Self {
        Self::DuplicateCondition {
            patch: patch.into(),
        }
    }

    /// 不兼容条件
    pub fn incompatible(
        patch: impl Into<String>,
        condition: &'static str,
        kind: &'static str,
    ) -> Self {
        Self::IncompatibleCondition {
            patch: patch.into(),
            condition,
            kind,
        }
    }

    /// 未知条件类型
    pub fn unknown_condition(patch: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self::UnknownConditionType {
            patch: patch.into(),
            keyword: keyword.into(),
        }
    }

    /// 剖面参数错误
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedExpression {
            message: message.into(),
        }
    }

    /// 秩不匹配
    pub fn rank_mismatch(
        patch: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::ValueRankMismatch {
            patch: patch.into(),
            expected,
            found,
        }
    }
}

/// 转换到基础层错误
impl From<FieldError> for FcError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Io(io_err) => io_err.into(),
            FieldError::Dict(dict_err) => dict_err.into(),
            other => FcError::validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_patch_display() {
        let err = FieldError::unknown_patch("inletX");
        assert!(err.to_string().contains("inletX"));
    }

    #[test]
    fn test_incompatible_display() {
        let err = FieldError::incompatible("walls", "parabolicProfile", "wall");
        let s = err.to_string();
        assert!(s.contains("walls"));
        assert!(s.contains("parabolicProfile"));
    }

    #[test]
    fn test_conversion_to_foundation() {
        let err = FieldError::unbound_patch("outlet");
        let fc: FcError = err.into();
        assert!(matches!(fc, FcError::Validation(_)));
    }
}
