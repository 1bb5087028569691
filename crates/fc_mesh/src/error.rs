// crates/fc_mesh/src/error.rs

//! 网格模式错误类型
//!
//! 校验错误一律终止加载（快速失败），不返回部分描述符。
//! 所有错误可转换为 `fc_foundation::FcError` 向上传播。

use fc_dict::DictError;
use fc_foundation::FcError;
use thiserror::Error;

/// 网格模式结果类型
pub type MeshSchemaResult<T> = Result<T, MeshSchemaError>;

/// 网格模式错误枚举
#[derive(Error, Debug)]
pub enum MeshSchemaError {
    /// 越界引用：块或 patch 引用了未声明的顶点
    #[error("越界引用: {context} '{entity}' 引用顶点 {index}, 超出范围 0..{len}")]
    OutOfRangeReference {
        /// 引用所在位置（block/patch/edge）
        context: &'static str,
        /// 引用方的名称或序号
        entity: String,
        /// 被引用的顶点索引
        index: usize,
        /// 顶点表长度
        len: usize,
    },

    /// 无效细分数：某轴向的单元数不为正
    #[error("无效细分数: 块 {block} 轴 {axis} 的单元数为 {value}, 必须为正")]
    InvalidSubdivision {
        /// 块序号
        block: usize,
        /// 轴向 (0=x, 1=y, 2=z)
        axis: usize,
        /// 声明的单元数
        value: i64,
    },

    /// 无效梯度比：膨胀比必须为正的有限数
    #[error("无效梯度比: 块 {block} 第 {axis} 项的膨胀比为 {ratio}")]
    InvalidGrading {
        /// 块序号
        block: usize,
        /// 比率序号
        axis: usize,
        /// 声明的膨胀比
        ratio: f64,
    },

    /// 重复的 patch 名称
    #[error("重复的 patch 名称: '{name}'")]
    DuplicatePatchName {
        /// 重复的名称
        name: String,
    },

    /// patch 面范围不一致：重叠、间隙或总面数不符
    #[error("patch 面范围不一致: '{patch}': {message}")]
    PatchRangeMismatch {
        /// 相关 patch 名称
        patch: String,
        /// 具体原因
        message: String,
    },

    /// 未知的 patch 类型标签
    #[error("未知的 patch 类型: patch '{patch}' 声明类型 '{keyword}'")]
    UnknownPatchType {
        /// patch 名称
        patch: String,
        /// 未识别的类型关键字
        keyword: String,
    },

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 字典层错误
    #[error("字典错误: {0}")]
    Dict(#[from] DictError),
}

/// 便捷构造函数
impl MeshSchemaError {
    /// 越界引用
    pub fn out_of_range(
        context: &'static str,
        entity: impl Into<String>,
        index: usize,
        len: usize,
    ) -> Self {
        Self::OutOfRangeReference {
            context,
            entity: entity.into(),
            index,
            len,
        }
    }

    /// 无效细分数
    pub fn invalid_subdivision(block: usize, axis: usize, value: i64) -> Self {
        Self::InvalidSubdivision { block, axis, value }
    }

    /// 无效梯度比
    pub fn invalid_grading(block: usize, axis: usize, ratio: f64) -> Self {
        Self::InvalidGrading { block, axis, ratio }
    }

    /// 重复的 patch 名称
    pub fn duplicate_patch(name: impl Into<String>) -> Self {
        Self::DuplicatePatchName { name: name.into() }
    }

    /// 面范围不一致
    pub fn range_mismatch(patch: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PatchRangeMismatch {
            patch: patch.into(),
            message: message.into(),
        }
    }

    /// 未知 patch 类型
    pub fn unknown_patch_type(patch: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self::UnknownPatchType {
            patch: patch.into(),
            keyword: keyword.into(),
        }
    }
}

/// 转换到基础层错误
impl From<MeshSchemaError> for FcError {
    fn from(err: MeshSchemaError) -> Self {
        match err {
            MeshSchemaError::Io(io_err) => io_err.into(),
            MeshSchemaError::Dict(dict_err) => dict_err.into(),
            other => FcError::validation(other.to_string()),
        }
    }
}
