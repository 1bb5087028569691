// crates/fc_foundation/src/validation.rs

//! 运行时验证报告工具
//!
//! 提供验证报告和错误/警告类型，用于案例数据的非致命诊断。
//! 致命的模式校验错误使用各层的错误枚举（快速失败）；
//! 本模块的报告用于 CLI 收集多条诊断后统一呈现。
//!
//! # 示例
//!
//! ```
//! use fc_foundation::validation::{ValidationReport, ValidationError};
//!
//! let mut report = ValidationReport::new();
//! report.add_error(ValidationError::ConsistencyError {
//!     message: "patch 面数为 0".into(),
//! });
//! assert!(report.has_errors());
//! ```

use std::fmt;

/// 验证报告
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 合并另一个报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.error_count())?;
        writeln!(f, "  警告: {} 个", self.warning_count())?;

        if self.has_errors() {
            writeln!(f, "\n错误详情:")?;
            for (i, err) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, err)?;
            }
        }

        if self.has_warnings() {
            writeln!(f, "\n警告详情:")?;
            for (i, warn) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, warn)?;
            }
        }

        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// 非有限值
    NonFinite {
        /// 字段名称
        field: &'static str,
        /// 所在实体（顶点/块/patch）的索引
        entity_id: usize,
        /// 非有限的数值
        value: f64,
    },
    /// 引用错误
    ReferenceError {
        /// 错误描述
        message: String,
        /// 可选的实体索引
        entity_id: Option<usize>,
    },
    /// 一致性错误
    ConsistencyError {
        /// 错误描述
        message: String,
    },
    /// 自定义错误
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite {
                field,
                entity_id,
                value,
            } => {
                write!(f, "实体{}: 字段{}={} (非有限值)", entity_id, field, value)
            }
            Self::ReferenceError { message, entity_id } => {
                if let Some(id) = entity_id {
                    write!(f, "实体{}: 引用错误: {}", id, message)
                } else {
                    write!(f, "引用错误: {}", message)
                }
            }
            Self::ConsistencyError { message } => {
                write!(f, "一致性错误: {}", message)
            }
            Self::Custom { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone)]
pub enum ValidationWarning {
    /// 未被任何块引用的顶点
    UnusedVertex {
        /// 顶点索引
        index: usize,
    },
    /// 空 patch（面数为 0）
    EmptyPatch {
        /// patch 名称
        name: String,
    },
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusedVertex { index } => {
                write!(f, "顶点{} 未被任何块引用", index)
            }
            Self::EmptyPatch { name } => {
                write!(f, "patch '{}' 不包含任何面", name)
            }
            Self::Custom { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
