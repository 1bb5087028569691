// crates/fc_dict/src/error.rs

//! 字典格式错误类型
//!
//! 所有错误可转换为 `fc_foundation::FcError` 向上传播。

use fc_foundation::FcError;
use thiserror::Error;

/// 字典模块结果类型
pub type DictResult<T> = Result<T, DictError>;

/// 字典格式错误枚举
#[derive(Error, Debug)]
pub enum DictError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 语法错误
    #[error("语法错误: 第{line}行: {message}")]
    Syntax {
        line: usize,
        message: String,
    },

    /// 输入提前结束
    #[error("输入提前结束: 期望 {expected}")]
    UnexpectedEof {
        expected: String,
    },

    /// 缺少必需的条目
    #[error("缺少必需的条目: {keyword}")]
    MissingEntry {
        keyword: String,
    },

    /// 条目类型不匹配
    #[error("条目类型不匹配: {keyword} 期望 {expected}, 实际 {found}")]
    TypeMismatch {
        keyword: String,
        expected: &'static str,
        found: String,
    },
}

impl DictError {
    /// 语法错误
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// 输入提前结束
    pub fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// 缺少条目
    pub fn missing(keyword: impl Into<String>) -> Self {
        Self::MissingEntry {
            keyword: keyword.into(),
        }
    }

    /// 类型不匹配
    pub fn type_mismatch(
        keyword: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            keyword: keyword.into(),
            expected,
            found: found.into(),
        }
    }
}

/// 转换到基础层错误
impl From<DictError> for FcError {
    fn from(err: DictError) -> Self {
        match err {
            DictError::Io(io_err) => io_err.into(),
            DictError::Syntax { line, message } => {
                FcError::validation(format!("字典语法错误 第{}行: {}", line, message))
            }
            DictError::UnexpectedEof { expected } => {
                FcError::validation(format!("字典输入提前结束, 期望 {}", expected))
            }
            DictError::MissingEntry { keyword } => FcError::not_found(keyword),
            DictError::TypeMismatch {
                keyword,
                expected,
                found,
            } => FcError::invalid_input(format!(
                "条目 {} 类型不匹配: 期望 {}, 实际 {}",
                keyword, expected, found
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = DictError::syntax(12, "缺少分号");
        let s = err.to_string();
        assert!(s.contains("12"));
        assert!(s.contains("缺少分号"));
    }

    #[test]
    fn test_conversion_to_foundation() {
        let err = DictError::missing("vertices");
        let fc: FcError = err.into();
        assert!(matches!(fc, FcError::NotFound { .. }));
    }
}
