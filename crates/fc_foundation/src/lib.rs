// crates/fc_foundation/src/lib.rs

//! FoamCase Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`validation`]: 运行时验证报告工具
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 thiserror
//! 2. **类型安全**: 错误变体携带定位信息（实体名或索引）
//! 3. **快速失败**: 校验错误一律终止加载，不产生部分结果
//!
//! # 示例
//!
//! ```
//! use fc_foundation::error::{FcError, FcResult};
//!
//! fn read_case() -> FcResult<()> {
//!     Err(FcError::invalid_input("空的案例目录"))
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod validation;

// 重导出常用类型
pub use error::{FcError, FcResult};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

/// 条件不满足时返回错误
///
/// # 示例
///
/// ```
/// use fc_foundation::{ensure, FcError, FcResult};
///
/// fn check(n: usize) -> FcResult<()> {
///     ensure!(n > 0, FcError::invalid_input("n 必须为正"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// 从 Option 中取值，为 None 时返回错误
///
/// # 示例
///
/// ```
/// use fc_foundation::{require, FcError, FcResult};
///
/// fn get(opt: Option<u32>) -> FcResult<u32> {
///     let v = require!(opt, FcError::not_found("value"));
///     Ok(v)
/// }
/// ```
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{FcError, FcResult};
    pub use crate::validation::{ValidationError, ValidationReport, ValidationWarning};
    pub use crate::{ensure, require};
}
