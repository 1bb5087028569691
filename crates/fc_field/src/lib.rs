// crates/fc_field/src/lib.rs

//! FoamCase 场文件层
//!
//! 场文件的数据模型与边界条件绑定。
//! 本层完全不做数值求解：计算型边界条件（抛物线入口剖面）
//! 仅做参数完备性校验，其求值属于外部求解器。
//!
//! # 模块概览
//!
//! - [`dimensions`]: 7 指数 SI 量纲向量
//! - [`value`]: 均匀标量/向量场值
//! - [`expression`]: 命名计算剖面（抛物线入口）
//! - [`condition`]: 每 patch 的边界条件记录
//! - [`field`]: 场文件整体与读写
//! - [`binder`]: 条件与网格描述符的按名绑定
//! - [`case`]: 案例目录的装配与整体校验
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: fc_cli        ─> validate / info
//! Layer 4: fc_field      ─> FieldFile, ConditionBinder (本层)
//! Layer 3: fc_mesh       ─> BlockMeshDict, MeshDescriptor
//! Layer 2: fc_dict       ─> CaseFile, DictValue
//! Layer 1: fc_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binder;
pub mod case;
pub mod condition;
pub mod dimensions;
pub mod error;
pub mod expression;
pub mod field;
pub mod value;

// 重导出核心类型
pub use binder::{BindingTable, ConditionBinder};
pub use case::{Case, CaseLoader, CaseReport};
pub use condition::ConditionSpec;
pub use dimensions::DimensionSet;
pub use error::{FieldError, FieldResult};
pub use expression::ParabolicProfile;
pub use field::{FieldFile, FieldLoader, FieldWriter};
pub use value::{FieldValue, ValueRank};
