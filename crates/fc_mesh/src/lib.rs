// crates/fc_mesh/src/lib.rs

//! FoamCase 网格模式层
//!
//! 六面体块网格描述的数据模型与模式校验。
//!
//! # 核心类型
//!
//! - [`BlockMeshDict`]: 编写期网格描述（顶点表、块表、patch 声明）
//! - [`BoundaryFile`]: 生成后的扁平化边界表示（面数/起始偏移）
//! - [`MeshDescriptor`]: 校验通过后的不可变网格描述符
//!
//! # 模块结构
//!
//! - [`schema`]: 编写期数据模型
//! - [`boundary`]: 生成后的边界数据模型
//! - [`validator`]: 模式校验（快速失败，纯函数）
//! - [`io`]: 与字典格式之间的编解码
//!
//! # 两种 patch 表示
//!
//! 同一 Patch 实体在生命周期的两个阶段有两种表示：编写期的
//! 面索引列表形式（[`schema::PatchDecl`]）与网格生成之后的
//! 面数/偏移形式（[`boundary::BoundaryPatch`]）。校验器对两种
//! 形式分别给出 [`MeshDescriptor`]。

pub mod boundary;
pub mod error;
pub mod io;
pub mod schema;
pub mod validator;

// 重导出核心类型
pub use boundary::{BoundaryFile, BoundaryPatch};
pub use error::{MeshSchemaError, MeshSchemaResult};
pub use io::{BlockMeshLoader, BlockMeshWriter, BoundaryLoader, BoundaryWriter};
pub use schema::{Block, BlockMeshDict, EdgeSpec, Grading, PatchDecl, PatchKind};
pub use validator::{MeshDescriptor, MeshValidator, PatchInfo};
