// crates/fc_field/src/binder.rs

//! 边界条件绑定
//!
//! 将场文件中的条件记录按名称关联到已校验的网格描述符。
//! 绑定是纯函数：不求值任何计算剖面，不修改输入；
//! 对相同输入重复绑定得到相同的绑定表（幂等）。
//!
//! # 绑定规则
//!
//! 1. 同一 patch 在一个场文件中只能声明一次 → `DuplicateCondition`
//! 2. 条件引用的 patch 必须存在于描述符 → `UnknownPatchReference`
//! 3. 计算剖面的声明参数必须完备 → `MalformedExpression`
//! 4. 条件类型必须与 patch 类型兼容 → `IncompatibleCondition`
//! 5. 携带值的条件其秩必须与场一致 → `ValueRankMismatch`
//! 6. 描述符中的每个 patch 必须恰好绑定一个条件 → `UnboundPatch`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fc_foundation::ensure;
use fc_mesh::MeshDescriptor;

use crate::condition::ConditionSpec;
use crate::error::{FieldError, FieldResult};
use crate::field::FieldFile;

/// 绑定表：patch 名 → 条件
///
/// 仅由 [`ConditionBinder`] 产生，构造后不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingTable {
    field: String,
    bindings: Vec<(String, ConditionSpec)>,
}

impl BindingTable {
    /// 所属场名
    pub fn field(&self) -> &str {
        &self.field
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 按 patch 名查找条件
    pub fn get(&self, patch: &str) -> Option<&ConditionSpec> {
        self.bindings
            .iter()
            .find(|(name, _)| name == patch)
            .map(|(_, spec)| spec)
    }

    /// 按描述符顺序迭代绑定
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionSpec)> {
        self.bindings.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

/// 边界条件绑定器
pub struct ConditionBinder;

impl ConditionBinder {
    /// 绑定一个场文件到网格描述符
    pub fn bind(descriptor: &MeshDescriptor, field: &FieldFile) -> FieldResult<BindingTable> {
        let mut seen: HashSet<&str> = HashSet::new();

        for (patch, spec) in &field.boundary {
            // 同一 patch 只允许一个条件
            ensure!(
                seen.insert(patch.as_str()),
                FieldError::duplicate_condition(patch)
            );

            // 引用的 patch 必须存在
            let info = descriptor
                .patch(patch)
                .ok_or_else(|| FieldError::unknown_patch(patch))?;

            // 声明参数完备性（不求值）
            spec.validate()?;

            // 类型兼容性
            ensure!(
                spec.compatible_with(info.kind),
                FieldError::incompatible(patch, spec.keyword(), info.kind.keyword())
            );

            // 值的秩
            if let Some(rank) = spec.value_rank() {
                ensure!(
                    rank == field.rank(),
                    FieldError::rank_mismatch(patch, field.rank().name(), rank.name())
                );
            }
        }

        // 覆盖性：描述符中的每个 patch 都必须绑定
        for info in descriptor.patches() {
            ensure!(
                seen.contains(info.name.as_str()),
                FieldError::unbound_patch(&info.name)
            );
        }

        // 绑定表按描述符的 patch 顺序排列
        let bindings = descriptor
            .patches()
            .iter()
            .map(|info| {
                let spec = field
                    .condition(&info.name)
                    .expect("覆盖性检查已通过")
                    .clone();
                (info.name.clone(), spec)
            })
            .collect();

        let table = BindingTable {
            field: field.name.clone(),
            bindings,
        };
        debug!(field = %table.field, patches = table.len(), "条件绑定完成");
        Ok(table)
    }
}
