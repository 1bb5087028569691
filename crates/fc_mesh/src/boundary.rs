// crates/fc_mesh/src/boundary.rs

//! 生成后的边界数据模型
//!
//! 外部网格生成步骤将编写期的面索引列表展开为全局面数组，
//! 每个 patch 退化为 (面数, 起始偏移) 对。本模块承载该扁平化
//! 表示；偏移连续性等校验见 [`validator`](crate::validator)。

use serde::{Deserialize, Serialize};

use crate::schema::PatchKind;

/// 生成后的单个边界 patch 记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPatch {
    /// patch 名称
    pub name: String,
    /// patch 类型
    pub kind: PatchKind,
    /// 所属分组（可为空）
    pub in_groups: Vec<String>,
    /// 面数量
    pub n_faces: usize,
    /// 在全局面数组中的起始偏移
    pub start_face: usize,
}

impl BoundaryPatch {
    /// 创建边界 patch 记录
    pub fn new(
        name: impl Into<String>,
        kind: PatchKind,
        n_faces: usize,
        start_face: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            in_groups: Vec::new(),
            n_faces,
            start_face,
        }
    }

    /// 指定分组
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.in_groups = groups;
        self
    }

    /// 该 patch 之后的第一个面索引
    #[inline]
    pub fn end_face(&self) -> usize {
        self.start_face + self.n_faces
    }
}

/// 生成后的边界文件：按声明顺序排列的 patch 记录表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFile {
    /// patch 记录（声明顺序与面数组布局一致）
    pub patches: Vec<BoundaryPatch>,
}

impl BoundaryFile {
    /// 创建边界文件
    pub fn new(patches: Vec<BoundaryPatch>) -> Self {
        Self { patches }
    }

    /// patch 数量
    #[inline]
    pub fn n_patches(&self) -> usize {
        self.patches.len()
    }

    /// 边界面总数（各 patch 面数之和）
    pub fn total_boundary_faces(&self) -> usize {
        self.patches.iter().map(|p| p.n_faces).sum()
    }

    /// 末 patch 之后的第一个面索引；空表时为 None
    pub fn end_face(&self) -> Option<usize> {
        self.patches.last().map(BoundaryPatch::end_face)
    }

    /// 按名称查找 patch
    pub fn find(&self, name: &str) -> Option<&BoundaryPatch> {
        self.patches.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heat_sink_boundary() -> BoundaryFile {
        BoundaryFile::new(vec![
            BoundaryPatch::new("inlet", PatchKind::Patch, 1156, 541938),
            BoundaryPatch::new("outlet", PatchKind::Patch, 1156, 543094),
            BoundaryPatch::new("heat_sink", PatchKind::Wall, 8092, 544250),
            BoundaryPatch::new("walls", PatchKind::Wall, 22344, 552342),
        ])
    }

    #[test]
    fn test_total_boundary_faces() {
        let file = heat_sink_boundary();
        assert_eq!(file.total_boundary_faces(), 1156 + 1156 + 8092 + 22344);
    }

    #[test]
    fn test_end_face() {
        let file = heat_sink_boundary();
        assert_eq!(file.end_face(), Some(574686));
        assert_eq!(BoundaryFile::default().end_face(), None);
    }

    #[test]
    fn test_find() {
        let file = heat_sink_boundary();
        assert_eq!(file.find("heat_sink").unwrap().n_faces, 8092);
        assert!(file.find("inletX").is_none());
    }

    #[test]
    fn test_patch_end_face() {
        let p = BoundaryPatch::new("inlet", PatchKind::Patch, 1156, 541938);
        assert_eq!(p.end_face(), 543094);
    }
}
