// crates/fc_mesh/src/validator.rs

//! 网格模式校验
//!
//! 对编写期与生成后的两种 patch 表示做一致性校验，输出不可变的
//! [`MeshDescriptor`] 或首个错误（快速失败，不返回部分描述符）。
//!
//! # 校验规则
//!
//! 编写期形式（[`BlockMeshDict`]）：
//! 1. patch 名称查重（先于任何面范围检查）
//! 2. 块顶点索引、patch 面顶点索引、棱端点索引均须在顶点表范围内
//! 3. 各轴向细分数必须为正
//! 4. 膨胀比必须为正的有限数
//! 5. 同一个面（按顶点集合判定）不得被两个 patch 声明
//!
//! 扁平化形式（[`BoundaryFile`]）：
//! 1. patch 名称查重（先于任何面范围检查）
//! 2. 偏移按声明顺序连续且不减
//! 3. 末 patch 的 `startFace + nFaces` 必须等于全局面数组长度
//!
//! 校验是纯函数：无副作用、可重入，可在任意多线程中并发调用。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use fc_foundation::{ValidationReport, ValidationWarning};

use crate::boundary::BoundaryFile;
use crate::error::{MeshSchemaError, MeshSchemaResult};
use crate::schema::{BlockMeshDict, PatchKind};

// ============================================================
// 校验结果：不可变网格描述符
// ============================================================

/// 校验通过的 patch 信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchInfo {
    /// patch 名称
    pub name: String,
    /// patch 类型
    pub kind: PatchKind,
    /// 面数量
    pub n_faces: usize,
    /// 在全局面数组中的起始偏移（仅扁平化形式有值）
    pub start_face: Option<usize>,
}

/// 校验通过的不可变网格描述符
///
/// 字段私有，构造后不再变化；仅由 [`MeshValidator`] 产生。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    patches: Vec<PatchInfo>,
    n_vertices: Option<usize>,
    n_cells: Option<usize>,
    n_faces_total: Option<usize>,
}

impl MeshDescriptor {
    /// patch 信息表（声明顺序）
    pub fn patches(&self) -> &[PatchInfo] {
        &self.patches
    }

    /// patch 数量
    pub fn n_patches(&self) -> usize {
        self.patches.len()
    }

    /// 按名称查找 patch
    pub fn patch(&self, name: &str) -> Option<&PatchInfo> {
        self.patches.iter().find(|p| p.name == name)
    }

    /// 是否包含指定名称的 patch
    pub fn contains_patch(&self, name: &str) -> bool {
        self.patch(name).is_some()
    }

    /// 顶点数量（仅编写期形式有值）
    pub fn n_vertices(&self) -> Option<usize> {
        self.n_vertices
    }

    /// 单元总数（仅编写期形式有值）
    pub fn n_cells(&self) -> Option<usize> {
        self.n_cells
    }

    /// 全局面数组长度（仅扁平化形式有值）
    pub fn n_faces_total(&self) -> Option<usize> {
        self.n_faces_total
    }

    /// 边界面总数
    pub fn total_boundary_faces(&self) -> usize {
        self.patches.iter().map(|p| p.n_faces).sum()
    }
}

// ============================================================
// 校验器
// ============================================================

/// 网格模式校验器
///
/// 两个入口均为无状态纯函数。
pub struct MeshValidator;

impl MeshValidator {
    /// 校验编写期网格描述
    pub fn validate_block_mesh(dict: &BlockMeshDict) -> MeshSchemaResult<MeshDescriptor> {
        // patch 名称查重先行
        check_unique_names(dict.boundary.iter().map(|p| p.name.as_str()))?;

        let n_vertices = dict.n_vertices();

        // 块：顶点引用与细分/梯度参数
        for (i, block) in dict.blocks.iter().enumerate() {
            for &v in &block.vertices {
                if v >= n_vertices {
                    return Err(MeshSchemaError::out_of_range(
                        "block",
                        i.to_string(),
                        v,
                        n_vertices,
                    ));
                }
            }
            for (axis, &n) in block.cells.iter().enumerate() {
                if n == 0 {
                    return Err(MeshSchemaError::invalid_subdivision(i, axis, 0));
                }
            }
            for (axis, &ratio) in block.grading.ratios().iter().enumerate() {
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(MeshSchemaError::invalid_grading(i, axis, ratio));
                }
            }
        }

        // 棱端点引用
        for edge in &dict.edges {
            let (start, end) = edge.endpoints();
            for v in [start, end] {
                if v >= n_vertices {
                    return Err(MeshSchemaError::out_of_range(
                        "edge",
                        format!("{}-{}", start, end),
                        v,
                        n_vertices,
                    ));
                }
            }
        }

        // patch 面：顶点引用与跨 patch 重复声明
        let mut claimed: HashSet<[usize; 4]> = HashSet::new();
        for patch in &dict.boundary {
            for face in &patch.faces {
                for &v in face {
                    if v >= n_vertices {
                        return Err(MeshSchemaError::out_of_range(
                            "patch",
                            patch.name.clone(),
                            v,
                            n_vertices,
                        ));
                    }
                }
                let key = canonical_face(*face);
                if !claimed.insert(key) {
                    return Err(MeshSchemaError::range_mismatch(
                        patch.name.clone(),
                        format!("面 ({} {} {} {}) 已被其他 patch 声明", face[0], face[1], face[2], face[3]),
                    ));
                }
            }
        }

        // 合并对引用的 patch 必须已声明
        for (a, b) in &dict.merge_patch_pairs {
            for name in [a, b] {
                if dict.find_patch(name).is_none() {
                    return Err(MeshSchemaError::range_mismatch(
                        name.clone(),
                        "合并对引用了未声明的 patch".to_string(),
                    ));
                }
            }
        }

        Ok(MeshDescriptor {
            patches: dict
                .boundary
                .iter()
                .map(|p| PatchInfo {
                    name: p.name.clone(),
                    kind: p.kind,
                    n_faces: p.n_faces(),
                    start_face: None,
                })
                .collect(),
            n_vertices: Some(n_vertices),
            n_cells: Some(dict.total_cells()),
            n_faces_total: None,
        })
    }

    /// 非致命诊断扫描
    ///
    /// 收集不影响有效性的可疑之处：未被引用的顶点、空 patch。
    /// 与 [`validate_block_mesh`](Self::validate_block_mesh) 不同，
    /// 本扫描不会提前返回，报告中可包含多条记录。
    pub fn scan_warnings(dict: &BlockMeshDict) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut referenced = vec![false; dict.n_vertices()];
        let mut mark = |v: usize| {
            if let Some(slot) = referenced.get_mut(v) {
                *slot = true;
            }
        };
        for block in &dict.blocks {
            for &v in &block.vertices {
                mark(v);
            }
        }
        for patch in &dict.boundary {
            for face in &patch.faces {
                for &v in face {
                    mark(v);
                }
            }
        }
        for (index, used) in referenced.iter().enumerate() {
            if !used {
                report.add_warning(ValidationWarning::UnusedVertex { index });
            }
        }

        for patch in &dict.boundary {
            if patch.faces.is_empty() {
                report.add_warning(ValidationWarning::EmptyPatch {
                    name: patch.name.clone(),
                });
            }
        }

        report
    }

    /// 校验扁平化边界表示
    ///
    /// `n_faces_total` 为生成网格的全局面数组长度；
    /// 末 patch 的 `startFace + nFaces` 必须与其相等。
    pub fn validate_boundary(
        file: &BoundaryFile,
        n_faces_total: usize,
    ) -> MeshSchemaResult<MeshDescriptor> {
        // patch 名称查重先行
        check_unique_names(file.patches.iter().map(|p| p.name.as_str()))?;

        // 偏移连续性
        for window in file.patches.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if next.start_face != prev.end_face() {
                return Err(MeshSchemaError::range_mismatch(
                    next.name.clone(),
                    format!(
                        "startFace {} 与前一 patch 结束位置 {} 不连续",
                        next.start_face,
                        prev.end_face()
                    ),
                ));
            }
        }

        // 末尾必须与全局面数组长度吻合
        match file.end_face() {
            Some(end) if end != n_faces_total => {
                let last = file.patches.last().expect("end_face 为 Some 时必有 patch");
                return Err(MeshSchemaError::range_mismatch(
                    last.name.clone(),
                    format!("末尾 {} 与全局面数 {} 不符", end, n_faces_total),
                ));
            }
            None if n_faces_total != 0 => {
                return Err(MeshSchemaError::range_mismatch(
                    "<boundary>",
                    format!("边界为空但全局面数为 {}", n_faces_total),
                ));
            }
            _ => {}
        }

        Ok(MeshDescriptor {
            patches: file
                .patches
                .iter()
                .map(|p| PatchInfo {
                    name: p.name.clone(),
                    kind: p.kind,
                    n_faces: p.n_faces,
                    start_face: Some(p.start_face),
                })
                .collect(),
            n_vertices: None,
            n_cells: None,
            n_faces_total: Some(n_faces_total),
        })
    }
}

/// patch 名称查重；返回首个重复名称的错误
fn check_unique_names<'a>(names: impl Iterator<Item = &'a str>) -> MeshSchemaResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(MeshSchemaError::duplicate_patch(name));
        }
    }
    Ok(())
}

/// 面的规范键：顶点索引排序后比较，与环绕方向无关
fn canonical_face(mut face: [usize; 4]) -> [usize; 4] {
    face.sort_unstable();
    face
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryPatch;
    use crate::schema::{Block, Grading, PatchDecl};
    use glam::DVec3;

    fn channel_dict() -> BlockMeshDict {
        BlockMeshDict {
            vertices: vec![DVec3::ZERO; 8],
            blocks: vec![Block::new([0, 1, 2, 3, 4, 5, 6, 7], [100, 20, 1])],
            boundary: vec![
                PatchDecl::new("inlet", PatchKind::Patch, vec![[0, 3, 7, 4]]),
                PatchDecl::new("outlet", PatchKind::Patch, vec![[1, 2, 6, 5]]),
                PatchDecl::new("walls", PatchKind::Wall, vec![[0, 1, 5, 4], [3, 2, 6, 7]]),
            ],
            ..Default::default()
        }
    }

    fn heat_sink_boundary() -> BoundaryFile {
        BoundaryFile::new(vec![
            BoundaryPatch::new("inlet", PatchKind::Patch, 1156, 541938),
            BoundaryPatch::new("outlet", PatchKind::Patch, 1156, 543094),
            BoundaryPatch::new("heat_sink", PatchKind::Wall, 8092, 544250),
            BoundaryPatch::new("walls", PatchKind::Wall, 22344, 552342),
        ])
    }

    #[test]
    fn test_valid_block_mesh() {
        let desc = MeshValidator::validate_block_mesh(&channel_dict()).unwrap();
        assert_eq!(desc.n_patches(), 3);
        assert_eq!(desc.n_vertices(), Some(8));
        assert_eq!(desc.n_cells(), Some(2000));
        assert_eq!(desc.patch("walls").unwrap().n_faces, 2);
    }

    #[test]
    fn test_out_of_range_block_vertex() {
        let mut dict = channel_dict();
        dict.blocks[0].vertices[7] = 12;
        let err = MeshValidator::validate_block_mesh(&dict).unwrap_err();
        // 越界必须拒绝，不得静默截断
        match err {
            MeshSchemaError::OutOfRangeReference { index, len, .. } => {
                assert_eq!(index, 12);
                assert_eq!(len, 8);
            }
            other => panic!("期望 OutOfRangeReference, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_patch_face_vertex() {
        let mut dict = channel_dict();
        dict.boundary[0].faces[0][2] = 99;
        let err = MeshValidator::validate_block_mesh(&dict).unwrap_err();
        assert!(matches!(
            err,
            MeshSchemaError::OutOfRangeReference { context: "patch", .. }
        ));
    }

    #[test]
    fn test_invalid_subdivision() {
        let mut dict = channel_dict();
        dict.blocks[0].cells[1] = 0;
        let err = MeshValidator::validate_block_mesh(&dict).unwrap_err();
        assert!(matches!(
            err,
            MeshSchemaError::InvalidSubdivision { block: 0, axis: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_grading() {
        let mut dict = channel_dict();
        dict.blocks[0].grading = Grading::Simple([1.0, -2.0, 1.0]);
        let err = MeshValidator::validate_block_mesh(&dict).unwrap_err();
        assert!(matches!(err, MeshSchemaError::InvalidGrading { axis: 1, .. }));
    }

    #[test]
    fn test_duplicate_patch_name_authoring() {
        let mut dict = channel_dict();
        dict.boundary[1].name = "walls".into();
        let err = MeshValidator::validate_block_mesh(&dict).unwrap_err();
        assert!(matches!(err, MeshSchemaError::DuplicatePatchName { .. }));
    }

    #[test]
    fn test_face_claimed_twice() {
        let mut dict = channel_dict();
        // outlet 重复声明 inlet 的面（顶点顺序不同也应判定为同一面）
        dict.boundary[1].faces.push([4, 7, 3, 0]);
        let err = MeshValidator::validate_block_mesh(&dict).unwrap_err();
        assert!(matches!(err, MeshSchemaError::PatchRangeMismatch { .. }));
    }

    #[test]
    fn test_heat_sink_boundary_valid() {
        let desc = MeshValidator::validate_boundary(&heat_sink_boundary(), 574686).unwrap();
        assert_eq!(desc.n_patches(), 4);
        assert_eq!(desc.total_boundary_faces(), 32748);
        assert_eq!(desc.patch("heat_sink").unwrap().start_face, Some(544250));
    }

    #[test]
    fn test_heat_sink_boundary_shifted_counts_fail() {
        // 任何一个 nFaces 偏移 1 都必须导致校验失败
        for i in 0..4 {
            for delta in [-1i64, 1] {
                let mut file = heat_sink_boundary();
                let n = file.patches[i].n_faces as i64 + delta;
                file.patches[i].n_faces = n as usize;
                let err = MeshValidator::validate_boundary(&file, 574686).unwrap_err();
                assert!(
                    matches!(err, MeshSchemaError::PatchRangeMismatch { .. }),
                    "patch {} 偏移 {} 未被拒绝",
                    i,
                    delta
                );
            }
        }
    }

    #[test]
    fn test_boundary_total_mismatch() {
        let err = MeshValidator::validate_boundary(&heat_sink_boundary(), 574687).unwrap_err();
        assert!(matches!(err, MeshSchemaError::PatchRangeMismatch { .. }));
    }

    #[test]
    fn test_boundary_gap() {
        let mut file = heat_sink_boundary();
        file.patches[2].start_face += 10;
        let err = MeshValidator::validate_boundary(&file, 574686).unwrap_err();
        match err {
            MeshSchemaError::PatchRangeMismatch { patch, .. } => {
                assert_eq!(patch, "heat_sink");
            }
            other => panic!("期望 PatchRangeMismatch, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_name_before_range_checks() {
        // 偏移也是错的，但名称查重必须先报
        let mut file = heat_sink_boundary();
        file.patches[3].name = "heat_sink".into();
        file.patches[3].start_face = 0;
        let err = MeshValidator::validate_boundary(&file, 574686).unwrap_err();
        assert!(matches!(err, MeshSchemaError::DuplicatePatchName { .. }));
    }

    #[test]
    fn test_validation_is_pure() {
        // 相同输入重复校验得到相同描述符
        let file = heat_sink_boundary();
        let a = MeshValidator::validate_boundary(&file, 574686).unwrap();
        let b = MeshValidator::validate_boundary(&file, 574686).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scan_warnings() {
        let mut dict = channel_dict();
        dict.vertices.push(DVec3::new(9.0, 9.0, 9.0));
        dict.boundary.push(PatchDecl::new("ghost", PatchKind::Patch, vec![]));

        let report = MeshValidator::scan_warnings(&dict);
        assert_eq!(report.warning_count(), 2);
        assert!(!report.has_errors());
        assert!(report.is_valid());
    }

    #[test]
    fn test_empty_boundary() {
        let empty = BoundaryFile::default();
        assert!(MeshValidator::validate_boundary(&empty, 0).is_ok());
        assert!(MeshValidator::validate_boundary(&empty, 10).is_err());
    }
}
