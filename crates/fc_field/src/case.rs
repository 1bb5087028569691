// crates/fc_field/src/case.rs

//! 案例目录装配
//!
//! 按惯例布局读取一个案例目录：
//!
//! ```text
//! <case>/system/blockMeshDict        编写期网格描述
//! <case>/constant/polyMesh/boundary  生成后的边界文件
//! <case>/0/<field>                   各场的初始/边界条件
//! ```
//!
//! 装配后 [`Case::validate`] 依次执行网格模式校验与逐场绑定，
//! 返回整体报告或首个错误。

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use fc_foundation::{FcError, FcResult};
use fc_mesh::{
    BlockMeshDict, BlockMeshLoader, BoundaryFile, BoundaryLoader, MeshDescriptor, MeshValidator,
};

use crate::binder::{BindingTable, ConditionBinder};
use crate::field::{FieldFile, FieldLoader};

/// 装配完成的案例
#[derive(Debug, Clone)]
pub struct Case {
    /// 案例根目录
    pub root: PathBuf,
    /// 编写期网格描述（若存在）
    pub block_mesh: Option<BlockMeshDict>,
    /// 生成后的边界文件（若存在）
    pub boundary: Option<BoundaryFile>,
    /// 场文件（按文件名排序）
    pub fields: Vec<FieldFile>,
}

/// 案例整体校验报告
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    /// 校验通过的网格描述符
    pub descriptor: MeshDescriptor,
    /// 各场的绑定表
    pub tables: Vec<BindingTable>,
}

/// 案例目录加载器
pub struct CaseLoader;

impl CaseLoader {
    /// 加载案例目录
    pub fn load_dir<P: AsRef<Path>>(root: P) -> FcResult<Case> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(FcError::file_not_found(root));
        }

        let block_mesh_path = root.join("system").join("blockMeshDict");
        let block_mesh = if block_mesh_path.is_file() {
            Some(BlockMeshLoader::load(&block_mesh_path)?)
        } else {
            None
        };

        let boundary_path = root.join("constant").join("polyMesh").join("boundary");
        let boundary = if boundary_path.is_file() {
            Some(BoundaryLoader::load(&boundary_path)?)
        } else {
            None
        };

        let mut fields = Vec::new();
        let zero_dir = root.join("0");
        if zero_dir.is_dir() {
            let mut paths: Vec<PathBuf> = std::fs::read_dir(&zero_dir)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file())
                .collect();
            paths.sort();
            for path in paths {
                fields.push(FieldLoader::load(&path)?);
            }
        }

        info!(
            case = %root.display(),
            block_mesh = block_mesh.is_some(),
            boundary = boundary.is_some(),
            fields = fields.len(),
            "案例目录装配完成"
        );

        Ok(Case {
            root: root.to_path_buf(),
            block_mesh,
            boundary,
            fields,
        })
    }
}

impl Case {
    /// 整体校验：网格模式校验 + 逐场绑定
    ///
    /// `n_faces_total` 为生成网格的全局面数组长度；未提供时
    /// 以边界文件自身的末尾偏移为准（此时只校验偏移连续性）。
    /// 两种网格表示都存在时优先使用生成后的边界文件，
    /// 其 patch 集合与场文件一致。
    pub fn validate(&self, n_faces_total: Option<usize>) -> FcResult<CaseReport> {
        let descriptor = if let Some(boundary) = &self.boundary {
            let total = n_faces_total
                .or_else(|| boundary.end_face())
                .unwrap_or(0);
            MeshValidator::validate_boundary(boundary, total)?
        } else if let Some(block_mesh) = &self.block_mesh {
            MeshValidator::validate_block_mesh(block_mesh)?
        } else {
            return Err(FcError::not_found(
                "网格描述 (system/blockMeshDict 或 constant/polyMesh/boundary)",
            ));
        };

        let mut tables = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let table = ConditionBinder::bind(&descriptor, field)
                .map_err(FcError::from)?;
            tables.push(table);
        }

        Ok(CaseReport { descriptor, tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BLOCK_MESH: &str = r#"
convertToMeters 1.0;
vertices
(
    (0 0 0) (1 0 0) (1 1 0) (0 1 0)
    (0 0 1) (1 0 1) (1 1 1) (0 1 1)
);
blocks ( hex (0 1 2 3 4 5 6 7) (10 10 1) simpleGrading (1 1 1) );
boundary
(
    inlet { type patch; faces ((0 4 7 3)); }
    outlet { type patch; faces ((1 2 6 5)); }
    walls { type wall; faces ((0 1 5 4) (3 7 6 2)); }
);
"#;

    const BOUNDARY: &str = r#"
3
(
    inlet { type patch; nFaces 10; startFace 170; }
    outlet { type patch; nFaces 10; startFace 180; }
    walls { type wall; nFaces 20; startFace 190; }
)
"#;

    const PRESSURE: &str = r#"
FoamFile { object p; }
dimensions [0 2 -2 0 0 0 0];
internalField uniform 0;
boundaryField
{
    inlet { type zeroGradient; }
    outlet { type fixedValue; value uniform 0; }
    walls { type zeroGradient; }
}
"#;

    fn setup_case(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("fc_case_{}_{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("system")).unwrap();
        fs::create_dir_all(root.join("constant").join("polyMesh")).unwrap();
        fs::create_dir_all(root.join("0")).unwrap();
        fs::write(root.join("system").join("blockMeshDict"), BLOCK_MESH).unwrap();
        fs::write(
            root.join("constant").join("polyMesh").join("boundary"),
            BOUNDARY,
        )
        .unwrap();
        fs::write(root.join("0").join("p"), PRESSURE).unwrap();
        root
    }

    #[test]
    fn test_load_and_validate_case_dir() {
        let root = setup_case("ok");

        let case = CaseLoader::load_dir(&root).unwrap();
        assert!(case.block_mesh.is_some());
        assert!(case.boundary.is_some());
        assert_eq!(case.fields.len(), 1);

        let report = case.validate(Some(210)).unwrap();
        assert_eq!(report.descriptor.n_patches(), 3);
        assert_eq!(report.tables.len(), 1);
        assert_eq!(report.tables[0].field(), "p");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_validate_without_total_uses_contiguity() {
        let root = setup_case("no_total");

        let case = CaseLoader::load_dir(&root).unwrap();
        // 未提供全局面数时仍校验偏移连续性
        assert!(case.validate(None).is_ok());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_validate_wrong_total_fails() {
        let root = setup_case("bad_total");

        let case = CaseLoader::load_dir(&root).unwrap();
        assert!(case.validate(Some(211)).is_err());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_dir() {
        let err = CaseLoader::load_dir("/nonexistent/fc_case").unwrap_err();
        assert!(matches!(err, FcError::FileNotFound { .. }));
    }
}
