// crates/fc_mesh/src/schema.rs

//! 编写期网格描述数据模型
//!
//! 对应案例的网格描述文件：顶点表、六面体块表、可选的曲边覆盖、
//! patch 声明与合并对。本模块只承载数据，
//! 一致性校验见 [`validator`](crate::validator)。

use glam::DVec3;
use serde::{Deserialize, Serialize};

// ============================================================
// patch 类型
// ============================================================

/// patch 类型枚举
///
/// 封闭枚举：解码时遇到不在此列的类型关键字即报
/// `UnknownPatchType`，不做静默兜底。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PatchKind {
    /// 通流边界（入口/出口等通用 patch）
    #[default]
    Patch,
    /// 固壁边界
    Wall,
    /// 对称边界
    Symmetry,
    /// 空边界（2D 案例的前后面，不参与求解）
    Empty,
    /// 周期边界，需成对出现
    Cyclic,
}

impl PatchKind {
    /// 从类型关键字解析
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "patch" => Some(Self::Patch),
            "wall" => Some(Self::Wall),
            "symmetry" | "symmetryPlane" => Some(Self::Symmetry),
            "empty" => Some(Self::Empty),
            "cyclic" => Some(Self::Cyclic),
            _ => None,
        }
    }

    /// 规范类型关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Wall => "wall",
            Self::Symmetry => "symmetry",
            Self::Empty => "empty",
            Self::Cyclic => "cyclic",
        }
    }

    /// 是否为固壁类型
    #[inline]
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Wall | Self::Symmetry)
    }

    /// 是否为通流类型（允许物质通过）
    #[inline]
    pub fn is_flow_through(&self) -> bool {
        matches!(self, Self::Patch | Self::Cyclic)
    }
}

impl std::fmt::Display for PatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

// ============================================================
// 块与梯度
// ============================================================

/// 单元尺寸分布规则
///
/// 控制块内各轴向的非均匀单元尺寸分布。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Grading {
    /// 每轴一个膨胀比（末单元与首单元的尺寸比）
    Simple([f64; 3]),
    /// 每条棱一个膨胀比，共 12 条
    Edge(Vec<f64>),
}

impl Grading {
    /// 均匀分布（膨胀比全为 1）
    pub fn uniform() -> Self {
        Self::Simple([1.0, 1.0, 1.0])
    }

    /// 所有膨胀比的切片
    pub fn ratios(&self) -> &[f64] {
        match self {
            Self::Simple(r) => r,
            Self::Edge(r) => r,
        }
    }

    /// 对应的声明关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simpleGrading",
            Self::Edge(_) => "edgeGrading",
        }
    }
}

impl Default for Grading {
    fn default() -> Self {
        Self::uniform()
    }
}

/// 六面体块定义
///
/// 8 个顶点索引按六面体角点约定排序：先底面逆时针 4 点，
/// 再顶面对应 4 点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 8 个角点的顶点索引
    pub vertices: [usize; 8],
    /// 各轴向细分单元数 (x, y, z)
    pub cells: [usize; 3],
    /// 单元尺寸分布
    pub grading: Grading,
}

impl Block {
    /// 创建均匀分布的块
    pub fn new(vertices: [usize; 8], cells: [usize; 3]) -> Self {
        Self {
            vertices,
            cells,
            grading: Grading::uniform(),
        }
    }

    /// 指定梯度
    pub fn with_grading(mut self, grading: Grading) -> Self {
        self.grading = grading;
        self
    }

    /// 块内单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells[0] * self.cells[1] * self.cells[2]
    }
}

// ============================================================
// 曲边覆盖
// ============================================================

/// 曲边覆盖
///
/// 默认块棱为直线；此处声明的棱替换为曲线。源数据中该表为空，
/// 但格式本身支持。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeSpec {
    /// 过一个中间点的圆弧
    Arc {
        /// 起点顶点索引
        start: usize,
        /// 终点顶点索引
        end: usize,
        /// 圆弧经过的中间点
        through: DVec3,
    },
}

impl EdgeSpec {
    /// 棱的两个端点索引
    pub fn endpoints(&self) -> (usize, usize) {
        match self {
            Self::Arc { start, end, .. } => (*start, *end),
        }
    }
}

// ============================================================
// patch 声明
// ============================================================

/// 编写期 patch 声明
///
/// 面以 4 个顶点索引的形式列出（拓扑形式）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchDecl {
    /// patch 名称（全局唯一）
    pub name: String,
    /// patch 类型
    pub kind: PatchKind,
    /// 面列表，每面 4 个顶点索引
    pub faces: Vec<[usize; 4]>,
}

impl PatchDecl {
    /// 创建 patch 声明
    pub fn new(name: impl Into<String>, kind: PatchKind, faces: Vec<[usize; 4]>) -> Self {
        Self {
            name: name.into(),
            kind,
            faces,
        }
    }

    /// 面数量
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }
}

// ============================================================
// 网格描述整体
// ============================================================

/// 编写期网格描述
///
/// 案例网格描述文件的完整内存表示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMeshDict {
    /// 坐标缩放因子（声明坐标乘以该值得到米制坐标）
    pub convert_to_meters: f64,
    /// 顶点表（按声明顺序，索引即位置）
    pub vertices: Vec<DVec3>,
    /// 块表
    pub blocks: Vec<Block>,
    /// 曲边覆盖（可为空）
    pub edges: Vec<EdgeSpec>,
    /// patch 声明（声明顺序有语义）
    pub boundary: Vec<PatchDecl>,
    /// 待合并的 patch 名称对（可为空）
    pub merge_patch_pairs: Vec<(String, String)>,
}

impl Default for BlockMeshDict {
    fn default() -> Self {
        Self {
            convert_to_meters: 1.0,
            vertices: Vec::new(),
            blocks: Vec::new(),
            edges: Vec::new(),
            boundary: Vec::new(),
            merge_patch_pairs: Vec::new(),
        }
    }
}

impl BlockMeshDict {
    /// 顶点数量
    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// 块数量
    #[inline]
    pub fn n_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// 所有块的单元总数
    pub fn total_cells(&self) -> usize {
        self.blocks.iter().map(Block::n_cells).sum()
    }

    /// 声明的 patch 面总数
    pub fn total_patch_faces(&self) -> usize {
        self.boundary.iter().map(PatchDecl::n_faces).sum()
    }

    /// 按名称查找 patch 声明
    pub fn find_patch(&self, name: &str) -> Option<&PatchDecl> {
        self.boundary.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_kind_keywords() {
        assert_eq!(PatchKind::from_keyword("patch"), Some(PatchKind::Patch));
        assert_eq!(PatchKind::from_keyword("wall"), Some(PatchKind::Wall));
        assert_eq!(
            PatchKind::from_keyword("symmetryPlane"),
            Some(PatchKind::Symmetry)
        );
        assert_eq!(PatchKind::from_keyword("inletOutlet"), None);

        assert_eq!(PatchKind::Wall.keyword(), "wall");
    }

    #[test]
    fn test_patch_kind_categories() {
        assert!(PatchKind::Wall.is_solid());
        assert!(PatchKind::Symmetry.is_solid());
        assert!(PatchKind::Patch.is_flow_through());
        assert!(!PatchKind::Empty.is_flow_through());
    }

    #[test]
    fn test_block_cell_count() {
        let block = Block::new([0, 1, 2, 3, 4, 5, 6, 7], [100, 20, 1]);
        assert_eq!(block.n_cells(), 2000);
    }

    #[test]
    fn test_grading_default_uniform() {
        let g = Grading::default();
        assert_eq!(g.ratios(), &[1.0, 1.0, 1.0]);
        assert_eq!(g.keyword(), "simpleGrading");
    }

    #[test]
    fn test_dict_totals() {
        let dict = BlockMeshDict {
            vertices: vec![DVec3::ZERO; 8],
            blocks: vec![Block::new([0, 1, 2, 3, 4, 5, 6, 7], [10, 10, 1])],
            boundary: vec![
                PatchDecl::new("inlet", PatchKind::Patch, vec![[0, 3, 7, 4]]),
                PatchDecl::new("walls", PatchKind::Wall, vec![[0, 1, 5, 4], [3, 2, 6, 7]]),
            ],
            ..Default::default()
        };
        assert_eq!(dict.n_vertices(), 8);
        assert_eq!(dict.total_cells(), 100);
        assert_eq!(dict.total_patch_faces(), 3);
        assert!(dict.find_patch("walls").is_some());
        assert!(dict.find_patch("outlet").is_none());
    }
}
