// crates/fc_mesh/src/io.rs

//! 网格描述与字典格式之间的编解码
//!
//! 读取方向：字典值树 → 数据模型，类型关键字在此处决议，
//! 未知关键字报 `UnknownPatchType`。写出方向：数据模型 →
//! 字典值树，再交由 [`DictWriter`] 序列化。
//!
//! # 示例
//!
//! ```ignore
//! use fc_mesh::io::BlockMeshLoader;
//!
//! let dict = BlockMeshLoader::load("system/blockMeshDict")?;
//! println!("{} vertices, {} blocks", dict.n_vertices(), dict.n_blocks());
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glam::DVec3;

use fc_dict::{Body, CaseFile, DictError, DictParser, DictValue, DictWriter, Dictionary, FileHeader};

use crate::boundary::{BoundaryFile, BoundaryPatch};
use crate::error::{MeshSchemaError, MeshSchemaResult};
use crate::schema::{Block, BlockMeshDict, EdgeSpec, Grading, PatchDecl, PatchKind};

// ============================================================
// 网格描述读取
// ============================================================

/// 网格描述文件加载器
pub struct BlockMeshLoader;

impl BlockMeshLoader {
    /// 从文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> MeshSchemaResult<BlockMeshDict> {
        let file = File::open(path.as_ref())?;
        Self::load_from_reader(BufReader::new(file))
    }

    /// 从 reader 加载
    pub fn load_from_reader<R: Read>(reader: R) -> MeshSchemaResult<BlockMeshDict> {
        let case = DictParser::parse_reader(reader)?;
        Self::decode(&case)
    }

    /// 从已解析的值树解码
    pub fn decode(case: &CaseFile) -> MeshSchemaResult<BlockMeshDict> {
        let dict = case.as_dict()?;

        let convert_to_meters = match dict.get("convertToMeters") {
            Some(v) => v.as_number().ok_or_else(|| {
                DictError::type_mismatch("convertToMeters", "number", v.kind_name())
            })?,
            None => 1.0,
        };

        let vertices = decode_vertices(dict)?;
        let blocks = decode_blocks(dict)?;
        let edges = decode_edges(dict)?;
        let boundary = decode_patch_decls(dict)?;
        let merge_patch_pairs = decode_merge_pairs(dict)?;

        Ok(BlockMeshDict {
            convert_to_meters,
            vertices,
            blocks,
            edges,
            boundary,
            merge_patch_pairs,
        })
    }
}

fn decode_vertices(dict: &Dictionary) -> MeshSchemaResult<Vec<DVec3>> {
    let items = dict.get_list("vertices")?;
    let mut vertices = Vec::with_capacity(items.len());
    for item in items {
        let [x, y, z] = item
            .as_vector3()
            .ok_or_else(|| DictError::type_mismatch("vertices", "(x y z)", item.kind_name()))?;
        vertices.push(DVec3::new(x, y, z));
    }
    Ok(vertices)
}

fn decode_blocks(dict: &Dictionary) -> MeshSchemaResult<Vec<Block>> {
    let list = match dict.get("blocks") {
        Some(v) => v
            .as_list()
            .ok_or_else(|| DictError::type_mismatch("blocks", "list", v.kind_name()))?,
        None => return Ok(Vec::new()),
    };

    // 组合值与相邻元素两种形态统一展平为 token 流
    let tokens: Vec<&DictValue> = list.iter().flat_map(DictValue::as_tokens).collect();
    let mut stream = tokens.into_iter();
    let mut blocks = Vec::new();

    while let Some(first) = stream.next() {
        let block_idx = blocks.len();
        match first.as_word() {
            Some("hex") => {}
            _ => {
                return Err(DictError::type_mismatch(
                    "blocks",
                    "'hex' 关键字",
                    first.kind_name(),
                )
                .into());
            }
        }

        let vertices: [usize; 8] = next_index_array(&mut stream, "blocks", "8 个顶点索引")?;
        let cells = next_cell_counts(&mut stream, block_idx)?;

        let grading_kw = stream
            .next()
            .and_then(DictValue::as_word)
            .ok_or_else(|| DictError::missing("grading 关键字"))?;
        let grading = match grading_kw {
            "simpleGrading" => {
                let ratios = next_number_list(&mut stream, "simpleGrading", 3)?;
                let mut arr = [0.0; 3];
                arr.copy_from_slice(&ratios);
                Grading::Simple(arr)
            }
            "edgeGrading" => Grading::Edge(next_number_list(&mut stream, "edgeGrading", 12)?),
            other => {
                return Err(DictError::type_mismatch(
                    "blocks",
                    "simpleGrading/edgeGrading",
                    other,
                )
                .into());
            }
        };

        blocks.push(Block {
            vertices,
            cells,
            grading,
        });
    }
    Ok(blocks)
}

fn decode_edges(dict: &Dictionary) -> MeshSchemaResult<Vec<EdgeSpec>> {
    let list = match dict.get("edges") {
        Some(v) => v
            .as_list()
            .ok_or_else(|| DictError::type_mismatch("edges", "list", v.kind_name()))?,
        None => return Ok(Vec::new()),
    };

    let tokens: Vec<&DictValue> = list.iter().flat_map(DictValue::as_tokens).collect();
    let mut stream = tokens.into_iter();
    let mut edges = Vec::new();

    while let Some(first) = stream.next() {
        match first.as_word() {
            Some("arc") => {
                let start = next_usize(&mut stream, "edges", "起点索引")?;
                let end = next_usize(&mut stream, "edges", "终点索引")?;
                let through = stream
                    .next()
                    .and_then(DictValue::as_vector3)
                    .ok_or_else(|| DictError::type_mismatch("edges", "(x y z)", "missing"))?;
                edges.push(EdgeSpec::Arc {
                    start,
                    end,
                    through: DVec3::from_array(through),
                });
            }
            _ => {
                return Err(
                    DictError::type_mismatch("edges", "'arc' 关键字", first.kind_name()).into(),
                );
            }
        }
    }
    Ok(edges)
}

fn decode_patch_decls(dict: &Dictionary) -> MeshSchemaResult<Vec<PatchDecl>> {
    let items = match dict.get("boundary") {
        Some(v) => v
            .as_list()
            .ok_or_else(|| DictError::type_mismatch("boundary", "list", v.kind_name()))?,
        None => return Ok(Vec::new()),
    };

    let mut decls = Vec::with_capacity(items.len());
    for item in items {
        let (name, sub) = match item {
            DictValue::NamedDict { name, dict } => (name.clone(), dict),
            other => {
                return Err(DictError::type_mismatch(
                    "boundary",
                    "named dictionary",
                    other.kind_name(),
                )
                .into());
            }
        };

        let keyword = sub.get_word("type")?;
        let kind = PatchKind::from_keyword(keyword)
            .ok_or_else(|| MeshSchemaError::unknown_patch_type(&name, keyword))?;

        let mut faces = Vec::new();
        for face in sub.get_list("faces")? {
            faces.push(decode_face(face)?);
        }

        decls.push(PatchDecl { name, kind, faces });
    }
    Ok(decls)
}

fn decode_face(value: &DictValue) -> MeshSchemaResult<[usize; 4]> {
    let items = value
        .as_list()
        .ok_or_else(|| DictError::type_mismatch("faces", "list", value.kind_name()))?;
    if items.len() != 4 {
        return Err(DictError::type_mismatch(
            "faces",
            "4 个顶点索引",
            format!("{} 项", items.len()),
        )
        .into());
    }
    let mut face = [0usize; 4];
    for (slot, item) in face.iter_mut().zip(items) {
        *slot = item
            .as_usize()
            .ok_or_else(|| DictError::type_mismatch("faces", "non-negative integer", item.kind_name()))?;
    }
    Ok(face)
}

fn decode_merge_pairs(dict: &Dictionary) -> MeshSchemaResult<Vec<(String, String)>> {
    let items = match dict.get("mergePatchPairs") {
        Some(v) => v
            .as_list()
            .ok_or_else(|| DictError::type_mismatch("mergePatchPairs", "list", v.kind_name()))?,
        None => return Ok(Vec::new()),
    };

    let mut pairs = Vec::with_capacity(items.len());
    for item in items {
        let pair = item
            .as_list()
            .filter(|l| l.len() == 2)
            .ok_or_else(|| {
                DictError::type_mismatch("mergePatchPairs", "(a b)", item.kind_name())
            })?;
        let a = pair[0]
            .as_word()
            .ok_or_else(|| DictError::type_mismatch("mergePatchPairs", "word", pair[0].kind_name()))?;
        let b = pair[1]
            .as_word()
            .ok_or_else(|| DictError::type_mismatch("mergePatchPairs", "word", pair[1].kind_name()))?;
        pairs.push((a.to_string(), b.to_string()));
    }
    Ok(pairs)
}

// ------------------------------------------------------------
// token 流辅助
// ------------------------------------------------------------

fn next_usize<'a>(
    stream: &mut impl Iterator<Item = &'a DictValue>,
    keyword: &'static str,
    expected: &'static str,
) -> MeshSchemaResult<usize> {
    stream
        .next()
        .and_then(DictValue::as_usize)
        .ok_or_else(|| DictError::type_mismatch(keyword, expected, "missing").into())
}

fn next_index_array<'a, const N: usize>(
    stream: &mut impl Iterator<Item = &'a DictValue>,
    keyword: &'static str,
    expected: &'static str,
) -> MeshSchemaResult<[usize; N]> {
    let items = stream
        .next()
        .and_then(DictValue::as_list)
        .filter(|l| l.len() == N)
        .ok_or_else(|| DictError::type_mismatch(keyword, expected, "missing"))?;
    let mut arr = [0usize; N];
    for (slot, item) in arr.iter_mut().zip(items) {
        *slot = item.as_usize().ok_or_else(|| {
            DictError::type_mismatch(keyword, "non-negative integer", item.kind_name())
        })?;
    }
    Ok(arr)
}

/// 细分数列表：负数或零在解码阶段即按模式错误上报
fn next_cell_counts<'a>(
    stream: &mut impl Iterator<Item = &'a DictValue>,
    block_idx: usize,
) -> MeshSchemaResult<[usize; 3]> {
    let items = stream
        .next()
        .and_then(DictValue::as_list)
        .filter(|l| l.len() == 3)
        .ok_or_else(|| DictError::type_mismatch("blocks", "3 个细分数", "missing"))?;
    let mut cells = [0usize; 3];
    for (axis, (slot, item)) in cells.iter_mut().zip(items).enumerate() {
        let n = item
            .as_int()
            .ok_or_else(|| DictError::type_mismatch("blocks", "integer", item.kind_name()))?;
        if n <= 0 {
            return Err(MeshSchemaError::invalid_subdivision(block_idx, axis, n));
        }
        *slot = n as usize;
    }
    Ok(cells)
}

fn next_number_list<'a>(
    stream: &mut impl Iterator<Item = &'a DictValue>,
    keyword: &'static str,
    n: usize,
) -> MeshSchemaResult<Vec<f64>> {
    let items = stream
        .next()
        .and_then(DictValue::as_list)
        .filter(|l| l.len() == n)
        .ok_or_else(|| DictError::type_mismatch(keyword, "膨胀比列表", "missing"))?;
    items
        .iter()
        .map(|item| {
            item.as_number().ok_or_else(|| {
                DictError::type_mismatch(keyword, "number", item.kind_name()).into()
            })
        })
        .collect()
}

// ============================================================
// 网格描述写出
// ============================================================

/// 网格描述文件写出器
pub struct BlockMeshWriter;

impl BlockMeshWriter {
    /// 写入文件
    pub fn write<P: AsRef<Path>>(path: P, dict: &BlockMeshDict) -> MeshSchemaResult<()> {
        let file = File::create(path.as_ref())?;
        Self::write_to(&mut BufWriter::new(file), dict)
    }

    /// 写入 writer
    pub fn write_to<W: Write>(writer: &mut W, dict: &BlockMeshDict) -> MeshSchemaResult<()> {
        let case = Self::encode(dict);
        DictWriter::write_to(writer, &case)?;
        Ok(())
    }

    /// 编码为字典值树
    pub fn encode(dict: &BlockMeshDict) -> CaseFile {
        let mut root = Dictionary::new();

        root.insert(
            "convertToMeters",
            DictValue::Number(dict.convert_to_meters),
        );

        root.insert(
            "vertices",
            DictValue::List(dict.vertices.iter().map(|v| vector3(*v)).collect()),
        );

        root.insert(
            "blocks",
            DictValue::List(dict.blocks.iter().map(encode_block).collect()),
        );

        root.insert(
            "edges",
            DictValue::List(dict.edges.iter().map(encode_edge).collect()),
        );

        root.insert(
            "boundary",
            DictValue::List(dict.boundary.iter().map(encode_patch_decl).collect()),
        );

        root.insert(
            "mergePatchPairs",
            DictValue::List(
                dict.merge_patch_pairs
                    .iter()
                    .map(|(a, b)| {
                        DictValue::List(vec![
                            DictValue::Word(a.clone()),
                            DictValue::Word(b.clone()),
                        ])
                    })
                    .collect(),
            ),
        );

        CaseFile {
            header: Some(standard_header("dictionary", "blockMeshDict", "system")),
            body: Body::Dict(root),
        }
    }
}

fn vector3(v: DVec3) -> DictValue {
    DictValue::List(vec![
        DictValue::Number(v.x),
        DictValue::Number(v.y),
        DictValue::Number(v.z),
    ])
}

fn index_list(indices: &[usize]) -> DictValue {
    DictValue::List(indices.iter().map(|&i| DictValue::Int(i as i64)).collect())
}

fn number_list(numbers: &[f64]) -> DictValue {
    DictValue::List(numbers.iter().map(|&x| DictValue::Number(x)).collect())
}

fn encode_block(block: &Block) -> DictValue {
    DictValue::Compound(vec![
        DictValue::Word("hex".into()),
        index_list(&block.vertices),
        index_list(&block.cells),
        DictValue::Word(block.grading.keyword().into()),
        number_list(block.grading.ratios()),
    ])
}

fn encode_edge(edge: &EdgeSpec) -> DictValue {
    match edge {
        EdgeSpec::Arc {
            start,
            end,
            through,
        } => DictValue::Compound(vec![
            DictValue::Word("arc".into()),
            DictValue::Int(*start as i64),
            DictValue::Int(*end as i64),
            vector3(*through),
        ]),
    }
}

fn encode_patch_decl(patch: &PatchDecl) -> DictValue {
    let mut dict = Dictionary::new();
    dict.insert("type", DictValue::Word(patch.kind.keyword().into()));
    dict.insert(
        "faces",
        DictValue::List(patch.faces.iter().map(|f| index_list(f)).collect()),
    );
    DictValue::NamedDict {
        name: patch.name.clone(),
        dict,
    }
}

fn standard_header(class: &str, object: &str, location: &str) -> FileHeader {
    FileHeader {
        version: Some("2.0".into()),
        format: Some("ascii".into()),
        class: Some(class.into()),
        location: Some(location.into()),
        object: Some(object.into()),
    }
}

// ============================================================
// 边界文件读写
// ============================================================

/// 生成后边界文件加载器
pub struct BoundaryLoader;

impl BoundaryLoader {
    /// 从文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> MeshSchemaResult<BoundaryFile> {
        let file = File::open(path.as_ref())?;
        Self::load_from_reader(BufReader::new(file))
    }

    /// 从 reader 加载
    pub fn load_from_reader<R: Read>(reader: R) -> MeshSchemaResult<BoundaryFile> {
        let case = DictParser::parse_reader(reader)?;
        Self::decode(&case)
    }

    /// 从已解析的值树解码
    pub fn decode(case: &CaseFile) -> MeshSchemaResult<BoundaryFile> {
        let items = case.as_list()?;
        let mut patches = Vec::with_capacity(items.len());

        for item in items {
            let (name, sub) = match item {
                DictValue::NamedDict { name, dict } => (name.clone(), dict),
                other => {
                    return Err(DictError::type_mismatch(
                        "boundary",
                        "named dictionary",
                        other.kind_name(),
                    )
                    .into());
                }
            };

            let keyword = sub.get_word("type")?;
            let kind = PatchKind::from_keyword(keyword)
                .ok_or_else(|| MeshSchemaError::unknown_patch_type(&name, keyword))?;

            let in_groups = match sub.get("inGroups") {
                Some(v) => v
                    .as_list()
                    .ok_or_else(|| {
                        DictError::type_mismatch("inGroups", "list", v.kind_name())
                    })?
                    .iter()
                    .map(|g| {
                        g.as_word().map(str::to_string).ok_or_else(|| {
                            DictError::type_mismatch("inGroups", "word", g.kind_name())
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };

            patches.push(BoundaryPatch {
                name,
                kind,
                in_groups,
                n_faces: sub.get_usize("nFaces")?,
                start_face: sub.get_usize("startFace")?,
            });
        }

        Ok(BoundaryFile { patches })
    }
}

/// 生成后边界文件写出器
pub struct BoundaryWriter;

impl BoundaryWriter {
    /// 写入文件
    pub fn write<P: AsRef<Path>>(path: P, file: &BoundaryFile) -> MeshSchemaResult<()> {
        let out = File::create(path.as_ref())?;
        Self::write_to(&mut BufWriter::new(out), file)
    }

    /// 写入 writer
    pub fn write_to<W: Write>(writer: &mut W, file: &BoundaryFile) -> MeshSchemaResult<()> {
        let case = Self::encode(file);
        DictWriter::write_to(writer, &case)?;
        Ok(())
    }

    /// 编码为字典值树
    pub fn encode(file: &BoundaryFile) -> CaseFile {
        let items = file
            .patches
            .iter()
            .map(|patch| {
                let mut dict = Dictionary::new();
                dict.insert("type", DictValue::Word(patch.kind.keyword().into()));
                if !patch.in_groups.is_empty() {
                    dict.insert(
                        "inGroups",
                        DictValue::List(
                            patch
                                .in_groups
                                .iter()
                                .map(|g| DictValue::Word(g.clone()))
                                .collect(),
                        ),
                    );
                }
                dict.insert("nFaces", DictValue::Int(patch.n_faces as i64));
                dict.insert("startFace", DictValue::Int(patch.start_face as i64));
                DictValue::NamedDict {
                    name: patch.name.clone(),
                    dict,
                }
            })
            .collect();

        CaseFile {
            header: Some(standard_header(
                "polyBoundaryMesh",
                "boundary",
                "constant/polyMesh",
            )),
            body: Body::List(items),
        }
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CHANNEL_MESH: &str = r#"
FoamFile
{
    version     2.0;
    format      ascii;
    class       dictionary;
    object      blockMeshDict;
}

convertToMeters 1.0;

vertices
(
    (-2.5 -0.5 -0.05)
    ( 2.5 -0.5 -0.05)
    ( 2.5  0.5 -0.05)
    (-2.5  0.5 -0.05)
    (-2.5 -0.5  0.05)
    ( 2.5 -0.5  0.05)
    ( 2.5  0.5  0.05)
    (-2.5  0.5  0.05)
);

blocks
(
    hex (0 1 2 3 4 5 6 7) (100 20 1) simpleGrading (1 2.0 1)
);

edges
(
);

boundary
(
    inlet
    {
        type patch;
        faces ((0 4 7 3));
    }
    outlet
    {
        type patch;
        faces ((1 2 6 5));
    }
    walls
    {
        type wall;
        faces
        (
            (0 1 5 4)
            (3 7 6 2)
        );
    }
    frontAndBack
    {
        type empty;
        faces
        (
            (0 3 2 1)
            (4 5 6 7)
        );
    }
);

mergePatchPairs
(
);
"#;

    #[test]
    fn test_decode_channel_mesh() {
        let cursor = Cursor::new(CHANNEL_MESH);
        let dict = BlockMeshLoader::load_from_reader(cursor).unwrap();

        assert_eq!(dict.n_vertices(), 8);
        assert_eq!(dict.n_blocks(), 1);
        assert_eq!(dict.blocks[0].cells, [100, 20, 1]);
        assert_eq!(
            dict.blocks[0].grading,
            Grading::Simple([1.0, 2.0, 1.0])
        );
        assert_eq!(dict.boundary.len(), 4);
        assert_eq!(dict.boundary[2].name, "walls");
        assert_eq!(dict.boundary[2].kind, PatchKind::Wall);
        assert_eq!(dict.boundary[2].faces.len(), 2);
        assert_eq!(dict.boundary[3].kind, PatchKind::Empty);
        assert!(dict.merge_patch_pairs.is_empty());
    }

    #[test]
    fn test_decode_unknown_patch_type() {
        let src = r#"
vertices ( (0 0 0) );
boundary
(
    inlet
    {
        type supersonicInlet;
        faces ();
    }
);
"#;
        let err = BlockMeshLoader::load_from_reader(Cursor::new(src)).unwrap_err();
        match err {
            MeshSchemaError::UnknownPatchType { patch, keyword } => {
                assert_eq!(patch, "inlet");
                assert_eq!(keyword, "supersonicInlet");
            }
            other => panic!("期望 UnknownPatchType, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_decode_negative_subdivision() {
        let src = r#"
vertices ( (0 0 0) );
blocks
(
    hex (0 0 0 0 0 0 0 0) (10 -1 1) simpleGrading (1 1 1)
);
"#;
        let err = BlockMeshLoader::load_from_reader(Cursor::new(src)).unwrap_err();
        assert!(matches!(
            err,
            MeshSchemaError::InvalidSubdivision { axis: 1, value: -1, .. }
        ));
    }

    #[test]
    fn test_block_mesh_roundtrip() {
        let original = BlockMeshLoader::load_from_reader(Cursor::new(CHANNEL_MESH)).unwrap();

        let mut buffer = Vec::new();
        BlockMeshWriter::write_to(&mut buffer, &original).unwrap();

        let reloaded = BlockMeshLoader::load_from_reader(Cursor::new(buffer)).unwrap();
        assert_eq!(original, reloaded);
    }

    const HEAT_SINK_BOUNDARY: &str = r#"
FoamFile
{
    version     2.0;
    format      ascii;
    class       polyBoundaryMesh;
    location    "constant/polyMesh";
    object      boundary;
}

4
(
    inlet
    {
        type patch;
        nFaces 1156;
        startFace 541938;
    }
    outlet
    {
        type patch;
        nFaces 1156;
        startFace 543094;
    }
    heat_sink
    {
        type wall;
        inGroups (wall);
        nFaces 8092;
        startFace 544250;
    }
    walls
    {
        type wall;
        inGroups (wall);
        nFaces 22344;
        startFace 552342;
    }
)
"#;

    #[test]
    fn test_decode_boundary() {
        let file = BoundaryLoader::load_from_reader(Cursor::new(HEAT_SINK_BOUNDARY)).unwrap();
        assert_eq!(file.n_patches(), 4);
        assert_eq!(file.patches[0].name, "inlet");
        assert_eq!(file.patches[2].in_groups, vec!["wall".to_string()]);
        assert_eq!(file.patches[3].n_faces, 22344);
        assert_eq!(file.end_face(), Some(574686));
    }

    #[test]
    fn test_boundary_roundtrip() {
        let original = BoundaryLoader::load_from_reader(Cursor::new(HEAT_SINK_BOUNDARY)).unwrap();

        let mut buffer = Vec::new();
        BoundaryWriter::write_to(&mut buffer, &original).unwrap();

        let reloaded = BoundaryLoader::load_from_reader(Cursor::new(buffer)).unwrap();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_boundary_rejects_dict_body() {
        let err = BoundaryLoader::load_from_reader(Cursor::new("a 1;")).unwrap_err();
        assert!(matches!(err, MeshSchemaError::Dict(_)));
    }
}
