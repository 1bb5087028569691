// crates/fc_dict/src/writer.rs

//! 字典格式写出
//!
//! 以规范化缩进将值树重新序列化为文本。写出结果保证能被
//! [`DictParser`](crate::parser::DictParser) 重新解析为相同的值树
//! （多 token 组合值在重新解析时展平为相邻元素，语义层解码对
//! 两种形态一视同仁）。

use std::fmt::Write as _;
use std::io::Write;

use crate::error::DictResult;
use crate::value::{Body, CaseFile, DictValue, Dictionary, FileHeader};

const INDENT: &str = "    ";
const KEY_WIDTH: usize = 15;

/// 字典文件写出器
pub struct DictWriter;

impl DictWriter {
    /// 写入到 writer
    pub fn write_to<W: Write>(writer: &mut W, file: &CaseFile) -> DictResult<()> {
        let text = Self::to_string(file)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// 序列化为字符串
    pub fn to_string(file: &CaseFile) -> DictResult<String> {
        let mut out = String::new();

        if let Some(header) = &file.header {
            write_header(&mut out, header);
            out.push('\n');
        }

        match &file.body {
            Body::Dict(dict) => write_dict_entries(&mut out, dict, 0),
            Body::List(items) => {
                let _ = writeln!(out, "{}", items.len());
                write_multiline_list(&mut out, items, 0);
                out.push('\n');
            }
        }

        Ok(out)
    }
}

fn write_header(out: &mut String, header: &FileHeader) {
    out.push_str("FoamFile\n{\n");
    let mut entry = |key: &str, value: &Option<String>| {
        if let Some(v) = value {
            let _ = writeln!(out, "{}{:<width$} {};", INDENT, key, v, width = KEY_WIDTH);
        }
    };
    entry("version", &header.version);
    entry("format", &header.format);
    entry("class", &header.class);
    entry("location", &header.location);
    entry("object", &header.object);
    out.push_str("}\n");
}

fn write_dict_entries(out: &mut String, dict: &Dictionary, depth: usize) {
    let pad = INDENT.repeat(depth);
    for (key, value) in dict.iter() {
        match value {
            DictValue::Dict(sub) => {
                let _ = writeln!(out, "{}{}", pad, key);
                let _ = writeln!(out, "{}{{", pad);
                write_dict_entries(out, sub, depth + 1);
                let _ = writeln!(out, "{}}}", pad);
            }
            DictValue::List(items) if !render_inline(items) => {
                let _ = writeln!(out, "{}{}", pad, key);
                write_multiline_list(out, items, depth);
                out.push_str(";\n");
            }
            other => {
                let _ = writeln!(
                    out,
                    "{}{:<width$} {};",
                    pad,
                    key,
                    inline_value(other),
                    width = KEY_WIDTH
                );
            }
        }
    }
}

/// 列表是否适合单行渲染：全部为标量且数量不多
fn render_inline(items: &[DictValue]) -> bool {
    items.len() <= 8
        && items.iter().all(|v| {
            matches!(
                v,
                DictValue::Word(_) | DictValue::Str(_) | DictValue::Int(_) | DictValue::Number(_)
            )
        })
}

/// 多行列表：每个元素占一行，元素自身以单行形式渲染；
/// 命名记录展开为块
fn write_multiline_list(out: &mut String, items: &[DictValue], depth: usize) {
    let pad = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);
    let _ = writeln!(out, "{}(", pad);
    for item in items {
        match item {
            DictValue::NamedDict { name, dict } => {
                let _ = writeln!(out, "{}{}", inner, name);
                let _ = writeln!(out, "{}{{", inner);
                write_dict_entries(out, dict, depth + 2);
                let _ = writeln!(out, "{}}}", inner);
            }
            other => {
                let _ = writeln!(out, "{}{}", inner, inline_value(other));
            }
        }
    }
    let _ = write!(out, "{})", pad);
}

/// 单行渲染一个值
fn inline_value(value: &DictValue) -> String {
    match value {
        DictValue::Word(w) => w.clone(),
        DictValue::Str(s) => format!("\"{}\"", s),
        DictValue::Int(i) => format!("{}", i),
        DictValue::Number(f) => format_number(*f),
        DictValue::List(items) => {
            let inner: Vec<String> = items.iter().map(inline_value).collect();
            format!("({})", inner.join(" "))
        }
        DictValue::Dimensions(dims) => {
            let inner: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("[{}]", inner.join(" "))
        }
        DictValue::Compound(items) => {
            let inner: Vec<String> = items.iter().map(inline_value).collect();
            inner.join(" ")
        }
        DictValue::Dict(_) | DictValue::NamedDict { .. } => {
            // 字典不会出现在单行上下文；写出占位块以保持可解析
            "{}".to_string()
        }
    }
}

/// 浮点数格式化：保留小数点，避免重新解析时退化为整数
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DictParser;
    use std::io::Cursor;

    const MESH_SNIPPET: &str = r#"
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
    (-2.5 -0.5 0)
    ( 2.5 -0.5 0)
    ( 2.5  0.5 0)
    (-2.5  0.5 0)
);

boundary
(
    inlet
    {
        type patch;
        faces ((0 3 7 4));
    }
);
"#;

    #[test]
    fn test_roundtrip_value_tree() {
        let first = DictParser::parse_str(MESH_SNIPPET).unwrap();
        let text = DictWriter::to_string(&first).unwrap();
        let second = DictParser::parse_str(&text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_roundtrip_anonymous_list() {
        let src = r#"
2
(
    inlet
    {
        type patch;
        nFaces 4;
        startFace 10;
    }
    walls
    {
        type wall;
        nFaces 8;
        startFace 14;
    }
)
"#;
        let first = DictParser::parse_str(src).unwrap();
        let text = DictWriter::to_string(&first).unwrap();
        let second = DictParser::parse_str(&text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_roundtrip_dimensions_and_compound() {
        let src = "dimensions [0 1 -1 0 0 0 0];\ninternalField uniform (1.5 0 0);\n";
        let first = DictParser::parse_str(src).unwrap();
        let text = DictWriter::to_string(&first).unwrap();
        let second = DictParser::parse_str(&text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_number_formatting_preserves_kind() {
        // 1.0 写出后必须仍解析为浮点数而不是整数
        let src = "scale 1.0;";
        let first = DictParser::parse_str(src).unwrap();
        let text = DictWriter::to_string(&first).unwrap();
        let second = DictParser::parse_str(&text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_to_writer() {
        let file = DictParser::parse_str("a 1;").unwrap();
        let mut buffer = Vec::new();
        DictWriter::write_to(&mut buffer, &file).unwrap();
        let reparsed = DictParser::parse_reader(Cursor::new(buffer)).unwrap();
        assert_eq!(file, reparsed);
    }

    #[test]
    fn test_header_written_first() {
        let file = DictParser::parse_str(MESH_SNIPPET).unwrap();
        let text = DictWriter::to_string(&file).unwrap();
        assert!(text.trim_start().starts_with("FoamFile"));
    }
}
