// crates/fc_dict/src/parser.rs

//! 字典格式递归下降解析
//!
//! 输入经 [`Lexer`](crate::token::Lexer) 切分后在此组装为
//! [`CaseFile`] 值树。遇到首个语法错误即失败返回，不尝试恢复。
//!
//! # 支持的顶层形态
//!
//! - 键值条目序列（网格描述、场文件）
//! - 可选计数前缀的匿名列表（生成后的边界文件）
//!
//! 两种形态都可以带标准 `FoamFile` 文件头。

use std::io::Read;

use crate::error::{DictError, DictResult};
use crate::token::{Lexer, Token};
use crate::value::{Body, CaseFile, DictValue, Dictionary, FileHeader};

/// 字典文件解析器
pub struct DictParser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl DictParser {
    /// 解析字符串
    pub fn parse_str(src: &str) -> DictResult<CaseFile> {
        let tokens = Lexer::new(src).tokenize()?;
        let mut parser = Self { tokens, pos: 0 };
        parser.parse_file()
    }

    /// 从 reader 解析
    pub fn parse_reader<R: Read>(mut reader: R) -> DictResult<CaseFile> {
        let mut src = String::new();
        reader.read_to_string(&mut src)?;
        Self::parse_str(&src)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    /// 当前位置的行号（流结束时取最后一个 token 的行号）
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, l)| *l)
            .unwrap_or(1)
    }

    fn bump(&mut self) -> Option<(Token, usize)> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_punct(&mut self, expected: Token) -> DictResult<usize> {
        match self.bump() {
            Some((tok, line)) if tok == expected => Ok(line),
            Some((tok, line)) => Err(DictError::syntax(
                line,
                format!("期望 {}, 实际 {}", expected.kind_name(), tok.kind_name()),
            )),
            None => Err(DictError::eof(expected.kind_name().to_string())),
        }
    }

    // ------------------------------------------------------------------
    // 文法规则
    // ------------------------------------------------------------------

    fn parse_file(&mut self) -> DictResult<CaseFile> {
        // 标准文件头
        let mut header = None;
        if let (Some(Token::Word(w)), Some(Token::LBrace)) = (self.peek(), self.peek_at(1)) {
            if w == "FoamFile" {
                self.bump();
                let dict = self.parse_dict()?;
                header = Some(FileHeader::from_dict(&dict));
            }
        }

        // 匿名顶层列表（可带计数前缀）
        let starts_list = matches!(self.peek(), Some(Token::LParen))
            || (matches!(self.peek(), Some(Token::Int(_)))
                && matches!(self.peek_at(1), Some(Token::LParen)));
        if starts_list {
            let value = self.parse_value()?;
            if let Some((tok, line)) = self.bump() {
                return Err(DictError::syntax(
                    line,
                    format!("顶层列表之后存在多余内容: {}", tok.kind_name()),
                ));
            }
            let items = match value {
                DictValue::List(items) => items,
                _ => unreachable!("list 起始 token 必然解析为列表"),
            };
            return Ok(CaseFile {
                header,
                body: Body::List(items),
            });
        }

        // 键值条目序列
        let mut dict = Dictionary::new();
        while self.peek().is_some() {
            let (key, value) = self.parse_entry()?;
            dict.insert(key, value);
        }
        Ok(CaseFile {
            header,
            body: Body::Dict(dict),
        })
    }

    /// 解析单个条目：`keyword value... ;` 或 `keyword { ... }`
    fn parse_entry(&mut self) -> DictResult<(String, DictValue)> {
        let (tok, line) = self
            .bump()
            .ok_or_else(|| DictError::eof("keyword".to_string()))?;
        let key = match tok {
            Token::Word(w) => w,
            Token::Str(s) => s,
            other => {
                return Err(DictError::syntax(
                    line,
                    format!("期望关键字, 实际 {}", other.kind_name()),
                ));
            }
        };

        // 子字典条目不带分号
        if matches!(self.peek(), Some(Token::LBrace)) {
            let dict = self.parse_dict()?;
            return Ok((key, DictValue::Dict(dict)));
        }

        let mut values = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Semi) => {
                    self.bump();
                    break;
                }
                Some(_) => values.push(self.parse_value()?),
                None => return Err(DictError::eof("';'".to_string())),
            }
        }

        let value = match values.len() {
            0 => {
                return Err(DictError::syntax(
                    line,
                    format!("条目 '{}' 缺少值", key),
                ));
            }
            1 => values.pop().expect("len == 1"),
            _ => DictValue::Compound(values),
        };
        Ok((key, value))
    }

    /// 解析 `{ ... }` 子字典
    fn parse_dict(&mut self) -> DictResult<Dictionary> {
        self.expect_punct(Token::LBrace)?;
        let mut dict = Dictionary::new();
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let (key, value) = self.parse_entry()?;
                    dict.insert(key, value);
                }
                None => return Err(DictError::eof("'}'".to_string())),
            }
        }
        Ok(dict)
    }

    /// 解析单个值
    fn parse_value(&mut self) -> DictResult<DictValue> {
        let line = self.line();
        match self.peek() {
            // 计数前缀列表：`N ( ... )`
            Some(Token::Int(_)) if matches!(self.peek_at(1), Some(Token::LParen)) => {
                let (tok, count_line) = self.bump().expect("peeked");
                let count = match tok {
                    Token::Int(i) => i,
                    _ => unreachable!(),
                };
                let items = self.parse_list()?;
                if count < 0 || count as usize != items.len() {
                    return Err(DictError::syntax(
                        count_line,
                        format!("列表长度 {} 与前缀计数 {} 不符", items.len(), count),
                    ));
                }
                Ok(DictValue::List(items))
            }
            Some(Token::LParen) => Ok(DictValue::List(self.parse_list()?)),
            Some(Token::LBracket) => self.parse_dimensions(),
            Some(Token::LBrace) => Err(DictError::syntax(line, "意外的 '{'")),
            Some(Token::RBrace) | Some(Token::RParen) | Some(Token::RBracket)
            | Some(Token::Semi) => {
                let kind = self.peek().expect("peeked").kind_name();
                Err(DictError::syntax(line, format!("意外的 {}", kind)))
            }
            Some(_) => {
                let (tok, _) = self.bump().expect("peeked");
                Ok(match tok {
                    Token::Word(w) => DictValue::Word(w),
                    Token::Str(s) => DictValue::Str(s),
                    Token::Int(i) => DictValue::Int(i),
                    Token::Number(f) => DictValue::Number(f),
                    _ => unreachable!("标点已在前面的分支处理"),
                })
            }
            None => Err(DictError::eof("value".to_string())),
        }
    }

    /// 解析 `( ... )` 列表；元素可为 `name { ... }` 命名记录
    fn parse_list(&mut self) -> DictResult<Vec<DictValue>> {
        self.expect_punct(Token::LParen)?;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RParen) => {
                    self.bump();
                    break;
                }
                Some(Token::Word(_)) if matches!(self.peek_at(1), Some(Token::LBrace)) => {
                    let (tok, _) = self.bump().expect("peeked");
                    let name = match tok {
                        Token::Word(w) => w,
                        _ => unreachable!(),
                    };
                    let dict = self.parse_dict()?;
                    items.push(DictValue::NamedDict { name, dict });
                }
                Some(_) => items.push(self.parse_value()?),
                None => return Err(DictError::eof("')'".to_string())),
            }
        }
        Ok(items)
    }

    /// 解析 `[ ... ]` 量纲向量，要求恰好 7 个整数指数
    fn parse_dimensions(&mut self) -> DictResult<DictValue> {
        let line = self.expect_punct(Token::LBracket)?;
        let mut exponents = Vec::new();
        loop {
            match self.bump() {
                Some((Token::RBracket, _)) => break,
                Some((Token::Int(i), _)) => exponents.push(i as i32),
                Some((tok, tok_line)) => {
                    return Err(DictError::syntax(
                        tok_line,
                        format!("量纲向量中存在非整数项: {}", tok.kind_name()),
                    ));
                }
                None => return Err(DictError::eof("']'".to_string())),
            }
        }
        if exponents.len() != 7 {
            return Err(DictError::syntax(
                line,
                format!("量纲向量需要 7 个指数, 实际 {}", exponents.len()),
            ));
        }
        let mut dims = [0i32; 7];
        dims.copy_from_slice(&exponents);
        Ok(DictValue::Dimensions(dims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

blocks
(
    hex (0 1 2 3 4 5 6 7) (100 20 1) simpleGrading (1 1 1)
);
"#;

    #[test]
    fn test_parse_mesh_snippet() {
        let file = DictParser::parse_str(MESH_SNIPPET).unwrap();
        let header = file.header.as_ref().unwrap();
        assert_eq!(header.object.as_deref(), Some("blockMeshDict"));

        let dict = file.as_dict().unwrap();
        assert_eq!(dict.get_number("convertToMeters").unwrap(), 1.0);
        assert_eq!(dict.get_list("vertices").unwrap().len(), 4);

        // blocks 条目为多 token 值
        let blocks = dict.expect("blocks").unwrap();
        let hex = blocks.as_list().unwrap();
        assert_eq!(hex[0].as_word(), Some("hex"));
        assert_eq!(hex[1].as_list().unwrap().len(), 8);
    }

    #[test]
    fn test_parse_anonymous_list_body() {
        let src = r#"
FoamFile
{
    class polyBoundaryMesh;
}

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
        let file = DictParser::parse_str(src).unwrap();
        let items = file.as_list().unwrap();
        assert_eq!(items.len(), 2);
        match &items[0] {
            DictValue::NamedDict { name, dict } => {
                assert_eq!(name, "inlet");
                assert_eq!(dict.get_usize("nFaces").unwrap(), 4);
            }
            other => panic!("期望 NamedDict, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_parse_count_mismatch() {
        let err = DictParser::parse_str("3 ( 1 2 )").unwrap_err();
        assert!(matches!(err, DictError::Syntax { .. }));
    }

    #[test]
    fn test_parse_compound_entry() {
        let file = DictParser::parse_str("internalField uniform (1.5 0 0);").unwrap();
        let dict = file.as_dict().unwrap();
        let tokens = dict.expect("internalField").unwrap().as_tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].as_word(), Some("uniform"));
        assert_eq!(tokens[1].as_vector3(), Some([1.5, 0.0, 0.0]));
    }

    #[test]
    fn test_parse_dimensions() {
        let file = DictParser::parse_str("dimensions [0 1 -1 0 0 0 0];").unwrap();
        let dict = file.as_dict().unwrap();
        let dims = dict.expect("dimensions").unwrap().as_dimensions().unwrap();
        assert_eq!(dims, [0, 1, -1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_dimensions_wrong_arity() {
        let err = DictParser::parse_str("dimensions [0 1 -1];").unwrap_err();
        assert!(matches!(err, DictError::Syntax { .. }));
    }

    #[test]
    fn test_parse_missing_semicolon() {
        let err = DictParser::parse_str("convertToMeters 1.0").unwrap_err();
        assert!(matches!(err, DictError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_parse_empty_entry() {
        let err = DictParser::parse_str("mergePatchPairs;").unwrap_err();
        assert!(matches!(err, DictError::Syntax { .. }));
    }

    #[test]
    fn test_parse_from_reader() {
        let cursor = Cursor::new("a 1;\nb 2;\n");
        let file = DictParser::parse_reader(cursor).unwrap();
        assert_eq!(file.as_dict().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_nested_dict() {
        let src = r#"
boundaryField
{
    inlet
    {
        type fixedValue;
        value uniform (1.5 0 0);
    }
}
"#;
        let file = DictParser::parse_str(src).unwrap();
        let bf = file.as_dict().unwrap().get_dict("boundaryField").unwrap();
        let inlet = bf.get_dict("inlet").unwrap();
        assert_eq!(inlet.get_word("type").unwrap(), "fixedValue");
    }
}
