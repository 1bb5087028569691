// crates/fc_dict/src/token.rs

//! 字典格式词法分析
//!
//! 将输入文本切分为 token 流，跳过 `//` 行注释与 `/* */` 块注释，
//! 并为每个 token 记录行号供诊断使用。

use crate::error::{DictError, DictResult};

/// 字典格式 token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// 裸词（关键字、类型名、patch 名等）
    Word(String),
    /// 带引号的字符串
    Str(String),
    /// 整数
    Int(i64),
    /// 浮点数
    Number(f64),
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semi,
}

impl Token {
    /// token 的类别名（用于诊断）
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Word(_) => "word",
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Number(_) => "number",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Semi => "';'",
        }
    }
}

/// 词法分析器
///
/// 一次性扫描整个输入，输出 `(Token, 行号)` 序列。
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// 创建新的词法分析器
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// 扫描全部 token
    pub fn tokenize(mut self) -> DictResult<Vec<(Token, usize)>> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.src.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// 跳过空白与注释
    fn skip_trivia(&mut self) -> DictResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'/') if self.peek2() == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some(b'/') if self.peek2() == Some(b'*') => {
                    let start_line = self.line;
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek() {
                            Some(b'*') if self.peek2() == Some(b'/') => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            Some(_) => {
                                self.bump();
                            }
                            None => {
                                return Err(DictError::syntax(
                                    start_line,
                                    "块注释未闭合",
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> DictResult<Option<(Token, usize)>> {
        self.skip_trivia()?;

        let line = self.line;
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        let tok = match c {
            b'{' => {
                self.bump();
                Token::LBrace
            }
            b'}' => {
                self.bump();
                Token::RBrace
            }
            b'(' => {
                self.bump();
                Token::LParen
            }
            b')' => {
                self.bump();
                Token::RParen
            }
            b'[' => {
                self.bump();
                Token::LBracket
            }
            b']' => {
                self.bump();
                Token::RBracket
            }
            b';' => {
                self.bump();
                Token::Semi
            }
            b'"' => {
                self.bump();
                let mut bytes = Vec::new();
                loop {
                    match self.bump() {
                        Some(b'"') => break,
                        Some(b'\n') | None => {
                            return Err(DictError::syntax(line, "字符串未闭合"));
                        }
                        Some(c) => bytes.push(c),
                    }
                }
                let s = String::from_utf8(bytes)
                    .map_err(|_| DictError::syntax(line, "字符串包含无效的 UTF-8 序列"))?;
                Token::Str(s)
            }
            _ => {
                // 裸 token：读到空白或分隔符为止，再尝试数值分类
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_ascii_whitespace() || matches!(c, b'{' | b'}' | b'(' | b')' | b'[' | b']' | b';' | b'"') {
                        break;
                    }
                    self.bump();
                }
                let raw = std::str::from_utf8(&self.src[start..self.pos])
                    .map_err(|_| DictError::syntax(line, "无效的 UTF-8 序列"))?;
                classify_bare(raw)
            }
        };

        Ok(Some((tok, line)))
    }
}

/// 将裸 token 分类为整数、浮点数或词
fn classify_bare(raw: &str) -> Token {
    if let Ok(i) = raw.parse::<i64>() {
        return Token::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Token::Number(f);
    }
    Token::Word(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_lex_entry() {
        let toks = lex("convertToMeters 1.0;");
        assert_eq!(
            toks,
            vec![
                Token::Word("convertToMeters".into()),
                Token::Number(1.0),
                Token::Semi,
            ]
        );
    }

    #[test]
    fn test_lex_integers_and_numbers() {
        let toks = lex("-3 2.5e3 0 1e-4");
        assert_eq!(
            toks,
            vec![
                Token::Int(-3),
                Token::Number(2500.0),
                Token::Int(0),
                Token::Number(1e-4),
            ]
        );
    }

    #[test]
    fn test_lex_comments() {
        let toks = lex("a 1; // 注释\n/* 块\n注释 */ b 2;");
        assert_eq!(toks.len(), 6);
        assert_eq!(toks[3], Token::Word("b".into()));
    }

    #[test]
    fn test_lex_line_numbers() {
        let toks = Lexer::new("a;\nb;\nc;").tokenize().unwrap();
        assert_eq!(toks[0].1, 1);
        assert_eq!(toks[2].1, 2);
        assert_eq!(toks[4].1, 3);
    }

    #[test]
    fn test_lex_punct_adjacent() {
        let toks = lex("(0 0 0)");
        assert_eq!(
            toks,
            vec![
                Token::LParen,
                Token::Int(0),
                Token::Int(0),
                Token::Int(0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_lex_string() {
        let toks = lex("location \"constant/polyMesh\";");
        assert_eq!(toks[1], Token::Str("constant/polyMesh".into()));
    }

    #[test]
    fn test_lex_unterminated_comment() {
        let err = Lexer::new("/* oops").tokenize().unwrap_err();
        assert!(matches!(err, DictError::Syntax { .. }));
    }
}
