// crates/fc_dict/src/lib.rs

//! FoamCase 字典格式层
//!
//! 案例文件使用的字典/记录文本语法的读写实现。
//! 该语法是本仓库所有案例文件（网格描述、边界声明、场文件）的
//! 统一载体，本层只负责词法/语法与值树，不理解网格或场的语义。
//!
//! # 核心类型
//!
//! - [`DictValue`]: 值树节点（字、字符串、数、列表、子字典、量纲向量）
//! - [`Dictionary`]: 保序的键值条目表（patch 声明顺序有语义）
//! - [`CaseFile`]: 可选文件头 + 顶层内容（字典或匿名列表）
//!
//! # 操作
//!
//! - [`DictParser`]: 递归下降解析，首个语法错误即失败
//! - [`DictWriter`]: 规范化缩进重新序列化
//!
//! # 往返律
//!
//! 对任意成功解析的文本 t：`parse(write(parse(t))) == parse(t)`。
//!
//! # 示例
//!
//! ```
//! use fc_dict::{DictParser, DictWriter};
//!
//! let text = "convertToMeters 1.0;\nvertices ( (0 0 0) (1 0 0) );\n";
//! let file = DictParser::parse_str(text).unwrap();
//! let out = DictWriter::to_string(&file).unwrap();
//! let again = DictParser::parse_str(&out).unwrap();
//! assert_eq!(file, again);
//! ```

pub mod error;
pub mod parser;
pub mod token;
pub mod value;
pub mod writer;

// 重导出核心类型
pub use error::{DictError, DictResult};
pub use parser::DictParser;
pub use token::{Lexer, Token};
pub use value::{Body, CaseFile, DictValue, Dictionary, FileHeader};
pub use writer::DictWriter;
