use std::fmt;

/// URI 構文エラー
///
/// パース時 (初期構築、または authority を差し替える変更操作) にのみ発生する。
/// パース済みの値に対する操作 (resolve / normalize / relativize / アクセサー) は
/// 失敗しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// scheme-specific part が階層グラマーに一致しない
    HierarchicalPart,
    /// authority が user@host:port 形式に一致しない
    Authority,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::HierarchicalPart => {
                write!(f, "Hierarchical URI part syntax error")
            }
            SyntaxError::Authority => {
                write!(f, "Hierarchical URI authority part syntax error")
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
