//! file URI ビュー
//!
//! ## 概要
//!
//! `file` スキームの URI (または相対参照) を、プラットフォーム固有のパス
//! 描画が消費するインタフェース (`path()` / `host()`) に限定して公開する
//! 薄いビューです。区切り文字や UNC / ドライブレターへの変換はこの型の
//! 外の関心事です。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::FileUri;
//!
//! let file = FileUri::parse("file:///etc/hosts").unwrap();
//! assert_eq!(file.path(), "/etc/hosts");
//! assert!(file.is_local());
//!
//! let remote = FileUri::parse("file://nas.local/share/doc%20a.txt").unwrap();
//! assert_eq!(remote.host(), Some("nas.local".to_string()));
//! assert_eq!(remote.path(), "/share/doc a.txt");
//! assert!(!remote.is_local());
//! ```

use core::fmt;

use crate::error::SyntaxError;
use crate::percent::percent_decode;
use crate::uri::Uri;

/// file URI への変換エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileUriError {
    /// スキームが `file` でも未定義でもない
    Scheme,
    /// 不透明 URI はファイルパスを持たない
    Opaque,
    /// URI 自体のパースに失敗した
    Syntax(SyntaxError),
}

impl fmt::Display for FileUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileUriError::Scheme => write!(f, "URI scheme is not file"),
            FileUriError::Opaque => write!(f, "opaque URI cannot be a file URI"),
            FileUriError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FileUriError {}

impl From<SyntaxError> for FileUriError {
    fn from(e: SyntaxError) -> Self {
        FileUriError::Syntax(e)
    }
}

/// file URI (または相対参照) のビュー
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileUri {
    uri: Uri,
}

impl FileUri {
    /// file URI として文字列をパース
    pub fn parse(input: &str) -> Result<Self, FileUriError> {
        FileUri::try_from(Uri::parse(input)?)
    }

    /// 背後の [`Uri`] を取得
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// パスを生のまま取得
    pub fn raw_path(&self) -> &str {
        self.uri.raw_path().unwrap_or("")
    }

    /// パスをデコードして取得
    pub fn path(&self) -> String {
        percent_decode(self.raw_path())
    }

    /// ホストを生のまま取得
    pub fn raw_host(&self) -> Option<&str> {
        self.uri.raw_host()
    }

    /// ホストをデコードして取得
    pub fn host(&self) -> Option<String> {
        self.uri.host()
    }

    /// ローカルファイルを指すかどうか
    ///
    /// ホストが未定義、空、または `localhost` ならローカル扱い。
    pub fn is_local(&self) -> bool {
        match self.uri.raw_host() {
            None => true,
            Some(host) => host.is_empty() || host.eq_ignore_ascii_case("localhost"),
        }
    }

    /// 相対参照を解決して file URI として包み直す
    ///
    /// 解決結果が file URI の形でなくなる (別スキームの絶対参照など) と
    /// 失敗します。
    pub fn resolve(&self, reference: &Uri) -> Result<FileUri, FileUriError> {
        FileUri::try_from(self.uri.resolve(reference))
    }

    /// パスを正規化した file URI を返す
    pub fn normalize(&self) -> FileUri {
        FileUri {
            uri: self.uri.normalize(),
        }
    }
}

impl TryFrom<Uri> for FileUri {
    type Error = FileUriError;

    fn try_from(uri: Uri) -> Result<Self, Self::Error> {
        if let Some(scheme) = uri.scheme() {
            if !scheme.eq_ignore_ascii_case("file") {
                return Err(FileUriError::Scheme);
            }
        }
        if uri.is_opaque() {
            return Err(FileUriError::Opaque);
        }
        Ok(FileUri { uri })
    }
}

impl fmt::Display for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri.as_str())
    }
}
