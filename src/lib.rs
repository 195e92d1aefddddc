//! # shiguredo_uri
//!
//! 依存なしの汎用 URI 値型ライブラリ (RFC 2396 / RFC 3986)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **不変値**: 変更系の操作はすべて新しいインスタンスを返す
//! - **生のまま保持**: パーセントエンコードはアクセサ呼び出し時にだけ
//!   デコードし、フィールドを変更しない限り文字列表現は入力をバイト単位で
//!   再現する
//!
//! ## 使い方
//!
//! ### パースとアクセサ
//!
//! ```rust
//! use shiguredo_uri::Uri;
//!
//! let uri = Uri::parse("http://user@example.com:8080/a%20b/c?k=v#frag").unwrap();
//! assert_eq!(uri.scheme(), Some("http"));
//! assert_eq!(uri.host(), Some("example.com".to_string()));
//! assert_eq!(uri.port(), Some(8080));
//! assert_eq!(uri.raw_path(), Some("/a%20b/c"));
//! assert_eq!(uri.path(), Some("/a b/c".to_string()));
//! assert_eq!(uri.to_string(), "http://user@example.com:8080/a%20b/c?k=v#frag");
//! ```
//!
//! ### 参照解決と正規化
//!
//! ```rust
//! use shiguredo_uri::Uri;
//!
//! let base = Uri::parse("http://example.com/a/b/c").unwrap();
//! let reference = Uri::parse("../d").unwrap();
//! assert_eq!(base.resolve(&reference).to_string(), "http://example.com/a/d");
//!
//! let messy = Uri::parse("http://example.com/a/./b/../c").unwrap();
//! assert_eq!(messy.normalize().to_string(), "http://example.com/a/c");
//! ```

pub mod authority;
pub mod builder;
mod error;
pub mod file;
pub mod network;
pub mod path;
pub mod percent;
pub mod resolve;
pub mod uri;

pub use builder::UriBuilder;
pub use error::SyntaxError;
pub use file::{FileUri, FileUriError};
pub use network::{NetworkUri, NetworkUriError, TargetForm};
pub use path::normalize_path;
pub use percent::{percent_decode, percent_decode_bytes, percent_encode};
pub use resolve::{relativize, resolve, ResolveCache};
pub use uri::Uri;
