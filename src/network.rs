//! ネットワークターゲットビュー (RFC 9112 Section 3.2)
//!
//! ## 概要
//!
//! HTTP 系メッセージのリクエストターゲットと同じ 4 形式
//! (origin-form / absolute-form / authority-form / asterisk-form) に
//! URI 文字列を分類し、server-based な authority へのアクセスを提供する
//! 薄いビューです。生のまま保持するので、どの形式も入力をバイト単位で
//! 再現できます。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::{NetworkUri, TargetForm};
//!
//! let origin = NetworkUri::parse("/where?q=now").unwrap();
//! assert!(origin.is_origin_form());
//! assert_eq!(origin.to_string(), "/where?q=now");
//!
//! let absolute = NetworkUri::parse("http://user@example.com:8080/p?q").unwrap();
//! assert_eq!(absolute.form(), TargetForm::Absolute);
//! assert_eq!(absolute.host(), Some("example.com"));
//! assert_eq!(absolute.port(), Some(8080));
//!
//! let authority = NetworkUri::parse("example.com:443").unwrap();
//! assert!(authority.is_authority_form());
//! assert_eq!(authority.to_string(), "example.com:443");
//! ```

use core::fmt;

use crate::authority::parse_authority;
use crate::error::SyntaxError;
use crate::uri::Uri;

/// リクエストターゲットの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetForm {
    /// origin-form: absolute-path [ "?" query ]
    /// 例: /path/to/resource?query=value
    Origin,
    /// absolute-form: スキーム付き URI
    /// 例: http://example.com/path
    Absolute,
    /// authority-form: uri-host [ ":" port ]
    /// 例: example.com:443
    Authority,
    /// asterisk-form: "*"
    Asterisk,
}

/// ネットワークターゲットへの変換エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkUriError {
    /// 空のターゲット
    Empty,
    /// origin-form に authority が現れた
    UnexpectedAuthority,
    /// server-based なホストがない
    MissingHost,
    /// URI 自体のパースに失敗した
    Syntax(SyntaxError),
}

impl fmt::Display for NetworkUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkUriError::Empty => write!(f, "empty network target"),
            NetworkUriError::UnexpectedAuthority => {
                write!(f, "origin-form target must not have an authority")
            }
            NetworkUriError::MissingHost => write!(f, "network target requires a host"),
            NetworkUriError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NetworkUriError {}

impl From<SyntaxError> for NetworkUriError {
    fn from(e: SyntaxError) -> Self {
        NetworkUriError::Syntax(e)
    }
}

/// 分類済みネットワークターゲット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkUri {
    form: TargetForm,
    /// origin-form / absolute-form のときだけ保持する
    uri: Option<Uri>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    raw_authority: Option<String>,
}

impl NetworkUri {
    /// ターゲット文字列をパースして形式を分類する
    ///
    /// - `*` → asterisk-form
    /// - `/` 始まり → origin-form (authority があってはならない)
    /// - `://` を含む → absolute-form (server-based なホストが必須)
    /// - それ以外 → authority-form (`host[:port]`、ホスト必須)
    pub fn parse(target: &str) -> Result<Self, NetworkUriError> {
        if target.is_empty() {
            return Err(NetworkUriError::Empty);
        }

        if target == "*" {
            return Ok(NetworkUri {
                form: TargetForm::Asterisk,
                uri: None,
                user_info: None,
                host: None,
                port: None,
                raw_authority: None,
            });
        }

        if target.starts_with('/') {
            let uri = Uri::parse(target)?;
            if uri.raw_authority().is_some() {
                return Err(NetworkUriError::UnexpectedAuthority);
            }
            return Ok(NetworkUri {
                form: TargetForm::Origin,
                uri: Some(uri),
                user_info: None,
                host: None,
                port: None,
                raw_authority: None,
            });
        }

        if target.contains("://") {
            let uri = Uri::parse(target)?;
            match uri.raw_host() {
                Some(host) if !host.is_empty() => {}
                _ => return Err(NetworkUriError::MissingHost),
            }
            let user_info = uri.raw_user_info().map(str::to_string);
            let host = uri.raw_host().map(str::to_string);
            let port = uri.port();
            let raw_authority = uri.raw_authority().map(str::to_string);
            return Ok(NetworkUri {
                form: TargetForm::Absolute,
                uri: Some(uri),
                user_info,
                host,
                port,
                raw_authority,
            });
        }

        // authority-form にパスは現れない
        if target.contains('/') {
            return Err(NetworkUriError::Syntax(SyntaxError::Authority));
        }
        let (user_info, host, port) = parse_authority(target)?;
        match host.as_deref() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(NetworkUriError::MissingHost),
        }
        Ok(NetworkUri {
            form: TargetForm::Authority,
            uri: None,
            user_info,
            host,
            port,
            raw_authority: Some(target.to_string()),
        })
    }

    /// 形式を取得
    pub fn form(&self) -> TargetForm {
        self.form
    }

    /// origin-form かどうか
    pub fn is_origin_form(&self) -> bool {
        self.form == TargetForm::Origin
    }

    /// absolute-form かどうか
    pub fn is_absolute_form(&self) -> bool {
        self.form == TargetForm::Absolute
    }

    /// authority-form かどうか
    pub fn is_authority_form(&self) -> bool {
        self.form == TargetForm::Authority
    }

    /// asterisk-form かどうか
    pub fn is_asterisk_form(&self) -> bool {
        self.form == TargetForm::Asterisk
    }

    /// 背後の [`Uri`] を取得 (origin-form / absolute-form のみ)
    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    /// スキームを取得 (absolute-form のみ)
    pub fn scheme(&self) -> Option<&str> {
        self.uri.as_ref().and_then(|uri| uri.scheme())
    }

    /// authority を生のまま取得
    pub fn authority(&self) -> Option<&str> {
        self.raw_authority.as_deref()
    }

    /// user-information を生のまま取得
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// ホストを生のまま取得
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// ポート番号を取得
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// パスを生のまま取得 (origin-form / absolute-form のみ)
    pub fn path(&self) -> Option<&str> {
        self.uri.as_ref().and_then(|uri| uri.raw_path())
    }

    /// クエリを生のまま取得 (origin-form / absolute-form のみ)
    pub fn query(&self) -> Option<&str> {
        self.uri.as_ref().and_then(|uri| uri.raw_query())
    }

    /// フラグメントを生のまま取得 (origin-form / absolute-form のみ)
    pub fn fragment(&self) -> Option<&str> {
        self.uri.as_ref().and_then(|uri| uri.raw_fragment())
    }
}

impl fmt::Display for NetworkUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            TargetForm::Asterisk => f.write_str("*"),
            TargetForm::Authority => f.write_str(self.raw_authority.as_deref().unwrap_or("")),
            TargetForm::Origin | TargetForm::Absolute => match &self.uri {
                Some(uri) => f.write_str(uri.as_str()),
                None => Ok(()),
            },
        }
    }
}
