//! 参照解決と相対化 (RFC 2396 Section 5.2)
//!
//! ## 概要
//!
//! 相対参照を基底 URI に対して解決します。判定は次の順で最初に一致した
//! 規則が勝ちます:
//!
//! 1. 参照が絶対 URI、または基底が不透明 URI → 参照のコピー
//! 2. 同一文書フラグメント参照 → 基底のフラグメントだけ差し替え
//! 3. 参照がスキームを持つ → 参照のコピー
//! 4. 階層マージ (スキームは基底から、query / fragment は参照から)
//!
//! 逆方向の相対化 ([`relativize`]) と、解決結果をフィンガープリントで
//! メモ化する呼び出し側所有のキャッシュ ([`ResolveCache`]) も提供します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::{ResolveCache, Uri};
//!
//! let base = Uri::parse("http://example.com/a/b/c").unwrap();
//! let reference = Uri::parse("../d").unwrap();
//! assert_eq!(base.resolve(&reference).to_string(), "http://example.com/a/d");
//!
//! // 同じ解決を繰り返すならキャッシュ経由で
//! let cache = ResolveCache::new();
//! assert_eq!(cache.resolve(&base, &reference).to_string(), "http://example.com/a/d");
//! assert_eq!(cache.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use crate::path::normalize_path;
use crate::uri::{RawComponents, Uri};

/// 相対参照 `reference` を基底 `base` に対して解決する
///
/// 決定的で副作用を持たない全域関数。結果が絶対 URI になるのは、どちらかの
/// 入力が絶対 URI だったときに限ります。
pub fn resolve(base: &Uri, reference: &Uri) -> Uri {
    // 規則 1: 参照が絶対、または基底が不透明
    if reference.is_absolute() || base.is_opaque() {
        return reference.clone();
    }

    // 規則 2: 同一文書フラグメント参照
    if is_same_document_fragment(reference) {
        if reference.raw_fragment() == base.raw_fragment() {
            return base.clone();
        }
        return base.with_fragment(reference.raw_fragment());
    }

    // 規則 3: スキーム付き参照は参照のコピー (RFC 3986 Section 5.2.2)
    // この構成では規則 1 に包含されるが、元の判定順を保っている
    if reference.scheme().is_some() {
        return reference.clone();
    }

    // 規則 4: 階層マージ
    let (authority_source, path) = if reference.raw_authority().is_some() {
        (reference, reference.raw_path().unwrap_or("").to_string())
    } else {
        (base, merge_paths(base, reference))
    };

    Uri::from_components(RawComponents {
        scheme: base.scheme().map(str::to_string),
        authority: authority_source.raw_authority().map(str::to_string),
        user_info: authority_source.raw_user_info().map(str::to_string),
        host: authority_source.raw_host().map(str::to_string),
        port: authority_source.port(),
        path: Some(path),
        query: reference.raw_query().map(str::to_string),
        fragment: reference.raw_fragment().map(str::to_string),
    })
}

/// `full` を `base` からの相対参照に変換する
///
/// `full` のパスが `base` のパスで始まる (セグメント境界を考慮しない単純な
/// 前方一致) ならパスの残りを持つ相対参照を返し、そうでなければ `full` の
/// コピーを返します。失敗しない、解決の厳密な逆関数ではないベストエフォート
/// の変換です。
pub fn relativize(full: &Uri, base: &Uri) -> Uri {
    let (full_path, base_path) = match (full.raw_path(), base.raw_path()) {
        (Some(full_path), Some(base_path)) => (full_path, base_path),
        _ => return full.clone(),
    };
    match full_path.strip_prefix(base_path) {
        Some(suffix) => Uri::from_components(RawComponents {
            scheme: None,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: Some(suffix.to_string()),
            query: full.raw_query().map(str::to_string),
            fragment: full.raw_fragment().map(str::to_string),
        }),
        None => full.clone(),
    }
}

/// 同一文書フラグメント参照かどうか
///
/// スキームと authority が未定義、パスが空、クエリが未定義で、フラグメント
/// だけが定義されている参照。
fn is_same_document_fragment(reference: &Uri) -> bool {
    reference.scheme().is_none()
        && reference.raw_authority().is_none()
        && reference.raw_path() == Some("")
        && reference.raw_query().is_none()
        && reference.raw_fragment().is_some()
}

/// 基底パスと参照パスをマージする
fn merge_paths(base: &Uri, reference: &Uri) -> String {
    let reference_path = reference.raw_path().unwrap_or("");
    if reference_path.starts_with('/') {
        // 絶対パス上書き。このとき正規化は行わない
        return reference_path.to_string();
    }
    let base_path = base.raw_path().unwrap_or("");
    let prefix = match base_path.rfind('/') {
        Some(pos) => &base_path[..=pos],
        None => "",
    };
    let merged = format!("{}{}", prefix, reference_path);
    normalize_path(&merged).into_owned()
}

/// 解決結果のメモ化キャッシュ
///
/// (基底のフィンガープリント, 参照のフィンガープリント) をキーに解決結果を
/// 保持する、呼び出し側が所有する明示的なキャッシュ。省略しても正しさは
/// 変わりません。複数スレッドから同時に埋めても後勝ちで安全です。
#[derive(Debug, Default)]
pub struct ResolveCache {
    entries: Mutex<HashMap<(String, String), Uri>>,
}

impl ResolveCache {
    /// 空のキャッシュを作る
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュを参照しつつ解決する
    ///
    /// ヒットすれば保持している結果のコピーを返し、ミスなら [`resolve`] を
    /// 実行して結果を格納します。ロックが毒化していた場合はキャッシュを
    /// 素通りして解決だけ行います。
    pub fn resolve(&self, base: &Uri, reference: &Uri) -> Uri {
        let key = (
            base.fingerprint().to_string(),
            reference.fingerprint().to_string(),
        );
        if let Ok(entries) = self.entries.lock() {
            if let Some(hit) = entries.get(&key) {
                return hit.clone();
            }
        }
        let resolved = resolve(base, reference);
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, resolved.clone());
        }
        resolved
    }

    /// 保持しているエントリ数
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// エントリを持たないかどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// すべてのエントリを破棄する
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
