//! 参照解決と相対化のプロパティテスト

use proptest::prelude::*;
use shiguredo_uri::{ResolveCache, Uri, relativize, resolve};

// ========================================
// Strategy 定義
// ========================================

// URI 構成要素の生成は pbt クレートを使用
use pbt::{abs_path, absolute_uri, fragment, hostname, path_segment, query, scheme};

// ドットセグメントを含まない相対パス
fn rel_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(path_segment(), 1..=4).prop_map(|segments| segments.join("/"))
}

// ========================================
// 規則 1: 絶対参照と不透明基底
// ========================================

// 絶対参照は基底に関係なくそのまま残る
proptest! {
    #[test]
    fn prop_resolve_absolute_reference_wins(
        base_str in prop_oneof![absolute_uri(), rel_path()],
        reference_str in absolute_uri(),
    ) {
        let base = Uri::parse(&base_str).unwrap();
        let reference = Uri::parse(&reference_str).unwrap();
        let resolved = resolve(&base, &reference);
        prop_assert_eq!(&resolved, &reference);
    }
}

// 不透明な基底に対する解決は参照のコピー
proptest! {
    #[test]
    fn prop_resolve_opaque_base_copies_reference(
        s in scheme(),
        op in "[a-z0-9:]{1,12}",
        p in rel_path(),
    ) {
        let base = Uri::parse(&format!("{}:{}", s, op)).unwrap();
        prop_assert!(base.is_opaque());
        let reference = Uri::parse(&p).unwrap();
        let resolved = resolve(&base, &reference);
        prop_assert_eq!(&resolved, &reference);
    }
}

// ========================================
// 規則 2: 同一文書フラグメント参照
// ========================================

// フラグメントだけの参照は基底のフラグメントを差し替える
proptest! {
    #[test]
    fn prop_resolve_same_document_fragment(
        h in hostname(),
        p in abs_path(),
        q in query(),
        f1 in fragment(),
        f2 in fragment(),
    ) {
        let base = Uri::parse(&format!("http://{}{}?{}#{}", h, p, q, f1)).unwrap();
        let reference = Uri::parse(&format!("#{}", f2)).unwrap();
        let resolved = resolve(&base, &reference);
        prop_assert_eq!(resolved.raw_fragment(), Some(f2.as_str()));
        prop_assert_eq!(resolved.raw_path(), base.raw_path());
        prop_assert_eq!(resolved.raw_query(), base.raw_query());
        let expected = format!("http://{}{}?{}#{}", h, p, q, f2);
        prop_assert_eq!(resolved.to_string(), expected);

        // フラグメントまで一致する参照は基底のコピー
        let same = Uri::parse(&format!("#{}", f1)).unwrap();
        let copied = resolve(&base, &same);
        prop_assert_eq!(&copied, &base);
    }
}

// ========================================
// 規則 4: 階層マージ
// ========================================

// 解決結果は基底のスキームと authority を引き継ぐ
proptest! {
    #[test]
    fn prop_resolve_keeps_base_origin(
        s in scheme(),
        h in hostname(),
        p1 in abs_path(),
        p2 in rel_path(),
    ) {
        let base = Uri::parse(&format!("{}://{}{}", s, h, p1)).unwrap();
        let reference = Uri::parse(&p2).unwrap();
        let resolved = resolve(&base, &reference);
        prop_assert!(resolved.is_absolute());
        prop_assert_eq!(resolved.scheme(), base.scheme());
        prop_assert_eq!(resolved.raw_host(), base.raw_host());
        prop_assert_eq!(resolved.raw_query(), None);
    }
}

// 相対パスは基底パスの最後のセグメントを置き換える
proptest! {
    #[test]
    fn prop_resolve_merges_relative_path(h in hostname(), seg in path_segment()) {
        let base = Uri::parse(&format!("http://{}/a/b/c", h)).unwrap();
        let cases = [
            (seg.clone(), format!("http://{}/a/b/{}", h, seg)),
            (format!("./{}", seg), format!("http://{}/a/b/{}", h, seg)),
            (format!("../{}", seg), format!("http://{}/a/{}", h, seg)),
            (format!("../../{}", seg), format!("http://{}/{}", h, seg)),
        ];
        for (input, expected) in cases {
            let reference = Uri::parse(&input).unwrap();
            prop_assert_eq!(resolve(&base, &reference).to_string(), expected);
        }
    }
}

// query と fragment は参照から引き継がれる
proptest! {
    #[test]
    fn prop_resolve_query_fragment_from_reference(
        h in hostname(),
        seg in path_segment(),
        q in query(),
        f in fragment(),
    ) {
        let base = Uri::parse(&format!("http://{}/a/b/c?old#old", h)).unwrap();
        let reference = Uri::parse(&format!("{}?{}#{}", seg, q, f)).unwrap();
        let resolved = resolve(&base, &reference);
        prop_assert_eq!(resolved.raw_query(), Some(q.as_str()));
        prop_assert_eq!(resolved.raw_fragment(), Some(f.as_str()));
        let expected = format!("http://{}/a/b/{}?{}#{}", h, seg, q, f);
        prop_assert_eq!(resolved.to_string(), expected);
    }
}

// authority を持つ参照は自分のパスをそのまま使う
proptest! {
    #[test]
    fn prop_resolve_authority_reference(
        s in scheme(),
        h1 in hostname(),
        h2 in hostname(),
        p in abs_path(),
        q in query(),
    ) {
        let base = Uri::parse(&format!("{}://{}/x/y", s, h1)).unwrap();
        let reference = Uri::parse(&format!("//{}{}?{}", h2, p, q)).unwrap();
        let resolved = resolve(&base, &reference);
        let expected = format!("{}://{}{}?{}", s, h2, p, q);
        prop_assert_eq!(resolved.to_string(), expected);
        prop_assert_eq!(resolved.scheme(), Some(s.as_str()));
        prop_assert_eq!(resolved.raw_host(), Some(h2.as_str()));
    }
}

// 絶対パス参照は基底パスを上書きし、正規化は行わない
proptest! {
    #[test]
    fn prop_resolve_absolute_path_override(h in hostname(), seg in path_segment()) {
        let base = Uri::parse(&format!("http://{}/a/b/c?k", h)).unwrap();
        let over = Uri::parse(&format!("/{}", seg)).unwrap();
        let expected = format!("http://{}/{}", h, seg);
        prop_assert_eq!(resolve(&base, &over).to_string(), expected);

        // 上書きでは `.` セグメントが残る
        let dotted = Uri::parse(&format!("/./{}", seg)).unwrap();
        let expected = format!("http://{}/./{}", h, seg);
        prop_assert_eq!(resolve(&base, &dotted).to_string(), expected);
    }
}

// 相対基底に対する解決は相対のまま
proptest! {
    #[test]
    fn prop_resolve_relative_base_stays_relative(p1 in rel_path(), p2 in rel_path()) {
        let base = Uri::parse(&p1).unwrap();
        let reference = Uri::parse(&p2).unwrap();
        let resolved = resolve(&base, &reference);
        prop_assert!(resolved.is_relative());
    }
}

// ========================================
// 相対化
// ========================================

// 相対化した参照を解決し直すと元の URI に戻る
proptest! {
    #[test]
    fn prop_resolve_relativize_roundtrip(h in hostname(), p in rel_path(), q in query()) {
        let base = Uri::parse(&format!("http://{}/dir/", h)).unwrap();
        let full = Uri::parse(&format!("http://{}/dir/{}?{}", h, p, q)).unwrap();
        let related = relativize(&full, &base);
        prop_assert!(related.is_relative());
        prop_assert_eq!(related.raw_path(), Some(p.as_str()));
        prop_assert_eq!(related.raw_query(), Some(q.as_str()));
        let back = resolve(&base, &related);
        prop_assert_eq!(&back, &full);
    }
}

// 前方一致しないパスは full のコピーが返る
proptest! {
    #[test]
    fn prop_resolve_relativize_miss(h in hostname(), p in rel_path()) {
        let full = Uri::parse(&format!("http://{}/x/{}", h, p)).unwrap();
        let base = Uri::parse(&format!("http://{}/unrelated/", h)).unwrap();
        let related = relativize(&full, &base);
        prop_assert_eq!(&related, &full);
    }
}

// ========================================
// 解決キャッシュ
// ========================================

// キャッシュ経由の解決は直接の解決と常に一致する
proptest! {
    #[test]
    fn prop_resolve_cache_consistent(
        h in hostname(),
        refs in proptest::collection::vec(rel_path(), 1..=6),
    ) {
        let base = Uri::parse(&format!("http://{}/a/b/c", h)).unwrap();
        let cache = ResolveCache::new();
        for r in &refs {
            let reference = Uri::parse(r).unwrap();
            let direct = resolve(&base, &reference);
            let cached = cache.resolve(&base, &reference);
            prop_assert_eq!(&cached, &direct);
            // 2 回目はキャッシュヒット
            let again = cache.resolve(&base, &reference);
            prop_assert_eq!(&again, &direct);
        }
        prop_assert!(cache.len() <= refs.len());
        cache.clear();
        prop_assert!(cache.is_empty());
    }
}

// ========================================
// Panic 安全性
// ========================================

// パースできた任意のペアで解決と相対化が panic しない
proptest! {
    #[test]
    fn prop_resolve_never_panics(a in "\\PC{0,48}", b in "\\PC{0,48}") {
        if let (Ok(base), Ok(reference)) = (Uri::parse(&a), Uri::parse(&b)) {
            let resolved = resolve(&base, &reference);
            let _ = resolved.as_str();
            let _ = relativize(&resolved, &base);
        }
    }
}

// ========================================
// エッジケース
// ========================================

#[test]
fn prop_resolve_empty_reference() {
    // 空参照は基底パスの最後の `/` までとマージされ、query は引き継がない
    let base = Uri::parse("http://a/b/c?q#f").unwrap();
    let empty = Uri::parse("").unwrap();
    assert_eq!(resolve(&base, &empty).to_string(), "http://a/b/");
}

#[test]
fn prop_resolve_query_only_reference() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    let reference = Uri::parse("?y").unwrap();
    assert_eq!(resolve(&base, &reference).to_string(), "http://a/b/c/?y");
}

#[test]
fn prop_resolve_excess_dot_dot() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    let reference = Uri::parse("../../../g").unwrap();
    assert_eq!(resolve(&base, &reference).to_string(), "http://a/../g");
}
