//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// URI 構成要素の生成 (RFC 2396/RFC 3986)
// ========================================

/// スキーム: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub fn scheme() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9+.-]{0,7}".prop_map(|s| s)
}

/// ホスト名 (reg-name)
pub fn hostname() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,16}".prop_map(|s| s),
        "[a-z0-9]{1,8}\\.[a-z]{2,4}".prop_map(|s| s),
        "[a-z0-9]{1,8}\\.[a-z0-9]{1,8}\\.[a-z]{2,4}".prop_map(|s| s),
    ]
}

/// IPv4 アドレス
pub fn ipv4() -> impl Strategy<Value = String> {
    (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
        .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d))
}

/// IPv6 アドレス (代表的な表記のみ)
pub fn ipv6() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("::1".to_string()),
        Just("2001:db8::1".to_string()),
        Just("fe80::a:b:c:d".to_string()),
        Just("2001:db8:85a3::8a2e:370:7334".to_string()),
    ]
}

/// ポート番号
pub fn port() -> impl Strategy<Value = u16> {
    1u16..=65535
}

/// userinfo (`@` と `/` を含まない)
pub fn userinfo() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,8}".prop_map(|s| s),
        "[a-z0-9]{1,8}:[a-z0-9]{1,8}".prop_map(|s| s),
    ]
}

/// パスセグメント (`.` と `..` を除外)
pub fn path_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,12}".prop_filter("`.` と `..` は除外", |s| s != "." && s != "..")
}

/// 絶対パス: "/" segment *( "/" segment )
pub fn abs_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(path_segment(), 1..=4)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

/// ドットセグメント (`.` / `..`) を混在させた相対パス
pub fn dotted_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            path_segment(),
            Just(".".to_string()),
            Just("..".to_string()),
        ],
        1..=6,
    )
    .prop_map(|segments| segments.join("/"))
}

/// クエリ (`#` を含まない)
pub fn query() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9=&]{1,16}".prop_map(|s| s),
        "[a-z]{1,8}=[a-z0-9]{1,8}".prop_map(|s| s),
    ]
}

/// フラグメント
pub fn fragment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,12}".prop_map(|s| s)
}

/// 絶対 URI: scheme "://" host abs_path
pub fn absolute_uri() -> impl Strategy<Value = String> {
    (scheme(), hostname(), abs_path()).prop_map(|(s, h, p)| format!("{}://{}{}", s, h, p))
}
