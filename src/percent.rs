//! パーセントエンコーディング/デコーディング (RFC 3986 Section 2.1)
//!
//! ## 概要
//!
//! URI コンポーネントのパーセントエンコードと、全域 (total) なデコードを提供します。
//! デコードは決して失敗しません: 不正なエスケープはリテラルとしてそのまま通し、
//! レガシーな `%uXXXX` コードポイントエスケープも受理します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::percent::{percent_decode, percent_encode};
//!
//! // デコード
//! assert_eq!(percent_decode("hello%20world"), "hello world");
//! assert_eq!(percent_decode("%E6%97%A5%E6%9C%AC%E8%AA%9E"), "日本語");
//!
//! // 不正なエスケープはそのまま通る
//! assert_eq!(percent_decode("100%"), "100%");
//!
//! // レガシーなコードポイントエスケープ
//! assert_eq!(percent_decode("%u65E5"), "日");
//!
//! // エンコード
//! assert_eq!(percent_encode("hello world"), "hello%20world");
//! ```

/// パーセントエンコーディング対象外の文字 (unreserved characters)
/// RFC 3986 Section 2.3
fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'.' || c == b'_' || c == b'~'
}

/// パーセントエンコーディング
///
/// RFC 3986 Section 2.1 に基づき、unreserved 文字以外をパーセントエンコードします。
///
/// # 例
///
/// ```rust
/// use shiguredo_uri::percent::percent_encode;
///
/// assert_eq!(percent_encode("hello world"), "hello%20world");
/// assert_eq!(percent_encode("foo=bar&baz=qux"), "foo%3Dbar%26baz%3Dqux");
/// assert_eq!(percent_encode("日本語"), "%E6%97%A5%E6%9C%AC%E8%AA%9E");
/// ```
pub fn percent_encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if is_unreserved(byte) {
            result.push(byte as char);
        } else {
            result.push('%');
            result.push(to_hex_char(byte >> 4));
            result.push(to_hex_char(byte & 0x0F));
        }
    }
    result
}

/// パーセントエンコーディング (パス用)
///
/// パス区切り文字 `/` はエンコードしません。
pub fn percent_encode_path(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if is_unreserved(byte) || byte == b'/' {
            result.push(byte as char);
        } else {
            result.push('%');
            result.push(to_hex_char(byte >> 4));
            result.push(to_hex_char(byte & 0x0F));
        }
    }
    result
}

/// パーセントエンコーディング (クエリ用)
///
/// `=` と `&` はエンコードしません。
pub fn percent_encode_query(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if is_unreserved(byte) || byte == b'=' || byte == b'&' {
            result.push(byte as char);
        } else {
            result.push('%');
            result.push(to_hex_char(byte >> 4));
            result.push(to_hex_char(byte & 0x0F));
        }
    }
    result
}

fn to_hex_char(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'A' + nibble - 10) as char,
        _ => unreachable!(),
    }
}

fn from_hex_char(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// 16 進数 4 桁をコードポイントとして読む
fn decode_hex4(digits: &[u8]) -> Option<u32> {
    let mut value: u32 = 0;
    for &d in digits {
        value = (value << 4) | u32::from(from_hex_char(d)?);
    }
    Some(value)
}

/// パーセントデコーディング (全域関数)
///
/// 左から右へ走査し、`%XX` はバイトとして、`%uXXXX` はレガシーな
/// コードポイントエスケープとしてデコードします。連続する `%XX` バイト列は
/// UTF-8 として解釈し、UTF-8 を成さないバイトはコードポイントとして
/// 決定的に昇格します (実行環境のロケールに依存しない)。
/// 不正なエスケープはリテラルとしてそのまま通します。
///
/// # 例
///
/// ```rust
/// use shiguredo_uri::percent::percent_decode;
///
/// assert_eq!(percent_decode("hello%20world"), "hello world");
/// assert_eq!(
///     percent_decode("%D0%BF%D1%80%D0%BE%D0%B2%D0%B5%D1%80%D0%BA%D0%B0"),
///     "проверка"
/// );
/// // 単独の高位バイトはコードポイントとして昇格される
/// assert_eq!(percent_decode("%D0"), "\u{D0}");
/// // 不正なエスケープはそのまま
/// assert_eq!(percent_decode("%G5"), "%G5");
/// ```
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pending: Vec<u8> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'%' {
            // 次の `%` までのリテラル区間
            let run_end = bytes[pos..]
                .iter()
                .position(|&b| b == b'%')
                .map(|p| pos + p)
                .unwrap_or(bytes.len());
            flush_decoded_bytes(&mut pending, &mut result);
            result.push_str(&input[pos..run_end]);
            pos = run_end;
            continue;
        }

        // レガシー %uXXXX エスケープ
        if pos + 5 < bytes.len() && bytes[pos + 1] == b'u' {
            let decoded = decode_hex4(&bytes[pos + 2..pos + 6]).and_then(char::from_u32);
            if let Some(c) = decoded {
                flush_decoded_bytes(&mut pending, &mut result);
                result.push(c);
                pos += 6;
                continue;
            }
        }

        // %XX エスケープ
        if pos + 2 < bytes.len() {
            let high = from_hex_char(bytes[pos + 1]);
            let low = from_hex_char(bytes[pos + 2]);
            if let (Some(high), Some(low)) = (high, low) {
                pending.push((high << 4) | low);
                pos += 3;
                continue;
            }
        }

        // 不正なエスケープ: `%` をリテラルとして通す
        flush_decoded_bytes(&mut pending, &mut result);
        result.push('%');
        pos += 1;
    }

    flush_decoded_bytes(&mut pending, &mut result);
    result
}

/// デコード済みバイト列を UTF-8 として出力へ流す
///
/// UTF-8 を成さないバイトは 1 バイトずつコードポイントとして昇格する。
fn flush_decoded_bytes(pending: &mut Vec<u8>, out: &mut String) {
    if pending.is_empty() {
        return;
    }
    let mut rest: &[u8] = pending;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                out.push_str(text);
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                    out.push_str(text);
                }
                let bad_len = e.error_len().unwrap_or(rest.len() - valid);
                for &byte in &rest[valid..valid + bad_len] {
                    out.push(char::from(byte));
                }
                rest = &rest[valid + bad_len..];
            }
        }
    }
    pending.clear();
}

/// パーセントデコーディング (バイト列として、全域関数)
///
/// `%XX` は生のバイトをそのまま出力します。`%uXXXX` は歴史的な境界値テーブル
/// (<0x80 は 1 バイト、<0x400 は 2 バイト、<0x8000 は 3 バイト、<0x200000 は
/// 4 バイト) でバイト列化します。0x400..0x800 の境界は正規の UTF-8 境界
/// (0x800) とは異なるため、このバイト列は UTF-8 として不正な場合があります。
///
/// # 例
///
/// ```rust
/// use shiguredo_uri::percent::percent_decode_bytes;
///
/// assert_eq!(percent_decode_bytes("a%20b"), b"a b");
/// assert_eq!(percent_decode_bytes("%FF"), [0xFF]);
/// ```
pub fn percent_decode_bytes(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'%' {
            result.push(bytes[pos]);
            pos += 1;
            continue;
        }

        if pos + 5 < bytes.len() && bytes[pos + 1] == b'u' {
            if let Some(cp) = decode_hex4(&bytes[pos + 2..pos + 6]) {
                encode_code_point(cp, &mut result);
                pos += 6;
                continue;
            }
        }

        if pos + 2 < bytes.len() {
            let high = from_hex_char(bytes[pos + 1]);
            let low = from_hex_char(bytes[pos + 2]);
            if let (Some(high), Some(low)) = (high, low) {
                result.push((high << 4) | low);
                pos += 3;
                continue;
            }
        }

        result.push(b'%');
        pos += 1;
    }

    result
}

/// コードポイントを UTF-8 風のバイト列へ変換 (レガシーエンコーダー)
///
/// 境界値テーブルは歴史的なもの (<0x80, <0x400, <0x8000, <0x200000) を
/// そのまま保持する。0x400..0x800 と 0x8000..0x10000 の境界は正規の
/// UTF-8 境界とは異なる。
fn encode_code_point(cp: u32, out: &mut Vec<u8>) {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x400 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x8000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x20_0000 {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        // 範囲外は置換文字
        out.extend_from_slice("\u{FFFD}".as_bytes());
    }
}
