//! Authority パース (RFC 2396 Section 3.2)
//!
//! ## 概要
//!
//! authority 文字列を `(user@)?(host)?(:port)?` の形で user_info / host /
//! port に分解します。user_info は最後の `@` より前、port は最後の `:` より
//! 後の数字列 (IPv6 ブラケット内を除く) です。`:` を含むホストは `[...]` で
//! 囲まれていなければなりません。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::authority::parse_authority;
//!
//! let (user_info, host, port) = parse_authority("user:pass@example.com:8042").unwrap();
//! assert_eq!(user_info, Some("user:pass".to_string()));
//! assert_eq!(host, Some("example.com".to_string()));
//! assert_eq!(port, Some(8042));
//! ```

use crate::error::SyntaxError;

/// authority 文字列を (user_info, host, port) に分解する
///
/// host は authority が定義されていれば常に `Some` (空文字列を含む)。
/// 形式に一致しない場合は [`SyntaxError::Authority`]。
pub fn parse_authority(
    raw: &str,
) -> Result<(Option<String>, Option<String>, Option<u16>), SyntaxError> {
    // user_info は最後の `@` より前
    let (user_info, rest) = match raw.rfind('@') {
        Some(at) => (Some(&raw[..at]), &raw[at + 1..]),
        None => (None, raw),
    };

    let (host, port) = split_host_port(rest)?;

    Ok((
        user_info.map(str::to_string),
        Some(host.to_string()),
        port,
    ))
}

/// host と port を分割する
///
/// ブラケットなしで `:` を含む host は host:port 分割と区別できないため
/// 構文エラーとする。
fn split_host_port(input: &str) -> Result<(&str, Option<u16>), SyntaxError> {
    // IPv6 ブラケット形式
    if input.starts_with('[') {
        let close = match input.find(']') {
            Some(close) => close,
            None => return Err(SyntaxError::Authority),
        };
        let host = &input[..=close];
        let rest = &input[close + 1..];
        if rest.is_empty() {
            return Ok((host, None));
        }
        let digits = match rest.strip_prefix(':') {
            Some(digits) => digits,
            None => return Err(SyntaxError::Authority),
        };
        return Ok((host, Some(parse_port(digits)?)));
    }

    match input.rfind(':') {
        Some(colon) => {
            let digits = &input[colon + 1..];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                // port に見えない → `:` がホストに残るため不正
                return Err(SyntaxError::Authority);
            }
            let host = &input[..colon];
            if host.contains(':') {
                return Err(SyntaxError::Authority);
            }
            Ok((host, Some(parse_port(digits)?)))
        }
        None => Ok((input, None)),
    }
}

/// port の数字列をパースする
fn parse_port(digits: &str) -> Result<u16, SyntaxError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SyntaxError::Authority);
    }
    digits.parse::<u16>().map_err(|_| SyntaxError::Authority)
}
