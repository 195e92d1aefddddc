//! パスセグメント正規化 (RFC  2396 Section 5.2 / RFC 3986 Section 5.2.4 相当)
//!
//! ## 概要
//!
//! `.` / `..` セグメントの除去を提供します。セグメント文字列の中間リストは
//! 作らず、文字列に並行するセグメント開始インデックスの配列に対する
//! 3 パス処理 (分割 / ドット除去 / 結合) で行います。除去はインデックスを
//! 番兵値に書き換えるだけなので、セグメントあたり O(1) です。
//!
//! 対にならない先頭の `..` は除去せずに残します。また、相対パスの最初の
//! セグメントが `:` を含む場合は先頭に `.` セグメントを補い、再パース時に
//! スキームと誤認されることを防ぎます。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_uri::path::normalize_path;
//!
//! assert_eq!(normalize_path("/./path/../path3/path2"), "/path3/path2");
//! assert_eq!(normalize_path("a/b/../c"), "a/c");
//! assert_eq!(normalize_path("../../g"), "../../g");
//! ```

use std::borrow::Cow;

/// 除去済みセグメントを示す番兵
const REMOVED: usize = usize::MAX;

/// パスを正規化する
///
/// 冪等: `normalize_path(normalize_path(p)) == normalize_path(p)`。
/// `.` / `..` セグメントも連続スラッシュも含まない入力は、割り当てなしで
/// そのまま返します。
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if !needs_normalization(path) {
        return Cow::Borrowed(path);
    }

    let bytes = path.as_bytes();
    let absolute = path.starts_with('/');

    let mut segs = split_segments(bytes);
    remove_dots(bytes, &mut segs);
    let leading_dot = needs_leading_dot(bytes, &segs, absolute);

    Cow::Owned(join(path, &segs, absolute, leading_dot))
}

/// 正規化が必要かどうか
///
/// `.` / `..` セグメント、連続スラッシュのいずれかがあれば true。
fn needs_normalization(path: &str) -> bool {
    let bytes = path.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    // 先頭スラッシュ列 (2 個以上は要正規化)
    while pos < len && bytes[pos] == b'/' {
        pos += 1;
    }
    if pos > 1 {
        return true;
    }

    while pos < len {
        if is_dot(bytes, pos) || is_dot_dot(bytes, pos) {
            return true;
        }
        // セグメント末尾へ
        while pos < len && bytes[pos] != b'/' {
            pos += 1;
        }
        // スラッシュ列をスキップ
        let mut slashes = 0;
        while pos < len && bytes[pos] == b'/' {
            pos += 1;
            slashes += 1;
        }
        if slashes > 1 {
            return true;
        }
    }

    false
}

/// セグメント開始インデックスを記録する
///
/// 連続するスラッシュはひとつの区切りとして扱う。
fn split_segments(bytes: &[u8]) -> Vec<usize> {
    let len = bytes.len();
    let mut segs = Vec::new();
    let mut pos = 0;

    // 先頭スラッシュ列を読み飛ばす
    while pos < len && bytes[pos] == b'/' {
        pos += 1;
    }

    while pos < len {
        segs.push(pos);
        while pos < len && bytes[pos] != b'/' {
            pos += 1;
        }
        while pos < len && bytes[pos] == b'/' {
            pos += 1;
        }
    }

    segs
}

/// ドットセグメント除去
///
/// 左から右への 1 パス。`.` は単独で除去する。`..` は後方走査で直近の
/// 未除去セグメントを探し、それが `..` でなければ対で除去する。対が
/// 見つからない `..` はそのまま残る。
fn remove_dots(bytes: &[u8], segs: &mut [usize]) {
    for i in 0..segs.len() {
        if is_dot(bytes, segs[i]) {
            segs[i] = REMOVED;
        } else if is_dot_dot(bytes, segs[i]) {
            let mut j = i;
            while j > 0 {
                j -= 1;
                if segs[j] != REMOVED {
                    if !is_dot_dot(bytes, segs[j]) {
                        segs[i] = REMOVED;
                        segs[j] = REMOVED;
                    }
                    break;
                }
            }
        }
    }
}

/// 先頭ドットガードが必要か
///
/// 相対パスで、最初の生存セグメントが空でなく `:` を含む場合に true。
fn needs_leading_dot(bytes: &[u8], segs: &[usize], absolute: bool) -> bool {
    if absolute {
        return false;
    }
    let first = match segs.iter().find(|&&start| start != REMOVED) {
        Some(&start) => start,
        None => return false,
    };
    let end = segment_end(bytes, first);
    first < end && bytes[first..end].contains(&b':')
}

/// 生存セグメントを結合する
///
/// 各セグメントの直後にスラッシュがあった場合はそれも保存する。
fn join(path: &str, segs: &[usize], absolute: bool, leading_dot: bool) -> String {
    let bytes = path.as_bytes();
    let mut result = String::with_capacity(path.len() + 2);

    if absolute {
        result.push('/');
    }
    if leading_dot {
        result.push_str("./");
    }

    for &start in segs {
        if start == REMOVED {
            continue;
        }
        let end = segment_end(bytes, start);
        result.push_str(&path[start..end]);
        if end < bytes.len() {
            result.push('/');
        }
    }

    result
}

/// セグメントの終了位置 (次のスラッシュまたは文字列末尾)
fn segment_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() && bytes[pos] != b'/' {
        pos += 1;
    }
    pos
}

fn is_dot(bytes: &[u8], start: usize) -> bool {
    start < bytes.len() && bytes[start] == b'.' && segment_end(bytes, start) == start + 1
}

fn is_dot_dot(bytes: &[u8], start: usize) -> bool {
    start + 1 < bytes.len()
        && bytes[start] == b'.'
        && bytes[start + 1] == b'.'
        && segment_end(bytes, start) == start + 2
}
