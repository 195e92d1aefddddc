#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_uri::Uri;

fuzz_target!(|data: &[u8]| {
    // UTF-8 文字列として解釈できる場合のみテスト
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(uri) = Uri::parse(s) {
            // パースに成功した入力はバイト単位で復元できる
            assert_eq!(uri.as_str(), s, "render mismatch");

            // パース成功したら各種操作を実行
            let _ = uri.scheme();
            let _ = uri.raw_scheme_specific_part();
            let _ = uri.scheme_specific_part();
            let _ = uri.raw_authority();
            let _ = uri.authority();
            let _ = uri.raw_user_info();
            let _ = uri.user_info();
            let _ = uri.raw_host();
            let _ = uri.host();
            let _ = uri.port();
            let _ = uri.raw_path();
            let _ = uri.path();
            let _ = uri.raw_query();
            let _ = uri.query();
            let _ = uri.raw_fragment();
            let _ = uri.fragment();
            let _ = uri.is_opaque();
            let _ = uri.is_absolute();
            let _ = uri.is_relative();
            let _ = uri.fingerprint();

            // 正規化は全域で、冪等
            let normalized = uri.normalize();
            let twice = normalized.normalize();
            assert_eq!(normalized, twice, "normalize not idempotent");

            // 派生はパニックしない
            let _ = uri.with_fragment(Some("f"));
            let _ = uri.with_query(None);
            let _ = uri.with_scheme(None);
        }
    }
});
