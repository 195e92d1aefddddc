#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_uri::{percent_decode, percent_decode_bytes, percent_encode};

fuzz_target!(|data: &[u8]| {
    // UTF-8 文字列として解釈できる場合のみテスト
    if let Ok(s) = std::str::from_utf8(data) {
        // デコードは全域: どんな入力でも panic せず結果を返す
        let _ = percent_decode(s);
        let _ = percent_decode_bytes(s);

        // エンコードした結果をデコードしてラウンドトリップ確認
        let encoded = percent_encode(s);
        let decoded = percent_decode(&encoded);
        assert_eq!(decoded, s, "roundtrip failed");

        // バイト列レベルでも元のバイトに戻る
        let bytes = percent_decode_bytes(&encoded);
        assert_eq!(bytes, s.as_bytes(), "byte roundtrip failed");
    }
});
