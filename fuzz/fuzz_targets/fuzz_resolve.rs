#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_uri::{ResolveCache, Uri, relativize, resolve};

#[derive(Arbitrary, Debug)]
struct FuzzResolve {
    base: String,
    reference: String,
}

fuzz_target!(|input: FuzzResolve| {
    let base = match Uri::parse(&input.base) {
        Ok(base) => base,
        Err(_) => return,
    };
    let reference = match Uri::parse(&input.reference) {
        Ok(reference) => reference,
        Err(_) => return,
    };

    let resolved = resolve(&base, &reference);
    let _ = resolved.as_str();

    // 絶対参照はそのまま残る
    if reference.is_absolute() {
        assert_eq!(resolved, reference, "absolute reference must win");
    }

    // 相対化は全域
    let _ = relativize(&resolved, &base);

    // キャッシュ経由でも結果は変わらない
    let cache = ResolveCache::new();
    assert_eq!(cache.resolve(&base, &reference), resolved, "cache mismatch");
});
