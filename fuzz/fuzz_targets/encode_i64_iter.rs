#![no_main]

use growing_varint::{Config, GrowingVarIntBuf, GrowingVarIntBufMut};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = Config::flat();
    let mut dst = vec![];
    let mut decoded = vec![];
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = i64::from_le_bytes(buf);
        decoded.push(n);
        dst.put_growing_varint(&n, &config).unwrap();
    }

    let mut src = &dst[..];
    let iter = src.iter_growing_varint::<i64>(&config);
    for (decoded, truth) in iter.zip(decoded.iter()) {
        assert_eq!(decoded.unwrap(), *truth);
    }

    // check that the iterator is exhausted
    assert!(src.iter_growing_varint::<i64>(&config).next().is_none());
});
