#![no_main]

use growing_varint::{Config, GrowingVarIntBuf, GrowingVarIntBufMut};
use libfuzzer_sys::fuzz_target;
use num_bigint::{BigInt, Sign};

fuzz_target!(|data: &[u8]| {
    let config = Config::growing();
    let mut dst = vec![];
    let mut values = vec![];
    for chunk in data.chunks(13) {
        let sign = if chunk[0] & 1 == 1 { Sign::Minus } else { Sign::Plus };
        let v = BigInt::from_bytes_le(sign, &chunk[1..]);
        dst.put_growing_varint(&v, &config).unwrap();
        values.push(v);
    }

    let mut src = &dst[..];
    for v in values {
        assert_eq!(src.get_growing_varint::<BigInt>(&config).unwrap(), v);
    }
    assert!(src.is_empty());
});
