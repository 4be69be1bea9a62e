#![no_main]

use growing_varint::{decode_with_offset, encode, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every frame that decodes must re-encode to exactly the bytes it was read from.
    let mut offset = 0;
    while let Ok(decoded) = decode_with_offset(data, offset) {
        assert_eq!(encode(&decoded.value).unwrap(), &data[offset..decoded.following_offset]);
        offset = decoded.following_offset;
    }

    let config = Config::growing();
    let mut offset = 0;
    while let Ok(decoded) = config.decode_with_offset(data, offset) {
        assert_eq!(
            config.encode(&decoded.value).unwrap(),
            &data[offset..decoded.following_offset]
        );
        offset = decoded.following_offset;
    }
});
