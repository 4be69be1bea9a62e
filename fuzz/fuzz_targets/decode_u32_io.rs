#![no_main]

use growing_varint::{read_growing_varint, read_growing_varint_buf, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = Config::growing();
    // attempts to decode all the data as a u32 error are ok, panics are not
    let mut src = data;
    while !src.is_empty() {
        if let Err(_) = read_growing_varint::<u32>(&mut src, &config) {
            break;
        }
    }

    // do buffered reader
    let mut src = data;
    let mut src = std::io::BufReader::new(&mut src);
    while let Ok(_) = read_growing_varint_buf::<u32>(&mut src, &config) {}
});
