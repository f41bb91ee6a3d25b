#![cfg(test)]

use std::io::Read;

#[test]
fn test_all() {
    match std::fs::read_dir("./corpus/decode") {
        Err(e) => {
            eprintln!(
                "Failed to open dir: {e}, curr dir: {}",
                std::env::current_dir().unwrap().to_string_lossy()
            );
        }
        Ok(dir) => {
            let options = cborwire::DecodeOptions::default();
            for entry in dir.flatten() {
                let path = entry.path();
                if path.is_file()
                    && let Ok(mut file) = std::fs::File::open(&path)
                {
                    let mut buffer = Vec::new();
                    if file.read_to_end(&mut buffer).is_ok()
                        && let Ok((value, len)) =
                            cborwire::decode::parse_with::<cborwire::Value>(&buffer, &options)
                    {
                        _ = format!("{value:?}");
                        assert_eq!(cborwire::item_length(&buffer, &options), Ok(len));
                    }
                }
            }
        }
    }
}
