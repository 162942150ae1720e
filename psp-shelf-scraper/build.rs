use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("embedded_credentials.rs");

    let api_key = env::var("PSP_SHELF_RAWG_KEY").ok();

    let key: &[u8] = b"psp-shelf-obfuscation-4e1d";

    let mut code = String::new();
    code.push_str(&format!(
        "const OBFUSCATION_KEY: &[u8] = &{:?};\n\n",
        key
    ));

    match &api_key {
        Some(k) if !k.is_empty() => {
            let encoded = xor_encode(k.as_bytes(), key);
            code.push_str(&format!(
                "const EMBEDDED_API_KEY: Option<&[u8]> = Some(&{:?});\n",
                encoded.as_slice()
            ));
        }
        _ => {
            code.push_str("const EMBEDDED_API_KEY: Option<&[u8]> = None;\n");
        }
    }

    fs::write(&dest_path, code).unwrap();

    println!("cargo:rerun-if-env-changed=PSP_SHELF_RAWG_KEY");
}

fn xor_encode(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, b)| b ^ key[i % key.len()])
        .collect()
}
