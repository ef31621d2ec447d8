//! Link configuration for the optional native primitive libraries.

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=XEVAN_SPH_LIB");
    println!("cargo:rerun-if-env-changed=XEVAN_SPH_LIB_DIR");
    println!("cargo:rerun-if-env-changed=XEVAN_AUX_LIB_DIR");

    if env::var_os("CARGO_FEATURE_NATIVE").is_some() {
        if let Ok(dir) = env::var("XEVAN_SPH_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir);
        }
        let lib = env::var("XEVAN_SPH_LIB").unwrap_or_else(|_| "multihash".to_string());
        println!("cargo:rustc-link-lib={}", lib);
    }

    if env::var_os("CARGO_FEATURE_NATIVE_AUX").is_some() {
        if let Ok(dir) = env::var("XEVAN_AUX_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir);
        }
        println!("cargo:rustc-link-lib=xehash");
        println!("cargo:rustc-link-lib=zksnark");
    }
}
