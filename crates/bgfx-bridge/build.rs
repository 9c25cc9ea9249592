use std::env;

const DEFAULT_LIB: &str = "bgfx_bridge";

fn main() {
    println!("cargo:rerun-if-env-changed=BGFX_BRIDGE_LIB");
    println!("cargo:rerun-if-env-changed=BGFX_BRIDGE_LIB_DIR");

    // Without the `native` feature nothing is linked; the crate is usable with
    // any `NativeApi` implementation.
    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Ok(dir) = env::var("BGFX_BRIDGE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }

    let lib = env::var("BGFX_BRIDGE_LIB").unwrap_or_else(|_| DEFAULT_LIB.to_string());
    println!("cargo:rustc-link-lib={lib}");

    match env::var("CARGO_CFG_TARGET_OS").as_deref() {
        Ok("macos") => {
            println!("cargo:rustc-link-lib=framework=Cocoa");
            println!("cargo:rustc-link-lib=framework=OpenGL");
            println!("cargo:rustc-link-lib=GLEW");
            println!("cargo:rustc-link-lib=c++");
        }
        Ok("linux") => {
            println!("cargo:rustc-link-lib=GLEW");
            println!("cargo:rustc-link-lib=GL");
            println!("cargo:rustc-link-lib=stdc++");
        }
        Ok("windows") => {
            println!("cargo:rustc-link-lib=glew32");
            println!("cargo:rustc-link-lib=opengl32");
        }
        _ => {}
    }
}
