fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // Shown by `urdraw --version`
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=URDRAW_BUILD_DATE={}", build_date);
}
