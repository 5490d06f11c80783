fn main() {
    // `RUST_LOG_PRETTY=1` switches the log output to the multi-line format
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");
    let pretty = std::env::var_os("RUST_LOG_PRETTY").is_some_and(|value| value == "1");
    if pretty {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
