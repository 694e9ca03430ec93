// Generate Kotlin or Swift sources for the storage bridge.
//
// Usage: cargo run -p nativestore-core --features gen-bindings --bin gen_bindings -- <kotlin|swift>

#[cfg(feature = "gen-bindings")]
fn main() {
    use camino::Utf8Path;
    use uniffi::{KotlinBindingGenerator, SwiftBindingGenerator};

    let language = std::env::args().nth(1).unwrap_or_else(|| "kotlin".to_string());

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let manifest_path = Utf8Path::new(&manifest_dir);

    let udl_file = manifest_path.join("src/api.udl");
    let config_file = manifest_path.join("uniffi.toml");
    let config = config_file.exists().then_some(config_file.as_path());
    let out_dir = manifest_path.join(format!("target/generated-sources/uniffi/{}", language));

    let result = match language.as_str() {
        "kotlin" => uniffi_bindgen::generate_bindings(
            udl_file.as_path(),
            config,
            KotlinBindingGenerator,
            Some(out_dir.as_path()),
            None,
            None,
            false,
        ),
        "swift" => uniffi_bindgen::generate_bindings(
            udl_file.as_path(),
            config,
            SwiftBindingGenerator,
            Some(out_dir.as_path()),
            None,
            None,
            false,
        ),
        other => {
            eprintln!(
                "Unknown binding language '{}' (expected kotlin or swift)",
                other
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Failed to generate {} bindings: {:#}", language, e);
        std::process::exit(1);
    }
    println!("Generated {} bindings in {}", language, out_dir);
}

#[cfg(not(feature = "gen-bindings"))]
fn main() {}
