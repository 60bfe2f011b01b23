//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates the Kotlin and Swift bindings the Android and iOS apps use to
//! drive the recipe search store.
//!
//! ## Usage
//!
//! Generate Kotlin bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_finder.so --language kotlin --out-dir ./bindings
//! ```
//!
//! Generate Swift bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_finder.dylib --language swift --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
