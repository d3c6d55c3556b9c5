//! Build script for protocol handler registration.
//!
//! Every entry in `protocols/` becomes a module of the generated registry and
//! must define `process_<name>_request`.

use std::env;
use std::path::Path;

fn main() {
	let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
	let out_dir = env::var("OUT_DIR").unwrap();

	protoreg_gen::build_support::generate_for_build(
		Path::new(&manifest_dir).join("protocols"),
		Path::new(&out_dir).join("protocols.rs"),
	);
}
