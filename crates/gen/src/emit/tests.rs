use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use regex::Regex;

use super::*;
use crate::error::GenerateError;
use crate::ident::{HandlerIdentifier, IdentError};

const HTTP_FTP_HEADER: &str = r#"/* Generated by protoreg. Do not edit. */
#ifndef _GENERATED_H_
#define _GENERATED_H_

extern mget_err process_ftp_request(dinfo*, dp_callback, bool*, mget_option*, void*);
extern mget_err process_http_request(dinfo*, dp_callback, bool*, mget_option*, void*);

hash_table* collect_handlers()
{
    hash_table* tbl = hash_table_create(64, NULL);
    if (tbl)
    {
        hash_table_insert(tbl, "ftp", process_ftp_request, sizeof(void*));
        hash_table_insert(tbl, "http", process_http_request, sizeof(void*));
    }

    return tbl;
}

#endif /* _GENERATED_H_ */
"#;

fn handler(name: &str) -> DiscoveredHandler {
	DiscoveredHandler {
		id: HandlerIdentifier::new(name).unwrap(),
		path: PathBuf::from("protocols").join(name),
	}
}

fn handlers(names: &[&str]) -> Vec<DiscoveredHandler> {
	names.iter().map(|name| handler(name)).collect()
}

#[test]
fn c_header_for_http_and_ftp() {
	let text = render(&CHeader, &handlers(&["ftp", "http"]), 64).unwrap();
	assert_eq!(text, HTTP_FTP_HEADER);
}

#[test]
fn c_header_declares_and_registers_each_handler_once() {
	let names = ["dict", "ftp", "gopher", "http", "https", "s3"];
	let text = render(&CHeader, &handlers(&names), 64).unwrap();

	let decl = Regex::new(r"(?m)^extern mget_err (\w+)\(dinfo\*, dp_callback, bool\*, mget_option\*, void\*\);$").unwrap();
	let insert = Regex::new(r#"(?m)^        hash_table_insert\(tbl, "(\w+)", (\w+), sizeof\(void\*\)\);$"#).unwrap();

	let declared: Vec<_> = decl
		.captures_iter(&text)
		.map(|c| HandlerIdentifier::from_symbol(&c[1]).expect("generated symbol parses back"))
		.collect();
	let registered: Vec<_> = insert
		.captures_iter(&text)
		.map(|c| {
			let key = c[1].to_string();
			let target = HandlerIdentifier::from_symbol(&c[2]).expect("generated symbol parses back");
			assert_eq!(key, target.as_str(), "key and function address disagree");
			target
		})
		.collect();

	assert_eq!(declared.len(), names.len());
	assert_eq!(registered, declared);
	let recovered: Vec<_> = declared.iter().map(HandlerIdentifier::as_str).collect();
	assert_eq!(recovered, names);
}

#[test]
fn c_header_without_handlers_builds_empty_table() {
	let text = render(&CHeader, &[], 64).unwrap();
	assert!(!text.contains("extern mget_err"));
	assert!(!text.contains("hash_table_insert"));
	assert!(text.contains("hash_table* tbl = hash_table_create(64, NULL);"));
	assert!(text.contains("    return tbl;\n}"));
	assert!(text.ends_with("#endif /* _GENERATED_H_ */\n"));
}

#[test]
fn capacity_is_emitted_verbatim() {
	let text = render(&CHeader, &handlers(&["http"]), 3).unwrap();
	assert!(text.contains("hash_table_create(3, NULL)"));
}

#[test]
fn rust_module_registers_each_handler() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	fs::write(dir.path().join("ftp.rs"), "").unwrap();
	fs::create_dir(dir.path().join("http")).unwrap();
	fs::write(dir.path().join("http").join("mod.rs"), "").unwrap();

	let found = vec![
		DiscoveredHandler {
			id: HandlerIdentifier::new("ftp").unwrap(),
			path: dir.path().join("ftp.rs"),
		},
		DiscoveredHandler {
			id: HandlerIdentifier::new("http").unwrap(),
			path: dir.path().join("http"),
		},
	];
	let text = render(&RustModule, &found, 64).unwrap();

	let ftp_root = format!("{:?}", dir.path().join("ftp.rs").display().to_string());
	let http_root = format!("{:?}", dir.path().join("http").join("mod.rs").display().to_string());
	assert!(text.contains(&format!("#[path = {ftp_root}]\npub mod ftp;")));
	assert!(text.contains(&format!("#[path = {http_root}]\npub mod http;")));
	assert!(text.contains("pub const HANDLER_NAMES: &[&str] = &[\"ftp\", \"http\"];"));
	assert!(text.contains("HandlerTable::try_with_capacity(64)?;"));
	assert!(text.contains("\ttbl.insert(\"ftp\", ftp::process_ftp_request);"));
	assert!(text.contains("\ttbl.insert(\"http\", http::process_http_request);"));
	assert!(text.ends_with("\t::core::option::Option::Some(tbl)\n}\n"));
}

#[test]
fn rust_module_survives_handlers_named_after_prelude_items() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	let found: Vec<_> = ["Option", "Some", "core", "str"]
		.into_iter()
		.map(|name| {
			let path = dir.path().join(format!("{name}.rs"));
			fs::write(&path, "").unwrap();
			DiscoveredHandler {
				id: HandlerIdentifier::new(name).unwrap(),
				path,
			}
		})
		.collect();
	let text = render(&RustModule, &found, 4).unwrap();

	assert!(text.contains("pub mod Option;"));
	assert!(text.contains("\ttbl.insert(\"Option\", Option::process_Option_request);"));
	assert!(text.contains(
		"pub fn collect_handlers() -> ::core::option::Option<::protoreg_dispatch::HandlerTable> {"
	));
	assert!(text.ends_with("\t::core::option::Option::Some(tbl)\n}\n"));

	// Outside the handler modules' own lines, only absolute paths are emitted.
	let relative = Regex::new(r#"(?m)(^|[^:\w"])(Option|Some)(<|\()"#).unwrap();
	assert!(!relative.is_match(&text), "{text}");
	assert!(!text.contains("-> core::"));
}

#[test]
fn rust_module_rejects_keywords() {
	let err = render(&RustModule, &handlers(&["type"]), 64).unwrap_err();
	match err {
		GenerateError::InvalidIdentifier { reason, .. } => {
			assert_eq!(reason, IdentError::Keyword("type".into()));
		}
		other => panic!("expected keyword rejection, got {other:?}"),
	}
	// Keywords are fine as C symbol fragments.
	assert!(render(&CHeader, &handlers(&["type"]), 64).is_ok());
}

#[test]
fn rust_module_requires_module_root_for_directories() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	fs::create_dir(dir.path().join("ftp")).unwrap();
	let found = [DiscoveredHandler {
		id: HandlerIdentifier::new("ftp").unwrap(),
		path: dir.path().join("ftp"),
	}];

	let err = render(&RustModule, &found, 64).unwrap_err();
	assert!(matches!(err, GenerateError::MissingModule { .. }), "{err:?}");
}

#[test]
fn kind_is_inferred_from_extension() {
	assert_eq!(ArtifactKind::infer(Path::new("protocols.h")), ArtifactKind::CHeader);
	assert_eq!(ArtifactKind::infer(Path::new("out/protocols.rs")), ArtifactKind::RustModule);
	assert_eq!(ArtifactKind::infer(Path::new("protocols")), ArtifactKind::CHeader);
}
