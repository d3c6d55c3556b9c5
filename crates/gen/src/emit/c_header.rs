use super::Template;
use crate::discovery::DiscoveredHandler;
use crate::error::Result;

const GUARD: &str = "_GENERATED_H_";

/// C header consumed by the download library.
///
/// Every handler must link against
/// `mget_err process_<id>_request(dinfo*, dp_callback, bool*, mget_option*, void*)`.
pub struct CHeader;

impl Template for CHeader {
	fn preamble(&self) -> String {
		format!("/* Generated by protoreg. Do not edit. */\n#ifndef {GUARD}\n#define {GUARD}\n\n")
	}

	fn declaration(&self, handler: &DiscoveredHandler) -> Result<String> {
		Ok(format!(
			"extern mget_err {}(dinfo*, dp_callback, bool*, mget_option*, void*);",
			handler.id.symbol()
		))
	}

	fn opening(&self, _handlers: &[DiscoveredHandler], capacity: usize) -> String {
		format!(
			"\n\nhash_table* collect_handlers()\n{{\n    hash_table* tbl = hash_table_create({capacity}, NULL);\n    if (tbl)\n    {{\n"
		)
	}

	fn registration(&self, handler: &DiscoveredHandler) -> String {
		format!(
			"        hash_table_insert(tbl, \"{}\", {}, sizeof(void*));",
			handler.id,
			handler.id.symbol()
		)
	}

	fn closing(&self) -> String {
		format!("\n    }}\n\n    return tbl;\n}}\n\n#endif /* {GUARD} */\n")
	}
}
