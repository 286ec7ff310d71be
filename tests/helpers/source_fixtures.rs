//! Common Juttle sources for tests.

use juttle::ModuleMap;

pub const EMIT_TO_TABLE: &str = "emit -limit 10 | view table";

/// A imports B and C, both of which import D.
pub const DIAMOND_MAIN: &str = r#"
import "b" as b;
import "c" as c;
emit -limit b.count + c.count | view table
"#;

pub fn diamond_modules() -> ModuleMap {
    [
        ("b", "import \"d\" as d;\nexport const count = d.base;"),
        ("c", "import \"d\" as d;\nexport const count = d.base * 2;"),
        ("d", "export const base = 1;"),
    ]
    .into_iter()
    .collect()
}

/// A module importing itself.
pub fn self_importing_modules() -> ModuleMap {
    [("m", "import \"m\" as me;\nexport sub top() { head 1 }")]
        .into_iter()
        .collect()
}

/// A four-level import chain: main → l1 → l2 → l3.
pub fn chain_modules() -> ModuleMap {
    [
        ("l1", "import \"l2\" as l2; export const v = l2.v;"),
        ("l2", "import \"l3\" as l3; export const v = l3.v;"),
        ("l3", "export const v = 3;"),
    ]
    .into_iter()
    .collect()
}
