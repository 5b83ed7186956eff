#![allow(clippy::doc_markdown)] // Generated file contains OPT_LEVEL without backticks

use std::sync::LazyLock;

include!(concat!(env!("OUT_DIR"), "/built.rs"));

/// Package version, suffixed with the git commit (and `-dirty` for uncommitted changes)
/// when the binary was built from a git checkout.
pub static VERSION: LazyLock<String> = LazyLock::new(|| match (GIT_COMMIT_HASH_SHORT, GIT_DIRTY) {
    (Some(hash), Some(true)) => format!("{PKG_VERSION}-{hash}-dirty"),
    (Some(hash), _) => format!("{PKG_VERSION}-{hash}"),
    (None, _) => PKG_VERSION.to_string(),
});
