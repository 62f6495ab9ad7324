/// Build version stamped by `build.rs` (git describe, or the package version).
pub const GIT_VERSION: &str = env!("GIT_VERSION");
