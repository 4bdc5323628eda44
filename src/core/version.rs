//! Build metadata captured by the build script

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    env!("MONITORSTACK_BUILD_TIME")
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    env!("MONITORSTACK_GIT_HASH")
}

/// Long version line shown by `--version`
pub fn long_version() -> String {
    format!(
        "{} ({} built {})",
        env!("CARGO_PKG_VERSION"),
        git_hash(),
        build_time()
    )
}
