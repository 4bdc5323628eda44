//! Host platform identification

use sysinfo::System;

/// Platform string attached to check results as the `platform` tag,
/// e.g. `Linux-6.8.0-45-generic-x86_64`
pub fn platform() -> String {
    platform_string(
        System::name().as_deref(),
        System::kernel_version().as_deref(),
        std::env::consts::ARCH,
    )
}

/// Host name, or `localhost` when it cannot be determined
pub fn hostname() -> String {
    System::host_name().unwrap_or_else(|| "localhost".to_string())
}

fn platform_string(os: Option<&str>, kernel: Option<&str>, arch: &str) -> String {
    let os = os.unwrap_or(std::env::consts::OS);
    match kernel {
        Some(kernel) if !kernel.is_empty() => format!("{}-{}-{}", os, kernel, arch),
        _ => format!("{}-{}", os, arch),
    }
    .replace(' ', "_")
}
