use chrono::Utc;
use std::process::Command;

fn git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string())
}

fn main() {
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let hash = git_hash().unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MONITORSTACK_BUILD_TIME={}", build_time);
    println!("cargo:rustc-env=MONITORSTACK_GIT_HASH={}", hash);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
