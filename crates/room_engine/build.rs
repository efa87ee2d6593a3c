// build.rs
// Build-time GLSL validation for the runtime-compiled shaders in /shader

use std::env;
use std::path::PathBuf;
use std::process::Command;

const STAGES: [&str; 6] = ["vert", "frag", "geom", "tesc", "tese", "comp"];

fn main() {
    // Tell cargo to rerun this build script if any shader files change
    println!("cargo:rerun-if-changed=../../shader");
    println!("cargo:rerun-if-env-changed=SKIP_SHADERS");

    if env::var("SKIP_SHADERS").is_ok() {
        eprintln!("info: Skipping shader validation (SKIP_SHADERS set)");
        return;
    }

    // Shaders are compiled by the driver at startup; validation here is a
    // convenience and only runs when glslangValidator is on PATH.
    let validator = "glslangValidator";
    if Command::new(validator).arg("--version").output().is_err() {
        eprintln!("info: {validator} not found, shader validation skipped");
        return;
    }

    let shader_dir = PathBuf::from("../../shader");
    let entries = match std::fs::read_dir(&shader_dir) {
        Ok(entries) => entries,
        Err(_) => {
            eprintln!("info: No shader directory found at: {:?}", shader_dir);
            return;
        }
    };

    let mut checked = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        let is_shader = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| STAGES.contains(&ext));
        if !is_shader {
            continue;
        }

        match Command::new(validator).arg(&path).output() {
            Ok(output) if output.status.success() => checked += 1,
            Ok(output) => {
                let log = String::from_utf8_lossy(&output.stdout);
                for line in log.lines().filter(|line| line.contains("ERROR")) {
                    println!("cargo:warning={}: {}", path.display(), line);
                }
            }
            Err(e) => println!("cargo:warning=Failed to run {validator} for {}: {e}", path.display()),
        }
    }

    eprintln!("info: Validated {checked} shader(s)");
}
