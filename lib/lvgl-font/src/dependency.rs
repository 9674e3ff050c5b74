//! Probing for the external executables the generators rely on.

use std::{
    error, fmt,
    path::PathBuf,
    process::{Command, Stdio},
};

/// An external executable that must be reachable before any font is generated.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Dependency {
    /// Human readable name used in diagnostics.
    pub name: &'static str,
    /// The program to launch.
    pub program: PathBuf,
    /// The argument passed when probing, which must make the program exit successfully.
    pub probe_arg: &'static str,
    /// Whether the probe prints a version string worth logging.
    pub reports_version: bool,
    /// Instructions printed when the dependency is missing.
    pub install_hint: &'static str,
}

impl Dependency {
    /// The `lv_font_conv` converter, launched as `program`.
    pub fn lv_font_conv(program: impl Into<PathBuf>) -> Self {
        Self {
            name: "lv_font_conv",
            program: program.into(),
            probe_arg: "--help",
            reports_version: false,
            install_hint: "Install it with: npm i lv_font_conv -g",
        }
    }

    /// The Node.js runtime `lv_font_conv` runs on, launched as `program`.
    pub fn node(program: impl Into<PathBuf>) -> Self {
        Self {
            name: "Node.js",
            program: program.into(),
            probe_arg: "--version",
            reports_version: true,
            install_hint: "Install Node.js v14 or newer from https://nodejs.org",
        }
    }

    /// Runs the probe, returning its trimmed standard output if it exited successfully.
    ///
    /// Launch failures are reported as [`None`] rather than as an error.
    pub fn probe(&self) -> Option<String> {
        let output = Command::new(&self.program)
            .arg(self.probe_arg)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

/// Checks every dependency in order, stopping at the first one that is unavailable.
///
/// # Errors
///
/// Returns [`MissingDependency`] describing the first dependency that failed its probe.
pub fn check_all(dependencies: &[Dependency]) -> Result<(), MissingDependency> {
    for dependency in dependencies {
        let Some(output) = dependency.probe() else {
            return Err(MissingDependency {
                dependency: dependency.clone(),
            });
        };

        if dependency.reports_version {
            log::info!("{} version: {output}", dependency.name);
        } else {
            log::info!("{} is available", dependency.name);
        }
    }

    Ok(())
}

/// A required external executable could not be launched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingDependency {
    /// The dependency that failed its probe.
    pub dependency: Dependency,
}

impl fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} not found (tried {:?})\n{}",
            self.dependency.name, self.dependency.program, self.dependency.install_hint
        )
    }
}

impl error::Error for MissingDependency {}
