//! CMake driver.

use std::path::PathBuf;
use std::process::Command;

use super::error::ExecuteError;
use super::util::{ExecOptions, run};
use super::BuildTool;
use crate::lifecycle::Layout;
use crate::settings::BuildType;

/// Runs `cmake` for one layout.
#[derive(Debug, Clone)]
pub struct CMake {
    program: PathBuf,
    source_folder: PathBuf,
    build_folder: PathBuf,
    package_folder: PathBuf,
    toolchain: Option<PathBuf>,
    build_type: BuildType,
    jobs: usize,
    opts: ExecOptions,
}

impl CMake {
    pub fn new(layout: &Layout, build_type: BuildType) -> Self {
        let toolchain = layout.generators_folder.join("conan_toolchain.cmake");
        Self {
            program: PathBuf::from("cmake"),
            source_folder: layout.source_folder.clone(),
            build_folder: layout.build_folder.clone(),
            package_folder: layout.package_folder.clone(),
            toolchain: toolchain.is_file().then_some(toolchain),
            build_type,
            jobs: num_cpus::get(),
            opts: ExecOptions::default(),
        }
    }

    /// Use a specific cmake binary.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the number of parallel build jobs.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn options(mut self, opts: ExecOptions) -> Self {
        self.opts = opts;
        self
    }

    pub(crate) fn configure_command(&self, variables: &[(String, String)]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-S")
            .arg(&self.source_folder)
            .arg("-B")
            .arg(&self.build_folder)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type));
        if let Some(toolchain) = &self.toolchain {
            cmd.arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()));
        }
        for (name, value) in variables {
            cmd.arg(format!("-D{}={}", name, value));
        }
        cmd
    }

    pub(crate) fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--build")
            .arg(&self.build_folder)
            .args(["--config", &self.build_type.to_string()])
            .args(["--parallel", &self.jobs.to_string()]);
        cmd
    }

    pub(crate) fn install_command(&self, component: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--install")
            .arg(&self.build_folder)
            .args(["--config", &self.build_type.to_string()])
            .arg("--prefix")
            .arg(&self.package_folder)
            .args(["--component", component]);
        cmd
    }
}

impl BuildTool for CMake {
    fn configure(&mut self, variables: &[(String, String)]) -> Result<(), ExecuteError> {
        if !self.opts.dry_run {
            std::fs::create_dir_all(&self.build_folder)?;
        }
        run(&mut self.configure_command(variables), "configuring", self.opts)
    }

    fn build(&mut self) -> Result<(), ExecuteError> {
        run(&mut self.build_command(), "building", self.opts)
    }

    fn install(&mut self, component: &str) -> Result<(), ExecuteError> {
        run(
            &mut self.install_command(component),
            &format!("installing {}", component),
            self.opts,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::command_line;

    fn layout() -> Layout {
        Layout {
            source_folder: PathBuf::from("/src/qilang"),
            build_folder: PathBuf::from("/src/qilang/build/linux-x86_64-gcc-release/Release"),
            generators_folder: PathBuf::from(
                "/src/qilang/build/linux-x86_64-gcc-release/Release/generators",
            ),
            package_folder: PathBuf::from("/pkg"),
        }
    }

    #[test]
    fn test_configure_command() {
        let cmake = CMake::new(&layout(), BuildType::Release);
        let cmd = cmake.configure_command(&[("QILANG_VERSION".into(), "1.0-dev.abc".into())]);
        assert_eq!(
            command_line(&cmd),
            "cmake -S /src/qilang -B /src/qilang/build/linux-x86_64-gcc-release/Release \
             -DCMAKE_BUILD_TYPE=Release -DQILANG_VERSION=1.0-dev.abc"
        );
    }

    #[test]
    fn test_build_command() {
        let cmake = CMake::new(&layout(), BuildType::Debug).jobs(4);
        assert_eq!(
            command_line(&cmake.build_command()),
            "cmake --build /src/qilang/build/linux-x86_64-gcc-release/Release --config Debug --parallel 4"
        );
    }

    #[test]
    fn test_install_command() {
        let cmake = CMake::new(&layout(), BuildType::Release);
        assert_eq!(
            command_line(&cmake.install_command("devel")),
            "cmake --install /src/qilang/build/linux-x86_64-gcc-release/Release --config Release \
             --prefix /pkg --component devel"
        );
    }

    #[test]
    fn test_zero_jobs_clamped() {
        let cmake = CMake::new(&layout(), BuildType::Release).jobs(0);
        assert!(command_line(&cmake.build_command()).ends_with("--parallel 1"));
    }

    #[test]
    fn test_dry_run_never_spawns() {
        let mut cmake = CMake::new(&layout(), BuildType::Release)
            .program("/nonexistent/cmake")
            .options(ExecOptions {
                dry_run: true,
                verbose: false,
            });
        assert!(cmake.configure(&[]).is_ok());
        assert!(cmake.build().is_ok());
        assert!(cmake.install("runtime").is_ok());
    }

    #[test]
    fn test_missing_cmake_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut l = layout();
        l.build_folder = dir.path().join("build");
        let mut cmake = CMake::new(&l, BuildType::Release).program("/nonexistent/cmake");
        assert!(matches!(cmake.build(), Err(ExecuteError::Spawn { .. })));
    }
}
