use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let project_dir = temp_dir.path().canonicalize().unwrap();
        Self {
            _temp_dir: temp_dir,
            project_dir,
        }
    }

    fn write_file(&self, path: &str, content: &str) {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(file_path, content).unwrap();
    }

    fn root(&self) -> &Path {
        &self.project_dir
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_wrapgen"))
            .args(args)
            .current_dir(&self.project_dir)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_version_has_three_components() {
    let test = CliTest::new();

    let output = test.run(&["--version"]);

    assert!(output.status.success());
    let version = stdout(&output);
    let version = version.trim().strip_prefix("wrapgen ").unwrap();
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
    assert_eq!(version.split('.').count(), 3);
}

#[test]
fn test_wrong_out_extension_exits_without_output() {
    let test = CliTest::new();
    test.write_file("Matrix.pxd", "");

    let output = test.run(&["--out", "wrapped.cpp", "Matrix.pxd"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("out file has wrong extension: '.pyx' required"));
    assert!(!stdout(&output).contains("STATUS"));
    assert!(!test.root().join("wrapped.cpp").exists());
}

#[test]
fn test_no_declarations_exits_with_error() {
    let test = CliTest::new();
    test.write_file("notes.txt", "");

    let output = test.run(&["--out", "wrapped.pyx", "notes.txt"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("warning: ignoring notes.txt"));
    assert!(stderr.contains("no pxd input files specified"));
    assert!(!test.root().join("wrapped.pyx").exists());
}

#[test]
fn test_missing_out_exits_with_error() {
    let test = CliTest::new();
    test.write_file("Matrix.pxd", "");

    let output = test.run(&["Matrix.pxd"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("need --out argument"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let test = CliTest::new();
    test.write_file("wrapgen.toml", "[build]\nunknown = 1\n");

    let output = test.run(&["--out", "wrapped.pyx", "Matrix.pxd"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to parse wrapgen.toml"));
}

#[cfg(unix)]
const SHELL_TOOLCHAIN: &str = r#"
[parser]
command = "sh"
args = ["-c", "echo '{\"declarations\": [{\"name\": \"Matrix\"}]}'", "parser"]

[generator]
command = "sh"
args = ["-c", "cat > \"$1\"; echo '{\"include_dirs\": [\"gen\"]}'", "generator"]

[compiler]
command = "sh"
args = ["-c", "echo \"$@\" > compiled.txt", "compiler"]

[compiler.directives]
boundscheck = true
"#;

#[cfg(unix)]
#[test]
fn test_full_build_with_shell_toolchain() {
    let test = CliTest::new();
    test.write_file("wrapgen.toml", SHELL_TOOLCHAIN);
    test.write_file("pxds/Matrix.pxd", "");
    test.write_file("addons/Matrix.pyx", "cimport numpy\n\n    def rows(self): pass\n");
    test.write_file(
        "converters/numpy.toml",
        "[[register_converters]]\ntype_name = \"Matrix\"\n",
    );

    let output = test.run(&[
        "--addons",
        "addons",
        "--converters",
        "converters/numpy",
        "--out",
        "wrapped.pyx",
        "pxds",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("STATUS:"));
    assert!(stdout.contains("    1 pxd input files to parse"));
    assert!(stdout.contains("    1 add on files to process"));
    assert!(stdout.contains("    1 type converter files to consider"));
    assert!(stdout.contains("  - gen"));

    let request: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(test.root().join("wrapped.pyx")).unwrap())
            .unwrap();
    assert_eq!(request["declarations"][0]["name"], "Matrix");
    assert_eq!(request["extra_directives"][0], "cimport numpy\n");
    assert_eq!(request["manual_code"]["Matrix"][0], "    def rows(self): pass\n");
    assert_eq!(request["converters"]["Matrix"]["module"], "numpy");
    assert_eq!(request["target"], "wrapped.pyx");

    let compiled = fs::read_to_string(test.root().join("compiled.txt")).unwrap();
    assert_eq!(
        compiled.trim(),
        "--cplus -I gen -X binding=False -X boundscheck=True -X wraparound=False \
         -X language_level=3 wrapped.pyx"
    );
}

#[cfg(unix)]
#[test]
fn test_missing_converter_entry_point_stops_before_generation() {
    let test = CliTest::new();
    test.write_file("wrapgen.toml", SHELL_TOOLCHAIN);
    test.write_file("Matrix.pxd", "");
    test.write_file("converters/empty.toml", "title = \"empty\"\n");

    let output = test.run(&[
        "--converters",
        "converters/empty.toml",
        "--out",
        "wrapped.pyx",
        "Matrix.pxd",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no register_converters in converters/empty.toml"));
    assert!(!test.root().join("wrapped.pyx").exists());
    assert!(!test.root().join("compiled.txt").exists());
}
