//! Running external converters (tesseract, pdftoppm, antiword).

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use cvsift_core::{Error, Result};

/// Run `program` with `args` and return its stdout, lossily decoded.
///
/// A missing binary or a non-zero exit status is an error carrying stderr.
pub fn run_capture<I, S>(program: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    debug!("Running {:?}", cmd);

    let output = cmd.output().map_err(|e| {
        Error::Acquisition(format!("{} not available: {}", program.display(), e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Acquisition(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Executable `/bin/sh` script standing in for an external tool.
#[cfg(all(test, unix))]
pub(crate) fn fake_tool(dir: &Path, name: &str, script: &str) -> std::path::PathBuf {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "#!/bin/sh\n{script}").unwrap();
    file.sync_all().unwrap();
    drop(file);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_error() {
        let err = run_capture(Path::new("/nonexistent/bin/tesseract"), ["--version"]).unwrap_err();
        assert!(err.to_string().contains("not available"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_and_failure_status() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "tool", "[ \"$1\" = ok ] || { echo bad input >&2; exit 2; }\necho fine");
        assert_eq!(run_capture(&tool, ["ok"]).unwrap(), "fine\n");

        let err = run_capture(&tool, ["nope"]).unwrap_err();
        assert!(err.to_string().contains("bad input"), "{err}");
    }
}
