mod settings;

pub use settings::{Backend, Endpoints, Logger, Poll, Settings};

use std::path::PathBuf;
use std::{env, io};

/// Directory holding the layered `*.toml` configuration files.
///
/// Under cargo this is `configs/` at the workspace root; an installed binary
/// looks next to the executable.
pub fn configs_root() -> io::Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir).join("..").join("configs"));
    }

    let exe = env::current_exe()?;
    let dir = exe
        .parent()
        .map(|path| path.to_path_buf())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?;

    Ok(dir.join("configs"))
}
