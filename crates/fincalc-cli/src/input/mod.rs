pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a calculator input: `--input` file first, then piped stdin, and
/// only then the individual flags.
pub fn load<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return file::read_json(path);
    }
    if let Some(data) = stdin::read_stdin()? {
        tracing::debug!("reading input from stdin");
        return Ok(serde_json::from_value(data)?);
    }
    from_flags()
}

/// Unwrap a required flag, naming it in the error.
pub fn required<T>(value: Option<T>, flag: &str) -> Result<T, Box<dyn std::error::Error>> {
    value.ok_or_else(|| format!("--{flag} is required (or provide --input)").into())
}
