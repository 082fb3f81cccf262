use std::io::Cursor;

#[derive(Debug, Clone)]
pub struct CliOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI in-process with `input` as stdin.
pub fn run_cli(args: &[&str], input: &str) -> CliOutput {
    let mut argv = vec!["inkflow"];
    argv.extend_from_slice(args);
    let mut stdin = Cursor::new(input.to_string());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = inkflow_cli::run_with_input(argv, &mut stdin, &mut out, &mut err);
    CliOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Reads `label: <number>` from a command's output.
#[allow(dead_code)]
pub fn stat(output: &str, label: &str) -> u64 {
    output
        .lines()
        .find_map(|l| l.strip_prefix(label))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(|| panic!("missing '{label}' in output:\n{output}"))
}
