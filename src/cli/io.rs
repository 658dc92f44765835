//! Line-oriented console I/O

use std::io::{self, BufRead, Write};

use super::errors::CliResult;

/// Print the console prompt without a trailing newline.
pub fn prompt() -> CliResult<()> {
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

/// Read one line from stdin. Returns `None` on end of input.
pub fn read_line() -> CliResult<Option<String>> {
    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Write one line to stdout and flush.
pub fn write_line(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}
