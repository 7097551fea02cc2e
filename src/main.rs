//! orgmark CLI - outline markup to HTML
//!
//! Usage: `orgmark [--offset N] [--ids] [--escape-html] [FILE | -]`

use std::io::{self, Read, Write};

use orgmark::Options;

fn main() -> io::Result<()> {
    let mut options = Options::default();
    let mut path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--offset" => {
                let value = args.next().ok_or_else(|| usage("--offset needs a value"))?;
                options.heading_offset = value
                    .parse()
                    .map_err(|_| usage("--offset expects a non-negative integer"))?;
            }
            "--ids" => options.heading_ids = true,
            "--escape-html" => options.allow_html = false,
            "-" => path = None,
            _ if arg.starts_with("--") => return Err(usage(&format!("unknown flag {arg}"))),
            _ => path = Some(arg),
        }
    }

    // Read from the named file, or stdin
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let html = orgmark::to_html_with_options(&input, &options).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.write_all(b"\n")?;

    Ok(())
}

fn usage(msg: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{msg}\nusage: orgmark [--offset N] [--ids] [--escape-html] [FILE | -]"),
    )
}
