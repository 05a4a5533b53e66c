use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use sb_link::{LinkParser, VmessParser};

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// Links to decode; read from stdin when empty
    pub links: Vec<String>,
    /// Pretty-print each descriptor
    #[arg(long)]
    pub pretty: bool,
    /// Report bad links on stderr and continue
    #[arg(long)]
    pub keep_going: bool,
}

/// Decode every link and write one JSON descriptor per link to `out`,
/// flushing it before returning so a closed pipe is reported.
///
/// Returns the number of links that failed (always 0 unless
/// `keep_going`, since the first failure is otherwise an error).
pub fn run<R, W, E>(args: &DecodeArgs, input: R, out: &mut W, err: &mut E) -> Result<usize>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let parser = VmessParser::new();
    let links: Vec<(usize, String)> = if args.links.is_empty() {
        let mut v = Vec::new();
        for (i, line) in input.lines().enumerate() {
            let line = line.context("read stdin")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            v.push((i + 1, line.to_string()));
        }
        v
    } else {
        args.links
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim().to_string()))
            .collect()
    };

    let mut failed = 0;
    for (n, link) in links {
        match parser.parse(&link) {
            Ok(node) => {
                let s = if args.pretty {
                    serde_json::to_string_pretty(&node)?
                } else {
                    serde_json::to_string(&node)?
                };
                writeln!(out, "{s}")?;
            }
            Err(e) if args.keep_going => {
                failed += 1;
                tracing::debug!(link = n, error = %e, "skipping link");
                writeln!(err, "link {n}: {e}")?;
            }
            Err(e) => return Err(e).with_context(|| format!("link {n}")),
        }
    }
    out.flush().context("flush output")?;
    Ok(failed)
}
