/*!
`run.rs`

Host-side entry points that feed chat lines into the router:

  tianxing run 热搜 -n 2          one line given as separate words
  tianxing run "地区新闻 '重庆 渝中'"  one quoted line, shell-split
  tianxing shell                  one line per stdin line until EOF / exit

Each line is one independent invocation: one request, one reply. The reply
text goes to stdout exactly as a chat user would see it, failures
included; `--json` wraps it in a status object instead.
*/

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use crate::api::HttpTransport;
use crate::cmd::dispatch::{Reply, Router};
use crate::cmd::format::{Role, StyleOptions, color};
use crate::config::Config;

/// CLI arguments for `tianxing run <WORDS>...`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command line as typed in chat, e.g. `地区 重庆` or `热搜 -n 2`
    #[arg(
        value_name = "WORDS",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub words: Vec<String>,

    /// Output JSON instead of the reply text (must precede WORDS)
    #[arg(long)]
    pub json: bool,
}

/// CLI arguments for `tianxing shell`
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Output one JSON object per reply
    #[arg(long)]
    pub json: bool,
}

pub fn execute_run(args: RunArgs, config: &Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let transport = HttpTransport::new(config.timeout)?;
    let router = Router::new(&transport, &config.base_url, &config.key);

    let tokens = tokens_from_words(args.words);
    let reply = rt.block_on(router.handle_tokens(&tokens));
    let style = StyleOptions::detect();
    let mut stdout = io::stdout().lock();
    write_reply(
        &mut stdout,
        &reply,
        tokens.first().map(String::as_str),
        args.json,
        &style,
    )
    .context("Failed to write reply")?;
    Ok(())
}

pub fn execute_shell(args: ShellArgs, config: &Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let transport = HttpTransport::new(config.timeout)?;
    let router = Router::new(&transport, &config.base_url, &config.key);
    let style = StyleOptions::detect();

    crate::log_info!("reading commands from stdin ('exit' to quit)");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }
        let reply = rt.block_on(router.handle_line(trimmed));
        let mut stdout = io::stdout().lock();
        write_reply(
            &mut stdout,
            &reply,
            trimmed.split_whitespace().next(),
            args.json,
            &style,
        )
        .context("Failed to write reply")?;
        if !args.json {
            writeln!(stdout, "{}", color(Role::Dim, "---", &style))?;
        }
        stdout.flush().ok();
    }
    Ok(())
}

/// A single word may hold a whole quoted chat line; several words are
/// already tokenized by the invoking shell.
fn tokens_from_words(words: Vec<String>) -> Vec<String> {
    if let [single] = words.as_slice()
        && single.trim().contains(char::is_whitespace)
    {
        return shell_words::split(single)
            .unwrap_or_else(|_| single.split_whitespace().map(str::to_string).collect());
    }
    words
}

/// Every reply kind lands on `out`; failures are only tinted.
fn write_reply(
    out: &mut impl Write,
    reply: &Reply,
    command: Option<&str>,
    json: bool,
    style: &StyleOptions,
) -> io::Result<()> {
    if json {
        return writeln!(out, "{}", reply.to_json(command));
    }
    let text = match reply {
        Reply::Blocks(_) | Reply::Message(_) => reply.text(),
        Reply::Unavailable => color(Role::Error, reply.text(), style),
        Reply::Usage(_) => color(Role::Warning, reply.text(), style),
    };
    writeln!(out, "{text}")
}
