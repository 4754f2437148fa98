use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use dialog::{DialogTemplate, Llama2Template, Turn, dialog_from_json};
use llm::{LLMClient, Throttle, Usage, chat_completion, complete_dialog};
use tracing::info;

use crate::cli::{ChatArgs, Cli, Command, CompleteArgs, FormatArgs, OutputArgs};
use crate::output::{render_details, render_usage};

pub async fn run(cli: Cli) -> Result<()> {
    let mut out = std::io::stdout();
    match cli.command {
        Command::Format(args) => run_format(&args, &mut out),
        Command::Chat(args) => {
            let client = args.api.client()?;
            run_chat(&client, &args, &mut out).await.map(|_| ())
        }
        Command::Complete(args) => {
            let client = args.api.client()?;
            run_complete(&client, &args, &mut out).await.map(|_| ())
        }
    }
}

/// Load a dialogue from `path`, or from stdin when `path` is `None`.
pub fn read_dialog(path: Option<&Path>) -> Result<Vec<Turn>> {
    let (text, label) = match path {
        Some(p) => (
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
            p.display().to_string(),
        ),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            (text, "stdin".to_string())
        }
    };
    dialog_from_json(&text).with_context(|| format!("parsing dialogue from {label}"))
}

fn template(system_prompt: Option<&str>) -> Llama2Template {
    match system_prompt {
        Some(text) => Llama2Template::with_default_system(text),
        None => Llama2Template::default(),
    }
}

fn throttle_for(output: &OutputArgs) -> Result<Throttle> {
    Duration::try_from_secs_f64(output.throttle)
        .map(Throttle::new)
        .context("--throttle must be a non-negative number of seconds")
}

fn emit<W: Write>(
    out: &mut W,
    output: &OutputArgs,
    file: &Path,
    content: &str,
    usage: &Usage,
) -> Result<()> {
    if output.html {
        writeln!(out, "{}", render_details(content, &file.display().to_string()))?;
    } else {
        writeln!(out, "{content}")?;
    }
    if output.usage {
        writeln!(out, "{}", render_usage(usage)?)?;
    }
    Ok(())
}

pub fn run_format<W: Write>(args: &FormatArgs, out: &mut W) -> Result<()> {
    let turns = read_dialog(args.file.as_deref())?;
    let prompt = template(args.system_prompt.as_deref()).render(&turns)?;
    writeln!(out, "{prompt}")?;
    Ok(())
}

pub async fn run_chat<C, W>(client: &C, args: &ChatArgs, out: &mut W) -> Result<Usage>
where
    C: LLMClient + ?Sized,
    W: Write,
{
    let options = args.api.options();
    let mut throttle = throttle_for(&args.output)?;
    let mut total = Usage::default();
    for file in &args.files {
        let turns = read_dialog(Some(file))?;
        throttle.wait().await;
        let (content, usage) = chat_completion(client, &turns, &options)
            .await
            .with_context(|| format!("chat completion for {}", file.display()))?;
        emit(out, &args.output, file, &content, &usage)?;
        total += usage;
    }
    info!(files = args.files.len(), total_tokens = total.total_tokens, "chat finished");
    Ok(total)
}

pub async fn run_complete<C, W>(client: &C, args: &CompleteArgs, out: &mut W) -> Result<Usage>
where
    C: LLMClient + ?Sized,
    W: Write,
{
    let options = args.api.options();
    let template = template(args.system_prompt.as_deref());
    let mut throttle = throttle_for(&args.output)?;
    let mut total = Usage::default();
    for file in &args.files {
        let turns = read_dialog(Some(file))?;
        throttle.wait().await;
        let completion = complete_dialog(client, &template, &turns, &options)
            .await
            .with_context(|| format!("completion for {}", file.display()))?;
        emit(out, &args.output, file, &completion.content, &completion.usage)?;
        total += completion.usage;
    }
    info!(files = args.files.len(), total_tokens = total.total_tokens, "complete finished");
    Ok(total)
}
