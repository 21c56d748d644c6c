// File: ./src/cli.rs
//! Process arguments and the non-interactive front ends.
//!
//! `exec` runs command lines given as arguments, `list` prints the store and
//! `run_repl` is a plain stdin/stdout loop used when the TUI is not built.
use crate::controller::{CommandResult, Dispatcher, Signal, View};
use crate::help::{HelpSection, HelpTab};
use crate::model::Event;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const EXIT_TITLE: &str = "Exit TaskFlow?";
pub const EXIT_PROMPT: &str = "Are you sure you want to exit TaskFlow? Your data is saved automatically.";

#[derive(Debug, Parser)]
#[command(name = "taskflow", version, about = "Track your day with slash commands.")]
pub struct Cli {
    /// Use a different directory for config and data.
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run one or more command lines, e.g. "/addevent 'Lunch' 12:00-13:00".
    Exec {
        /// Answer "yes" to every confirmation instead of "no".
        #[arg(short, long)]
        yes: bool,

        #[arg(required = true, value_name = "LINE")]
        lines: Vec<String>,
    },
    /// Print all stored events.
    List,
}

pub fn print_events<W: Write>(out: &mut W, events: &[Event]) -> io::Result<()> {
    if events.is_empty() {
        return writeln!(out, "(no events)");
    }
    for event in events {
        writeln!(out, "{}", event)?;
    }
    Ok(())
}

pub fn print_help_sections<W: Write>(out: &mut W, sections: &[HelpSection]) -> io::Result<()> {
    for section in sections {
        writeln!(out, "{}:", section.title)?;
        for item in &section.items {
            writeln!(out, "    {:<44} {}", item.keys, item.desc)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_result<W: Write>(out: &mut W, result: &CommandResult) -> io::Result<()> {
    writeln!(out, "{}", result.status)?;
    if let View::Events(events) = &result.view {
        print_events(out, events)?;
    }
    if result.signal == Signal::ShowHelp {
        print_help_sections(out, &HelpTab::Commands.sections())?;
    }
    Ok(())
}

/// Runs `lines` in order with a fixed confirmation answer. Stops at a
/// confirmed `/exit`.
pub fn run_exec<W: Write>(
    dispatcher: &mut Dispatcher,
    lines: &[String],
    answer: bool,
    out: &mut W,
) -> io::Result<()> {
    let mut prompts = Vec::new();
    for line in lines {
        let result = dispatcher.execute(line, &mut |_: &str, prompt: &str| {
            prompts.push(prompt.to_string());
            answer
        });
        for prompt in prompts.drain(..) {
            writeln!(out, "{} [{}]", prompt, if answer { "yes" } else { "no" })?;
        }
        print_result(out, &result)?;
        if result.signal == Signal::ExitRequested && answer {
            break;
        }
    }
    Ok(())
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, title: &str, prompt: &str) -> bool {
    if write!(out, "{}\n{} [y/N] ", title, prompt).and_then(|_| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Line-by-line interactive loop. Ends on a confirmed `/exit` or end of input.
pub fn run_repl<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Type a command to get started! (/help for the list)")?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = {
            let mut gate = |title: &str, prompt: &str| ask(&mut *input, &mut *out, title, prompt);
            dispatcher.execute(line, &mut gate)
        };
        print_result(out, &result)?;

        if result.signal == Signal::ExitRequested && ask(input, out, EXIT_TITLE, EXIT_PROMPT) {
            return Ok(());
        }
    }
}
