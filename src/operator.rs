#![allow(async_fn_in_trait)]

use std::io::{self, BufRead, Write};
use std::thread;

use colored::Colorize;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Whoever answers the prompts. The console in a real run, canned answers in tests.
pub trait Operator {
    /// trimmed answer, `None` once input is exhausted
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>>;

    /// yes/y, any case. end of input counts as no
    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{prompt} (yes/no): ")).await?;
        Ok(matches!(
            answer.map(|a| a.to_lowercase()).as_deref(),
            Some("yes") | Some("y")
        ))
    }
}

/// Stdin is read on its own os thread and handed over line by line. A read
/// blocked there never holds up the runtime, so an interrupt at a prompt can
/// end the process straight away.
pub struct Console {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl Console {
    pub fn new() -> Self {
        let (tx, lines) = mpsc::unbounded_channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { lines }
    }
}

impl Operator for Console {
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt.green());
        std::io::stdout().flush()?;

        tokio::select! {
            line = self.lines.recv() => match line {
                Some(line) => Ok(Some(line?.trim().to_string())),
                None => Ok(None),
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                Err(Error::Interrupted)
            }
        }
    }
}
