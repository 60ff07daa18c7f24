//! Progress reporting for the tool-calling loop

use colored::Colorize;
use expense_application::ChatProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner on stderr while the assistant works, one line per tool call.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let spinner = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(spinner);
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatProgressNotifier for ProgressReporter {
    fn on_model_request(&self, request: usize) {
        self.with_spinner(|pb| {
            if request == 1 {
                pb.set_message("Thinking...");
            } else {
                pb.set_message(format!("Thinking... (step {})", request));
            }
        });
    }

    fn on_tool_call(&self, tool_name: &str, _raw_arguments: &str) {
        self.with_spinner(|pb| pb.set_message(format!("Calling {}", tool_name.cyan())));
    }

    fn on_tool_result(&self, tool_name: &str, success: bool, duration_ms: Option<u64>) {
        let mark = if success { "v".green() } else { "x".red() };
        let timing = duration_ms
            .map(|ms| format!(" ({} ms)", ms).dimmed().to_string())
            .unwrap_or_default();
        self.with_spinner(|pb| pb.println(format!("  {} {}{}", mark, tool_name, timing)));
    }

    fn on_answer(&self, _text: &str) {
        self.finish();
    }

    fn on_aborted(&self, _reason: &str) {
        self.finish();
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ChatProgressNotifier for SimpleProgress {
    fn on_model_request(&self, request: usize) {
        if request > 1 {
            eprintln!("{} asking the model again (step {})", "->".cyan(), request);
        }
    }

    fn on_tool_call(&self, tool_name: &str, raw_arguments: &str) {
        let args = raw_arguments.trim();
        if args.is_empty() || args == "{}" {
            eprintln!("{} {}", "->".cyan(), tool_name.bold());
        } else {
            eprintln!("{} {} {}", "->".cyan(), tool_name.bold(), args.dimmed());
        }
    }

    fn on_tool_result(&self, tool_name: &str, success: bool, _duration_ms: Option<u64>) {
        if success {
            eprintln!("  {} {}", "v".green(), tool_name);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), tool_name);
        }
    }

    fn on_aborted(&self, reason: &str) {
        eprintln!("{} {}", "aborted:".red(), reason);
    }
}
