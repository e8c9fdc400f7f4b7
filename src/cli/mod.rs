//! Command-line front end

mod prompt;
mod run;
pub mod style;

pub use run::{RunOptions, run};

use async_trait::async_trait;
use cv_pull_request::batch::ProgressCallback;
use cv_pull_request::types::{Outcome, ResolvedRequest};
use indicatif::{MultiProgress, ProgressBar};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use style::{Stylize, arrow, check, cross, spinner_style};

/// Spinner-per-project progress display
///
/// Requests finish in any order; each spinner is replaced in place by a check
/// or a cross when its project completes.
pub struct CliProgress {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl CliProgress {
    /// Create an empty progress display
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_request_started(&self, request: &ResolvedRequest) {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style());
        bar.set_message(format!(
            "{} {}",
            request.name.emphasis(),
            format!("({} {} {})", request.base, arrow(), request.head).muted()
        ));
        bar.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(request.name.clone(), bar);
        }
    }

    async fn on_request_finished(&self, request: &ResolvedRequest, outcome: &Outcome) {
        let bar = self
            .bars
            .lock()
            .ok()
            .and_then(|mut bars| bars.remove(&request.name));

        if let Some(bar) = bar {
            let mark = if outcome.is_success() { check() } else { cross() };
            bar.finish_with_message(format!("{mark} {}", request.name.emphasis()));
        }
    }

    async fn on_message(&self, message: &str) {
        // Hidden draw targets (no terminal) refuse to print; nothing to do then
        let _ = self.multi.println(message.muted());
    }
}
