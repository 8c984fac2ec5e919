use std::sync::Mutex;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rhizolayer_core::pipeline::{PipelineStage, ProgressReporter};

/// Drives one indicatif bar per pipeline stage.
pub struct BarReporter {
    bar_style: ProgressStyle,
    spinner_style: ProgressStyle,
    current: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bar_style: ProgressStyle::default_bar()
                .template("{msg:22} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
            spinner_style: ProgressStyle::default_spinner().template("{msg:22} {spinner}")?,
            current: Mutex::new(None),
        })
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        let pb = match total_items {
            Some(total) => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(self.bar_style.clone());
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(self.spinner_style.clone());
                pb
            }
        };
        pb.set_message(stage.to_string());
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(pb) {
                previous.finish();
            }
        }
    }

    fn advance(&self, items_done: usize) {
        if let Ok(current) = self.current.lock() {
            if let Some(pb) = current.as_ref() {
                pb.set_position(items_done as u64);
            }
        }
    }

    fn finish_stage(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(pb) = current.take() {
                pb.finish();
            }
        }
    }
}
