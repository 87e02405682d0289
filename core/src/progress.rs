use indicatif::{ProgressBar, ProgressStyle};

/// Observer notified as a conversion moves through its stages.
///
/// Reporting never affects the generated output; implementations are free to
/// drop updates.
pub trait ProgressReporter {
    fn start(&mut self, stage: &str, total: u64);

    fn advance(&mut self, delta: u64);

    fn finish(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _stage: &str, _total: u64) {}

    fn advance(&mut self, _delta: u64) {}

    fn finish(&mut self) {}
}

const BAR_TEMPLATE: &str =
    "{msg:32} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)";

/// Terminal progress bar, one bar per stage. Hidden automatically when stderr
/// is not a terminal.
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self { bar: None }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl ProgressReporter for BarProgress {
    fn start(&mut self, stage: &str, total: u64) {
        self.finish();

        let bar = ProgressBar::new(total);
        bar.set_style(Self::style());
        bar.set_message(stage.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

pub fn reporter_for(use_progress_bar: bool) -> Box<dyn ProgressReporter> {
    if use_progress_bar {
        Box::new(BarProgress::new())
    } else {
        Box::new(NoProgress)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call so tests can assert on what a stage reported.
    #[derive(Debug, Default)]
    pub struct RecordingProgress {
        pub stages: Vec<(String, u64)>,
        pub advanced: u64,
        pub finished: usize,
    }

    impl ProgressReporter for RecordingProgress {
        fn start(&mut self, stage: &str, total: u64) {
            self.stages.push((stage.to_string(), total));
        }

        fn advance(&mut self, delta: u64) {
            self.advanced += delta;
        }

        fn finish(&mut self) {
            self.finished += 1;
        }
    }

    #[test]
    fn test_bar_progress_replaces_bar_between_stages() {
        let mut progress = BarProgress::new();
        progress.start("first", 3);
        progress.advance(3);
        progress.start("second", 1);

        assert_eq!(progress.bar.as_ref().map(|bar| bar.length()), Some(Some(1)));

        progress.finish();
        assert!(progress.bar.is_none());
    }
}
