use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Receives `completed/total` after every unit of pipeline work.
pub trait ProgressObserver {
    fn advance(&mut self, completed: usize, total: usize);

    fn finish(&mut self) {}
}

/// Counts steps and forwards them to an observer. `completed` only ever
/// increases and stops at `total`.
pub struct Progress<'a> {
    completed: usize,
    total: usize,
    observer: &'a mut dyn ProgressObserver,
}

impl<'a> Progress<'a> {
    pub fn new(total: usize, observer: &'a mut dyn ProgressObserver) -> Self {
        Self {
            completed: 0,
            total,
            observer,
        }
    }

    pub fn step(&mut self) {
        if self.completed >= self.total {
            return;
        }
        self.completed += 1;
        self.observer.advance(self.completed, self.total);
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn finish(&mut self) {
        self.observer.finish();
    }
}

pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn advance(&mut self, _completed: usize, _total: usize) {}
}

/// Terminal progress bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message(message.to_string());
        Self { bar }
    }
}

impl ProgressObserver for BarProgress {
    fn advance(&mut self, completed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/progress.rs"]
mod tests;
