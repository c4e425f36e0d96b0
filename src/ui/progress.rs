use cryptkit::{Observer, Processing, Stage};
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal progress bar fed by the library's [`Observer`] callbacks.
pub struct Bar {
    bar: ProgressBar,
    processing: Processing,
}

impl Bar {
    pub fn new(total: u64, processing: Processing) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})") {
            bar.set_style(style.progress_chars("●○ "));
        }
        bar.set_message(processing.label());

        Self { bar, processing }
    }

    fn position(&self, fraction: f64) -> u64 {
        let total = self.bar.length().unwrap_or_default();
        (fraction * total as f64).round() as u64
    }
}

impl Observer for &Bar {
    fn progress(&mut self, fraction: f64) {
        self.bar.set_position(self.position(fraction));
    }

    fn stage(&mut self, stage: Stage) {
        match stage {
            Stage::Done => self.bar.finish_with_message("Done"),
            Stage::Failed => self.bar.abandon_with_message("Failed"),
            Stage::Idle | Stage::DerivingKey | Stage::Processing { .. } | Stage::Finalizing => {
                self.bar.set_message(format!("{} {stage}", self.processing.label()));
            }
        }
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_maps_to_position() {
        let bar = Bar::new(200, Processing::Encryption);
        let mut observer = &bar;
        observer.progress(0.5);
        assert_eq!(bar.bar.position(), 100);
        observer.progress(1.0);
        assert_eq!(bar.bar.position(), 200);
    }

    #[test]
    fn test_terminal_stage_finishes() {
        let bar = Bar::new(10, Processing::Decryption);
        let mut observer = &bar;
        observer.stage(Stage::DerivingKey);
        assert!(!bar.bar.is_finished());
        observer.stage(Stage::Done);
        assert!(bar.bar.is_finished());
    }
}
