use std::fmt::Display;

use crate::channel::{ChannelError, ChannelResult};

/// Outcome tally for one run.
#[derive(Debug, Default)]
pub struct Report {
    success_count: usize,
    failures: Vec<(String, ChannelError)>,
    skipped: Vec<String>,
}

impl Report {
    pub fn record(&mut self, slug: &str, result: ChannelResult) {
        match result {
            ChannelResult::Success(_) => self.success_count += 1,
            ChannelResult::Failure(err) => self.failures.push((slug.to_owned(), err)),
        }
    }

    pub fn record_skip(&mut self, slug: &str) {
        self.skipped.push(slug.to_owned());
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn fail_count(&self) -> usize {
        self.failures.len()
    }

    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Finished! Successful: {}, Failed: {}",
            self.success_count,
            self.fail_count()
        )?;
        if !self.skipped.is_empty() {
            write!(f, ", Skipped: {}", self.skip_count())?;
        }
        for (slug, err) in &self.failures {
            write!(f, "\n  {}: {}", slug, err)?;
        }
        Ok(())
    }
}
