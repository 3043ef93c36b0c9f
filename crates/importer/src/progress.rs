use std::time::{Duration, Instant};

/// Console progress for long passes, rewritten in place on stderr
pub struct Progress {
    enabled: bool,
    total: usize,
    every: usize,
    started: Instant,
    shown: bool,
}

impl Progress {
    /// # Arguments
    /// * `enabled` - Whether `--progress` was given
    /// * `total` - Rows expected, used for the remaining-time estimate
    /// * `every` - Print once per this many rows
    pub fn new(enabled: bool, total: usize, every: usize) -> Self {
        Self {
            enabled,
            total,
            every: every.max(1),
            started: Instant::now(),
            shown: false,
        }
    }

    /// Reports row `row`; `detail` is appended after the row counts
    pub fn tick(&mut self, row: usize, detail: &str) {
        if !self.enabled || row == 0 || row % self.every != 0 {
            return;
        }

        let left = remaining(self.started.elapsed(), row, self.total);
        let line = format!(
            "Row {} / {}{}; {}:{:02} remaining.",
            thousands(row),
            thousands(self.total),
            detail,
            left.as_secs() / 60,
            left.as_secs() % 60
        );

        eprint!("\r{:80}\r{line}", "");
        self.shown = true;
    }

    /// Moves past the progress line
    pub fn finish(&mut self) {
        if self.shown {
            eprintln!();
            self.shown = false;
        }
    }
}

/// Estimated time left, assuming every row takes as long as the ones so far
pub fn remaining(elapsed: Duration, done: usize, total: usize) -> Duration {
    if done == 0 || total <= done {
        return Duration::ZERO;
    }

    elapsed.mul_f64((total - done) as f64 / done as f64)
}

/// Formats a count with comma separators: `12345` becomes `"12,345"`
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Formats a run time as `M minute(s) and S.s seconds`
pub fn elapsed_phrase(elapsed: Duration) -> String {
    let minutes = elapsed.as_secs() / 60;
    let seconds = elapsed.as_secs_f64() - (minutes * 60) as f64;
    let suffix = if minutes == 1 { "" } else { "s" };

    format!("{minutes} minute{suffix} and {seconds:.1} seconds")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_remaining() {
        let left = remaining(Duration::from_secs(10), 1000, 4000);
        assert_eq!(left, Duration::from_secs(30));

        assert_eq!(remaining(Duration::from_secs(10), 0, 10), Duration::ZERO);
        assert_eq!(remaining(Duration::from_secs(10), 10, 10), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_phrase() {
        assert_eq!(
            elapsed_phrase(Duration::from_millis(65_500)),
            "1 minute and 5.5 seconds"
        );
        assert_eq!(
            elapsed_phrase(Duration::from_millis(2_300)),
            "0 minutes and 2.3 seconds"
        );
    }
}
