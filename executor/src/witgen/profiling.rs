use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use log::log_enabled;

/// Invocation counts and exclusive run times per template.
#[derive(Debug, Default)]
pub struct Profile {
    entries: BTreeMap<String, ProfileEntry>,
    call_stack: Vec<String>,
    last_event: Option<Instant>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub invocations: usize,
    /// Time spent in the template itself, excluding sub-components.
    pub time: Duration,
}

impl Profile {
    pub fn record_start(&mut self, name: &str) {
        self.charge_running();
        self.call_stack.push(name.to_string());
    }

    pub fn record_end(&mut self, name: &str) {
        self.charge_running();
        let finished = self.call_stack.pop();
        debug_assert_eq!(finished.as_deref(), Some(name), "Unexpected end of call!");
        self.entries.entry(name.to_string()).or_default().invocations += 1;
    }

    /// Attributes the time since the last event to the innermost running template.
    fn charge_running(&mut self) {
        let now = Instant::now();
        if let (Some(last), Some(current)) = (self.last_event, self.call_stack.last()) {
            self.entries.entry(current.clone()).or_default().time += now - last;
        }
        self.last_event = Some(now);
    }

    pub fn invocations(&self, name: &str) -> usize {
        self.entries.get(name).map_or(0, |entry| entry.invocations)
    }

    pub fn entries(&self) -> &BTreeMap<String, ProfileEntry> {
        &self.entries
    }

    pub fn log_summary(&self) {
        if !log_enabled!(log::Level::Debug) {
            return;
        }
        let mut by_time = self.entries.iter().collect::<Vec<_>>();
        by_time.sort_by(|a, b| b.1.time.cmp(&a.1.time));
        let total_time = by_time.iter().map(|(_, entry)| entry.time).sum::<Duration>();

        log::debug!("\n == Per template profile ({} templates)", by_time.len());
        for (name, entry) in by_time {
            let percentage = if total_time.is_zero() {
                0.0
            } else {
                (entry.time.as_secs_f64() / total_time.as_secs_f64()) * 100.0
            };
            log::debug!(
                "  {percentage:>5.2}% ({:>8.5?}), {} runs: {name}",
                entry.time,
                entry.invocations
            );
        }
        log::debug!("  ---------------------------");
        log::debug!("  ==> Total: {total_time:?}");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn counts_nested_invocations() {
        let mut profile = Profile::default();
        profile.record_start("Outer");
        for _ in 0..3 {
            profile.record_start("Inner");
            profile.record_end("Inner");
        }
        profile.record_end("Outer");
        assert_eq!(profile.invocations("Outer"), 1);
        assert_eq!(profile.invocations("Inner"), 3);
        assert_eq!(profile.invocations("Missing"), 0);
        assert_eq!(profile.entries().len(), 2);
        profile.log_summary();
    }
}
