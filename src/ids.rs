use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out `"{prefix}-{millis}"` ids. The numeric part follows the wall
/// clock but never repeats or goes backwards, even for two calls within the
/// same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_token())
    }

    fn next_token(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase() {
        let ids = IdGenerator::new();
        let tokens: Vec<i64> = (0..1000).map(|_| ids.next_token()).collect();
        assert!(tokens.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ids_carry_prefix() {
        let ids = IdGenerator::new();
        let id = ids.next("task");
        assert!(id.starts_with("task-"));
        assert!(id["task-".len()..].parse::<i64>().is_ok());
    }
}
