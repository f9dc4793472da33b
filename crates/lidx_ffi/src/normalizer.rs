//! The normalizer shared by every handle in the process.

use lidx_core::Normalizer;
use std::sync::{Arc, OnceLock};

static NORMALIZER: OnceLock<Arc<Normalizer>> = OnceLock::new();

/// Returns the process-wide normalizer, creating it on first call.
///
/// Safe to call from any thread, any number of times.
pub fn shared_normalizer() -> Arc<Normalizer> {
    Arc::clone(NORMALIZER.get_or_init(|| Arc::new(Normalizer::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_instance_every_time() {
        let a = shared_normalizer();
        let b = std::thread::spawn(shared_normalizer).join().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
