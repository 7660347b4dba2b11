use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

/// Shared count of connections currently checked out by in-flight calls.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    pub(crate) active: Arc<AtomicUsize>,
}

/// Held for as long as one call owns a connection; releases on drop.
#[derive(Debug)]
pub struct ConnectionLease {
    pub(crate) active: Arc<AtomicUsize>,
}
