use crate::sync::{Arc, AtomicUsize, Ordering};

/// Read-only view of a holder's byte counter.
///
/// `HeldBytesMonitor` is `Clone`, `Send` and `Sync`, so it can be handed to a
/// monitoring thread while the writer keeps exclusive ownership of the
/// [`GenerationHolder`](crate::GenerationHolder). Values are recent snapshots,
/// not linearizable with the writer's operations.
///
/// 持有者字节计数器的只读视图。
/// 可以交给监控线程使用，而写入者继续独占 [`GenerationHolder`](crate::GenerationHolder)。
/// 读到的值是近期快照，而非线性一致的精确值。
#[derive(Clone, Debug)]
pub struct HeldBytesMonitor {
    pub(crate) bytes: Arc<AtomicUsize>,
}

impl HeldBytesMonitor {
    /// Bytes currently held, as last published by the writer.
    #[inline]
    pub fn held_bytes(&self) -> usize {
        self.bytes.load(Ordering::Relaxed)
    }

    /// Returns `true` if the holder had nothing outstanding at the last update.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.held_bytes() == 0
    }
}
