use crate::Reclaimable;
use std::sync::{Arc, Mutex};


/// Shared record of which test objects were dropped, in drop order.
/// 记录哪些测试对象被 drop，以及 drop 的顺序。
#[derive(Clone, Default)]
pub(crate) struct DropLog(Arc<Mutex<Vec<u32>>>);

impl DropLog {
    pub(crate) fn object(&self, id: u32, size: usize) -> Box<Tracked> {
        Box::new(Tracked {
            id,
            size,
            log: self.clone(),
        })
    }

    pub(crate) fn dropped(&self) -> Vec<u32> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Test object with a fixed byte size that records its own drop.
/// 具有固定字节大小并记录自身 drop 的测试对象。
pub(crate) struct Tracked {
    id: u32,
    size: usize,
    log: DropLog,
}

impl Reclaimable for Tracked {
    fn byte_size(&self) -> usize {
        self.size
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.0.lock().unwrap().push(self.id);
    }
}
