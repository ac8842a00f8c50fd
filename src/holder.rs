use crate::error::GenerationError;
use crate::generation::{Generation, GenerationSource, UNSTAMPED, is_older};
use crate::held::{HeldObject, Reclaimable};
use crate::monitor::HeldBytesMonitor;
use crate::sync::{Arc, AtomicUsize, Ordering};
use std::borrow::Cow;
use std::boxed::Box;
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::vec::Vec;

/// Outcome of a reclaim pass.
/// 一次回收的结果。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReclaimStats {
    /// Number of objects destroyed.
    pub freed_objects: usize,
    /// Sum of the byte sizes of the destroyed objects.
    pub freed_bytes: usize,
}

impl ReclaimStats {
    #[inline]
    fn record(&mut self, object: &HeldObject) {
        self.freed_objects += 1;
        self.freed_bytes += object.byte_size;
    }
}

/// Defers destruction of retired objects until no reader can observe them.
///
/// Objects handed to [`hold`](Self::hold) go to a recent list without a
/// generation. [`assign_generation`](Self::assign_generation) stamps all of
/// them with the current generation and moves them, in order, to the aging
/// list. [`reclaim`](Self::reclaim) destroys objects from the front of the
/// aging list while their generation is older than the oldest generation any
/// reader still uses.
///
/// **Thread Safety**: every mutating method takes `&mut self`, so a holder is
/// driven by exactly one writer. Other threads observe the byte counter
/// through a [`HeldBytesMonitor`].
///
/// **Teardown**: the holder must be empty when dropped. Dropping a non-empty
/// holder leaks the remaining objects, since readers may still reference them,
/// and then panics (unless the thread is already unwinding). Call
/// [`clear`](Self::clear) once no reader can exist anymore.
///
/// 延迟销毁已退休对象，直到没有读者能观察到它们。
///
/// 交给 [`hold`](Self::hold) 的对象进入没有代号的最近列表。
/// [`assign_generation`](Self::assign_generation) 用当前代号为它们盖章，并按顺序移入老化列表。
/// [`reclaim`](Self::reclaim) 从老化列表头部销毁代号早于最旧在用代号的对象。
///
/// **线程安全性**：所有修改方法都需要 `&mut self`，因此持有者只由一个写入者驱动。
/// **销毁**：持有者在 drop 时必须为空，否则剩余对象会被泄漏并触发 panic。
pub struct GenerationHolder {
    pub(crate) name: Cow<'static, str>,
    /// Held since the last stamping pass, all `UNSTAMPED`, in hold order.
    pub(crate) recent: Vec<HeldObject>,
    /// Stamped, non-decreasing by generation from front to back.
    pub(crate) aging: VecDeque<HeldObject>,
    pub(crate) held_bytes: Arc<AtomicUsize>,
    pub(crate) last_generation: Option<Generation>,
}

impl GenerationHolder {
    /// Create an empty holder with default settings.
    /// 使用默认设置创建一个空的持有者。
    #[inline]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Take ownership of a retired object.
    ///
    /// Nothing is freed here. The object waits in the recent list until the
    /// next [`assign_generation`](Self::assign_generation).
    ///
    /// 接管一个已退休对象。此处不释放任何东西。
    #[inline]
    pub fn hold<T: Reclaimable>(&mut self, object: Box<T>) {
        let held = HeldObject::new(object);
        let bytes = held.byte_size;
        self.recent.push(held);
        self.add_bytes(bytes);
    }

    /// Stamp every recently held object with `generation` and move them to
    /// the aging list.
    ///
    /// # Panics
    /// If `generation` is [`UNSTAMPED`] or older than a generation passed to
    /// an earlier call. Use [`try_assign_generation`](Self::try_assign_generation)
    /// to get an error instead.
    ///
    /// 用 `generation` 为所有最近持有的对象盖章，并将它们移入老化列表。
    #[inline]
    pub fn assign_generation(&mut self, generation: Generation) {
        if let Err(err) = self.check_generation(generation) {
            panic!("BUG: invalid stamping generation: {err}");
        }
        self.last_generation = Some(generation);
        if !self.recent.is_empty() {
            self.assign_generation_slow(generation);
        }
    }

    /// Checked variant of [`assign_generation`](Self::assign_generation).
    ///
    /// On error nothing is stamped and the holder is left unchanged.
    pub fn try_assign_generation(&mut self, generation: Generation) -> Result<(), GenerationError> {
        self.check_generation(generation)?;
        self.last_generation = Some(generation);
        if !self.recent.is_empty() {
            self.assign_generation_slow(generation);
        }
        Ok(())
    }

    fn check_generation(&self, generation: Generation) -> Result<(), GenerationError> {
        if generation == UNSTAMPED {
            return Err(GenerationError::Sentinel);
        }
        match self.last_generation {
            Some(last) if is_older(generation, last) => Err(GenerationError::Regressed {
                last,
                requested: generation,
            }),
            _ => Ok(()),
        }
    }

    #[cold]
    fn assign_generation_slow(&mut self, generation: Generation) {
        // Checked before anything moves, so a violation leaves the lists intact.
        if let Some(held) = self.recent.iter().find(|held| held.is_stamped()) {
            panic!(
                "BUG: held object already carries generation {} before stamping",
                held.generation
            );
        }
        let stamped = self.recent.len();
        for mut held in self.recent.drain(..) {
            held.generation = generation;
            self.aging.push_back(held);
        }
        tracing::trace!(holder = %self.name, generation, stamped, "stamped held objects");
    }

    /// Destroy every aging object whose generation is older than `used_generation`.
    ///
    /// `used_generation` is the oldest generation any reader may still be
    /// operating under. Objects stamped with `used_generation` or later are kept.
    /// The scan stops at the first object that is still visible.
    ///
    /// 销毁老化列表中代号早于 `used_generation` 的所有对象。
    /// 代号等于或晚于 `used_generation` 的对象会被保留。
    #[inline]
    pub fn reclaim(&mut self, used_generation: Generation) -> ReclaimStats {
        match self.aging.front() {
            Some(front) if is_older(front.generation, used_generation) => {
                self.reclaim_slow(used_generation)
            }
            _ => ReclaimStats::default(),
        }
    }

    #[cold]
    fn reclaim_slow(&mut self, used_generation: Generation) -> ReclaimStats {
        let mut stats = ReclaimStats::default();
        while let Some(front) = self.aging.front() {
            if !is_older(front.generation, used_generation) {
                break;
            }
            if let Some(held) = self.aging.pop_front() {
                self.sub_bytes(held.byte_size);
                stats.record(&held);
                drop(held);
            }
        }
        tracing::debug!(
            holder = %self.name,
            used_generation,
            freed_objects = stats.freed_objects,
            freed_bytes = stats.freed_bytes,
            remaining = self.len(),
            "reclaimed held objects"
        );
        stats
    }

    /// Run one maintenance tick against an epoch tracker.
    ///
    /// Stamps recent objects with the tracker's current generation, then
    /// reclaims everything older than its oldest used generation.
    ///
    /// 针对纪元跟踪器执行一次维护：先盖章，再回收。
    pub fn maintain<S: GenerationSource>(&mut self, source: S) -> ReclaimStats {
        self.assign_generation(source.current_generation());
        self.reclaim(source.oldest_used_generation())
    }

    /// Destroy everything held, ignoring generations.
    ///
    /// Only call this once no reader can hold a reference into any held
    /// object, e.g. while shutting down the owning data structure.
    ///
    /// 无视代号销毁所有被持有的对象。只有在确定没有读者时才能调用。
    pub fn clear(&mut self) -> ReclaimStats {
        let mut stats = ReclaimStats::default();
        for held in self.recent.drain(..).chain(self.aging.drain(..)) {
            stats.record(&held);
        }
        self.held_bytes.store(0, Ordering::Relaxed);
        if stats.freed_objects > 0 {
            tracing::debug!(
                holder = %self.name,
                freed_objects = stats.freed_objects,
                freed_bytes = stats.freed_bytes,
                "cleared held objects"
            );
        }
        stats
    }

    /// Bytes currently held across both lists.
    /// 两个列表中当前持有的字节数。
    #[inline]
    pub fn held_bytes(&self) -> usize {
        self.held_bytes.load(Ordering::Relaxed)
    }

    /// A handle for reading [`held_bytes`](Self::held_bytes) from other threads.
    #[inline]
    pub fn monitor(&self) -> HeldBytesMonitor {
        HeldBytesMonitor {
            bytes: self.held_bytes.clone(),
        }
    }

    /// Name attached to this holder's log events.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of objects held but not stamped yet.
    #[inline]
    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    /// Number of stamped objects waiting to age out.
    #[inline]
    pub fn aging_len(&self) -> usize {
        self.aging.len()
    }

    /// Number of objects held in total, stamped or not.
    /// 持有的对象总数，无论是否已盖章。
    #[inline]
    pub fn len(&self) -> usize {
        self.recent.len() + self.aging.len()
    }

    /// Returns `true` if nothing is held.
    /// 如果没有持有任何对象则返回 `true`。
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.aging.is_empty()
    }

    /// Generation of the next object [`reclaim`](Self::reclaim) would free.
    #[inline]
    pub fn oldest_held_generation(&self) -> Option<Generation> {
        self.aging.front().map(|held| held.generation)
    }

    /// Most recent generation accepted by [`assign_generation`](Self::assign_generation).
    #[inline]
    pub fn last_generation(&self) -> Option<Generation> {
        self.last_generation
    }

    /// Stamped generations of the aging list, front to back.
    pub fn generations(&self) -> impl Iterator<Item = Generation> + '_ {
        self.aging.iter().map(|held| held.generation)
    }

    // Single writer: a plain load/store pair is enough, the atomic only
    // publishes the value to monitors.
    #[inline]
    fn add_bytes(&self, bytes: usize) {
        let current = self.held_bytes.load(Ordering::Relaxed);
        debug_assert!(
            current.checked_add(bytes).is_some(),
            "BUG: held byte counter overflowed adding {bytes} to {current}"
        );
        self.held_bytes.store(current.wrapping_add(bytes), Ordering::Relaxed);
    }

    #[inline]
    fn sub_bytes(&self, bytes: usize) {
        let current = self.held_bytes.load(Ordering::Relaxed);
        self.held_bytes.store(current - bytes, Ordering::Relaxed);
    }
}

impl Default for GenerationHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GenerationHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationHolder")
            .field("name", &self.name)
            .field("recent", &self.recent.len())
            .field("aging", &self.aging.len())
            .field("held_bytes", &self.held_bytes())
            .field("last_generation", &self.last_generation)
            .finish()
    }
}

impl Drop for GenerationHolder {
    /// A holder dropped with objects still inside leaks them instead of
    /// freeing them: readers may still reference those objects, and a leak is
    /// the only outcome that cannot turn into a use-after-free.
    ///
    /// 仍持有对象的持有者在 drop 时会泄漏这些对象而不是释放它们，
    /// 因为读者可能仍在引用它们。
    fn drop(&mut self) {
        let held_bytes = self.held_bytes();
        if self.is_empty() && held_bytes == 0 {
            return;
        }

        let recent = mem::take(&mut self.recent);
        let aging = mem::take(&mut self.aging);
        let (recent_len, aging_len) = (recent.len(), aging.len());
        mem::forget(recent);
        mem::forget(aging);

        tracing::error!(
            holder = %self.name,
            recent = recent_len,
            aging = aging_len,
            held_bytes,
            "generation holder dropped while still holding objects, leaking them"
        );

        if std::thread::panicking() {
            return;
        }
        panic!(
            "BUG: dropping a GenerationHolder with {recent_len} unstamped and \
             {aging_len} aging objects ({held_bytes} bytes held)"
        );
    }
}
