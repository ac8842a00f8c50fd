/// Generation number handed out by the epoch tracker.
///
/// Generations only ever move forward, but the counter is allowed to wrap:
/// every ordering decision goes through [`is_older`].
///
/// 由纪元跟踪器分配的代号。代号只会前进，但允许回绕：所有的顺序判断都通过 [`is_older`] 完成。
pub type Generation = u64;

/// Signed view of a [`Generation`] difference.
pub type SignedGeneration = i64;

/// Sentinel carried by objects that have been held but not stamped yet.
/// 已被持有但尚未盖章的对象所携带的哨兵值。
pub const UNSTAMPED: Generation = 0;

/// Returns `true` if `generation` is strictly older than `used`.
///
/// The comparison is done on the wrapped difference interpreted as signed, so
/// it stays correct after the counter wraps around, as long as the two values
/// are less than half the counter range apart.
///
/// 如果 `generation` 严格早于 `used` 则返回 `true`。
/// 比较基于回绕差值的有符号解释，因此计数器回绕后仍然正确。
#[inline]
pub fn is_older(generation: Generation, used: Generation) -> bool {
    (generation.wrapping_sub(used) as SignedGeneration) < 0
}

/// The epoch tracker as seen from a [`GenerationHolder`](crate::GenerationHolder).
///
/// The holder never advances or computes generations itself. Whoever owns the
/// tracking policy implements this trait and passes it to
/// [`GenerationHolder::maintain`](crate::GenerationHolder::maintain).
///
/// 从 [`GenerationHolder`](crate::GenerationHolder) 视角看到的纪元跟踪器。
/// 持有者本身从不推进或计算代号。
pub trait GenerationSource {
    /// The generation new retirements are stamped with.
    ///
    /// Must be non-decreasing over the lifetime of the process and never
    /// [`UNSTAMPED`].
    fn current_generation(&self) -> Generation;

    /// The oldest generation any registered reader may still be operating under.
    fn oldest_used_generation(&self) -> Generation;
}

impl<S: GenerationSource + ?Sized> GenerationSource for &S {
    #[inline]
    fn current_generation(&self) -> Generation {
        (**self).current_generation()
    }

    #[inline]
    fn oldest_used_generation(&self) -> Generation {
        (**self).oldest_used_generation()
    }
}
