use crate::holder::GenerationHolder;
use crate::sync::{Arc, AtomicUsize};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::vec::Vec;

/// Label used for log events when no name is configured.
/// 未配置名称时日志事件使用的标签。
pub(crate) const DEFAULT_HOLDER_NAME: &str = "generation-holder";

/// Builder for configuring a [`GenerationHolder`].
///
/// - `name`: label attached to the holder's `tracing` events
/// - `recent_capacity` / `aging_capacity`: list capacity reserved up front
///
/// # Example
/// ```
/// use swmr_generation::GenerationHolder;
///
/// let mut holder = GenerationHolder::builder()
///     .name("btree-nodes")
///     .recent_capacity(64)
///     .aging_capacity(256)
///     .build();
/// holder.clear();
/// ```
///
/// 用于配置 [`GenerationHolder`] 的构建器。
#[derive(Debug, Clone)]
pub struct GenerationHolderBuilder {
    name: Cow<'static, str>,
    recent_capacity: usize,
    aging_capacity: usize,
}

impl GenerationHolderBuilder {
    /// Create a new builder with default settings.
    /// 创建一个带有默认设置的新构建器。
    #[inline]
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed(DEFAULT_HOLDER_NAME),
            recent_capacity: 0,
            aging_capacity: 0,
        }
    }

    /// Set the name reported in log events.
    ///
    /// Default: `"generation-holder"`
    #[inline]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Reserve room for this many unstamped objects.
    ///
    /// Useful when the writer knows how many objects a batch retires between
    /// two stamping passes.
    ///
    /// Default: `0`
    ///
    /// 为这么多未盖章对象预留空间。
    #[inline]
    pub fn recent_capacity(mut self, capacity: usize) -> Self {
        self.recent_capacity = capacity;
        self
    }

    /// Reserve room for this many stamped objects.
    ///
    /// Default: `0`
    #[inline]
    pub fn aging_capacity(mut self, capacity: usize) -> Self {
        self.aging_capacity = capacity;
        self
    }

    /// Build the [`GenerationHolder`] with the configured settings.
    /// 使用配置的设置构建 [`GenerationHolder`]。
    #[inline]
    pub fn build(self) -> GenerationHolder {
        GenerationHolder {
            name: self.name,
            recent: Vec::with_capacity(self.recent_capacity),
            aging: VecDeque::with_capacity(self.aging_capacity),
            held_bytes: Arc::new(AtomicUsize::new(0)),
            last_generation: None,
        }
    }
}

impl Default for GenerationHolderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationHolder {
    /// Create a builder for configuring a holder.
    ///
    /// # Example
    /// ```
    /// use swmr_generation::GenerationHolder;
    ///
    /// let holder = GenerationHolder::builder().name("postings").build();
    /// assert_eq!(holder.name(), "postings");
    /// ```
    #[inline]
    pub fn builder() -> GenerationHolderBuilder {
        GenerationHolderBuilder::new()
    }
}
