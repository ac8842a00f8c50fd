use crate::generation::{Generation, UNSTAMPED};
use std::boxed::Box;
use std::mem;

/// Capability of an object whose destruction can be deferred by a
/// [`GenerationHolder`](crate::GenerationHolder).
///
/// The only thing the holder needs from an object is how many bytes it
/// accounts for. The generation tag is kept by the holder alongside the object.
///
/// 可被 [`GenerationHolder`](crate::GenerationHolder) 延迟销毁的对象所具备的能力。
/// 持有者只需要知道对象占用的字节数，代号由持有者自己记录。
pub trait Reclaimable: Send + 'static {
    /// Number of bytes this object occupies, used for accounting only.
    /// 此对象占用的字节数，仅用于统计。
    fn byte_size(&self) -> usize;
}

impl<T: Send + 'static> Reclaimable for Vec<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        mem::size_of::<Self>() + self.capacity() * mem::size_of::<T>()
    }
}

impl<T: Send + 'static> Reclaimable for Box<[T]> {
    #[inline]
    fn byte_size(&self) -> usize {
        mem::size_of::<Self>() + mem::size_of_val::<[T]>(self)
    }
}

impl Reclaimable for String {
    #[inline]
    fn byte_size(&self) -> usize {
        mem::size_of::<Self>() + self.capacity()
    }
}

/// Destructor stored in a [`HeldObject`], monomorphized for the concrete type
/// that was passed to `hold`.
///
/// # Safety
/// `ptr` must come from `Box::<T>::into_raw` and must not be used afterwards.
///
/// 存放在 [`HeldObject`] 中、针对具体类型单态化的析构函数。
unsafe fn destroy_held<T>(ptr: *mut ()) {
    unsafe {
        drop(Box::from_raw(ptr.cast::<T>()));
    }
}

/// One retired object owned by a holder list.
///
/// The object lives behind a raw pointer obtained from `Box::into_raw`, so its
/// address is stable for as long as it is held and readers that loaded a
/// pointer to it before retirement keep seeing valid memory until it is freed.
///
/// 持有列表中的一个已退休对象。
/// 对象位于 `Box::into_raw` 得到的原始指针之后，因此在被持有期间地址稳定。
pub(crate) struct HeldObject {
    ptr: *mut (),
    dtor: unsafe fn(*mut ()),
    /// `UNSTAMPED` while in the recent list.
    pub(crate) generation: Generation,
    /// Size reported at hold time. Accounting always uses this cached value.
    pub(crate) byte_size: usize,
}

// SAFETY: `HeldObject::new` only accepts `T: Reclaimable`, which requires `Send`.
unsafe impl Send for HeldObject {}

impl HeldObject {
    #[inline(always)]
    pub(crate) fn new<T: Reclaimable>(value: Box<T>) -> Self {
        let byte_size = value.byte_size();
        HeldObject {
            ptr: Box::into_raw(value) as *mut (),
            dtor: destroy_held::<T>,
            generation: UNSTAMPED,
            byte_size,
        }
    }

    #[inline]
    pub(crate) fn is_stamped(&self) -> bool {
        self.generation != UNSTAMPED
    }
}

impl Drop for HeldObject {
    /// Frees the object. Only reached through `reclaim` and `clear`; a holder
    /// torn down non-empty forgets its lists instead.
    fn drop(&mut self) {
        // SAFETY: `ptr` was produced by `Box::into_raw` in `new` for the type
        // `dtor` was instantiated with, and `HeldObject` is never cloned.
        unsafe { (self.dtor)(self.ptr) }
    }
}
