use std::marker::PhantomData;

/// A mutable slice shared across workers that write disjoint positions.
///
/// Scatter passes (radix sort, stream compaction) compute every destination
/// index up front, so each position is written by exactly one worker. Rayon's
/// safe splitting can't express such data-dependent partitions, hence the raw
/// pointer.
///
/// # Memory Safety
///
/// - The borrow of the underlying slice is held for `'a`, so nothing else can
///   read or write it while a `SharedSlice` exists
/// - [`SharedSlice::write`] is bounds-checked in debug builds only; callers
///   must guarantee `index < len` and that no two writes target the same index
pub(crate) struct SharedSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: a SharedSlice only hands out writes of `T` values; sending those to
// other threads is sound when `T: Send`. Disjointness is the caller's contract.
unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send> Sync for SharedSlice<'_, T> {}

impl<'a, T> SharedSlice<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Writes `value` at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be in bounds and no other thread may access the same
    /// index for the lifetime of this `SharedSlice`.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, index: usize, value: T) {
        debug_assert!(index < self.len, "index {index} out of bounds ({})", self.len);
        // SAFETY: in bounds and exclusive per the function contract. The old
        // value is overwritten without being dropped, which is fine for the
        // `Copy` element types the kernels use.
        unsafe { self.ptr.add(index).write(value) }
    }
}

/// Number of `chunk_size` pieces needed to cover `len` elements.
#[inline(always)]
pub(crate) fn chunk_count(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size)
}
