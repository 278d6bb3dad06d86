//! Scoped scratch-buffer pools for per-frame arithmetic.
//!
//! A pool hands out reusable `Vec` buffers through a guard that returns the
//! cleared buffer to the pool on drop, so a frame's worth of traversal or
//! corner math allocates only on its very first run. Pools are not
//! thread-safe; a buffer must be returned before the function that acquired
//! it returns.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::structs::vector3::Vector3;

/// Pool of `Vec<Vector3>` scratch buffers.
pub type VectorPool = ScratchPool<Vector3>;
/// Pool of `Vec<glam::Mat4>` scratch buffers.
pub type MatrixPool = ScratchPool<glam::Mat4>;

pub struct ScratchPool<T> {
    free: RefCell<Vec<Vec<T>>>,
}

impl<T> ScratchPool<T> {
    pub fn new() -> Self {
        Self {
            free: RefCell::new(Vec::new()),
        }
    }

    /// Acquire an empty scratch buffer. The buffer is cleared and returned to
    /// the pool when the guard drops.
    pub fn take(&self) -> ScratchGuard<'_, T> {
        let buf = self.free.borrow_mut().pop().unwrap_or_default();
        ScratchGuard {
            buf: Some(buf),
            pool: self,
        }
    }

    /// Number of idle buffers currently held by the pool.
    pub fn idle(&self) -> usize {
        self.free.borrow().len()
    }

    fn reclaim(&self, mut buf: Vec<T>) {
        buf.clear();
        self.free.borrow_mut().push(buf);
    }
}

impl<T> Default for ScratchPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScratchGuard<'a, T> {
    buf: Option<Vec<T>>,
    pool: &'a ScratchPool<T>,
}

impl<T> Deref for ScratchGuard<'_, T> {
    type Target = Vec<T>;
    fn deref(&self) -> &Self::Target {
        self.buf.as_ref().unwrap()
    }
}

impl<T> DerefMut for ScratchGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buf.as_mut().unwrap()
    }
}

impl<T> Drop for ScratchGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.reclaim(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_reused_after_drop() {
        let pool: VectorPool = ScratchPool::new();
        {
            let mut buf = pool.take();
            buf.push(Vector3::one());
            assert_eq!(pool.idle(), 0);
        }
        assert_eq!(pool.idle(), 1);
        let buf = pool.take();
        assert!(buf.is_empty());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_nested_acquisition() {
        let pool: MatrixPool = ScratchPool::new();
        let a = pool.take();
        let b = pool.take();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 2);
    }
}
