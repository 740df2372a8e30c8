//! Growable object pool
//!
//! Every instance a pool ever creates lives in its backing store until the pool
//! is dropped. Acquiring pops a free slot (growing the store by a fixed batch
//! when none is left); releasing pushes the slot back. Instances are never
//! destroyed individually.
//!
//! The pool does not police double release: releasing a handle twice puts the
//! slot on the free list twice. Callers own that discipline.

use std::fmt;

/// Something a `Pool` can recycle
pub trait Poolable {
    /// Arguments needed to bring an instance back into play
    type Args;

    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
    /// Reinitialize all per-use state. Called right after the instance is marked active.
    fn reset(&mut self, args: Self::Args);
}

/// Index of an instance inside the pool that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct Pool<T> {
    objects: Vec<T>,
    /// Free slots, popped from the back (lowest index on top)
    free: Vec<Handle>,
    factory: Box<dyn Fn() -> T>,
    growth: usize,
}

impl<T: Poolable> Pool<T> {
    /// Pre-allocate `initial` inactive instances; grow by `growth` when exhausted
    pub fn new(initial: usize, growth: usize, factory: impl Fn() -> T + 'static) -> Self {
        let mut pool = Self {
            objects: Vec::with_capacity(initial),
            free: Vec::with_capacity(initial),
            factory: Box::new(factory),
            growth: growth.max(1),
        };
        for _ in 0..initial {
            pool.create();
        }
        pool.free = (0..pool.objects.len() as u32).rev().map(Handle).collect();
        pool
    }

    fn create(&mut self) -> Handle {
        let mut obj = (self.factory)();
        obj.set_active(false);
        let handle = Handle(self.objects.len() as u32);
        self.objects.push(obj);
        handle
    }

    /// Add a batch of instances; the first new one is returned instead of freed
    fn grow(&mut self) -> Handle {
        let first = self.create();
        let mut extra = Vec::with_capacity(self.growth - 1);
        for _ in 1..self.growth {
            extra.push(self.create());
        }
        // Keep lowest index on top of the free stack
        self.free.extend(extra.into_iter().rev());
        log::debug!(
            "pool exhausted, grew to {} instances",
            self.objects.len()
        );
        first
    }

    /// Take an inactive instance, mark it active and reset it
    pub fn get(&mut self, args: T::Args) -> Handle {
        let handle = match self.free.pop() {
            Some(handle) => handle,
            None => self.grow(),
        };
        let obj = &mut self.objects[handle.index()];
        obj.set_active(true);
        obj.reset(args);
        handle
    }

    /// Mark the instance inactive and return it to the free set
    pub fn release(&mut self, handle: Handle) {
        self.objects[handle.index()].set_active(false);
        self.free.push(handle);
    }

    #[inline]
    pub fn get_ref(&self, handle: Handle) -> &T {
        &self.objects[handle.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.objects[handle.index()]
    }

    /// Every instance this pool owns, active or not (setup-time use)
    pub fn all_objects(&self) -> &[T] {
        &self.objects
    }

    /// Total instances ever created
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn is_free(&self, handle: Handle) -> bool {
        self.free.contains(&handle)
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.objects.len())
            .field("free", &self.free.len())
            .field("growth", &self.growth)
            .finish()
    }
}
