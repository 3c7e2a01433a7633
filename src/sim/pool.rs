//! Object pool for entities with heavy spawn/despawn churn
//!
//! Acquired instances are moved out of the pool, so an instance can never sit
//! in the free store and in a live collection at the same time. Callers hand
//! an instance back with [`Pool::release`] once it is out of the live set.

/// An entity type the pool can recycle
pub trait Poolable: Sized {
    /// Arguments equivalent to a fresh construction
    type Args;

    fn create(args: Self::Args) -> Self;

    /// Overwrite every mutable field as if freshly created from `args`
    fn reinitialize(&mut self, args: Self::Args);

    /// Cleanup hook run before the instance enters the free store
    fn on_release(&mut self) {}
}

/// Free-list pool of one entity type
#[derive(Debug, Clone)]
pub struct Pool<T: Poolable> {
    free: Vec<T>,
    /// Instances ever constructed by this pool
    created: usize,
    /// Instances currently handed out
    outstanding: usize,
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Poolable> Pool<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserve room for the expected number of released instances
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            created: 0,
            outstanding: 0,
        }
    }

    /// Reuse a released instance if one is available, otherwise construct
    pub fn acquire(&mut self, args: T::Args) -> T {
        self.outstanding += 1;
        match self.free.pop() {
            Some(mut item) => {
                item.reinitialize(args);
                item
            }
            None => {
                self.created += 1;
                T::create(args)
            }
        }
    }

    /// Return an instance that has already left the live collection
    pub fn release(&mut self, mut item: T) {
        debug_assert!(
            self.outstanding > 0,
            "released an instance this pool never handed out"
        );
        if self.outstanding == 0 {
            log::error!("pool release without a matching acquire");
        }
        self.outstanding = self.outstanding.saturating_sub(1);
        item.on_release();
        self.free.push(item);
    }

    /// Instances waiting for reuse
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, PartialEq)]
    struct Token {
        value: u32,
        released: bool,
    }

    impl Poolable for Token {
        type Args = u32;

        fn create(value: u32) -> Self {
            Self {
                value,
                released: false,
            }
        }

        fn reinitialize(&mut self, value: u32) {
            self.value = value;
            self.released = false;
        }

        fn on_release(&mut self) {
            self.released = true;
        }
    }

    #[test]
    fn test_acquire_constructs_when_empty() {
        let mut pool: Pool<Token> = Pool::new();
        let token = pool.acquire(7);
        assert_eq!(token, Token { value: 7, released: false });
        assert_eq!(pool.created(), 1);
        assert_eq!(pool.outstanding(), 1);
    }

    #[test]
    fn test_release_runs_hook_and_reuse_reinitializes() {
        let mut pool: Pool<Token> = Pool::with_capacity(4);
        let token = pool.acquire(1);
        pool.release(token);
        assert_eq!(pool.free_len(), 1);

        let token = pool.acquire(2);
        assert_eq!(token, Token { value: 2, released: false });
        assert_eq!(pool.created(), 1);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    #[should_panic(expected = "never handed out")]
    #[cfg(debug_assertions)]
    fn test_release_without_acquire_fails_loudly() {
        let mut pool: Pool<Token> = Pool::new();
        pool.release(Token::create(3));
    }

    proptest! {
        /// Live and free sets stay disjoint and the pool never constructs more
        /// instances than the peak number simultaneously in use.
        #[test]
        fn prop_pool_bounded_by_high_water(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut pool: Pool<Token> = Pool::new();
            let mut live: Vec<Token> = Vec::new();
            let mut high_water = 0usize;

            for (i, acquire) in ops.into_iter().enumerate() {
                if acquire || live.is_empty() {
                    live.push(pool.acquire(i as u32));
                } else if let Some(token) = live.pop() {
                    pool.release(token);
                }
                high_water = high_water.max(live.len());

                prop_assert_eq!(pool.outstanding(), live.len());
                prop_assert!(live.iter().all(|t| !t.released));
                prop_assert_eq!(pool.created(), live.len() + pool.free_len());
                prop_assert!(pool.created() <= high_water);
            }
        }
    }
}
