//! Automatic timing of repeated calls.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::pal::{FilesystemFacade, PlatformFacade};
use crate::{Error, Result, Timer, TimerCollection};

/// A [`TimerCollection`] shared between a [`TimerRegistry`] and the [`Decorator`] that fills it.
pub type SharedCollection = Rc<RefCell<TimerCollection>>;

/// Owns one [`TimerCollection`] per registered name and hands out [`Decorator`]s that time
/// every call they make into that collection.
///
/// The registry is an ordinary value: create one where the application starts up and pass it
/// to whatever needs to register or inspect timings.
///
/// # Examples
///
/// ```
/// use perfed::{TimeUnit, TimerRegistry};
///
/// let mut registry = TimerRegistry::new();
/// let mut parse = registry.register("parse").unwrap().wrap(|input: &str| input.len());
///
/// assert_eq!(parse("abc").unwrap(), 3);
/// assert_eq!(parse("hello").unwrap(), 5);
///
/// let timings = registry.get("parse").unwrap();
/// let names: Vec<String> = timings
///     .borrow()
///     .iter()
///     .map(|timer| timer.name().to_string())
///     .collect();
/// assert_eq!(names, ["parse(1)", "parse(2)"]);
/// ```
#[derive(Debug)]
pub struct TimerRegistry {
    collections: Vec<(String, SharedCollection)>,
    index: HashMap<String, usize>,
    platform: PlatformFacade,
    filesystem: FilesystemFacade,
}

impl TimerRegistry {
    /// Creates an empty registry.
    #[expect(
        clippy::new_without_default,
        reason = "to avoid suggesting a process-wide 'default registry' that does not exist"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self::with_pal(PlatformFacade::real(), FilesystemFacade::target())
    }

    pub(crate) fn with_pal(platform: PlatformFacade, filesystem: FilesystemFacade) -> Self {
        Self {
            collections: Vec::new(),
            index: HashMap::new(),
            platform,
            filesystem,
        }
    }

    /// Creates an empty collection under `name` and returns the decorator that fills it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if `name` is already registered.
    pub fn register(&mut self, name: impl Into<String>) -> Result<Decorator> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(Error::AlreadyExists {
                kind: "collection",
                name,
            });
        }

        let collection = Rc::new(RefCell::new(TimerCollection::with_pal(
            name.clone(),
            self.platform.clone(),
            self.filesystem.clone(),
        )));
        self.index.insert(name.clone(), self.collections.len());
        self.collections
            .push((name.clone(), Rc::clone(&collection)));

        Ok(Decorator { name, collection })
    }

    /// Returns the collection registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `name` is not registered.
    pub fn get(&self, name: &str) -> Result<SharedCollection> {
        self.index
            .get(name)
            .and_then(|&position| self.collections.get(position))
            .map(|(_, collection)| Rc::clone(collection))
            .ok_or_else(|| Error::NotFound {
                kind: "collection",
                name: name.to_string(),
            })
    }

    /// Every registered name with its collection, in the order they were registered.
    ///
    /// The collections are the live ones the decorators write into, not copies.
    pub fn list_all(&self) -> impl Iterator<Item = (&str, &SharedCollection)> {
        self.collections
            .iter()
            .map(|(name, collection)| (name.as_str(), collection))
    }

    /// The number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// Times calls into the collection it was registered with.
///
/// Each call starts a new timer named `<name>(<k>)`, where `k` is one more than the number
/// of timers the collection holds, runs the callable and stops the timer.
///
/// If the callable panics, the timer is stopped before the panic continues to unwind. The
/// collection is not borrowed while the callable runs, so the callable may inspect the
/// collection or call through the decorator recursively.
///
/// Adding the timer needs a mutable borrow of the collection for a moment before the callable
/// runs. A call made while the caller holds a [`borrow()`](std::cell::RefCell::borrow) of the
/// collection fails with [`Error::CollectionInUse`] instead of running the callable.
#[derive(Clone, Debug)]
pub struct Decorator {
    name: String,
    collection: SharedCollection,
}

impl Decorator {
    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collection this decorator writes into.
    #[must_use]
    pub fn collection(&self) -> SharedCollection {
        Rc::clone(&self.collection)
    }

    /// Runs `f` under the next timer and returns its result unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if a timer with the next name was already added to the
    /// collection by other means, or [`Error::CollectionInUse`] if the collection is borrowed
    /// elsewhere; `f` is not run in either case.
    pub fn call<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
        let timer = self.start_next()?;
        Ok(timer.time(f))
    }

    /// Wraps `f` so that every call to the returned closure is timed like [`call()`](Self::call).
    ///
    /// Callables that take no arguments use `()` as the argument; several arguments are
    /// passed as a tuple.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfed::TimerRegistry;
    ///
    /// let mut registry = TimerRegistry::new();
    /// let mut add = registry.register("add").unwrap().wrap(|(a, b): (i32, i32)| a + b);
    /// let mut tick = registry.register("tick").unwrap().wrap(|()| "tick");
    ///
    /// assert_eq!(add((2, 3)).unwrap(), 5);
    /// assert_eq!(tick(()).unwrap(), "tick");
    /// ```
    pub fn wrap<A, R>(self, mut f: impl FnMut(A) -> R) -> impl FnMut(A) -> Result<R> {
        move |args| self.call(|| f(args))
    }

    fn start_next(&self) -> Result<Timer> {
        let mut collection = self
            .collection
            .try_borrow_mut()
            .map_err(|_borrowed| Error::CollectionInUse {
                name: self.name.clone(),
            })?;
        let sequence = collection
            .len()
            .checked_add(1)
            .expect("a collection cannot hold usize::MAX timers");

        Ok(collection
            .start_timer(format!("{}({sequence})", self.name))?
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use static_assertions::assert_not_impl_any;

    use super::*;
    use crate::pal::{FakePlatform, MockFilesystem};
    use crate::{TimeUnit, TimerState};

    fn create_test_registry() -> (TimerRegistry, FakePlatform) {
        let fake_platform = FakePlatform::new();
        let registry = TimerRegistry::with_pal(
            PlatformFacade::fake(fake_platform.clone()),
            FilesystemFacade::from_mock(MockFilesystem::new()),
        );
        (registry, fake_platform)
    }

    fn timer_names(collection: &SharedCollection) -> Vec<String> {
        collection
            .borrow()
            .iter()
            .map(|timer| timer.name().to_string())
            .collect()
    }

    #[test]
    fn wrapped_calls_are_numbered_and_timed() {
        let (mut registry, clock) = create_test_registry();
        let mut increment = registry.register("test_tm").unwrap().wrap(|x: i32| {
            clock.advance_nanos(100_000_000);
            x + 1
        });

        assert_eq!(increment(1).unwrap(), 2);
        assert_eq!(increment(2).unwrap(), 3);
        assert_eq!(increment(3).unwrap(), 4);

        let collection = registry.get("test_tm").unwrap();
        assert_eq!(collection.borrow().len(), 3);
        assert_eq!(
            timer_names(&collection),
            ["test_tm(1)", "test_tm(2)", "test_tm(3)"]
        );
        for timer in collection.borrow().iter() {
            assert_eq!(timer.state(), TimerState::Stopped);
            assert!(timer.elapsed(TimeUnit::Seconds).unwrap() >= 0.1);
        }
    }

    #[test]
    fn call_returns_value_unchanged() {
        let (mut registry, _) = create_test_registry();
        let decorator = registry.register("parse").unwrap();

        let parsed: std::result::Result<i32, _> = decorator.call(|| "42".parse::<i32>()).unwrap();
        let failed = decorator.call(|| "x".parse::<i32>()).unwrap();

        assert_eq!(parsed, Ok(42));
        assert!(failed.is_err());
        assert_eq!(decorator.collection().borrow().len(), 2);
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let (mut registry, _) = create_test_registry();
        registry.register("test_tm").unwrap();

        assert!(matches!(
            registry.register("test_tm"),
            Err(Error::AlreadyExists { kind: "collection", ref name }) if name == "test_tm"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_returns_registered_collection() {
        let (mut registry, _) = create_test_registry();
        let decorator = registry.register("test_tm_a").unwrap();

        let collection = registry.get("test_tm_a").unwrap();

        assert!(Rc::ptr_eq(&collection, &decorator.collection()));
        assert_eq!(collection.borrow().name(), "test_tm_a");
        assert_eq!(decorator.name(), "test_tm_a");
    }

    #[test]
    fn get_unregistered_is_not_found() {
        let (registry, _) = create_test_registry();

        assert!(matches!(
            registry.get("test_tm_a"),
            Err(Error::NotFound { kind: "collection", .. })
        ));
    }

    #[test]
    fn list_all_is_live() {
        let (mut registry, _) = create_test_registry();
        assert!(registry.is_empty());

        let a = registry.register("test_tm_a").unwrap();
        registry.register("test_tm_b").unwrap();

        let names: Vec<&str> = registry.list_all().map(|(name, _)| name).collect();
        assert_eq!(names, ["test_tm_a", "test_tm_b"]);

        a.call(|| ()).unwrap();
        let (_, listed) = registry
            .list_all()
            .find(|(name, _)| *name == "test_tm_a")
            .unwrap();
        assert_eq!(listed.borrow().len(), 1);
    }

    #[test]
    fn panic_in_callable_stops_timer_before_unwinding_further() {
        let (mut registry, clock) = create_test_registry();
        let decorator = registry.register("boom").unwrap();

        let result = catch_unwind(AssertUnwindSafe(|| {
            decorator.call(|| -> u32 {
                clock.advance_nanos(5);
                panic!("callable failed");
            })
        }));

        assert!(result.is_err());
        let collection = decorator.collection();
        let collection = collection.borrow();
        let timer = collection.get_timer("boom(1)").unwrap();
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.elapsed_nanos().unwrap(), 5);
    }

    #[test]
    fn callable_may_inspect_its_own_collection() {
        let (mut registry, _) = create_test_registry();
        let decorator = registry.register("self_aware").unwrap();
        let collection = decorator.collection();

        let seen = decorator.call(|| collection.borrow().len()).unwrap();

        assert_eq!(seen, 1);
    }

    #[test]
    fn nested_calls_get_distinct_timers() {
        let (mut registry, clock) = create_test_registry();
        let decorator = registry.register("outer").unwrap();

        decorator
            .call(|| {
                clock.advance_nanos(10);
                decorator.call(|| clock.advance_nanos(20)).unwrap();
                clock.advance_nanos(10);
            })
            .unwrap();

        let collection = decorator.collection();
        let collection = collection.borrow();
        assert_eq!(
            collection.get_timer("outer(1)").unwrap().elapsed_nanos().unwrap(),
            40
        );
        assert_eq!(
            collection.get_timer("outer(2)").unwrap().elapsed_nanos().unwrap(),
            20
        );
    }

    #[test]
    fn name_taken_by_manual_timer_is_reported() {
        let (mut registry, _) = create_test_registry();
        let decorator = registry.register("clash").unwrap();
        decorator
            .collection()
            .borrow_mut()
            .start_timer("clash(1)")
            .unwrap();

        // The manual timer counts towards the sequence, so the next name is free.
        decorator.call(|| ()).unwrap();
        assert_eq!(
            timer_names(&decorator.collection()),
            ["clash(1)", "clash(2)"]
        );

        decorator
            .collection()
            .borrow_mut()
            .start_timer("clash(4)")
            .unwrap();
        let mut ran = false;
        let result = decorator.call(|| ran = true);

        assert!(matches!(result, Err(Error::AlreadyExists { .. })));
        assert!(!ran);
    }

    #[test]
    fn list_all_follows_registration_order() {
        let (mut registry, _) = create_test_registry();

        for name in ["zeta", "alpha", "mid", "beta", "omega"] {
            registry.register(name).unwrap();
        }

        let names: Vec<&str> = registry.list_all().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid", "beta", "omega"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn call_while_collection_is_borrowed_is_reported() {
        let (mut registry, _) = create_test_registry();
        let mut counted = registry.register("busy").unwrap().wrap(|()| 1);
        counted(()).unwrap();

        let collection = registry.get("busy").unwrap();
        let reader = collection.borrow();
        let mut ran = false;
        let result = counted(()).map(|value| {
            ran = true;
            value
        });

        assert!(matches!(
            result,
            Err(Error::CollectionInUse { ref name }) if name == "busy"
        ));
        assert!(!ran);
        assert_eq!(reader.len(), 1);
        drop(reader);

        // Once the borrow is released, calls record again.
        assert_eq!(counted(()).unwrap(), 1);
        assert_eq!(timer_names(&collection), ["busy(1)", "busy(2)"]);
    }

    #[test]
    fn calls_inside_a_loop_over_timers_fail_without_panicking() {
        let (mut registry, _) = create_test_registry();
        let decorator = registry.register("loop").unwrap();
        decorator.call(|| ()).unwrap();
        decorator.call(|| ()).unwrap();

        let collection = decorator.collection();
        let result = catch_unwind(AssertUnwindSafe(|| {
            collection
                .borrow()
                .iter()
                .map(|_| decorator.call(|| ()))
                .collect::<Vec<_>>()
        }));

        let results = result.expect("decorated calls must not panic while the collection is read");
        assert_eq!(results.len(), 2);
        assert!(
            results
                .iter()
                .all(|result| matches!(result, Err(Error::CollectionInUse { .. })))
        );
        assert_eq!(collection.borrow().len(), 2);
    }

    assert_not_impl_any!(TimerRegistry: Send, Sync);
    assert_not_impl_any!(Decorator: Send, Sync);
}
