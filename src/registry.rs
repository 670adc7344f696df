//! Resource lists, the registry that pins their masks, and background
//! pre-rendering.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mask_icon::{IconContext, RenderConfig, ResourceList};
//!
//! let context = IconContext::new(&RenderConfig::default());
//! let list = Arc::new(ResourceList::from_names(["Icon1.svg", "Icon2.svg"]));
//! context.registry().register_list(Arc::clone(&list));
//!
//! if let Some(handle) = list.render_in_background(&context) {
//!     let report = handle.wait();
//!     println!("{report:?}");
//! }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread;

use crate::bundle::Bundle;
use crate::context::IconContext;
use crate::error::ResourceListError;
use crate::icon::Size;
use crate::mask::{MaskKey, MaskSource};

// ============================================================================
// ResourceList
// ============================================================================

/// An ordered set of resource names whose masks should stay cached.
#[derive(Debug)]
pub struct ResourceList {
    names: Vec<String>,
    in_flight: Arc<AtomicBool>,
}

impl ResourceList {
    /// Creates a list from resource names (not paths), dropping duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let names = names
            .into_iter()
            .map(Into::<String>::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();
        Self {
            names,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Loads a list from a bundle file holding a flat JSON array of names.
    pub fn from_plist_named(bundle: &Bundle, name: &str) -> Result<Self, ResourceListError> {
        let path = bundle.resolve_list(name)?;
        let text = fs::read_to_string(&path)
            .map_err(|source| ResourceListError::Io { path, source })?;
        let names: Vec<String> = serde_json::from_str(&text)?;
        Ok(Self::from_names(names))
    }

    /// Resource names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The set of names used to decide cache pinning.
    ///
    /// Keys are independent of size; a mask of any size whose name is in
    /// this set is pinned.
    pub fn keys(&self) -> BTreeSet<String> {
        self.names.iter().cloned().collect()
    }

    /// Returns true if `name` is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns true while a background render of this list is queued or running.
    pub fn is_rendering(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Rasterizes every listed resource at its natural size on the context's
    /// render queue and stores the masks in the shared cache.
    ///
    /// Returns `None` if a render of this list is already in flight.
    pub fn render_in_background(self: &Arc<Self>, context: &IconContext) -> Option<PrewarmHandle> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return None;
        }

        let (done, receiver) = mpsc::channel();
        let list = Arc::clone(self);
        let queue = Arc::clone(context.queue());
        let context = context.clone();
        let guard = InFlight(Arc::clone(&self.in_flight));

        let submitted = queue.submit(move || {
            let report = list.prewarm(&context);
            // Release before reporting so waiters observe the list as idle.
            drop(guard);
            let _ = done.send(report);
        });

        // A rejected job is dropped, which releases the in-flight guard.
        submitted.then_some(PrewarmHandle { receiver })
    }

    fn prewarm(&self, context: &IconContext) -> PrewarmReport {
        let factory = context.factory();
        let cache = context.cache();
        let mut report = PrewarmReport::default();

        for name in &self.names {
            let key = MaskKey::new(name.as_str(), Size::ZERO, factory.scale());

            if cache.get(&key).is_some() {
                report.skipped += 1;
                continue;
            }

            match factory.create_mask(&MaskSource::resource(name.as_str()), Size::ZERO) {
                Ok(mask) => {
                    cache.put(key, mask);
                    report.rendered += 1;
                }
                Err(err) => {
                    log::warn!("failed to pre-render mask `{name}`: {err}");
                    report.failed.push(name.clone());
                }
            }
        }

        log::debug!(
            "pre-rendered {} masks ({} cached, {} failed)",
            report.rendered,
            report.skipped,
            report.failed.len()
        );
        report
    }
}

struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Outcome of a background pre-render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrewarmReport {
    /// Masks rasterized and stored.
    pub rendered: usize,
    /// Masks already resident in the cache.
    pub skipped: usize,
    /// Names that could not be rasterized.
    pub failed: Vec<String>,
}

/// Completion handle for [`ResourceList::render_in_background`].
#[derive(Debug)]
pub struct PrewarmHandle {
    receiver: Receiver<PrewarmReport>,
}

impl PrewarmHandle {
    /// Blocks until the job finishes. Returns `None` if the job died.
    pub fn wait(self) -> Option<PrewarmReport> {
        self.receiver.recv().ok()
    }

    /// Returns the report if the job has already finished.
    pub fn try_report(&self) -> Option<PrewarmReport> {
        self.receiver.try_recv().ok()
    }
}

// ============================================================================
// ResourceRegistry
// ============================================================================

/// The registered resource lists. Membership is the union of all lists.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    lists: RwLock<Vec<Arc<ResourceList>>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `list`. Returns false if it was already registered.
    pub fn register_list(&self, list: Arc<ResourceList>) -> bool {
        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        if lists.iter().any(|l| Arc::ptr_eq(l, &list)) {
            return false;
        }
        lists.push(list);
        true
    }

    /// Deregisters `list`. Returns false if it was not registered.
    pub fn deregister_list(&self, list: &Arc<ResourceList>) -> bool {
        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        let before = lists.len();
        lists.retain(|l| !Arc::ptr_eq(l, list));
        lists.len() != before
    }

    /// Snapshot of the registered lists in registration order.
    pub fn resource_lists(&self) -> Vec<Arc<ResourceList>> {
        self.lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if any registered list names `name`.
    pub fn should_cache_name(&self, name: &str) -> bool {
        self.lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|list| list.contains(name))
    }

    /// Returns true if the mask for `key` should be pinned in the cache.
    pub fn should_cache(&self, key: &MaskKey) -> bool {
        self.should_cache_name(key.name())
    }
}

// ============================================================================
// RenderQueue
// ============================================================================

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A serial background worker. Jobs run one at a time in submission order.
///
/// The worker thread is spawned on first use and exits once the queue is
/// dropped and drained.
#[derive(Debug)]
pub struct RenderQueue {
    name: String,
    sender: Mutex<Option<Sender<Job>>>,
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new("mask-render")
    }
}

impl RenderQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sender: Mutex::new(None),
        }
    }

    /// Enqueues `job`. Returns false if no worker could be started.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) -> bool {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let mut job: Job = Box::new(job);

        // One retry: the first send may hit a worker that has exited.
        for _ in 0..2 {
            if sender.is_none() {
                *sender = self.spawn_worker();
            }
            let Some(tx) = sender.as_ref() else {
                return false;
            };
            match tx.send(job) {
                Ok(()) => return true,
                Err(mpsc::SendError(returned)) => {
                    job = returned;
                    *sender = None;
                }
            }
        }
        false
    }

    fn spawn_worker(&self) -> Option<Sender<Job>> {
        let (tx, rx) = mpsc::channel::<Job>();
        let spawned = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                for job in rx {
                    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                        log::warn!("background render job panicked");
                    }
                }
            });

        match spawned {
            Ok(_) => Some(tx),
            Err(err) => {
                log::warn!("failed to start render worker: {err}");
                None
            }
        }
    }
}
