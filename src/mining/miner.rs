use crate::catalog::Item;
use crate::config::MiningConfig;
use crate::database::SequenceDatabase;
use crate::error::{MiningError, Result};
use crate::mining::cancel::CancellationToken;
use crate::mining::collector::{MiningReport, Pattern, ResultCollector};
use crate::mining::frequent::SupportCounter;
use crate::mining::projection::ProjectedDatabase;
use crossbeam::queue::ArrayQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// One pending node of the search tree: a frequent prefix and its projection
struct Frame {
    prefix: Vec<Item>,
    projection: ProjectedDatabase,
    support: usize,
}

/// Stop conditions shared by every worker of one run
struct Interrupt<'a> {
    token: Option<&'a CancellationToken>,
    started: Instant,
    deadline: Option<Instant>,
    /// Raised by a failing worker so its siblings stop early
    abort: AtomicBool,
}

impl Interrupt<'_> {
    fn check(&self) -> Result<()> {
        if self.token.is_some_and(CancellationToken::is_cancelled) {
            return Err(MiningError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(MiningError::TimedOut {
                    elapsed_ms: self.started.elapsed().as_millis(),
                });
            }
        }
        Ok(())
    }

    fn abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }
}

/// PrefixSpan pattern-growth miner over a shared, immutable database
///
/// # Example
/// ```
/// use seqmine::config::MiningConfig;
/// use seqmine::database::{SequenceDatabase, SequenceInput};
/// use seqmine::mining::PatternMiner;
///
/// let db = SequenceDatabase::build(vec![
///     SequenceInput::new("C1", ["A", "B", "C"]),
///     SequenceInput::new("C2", ["A", "C"]),
/// ]).unwrap();
///
/// let report = PatternMiner::new(&db, MiningConfig::new(1.0, 2)).unwrap().mine().unwrap();
/// assert_eq!(report.get(&["A", "C"]).map(|p| p.support), Some(2));
/// ```
#[derive(Debug)]
pub struct PatternMiner<'a> {
    db: &'a SequenceDatabase,
    config: MiningConfig,
    cancel: Option<CancellationToken>,
}

impl<'a> PatternMiner<'a> {
    /// Create a miner, failing fast on an invalid configuration
    pub fn new(db: &'a SequenceDatabase, config: MiningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            db,
            config,
            cancel: None,
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Run the search to completion
    ///
    /// Either every frequent pattern up to `max_length` is returned, or an
    /// error; a cancelled run publishes nothing.
    pub fn mine(&self) -> Result<MiningReport> {
        let started = Instant::now();
        let interrupt = Interrupt {
            token: self.cancel.as_ref(),
            started,
            deadline: self.config.timeout().map(|t| started + t),
            abort: AtomicBool::new(false),
        };
        let min_count = self.config.min_support_count(self.db.len());

        tracing::info!(
            sequences = self.db.len(),
            distinct_items = self.db.distinct_items(),
            min_support = self.config.min_support,
            min_count,
            max_length = self.config.max_length,
            threads = self.config.threads,
            "starting PrefixSpan run"
        );

        let result = self.search(min_count, &interrupt);
        let elapsed = started.elapsed();

        match result {
            Ok(patterns) => {
                let mut collector = ResultCollector::new(self.db);
                collector.absorb(patterns);
                let report = collector.into_report(&self.config, elapsed);
                tracing::info!(
                    patterns = report.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "PrefixSpan run complete"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("PrefixSpan run aborted after {:?}: {}", elapsed, e);
                Err(e)
            }
        }
    }

    fn search(&self, min_count: usize, interrupt: &Interrupt<'_>) -> Result<Vec<Pattern>> {
        interrupt.check()?;

        let root = ProjectedDatabase::root(self.db);
        let mut counter = SupportCounter::new(self.db.distinct_items());
        let seeds: Vec<Item> = counter
            .frequent(self.db, &root, min_count)
            .into_iter()
            .map(|(item, _)| item)
            .collect();

        tracing::debug!(frequent_items = seeds.len(), "seeded search with frequent items");

        if self.config.threads <= 1 || seeds.len() <= 1 {
            let mut collector = ResultCollector::new(self.db);
            for item in seeds {
                let frame = seed_frame(self.db, &root, item);
                self.grow(frame, min_count, &mut counter, &mut collector, interrupt)?;
            }
            return Ok(collector.into_patterns());
        }

        self.search_parallel(&root, seeds, min_count, interrupt)
    }

    /// Mine each root branch on a bounded pool of scoped workers
    ///
    /// Branches are merged back in seed order, so the output matches a
    /// sequential run exactly.
    fn search_parallel(
        &self,
        root: &ProjectedDatabase,
        seeds: Vec<Item>,
        min_count: usize,
        interrupt: &Interrupt<'_>,
    ) -> Result<Vec<Pattern>> {
        let workers = self.config.threads.min(seeds.len());
        let queue = ArrayQueue::new(seeds.len());
        for (branch, item) in seeds.into_iter().enumerate() {
            if queue.push((branch, item)).is_err() {
                return Err(MiningError::configuration("branch queue overflow"));
            }
        }

        tracing::debug!(workers, branches = queue.len(), "dispatching root branches");

        let outcomes = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let queue = &queue;
                    scope.spawn(move |_| self.run_worker(root, queue, min_count, interrupt))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(MiningError::WorkerPanicked)))
                .collect::<Vec<_>>()
        })
        .map_err(|_| MiningError::WorkerPanicked)?;

        let mut branches = Vec::new();
        for outcome in outcomes {
            branches.extend(outcome?);
        }
        branches.sort_by_key(|(branch, _)| *branch);

        Ok(branches
            .into_iter()
            .flat_map(|(_, patterns)| patterns)
            .collect())
    }

    fn run_worker(
        &self,
        root: &ProjectedDatabase,
        queue: &ArrayQueue<(usize, Item)>,
        min_count: usize,
        interrupt: &Interrupt<'_>,
    ) -> Result<Vec<(usize, Vec<Pattern>)>> {
        let mut counter = SupportCounter::new(self.db.distinct_items());
        let mut finished = Vec::new();

        while let Some((branch, item)) = queue.pop() {
            if interrupt.is_aborted() {
                break;
            }

            let mut collector = ResultCollector::new(self.db);
            let frame = seed_frame(self.db, root, item);
            if let Err(e) = self.grow(frame, min_count, &mut counter, &mut collector, interrupt) {
                interrupt.abort();
                return Err(e);
            }
            finished.push((branch, collector.into_patterns()));
        }

        Ok(finished)
    }

    /// Depth-first growth of one branch with an explicit work stack
    ///
    /// Children are pushed in reverse candidate order so the first candidate
    /// is expanded first, giving the same pre-order as recursion would.
    fn grow(
        &self,
        start: Frame,
        min_count: usize,
        counter: &mut SupportCounter,
        collector: &mut ResultCollector<'_>,
        interrupt: &Interrupt<'_>,
    ) -> Result<()> {
        let mut stack = vec![start];

        while let Some(frame) = stack.pop() {
            interrupt.check()?;
            if interrupt.is_aborted() {
                return Ok(());
            }

            collector.emit(&frame.prefix, frame.support);

            if frame.prefix.len() >= self.config.max_length || frame.projection.is_empty() {
                continue;
            }

            let candidates = counter.frequent(self.db, &frame.projection, min_count);
            for (item, count) in candidates.into_iter().rev() {
                let (projection, support) = frame.projection.project(self.db, item);
                debug_assert_eq!(support, count);
                if support < min_count {
                    continue;
                }

                let mut prefix = Vec::with_capacity(frame.prefix.len() + 1);
                prefix.extend_from_slice(&frame.prefix);
                prefix.push(item);
                stack.push(Frame {
                    prefix,
                    projection,
                    support,
                });
            }
        }

        Ok(())
    }
}

fn seed_frame(db: &SequenceDatabase, root: &ProjectedDatabase, item: Item) -> Frame {
    let (projection, support) = root.project(db, item);
    Frame {
        prefix: vec![item],
        projection,
        support,
    }
}

/// Mine `db` with `config` in one call
///
/// Shorthand for `PatternMiner::new(db, config)?.mine()`.
pub fn mine(db: &SequenceDatabase, config: MiningConfig) -> Result<MiningReport> {
    PatternMiner::new(db, config)?.mine()
}
