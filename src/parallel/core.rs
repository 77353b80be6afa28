/// Execution strategy for CPU-bound fan-out work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Number of worker threads this strategy runs
    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel { workers } => (*workers).max(1),
        }
    }

    /// Auto strategy selection based on workload size threshold
    ///
    /// The client supplies the final worker count; this only decides whether
    /// the workload is large enough to justify threads at all.
    ///
    /// ```rust
    /// use porosity_sweep::parallel::ExecutionStrategy;
    ///
    /// let strategy = ExecutionStrategy::auto(0, 1, 8);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(256, 1, 8);
    /// assert_eq!(strategy.workers(), 8);
    /// ```
    pub fn auto(work_items_count: usize, min_items_for_parallel: usize, optimal_workers: usize) -> Self {
        if work_items_count >= min_items_for_parallel.max(1) && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Calculate optimal workers based on available system resources and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means use percentage calculation only
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}
