use tracing::info;

#[derive(Debug, Clone, Default)]
pub(crate) struct Stats {
    pub(crate) expanded_nodes: usize,
    pub(crate) generated_nodes: usize,
    pub(crate) duplicate_hits: usize,
    pub(crate) deadlock_prunes: usize,
    pub(crate) heuristic_evals: usize,
    pub(crate) time_us: u128,
}

impl Stats {
    pub(crate) fn print(&self) {
        info!(
            "Time(microseconds) {:?} Expanded nodes {:?} Generated nodes {:?} Duplicate hits {:?} Deadlock prunes {:?} Heuristic evaluations {:?}",
            self.time_us,
            self.expanded_nodes,
            self.generated_nodes,
            self.duplicate_hits,
            self.deadlock_prunes,
            self.heuristic_evals
        );
    }
}
