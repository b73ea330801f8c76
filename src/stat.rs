use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub cost: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes number {:?}",
            self.cost, self.time_us, self.expanded_nodes
        );
    }
}
