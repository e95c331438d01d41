use std::fmt;

use crate::translation::Access;

/// Running tallies for one translation run. Faults are derived.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub total: u64,
    pub tlb_hits: u64,
    pub table_hits: u64,
}

impl Counters {
    pub fn record(&mut self, access: Access) {
        self.total += 1;
        match access {
            Access::TlbHit => self.tlb_hits += 1,
            Access::TableHit => self.table_hits += 1,
            Access::PageFault => {}
        }
    }

    pub fn faults(&self) -> u64 {
        self.total - self.tlb_hits - self.table_hits
    }

    pub fn report(&self) -> StatsReport {
        StatsReport {
            fault_rate: rate(self.faults(), self.total),
            tlb_hit_rate: rate(self.tlb_hits, self.total),
        }
    }
}

/// Ratio of `count` to `total`; 0.0 when nothing was processed
fn rate(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Final rates derived from the counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsReport {
    pub fault_rate: f64,
    pub tlb_hit_rate: f64,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page Fault Rate = {:.3}", self.fault_rate)?;
        writeln!(f, "TLB Hit Rate = {:.3}", self.tlb_hit_rate)
    }
}
