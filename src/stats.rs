use std::fmt;

/// Counters collected over a translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    pub translations: u64,
    pub page_faults: u64,
    pub tlb_hits: u64,
    pub evictions: u64,
}

impl Statistics {
    pub fn page_fault_rate(&self) -> f64 {
        ratio(self.page_faults, self.translations)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        ratio(self.tlb_hits, self.translations)
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page Faults = {}", self.page_faults)?;
        writeln!(f, "TLB Hits = {}", self.tlb_hits)?;
        writeln!(f, "Page Fault Rate = {:.3}", self.page_fault_rate())?;
        write!(f, "TLB Hit Rate = {:.3}", self.tlb_hit_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_on_empty_run() {
        let stats = Statistics::default();
        assert_eq!(stats.page_fault_rate(), 0.0);
        assert_eq!(stats.tlb_hit_rate(), 0.0);
    }

    #[test]
    fn test_rates() {
        let stats = Statistics {
            translations: 1000,
            page_faults: 244,
            tlb_hits: 54,
            evictions: 0,
        };
        assert!((stats.page_fault_rate() - 0.244).abs() < 1e-12);
        assert!((stats.tlb_hit_rate() - 0.054).abs() < 1e-12);
    }

    #[test]
    fn test_report_lines() {
        let stats = Statistics {
            translations: 4,
            page_faults: 2,
            tlb_hits: 2,
            evictions: 0,
        };
        let report = stats.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Page Faults = 2");
        assert_eq!(lines[1], "TLB Hits = 2");
        assert_eq!(lines[2], "Page Fault Rate = 0.500");
        assert_eq!(lines[3], "TLB Hit Rate = 0.500");
    }
}
