use crate::analysis::distance::log2_bin;
use crate::core::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// Edge-length counts grouped by `ceil(log2(length))`. Zero-length edges are
/// kept apart as self-edges and never binned.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LengthHistogram {
    self_edges: usize,
    bins: BTreeMap<u32, usize>,
}

impl LengthHistogram {
    pub fn add(&mut self, length: u32) {
        if length == 0 {
            self.self_edges += 1;
        } else {
            *self.bins.entry(log2_bin(length)).or_insert(0) += 1;
        }
    }

    pub fn self_edges(&self) -> usize {
        self.self_edges
    }

    /// `(bin, count)` pairs in ascending bin order.
    pub fn bins(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.bins.iter().map(|(bin, count)| (*bin, *count))
    }

    pub fn total(&self) -> usize {
        self.self_edges + self.bins.values().sum::<usize>()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["bin", "count"])?;
        for (bin, count) in self.bins() {
            csv_writer.write_record([bin.to_string(), count.to_string()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for LengthHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "self edges: {}", self.self_edges)?;
        for (bin, count) in self.bins() {
            writeln!(f, "{bin} {count}")?;
        }
        Ok(())
    }
}
