use std::{
    fmt::Display,
    io::{stdout, Write},
};

use derive_more::AddAssign;
use pa_types::{Cost, Seq};
use serde::Serialize;

/// Statistics of one pair, or summed over many pairs.
#[derive(Default, Clone, Copy, AddAssign, Debug, Serialize, PartialEq)]
pub struct RunStats {
    pub sample_size: usize,
    pub len_a: usize,
    pub len_b: usize,
    /// Sum of the computed distances.
    pub distance: i64,
    /// Total time in seconds.
    pub duration: f64,
}

impl RunStats {
    pub fn new(a: Seq, b: Seq, distance: Cost, duration: f64) -> Self {
        Self {
            sample_size: 1,
            len_a: a.len(),
            len_b: b.len(),
            distance: distance as i64,
            duration,
        }
    }

    fn format_raw<T: Display>(&self, width: usize, title: &str, val: T) -> (String, String) {
        (format!("{:>width$}", title), format!("{:>width$}", val))
    }

    fn format_avg(&self, width: usize, title: &str, val: f64) -> (String, String) {
        let avg = if self.sample_size == 0 {
            0.
        } else {
            val / self.sample_size as f64
        };
        self.format_raw(width, title, format!("{avg:.2}"))
    }

    /// Column headers and the matching averaged values.
    pub fn values(&self) -> (Vec<String>, Vec<String>) {
        [
            self.format_raw(7, "nr", self.sample_size),
            self.format_avg(10, "|a|", self.len_a as f64),
            self.format_avg(10, "|b|", self.len_b as f64),
            self.format_avg(10, "ed", self.distance as f64),
            self.format_raw(
                8,
                "e%",
                format!(
                    "{:.2}",
                    100. * self.distance as f64 / self.len_a.max(1) as f64
                ),
            ),
            self.format_avg(10, "t (ms)", 1000. * self.duration),
        ]
        .into_iter()
        .unzip()
    }

    pub fn print_header(&self) {
        println!("{}", self.values().0.join(" "));
    }

    pub fn print(&self) {
        println!("{}", self.values().1.join(" "));
    }

    /// Overwrite the current line with these stats.
    pub fn print_no_newline(&self) {
        print!("\r{}", self.values().1.join(" "));
        stdout().flush().unwrap();
    }
}
