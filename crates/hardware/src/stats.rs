//! Simulation statistics collection and reporting.
//!
//! Tracks the cycle count that forms part of the golden output, plus an instruction mix
//! (ALU, load, store, branch) and taken-branch count for diagnostics.

use serde::Serialize;

use crate::isa::instruction::Op;

/// Execution statistics for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Instruction words fetched, including the halting sentinel.
    pub cycles: u64,
    /// Non-zero instruction words executed.
    pub instructions_retired: u64,

    /// Count of `add`, `sub`, `and`, `or` and `addi` instructions retired.
    pub inst_alu: u64,
    /// Count of `ld` instructions retired.
    pub inst_load: u64,
    /// Count of `sd` instructions retired.
    pub inst_store: u64,
    /// Count of `beq` instructions retired.
    pub inst_branch: u64,
    /// Number of `beq` instructions whose branch was taken.
    pub branches_taken: u64,
}

impl SimStats {
    /// Records one retired instruction.
    pub fn record(&mut self, op: Op, taken: bool) {
        self.instructions_retired += 1;
        match op {
            Op::Add | Op::Sub | Op::And | Op::Or | Op::Addi => self.inst_alu += 1,
            Op::Ld => self.inst_load += 1,
            Op::Sd => self.inst_store += 1,
            Op::Beq => {
                self.inst_branch += 1;
                if taken {
                    self.branches_taken += 1;
                }
            }
        }
    }

    /// Renders a human-readable report.
    pub fn summary(&self) -> String {
        let pct = |n: u64| {
            if self.instructions_retired == 0 {
                0.0
            } else {
                n as f64 * 100.0 / self.instructions_retired as f64
            }
        };
        let mut out = String::new();
        out.push_str("---------------- Simulation Statistics ----------------\n");
        out.push_str(&format!("cycles                {:>10}\n", self.cycles));
        out.push_str(&format!(
            "instructions_retired  {:>10}\n",
            self.instructions_retired
        ));
        out.push_str(&format!(
            "  alu                 {:>10} ({:5.1}%)\n",
            self.inst_alu,
            pct(self.inst_alu)
        ));
        out.push_str(&format!(
            "  load                {:>10} ({:5.1}%)\n",
            self.inst_load,
            pct(self.inst_load)
        ));
        out.push_str(&format!(
            "  store               {:>10} ({:5.1}%)\n",
            self.inst_store,
            pct(self.inst_store)
        ));
        out.push_str(&format!(
            "  branch              {:>10} ({:5.1}%)\n",
            self.inst_branch,
            pct(self.inst_branch)
        ));
        out.push_str(&format!("branches_taken        {:>10}\n", self.branches_taken));
        out
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{}", self.summary());
    }
}
