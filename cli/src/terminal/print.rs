//! Final report rendering.
//!
//! One block per responding device unit: a host head line, scalar identity
//! fields, then the two register maps as indented sub-trees. Mirrors what
//! the rest of the tooling around this scanner expects to parse visually,
//! so the field labels are stable.

use colored::*;

use plcprobe_core::scanner::ScanResult;

/// Prints the nested per-device report. The scan result arrives already
/// sorted by host address, then unit id.
pub fn report(results: &ScanResult) {
    for (host, record) in results {
        println!("At {}:", host.to_string().green().bold());
        println!("  Unit ID: {}", record.unit_id);
        println!("  Manufacturer: {}", record.manufacturer);
        println!("  Model: {}", record.model);
        println!("  Firmware Version: {}", record.firmware_version);

        println!("  Input Registers:");
        for (label, value) in &record.input_registers {
            println!("    {label}: {value}");
        }

        println!("  Holding Registers:");
        for (label, value) in &record.holding_registers {
            println!("    {label}: {value}");
        }

        println!();
    }
}
