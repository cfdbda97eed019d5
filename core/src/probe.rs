//! Per-unit device probing.
//!
//! One fixed read plan per device unit over an already-open session. The
//! identity addresses follow the vendor convention of the controllers this
//! tool targets; they are not part of the protocol standard.

use tracing::debug;

use plcprobe_common::network::device::DeviceRecord;

use crate::decode;
use crate::session::RegisterSession;

/// Manufacturer name, 8 registers of big-endian text.
pub const MANUFACTURER_ADDR: u16 = 0x0800;
/// Model designation, 8 registers of big-endian text.
pub const MODEL_ADDR: u16 = 0x0808;
/// Firmware version, 4 registers rendered as a dotted version string.
pub const FIRMWARE_ADDR: u16 = 0x0810;

const IDENTITY_WORDS: u16 = 8;
const FIRMWARE_WORDS: u16 = 4;

/// How many registers of each data bank get sampled.
const SAMPLED_REGISTERS: u16 = 10;
/// Base address of the sampled holding-register bank.
const HOLDING_BANK_BASE: u16 = 1000;

/// Runs the fixed read plan for one unit id.
///
/// Every step tolerates failure independently: a failed read or an
/// undecodable payload leaves that field at its empty default and the plan
/// continues. A unit where nothing answered at all is absent (`None`).
pub async fn probe_unit(session: &mut dyn RegisterSession, unit_id: u16) -> Option<DeviceRecord> {
    let mut record = DeviceRecord::new(unit_id);

    if let Some(words) = read_registers(session, MANUFACTURER_ADDR, IDENTITY_WORDS, unit_id).await {
        record.manufacturer = decode_text(&words, unit_id, "manufacturer");
    }

    if let Some(words) = read_registers(session, MODEL_ADDR, IDENTITY_WORDS, unit_id).await {
        record.model = decode_text(&words, unit_id, "model");
    }

    if let Some(words) = read_registers(session, FIRMWARE_ADDR, FIRMWARE_WORDS, unit_id).await {
        record.firmware_version = decode::registers_to_version(&words);
    }

    for offset in 0..SAMPLED_REGISTERS {
        if let Some(words) = read_registers(session, offset, 1, unit_id).await {
            if let Some(value) = words.first() {
                record
                    .input_registers
                    .insert(format!("Register {offset}"), *value);
            }
        }

        let address = HOLDING_BANK_BASE + offset;
        if let Some(words) = read_registers(session, address, 1, unit_id).await {
            if let Some(value) = words.first() {
                record
                    .holding_registers
                    .insert(format!("Register {offset}"), *value);
            }
        }
    }

    if record.is_empty() { None } else { Some(record) }
}

/// Single read with local failure recovery: errors are logged and become a
/// missing value.
async fn read_registers(
    session: &mut dyn RegisterSession,
    address: u16,
    count: u16,
    unit_id: u16,
) -> Option<Vec<u16>> {
    match session.read_holding_registers(address, count, unit_id).await {
        Ok(words) => Some(words),
        Err(err) => {
            debug!(unit_id, address, "register read failed: {err}");
            None
        }
    }
}

fn decode_text(words: &[u16], unit_id: u16, field: &str) -> String {
    match decode::registers_to_string(words) {
        Ok(text) => text,
        Err(err) => {
            debug!(unit_id, field, "discarding undecodable payload: {err}");
            String::new()
        }
    }
}
