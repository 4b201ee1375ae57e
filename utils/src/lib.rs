//! Leverage common functionality across the chainkit primitives.

mod bitarray;
pub use bitarray::BitArray;

/// Magic prefix identifying a flattened byte-sequence blob.
const FLATTEN_MAGIC: u64 = 0x0607_190D_67FB_720A;

/// Width of each length sector in a flattened blob.
const LEN_SECTOR: usize = 8;

/// Converts bytes to a hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::new();
    for byte in bytes.iter() {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| match u8::from_str_radix(&hex[i..i + 2], 16) {
            Ok(byte) => Some(byte),
            Err(_) => None,
        })
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Commonly used
/// in testing to encode external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}

/// Packs a sequence of byte strings into a single magic-prefixed blob.
///
/// Layout: `MAGIC (8, BE) || count (8, BE) || (len_i (8, BE) || data_i)*`.
/// This layout appears in persisted payloads, so it must not change.
pub fn flatten<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let total: usize = items.iter().map(|i| LEN_SECTOR + i.as_ref().len()).sum();
    let mut flat = Vec::with_capacity(2 * LEN_SECTOR + total);
    flat.extend_from_slice(&FLATTEN_MAGIC.to_be_bytes());
    flat.extend_from_slice(&(items.len() as u64).to_be_bytes());
    for item in items {
        let item = item.as_ref();
        flat.extend_from_slice(&(item.len() as u64).to_be_bytes());
        flat.extend_from_slice(item);
    }
    flat
}

/// Unpacks a blob produced by [flatten].
///
/// Returns `None` on a missing magic prefix, a truncated blob, or trailing
/// garbage, so untrusted input can never panic the caller.
pub fn unflatten(data: &[u8]) -> Option<Vec<Vec<u8>>> {
    let magic = read_sector(data, 0)?;
    if magic != FLATTEN_MAGIC {
        return None;
    }
    let count = read_sector(data, LEN_SECTOR)?;
    let mut offset = 2 * LEN_SECTOR;
    let mut items = Vec::with_capacity(count.min(1024) as usize);
    for _ in 0..count {
        let len = read_sector(data, offset)? as usize;
        offset += LEN_SECTOR;
        let next = data.get(offset..offset + len)?;
        items.push(next.to_vec());
        offset += len;
    }
    if offset != data.len() {
        return None;
    }
    Some(items)
}

fn read_sector(data: &[u8], offset: usize) -> Option<u64> {
    let sector = data.get(offset..offset.checked_add(LEN_SECTOR)?)?;
    Some(u64::from_be_bytes(sector.try_into().ok()?))
}
