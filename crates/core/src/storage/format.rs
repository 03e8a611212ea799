use crate::errors::CoreError;

/// Magic bytes identifying an IVTK (Invest Tracker) snapshot.
pub const MAGIC: &[u8; 4] = b"IVTK";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + payload_len(8) = 14
pub const HEADER_SIZE: usize = 14;

/// Write a complete snapshot to bytes.
///
/// Layout:
/// ```text
/// [IVTK: 4B] [version: 2B LE] [payload_len: 8B LE] [payload: variable]
/// ```
pub fn write_snapshot(version: u16, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    // Magic
    buf.extend_from_slice(MAGIC);
    // Version
    buf.extend_from_slice(&version.to_le_bytes());
    // Payload length
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    // Payload (bincode-serialized portfolio)
    buf.extend_from_slice(payload);

    buf
}

/// Parse the header from raw snapshot bytes and return the payload slice.
pub fn read_snapshot(data: &[u8]) -> Result<&[u8], CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a valid IVTK snapshot".into(),
        ));
    }

    // Validate magic bytes
    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not an IVTK snapshot".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let payload_len = u64::from_le_bytes(
        data[6..14]
            .try_into()
            .map_err(|_| CoreError::InvalidFileFormat("Failed to read payload length".into()))?,
    );

    let expected_end = HEADER_SIZE + payload_len as usize;
    if data.len() < expected_end {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {} bytes of payload, got {}",
            payload_len,
            data.len() - HEADER_SIZE
        )));
    }

    Ok(&data[HEADER_SIZE..expected_end])
}
