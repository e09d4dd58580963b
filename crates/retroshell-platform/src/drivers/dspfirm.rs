//! DSP firmware probe for the handheld audio service.
//!
//! The DSP audio service needs `dspfirm.cdc` on the SD card. When it is
//! missing, the firmware can be carved out of a dumped system module
//! (`code.bin`): the blob sits 0x40 words before a `DSP1` magic word and its
//! size is the word after the magic.

use retroshell_vfs::Vfs;

/// Firmware location the audio service loads from.
pub const DSPFIRM_PATH: &str = "sdmc:/3ds/dspfirm.cdc";
/// Dumped system module scanned for the firmware.
pub const CODE_BIN_PATH: &str = "sdmc:/3ds/code.bin";
/// `"DSP1"` as a little-endian word.
pub const DSP1_MAGIC: u32 = 0x3150_5344;
/// Words between the start of the blob and its magic.
const HEADER_WORDS: usize = 0x40;

/// What the probe found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareStatus {
    AlreadyPresent,
    Extracted { size: usize },
    /// No `code.bin` to extract from.
    NoSource,
    /// `code.bin` has no `DSP1` magic.
    NoMagic,
    /// The size field points past the end of `code.bin`.
    Truncated,
    WriteFailed,
}

fn word_at(code: &[u8], index: usize) -> Option<u32> {
    let bytes = code.get(index * 4..index * 4 + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Locate the firmware blob inside a system module image.
pub fn find_firmware(code: &[u8]) -> Result<&[u8], FirmwareStatus> {
    let words = code.len() / 4;
    for i in HEADER_WORDS..words {
        if word_at(code, i) != Some(DSP1_MAGIC) {
            continue;
        }
        let size = word_at(code, i + 1).ok_or(FirmwareStatus::Truncated)? as usize;
        let start = (i - HEADER_WORDS) * 4;
        return start
            .checked_add(size)
            .and_then(|end| code.get(start..end))
            .ok_or(FirmwareStatus::Truncated);
    }
    Err(FirmwareStatus::NoMagic)
}

/// Make sure the DSP firmware exists, extracting it when possible.
///
/// Never fails: every problem is reported through the status and logged, and
/// the caller carries on with whatever audio backend comes up.
pub fn ensure_dsp_firmware(sd: &mut dyn Vfs) -> FirmwareStatus {
    if sd.exists(DSPFIRM_PATH) {
        return FirmwareStatus::AlreadyPresent;
    }
    let Ok(code) = sd.read(CODE_BIN_PATH) else {
        log::debug!("No {CODE_BIN_PATH}, DSP firmware not installed");
        return FirmwareStatus::NoSource;
    };
    let blob = match find_firmware(&code) {
        Ok(blob) => blob,
        Err(status) => {
            log::warn!("DSP firmware extraction skipped: {status:?}");
            return status;
        },
    };
    match sd.write(DSPFIRM_PATH, blob) {
        Ok(()) => {
            log::info!("Extracted DSP firmware ({} bytes)", blob.len());
            FirmwareStatus::Extracted { size: blob.len() }
        },
        Err(e) => {
            log::warn!("Could not write {DSPFIRM_PATH}: {e}");
            FirmwareStatus::WriteFailed
        },
    }
}
