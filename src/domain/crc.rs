//! CRC-16/CCITT-FALSE, the checksum carried by tag `63`.
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | Polynomial | 0x1021 |
//! | Init | 0xFFFF |
//! | RefIn | false |
//! | RefOut | false |
//! | XorOut | 0x0000 |
//!
//! ```
//! use qris_dynamic::domain::crc::crc16;
//!
//! assert_eq!(crc16(b"123456789"), 0x29B1);
//! ```

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

/// Register value after feeding each possible high byte through 8 rounds.
const TABLE: [u16; 256] = {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut round = 0;
        while round < 8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
            round += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(INIT, |crc, &byte| {
        let index = ((crc >> 8) ^ u16::from(byte)) as u8;
        (crc << 8) ^ TABLE[usize::from(index)]
    })
}

/// Checksum rendered the way it is stored in a payload: 4 uppercase hex digits.
pub fn crc16_hex(data: &[u8]) -> String {
    format!("{:04X}", crc16(data))
}
