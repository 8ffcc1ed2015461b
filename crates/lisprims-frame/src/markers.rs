//! Wire-level control characters and constants.
//!
//! Every byte the framing layer treats specially lives here so the record
//! layer and the protocol layer agree on a single definition.

/// Start of frame (STX).
pub const STX: u8 = 0x02;

/// End of frame (ETX).
pub const ETX: u8 = 0x03;

/// End of transmission (EOT). Closes a session.
pub const EOT: u8 = 0x04;

/// Enquiry (ENQ). Opens a session.
pub const ENQ: u8 = 0x05;

/// Carriage return.
pub const CR: u8 = 0x0D;

/// Line feed.
pub const LF: u8 = 0x0A;

/// Line terminator placed between frames.
pub const CRLF: &[u8; 2] = b"\r\n";

/// Separates fields inside a record body.
pub const FIELD_SEPARATOR: char = '|';

/// Separates components inside a field (GS).
pub const COMPONENT_SEPARATOR: char = '\u{1D}';

/// Separates repeated values inside a field (RS).
pub const REPEAT_SEPARATOR: char = '\u{1E}';

/// Introduces an escape sequence inside a field value.
pub const ESCAPE_CHAR: char = '\\';

/// Lowest frame number on the wire.
pub const MIN_FRAME_NUMBER: u8 = 1;

/// Highest frame number on the wire; numbering wraps back to 1 after this.
pub const MAX_FRAME_NUMBER: u8 = 7;

/// STX + frame digit + ETX + two checksum characters.
pub const MIN_FRAME_LEN: usize = 5;

/// Number of checksum characters trailing ETX.
pub const CHECKSUM_LEN: usize = 2;

/// Returns a printable name for a control byte, used in log output.
pub fn control_name(byte: u8) -> &'static str {
    match byte {
        STX => "STX",
        ETX => "ETX",
        EOT => "EOT",
        ENQ => "ENQ",
        CR => "CR",
        LF => "LF",
        _ => "DATA",
    }
}

/// Frame number used for the `index`-th frame of a transmission (0-based).
pub fn frame_number_for(index: usize) -> u8 {
    (index % MAX_FRAME_NUMBER as usize) as u8 + MIN_FRAME_NUMBER
}

/// Returns true if `frame_number` is a legal wire frame number.
pub fn is_valid_frame_number(frame_number: u8) -> bool {
    (MIN_FRAME_NUMBER..=MAX_FRAME_NUMBER).contains(&frame_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_numbers_cycle_one_through_seven() {
        let numbers: Vec<u8> = (0..16).map(frame_number_for).collect();
        assert_eq!(
            numbers,
            vec![1, 2, 3, 4, 5, 6, 7, 1, 2, 3, 4, 5, 6, 7, 1, 2]
        );
    }

    #[test]
    fn frame_number_bounds() {
        assert!(!is_valid_frame_number(0));
        assert!(is_valid_frame_number(1));
        assert!(is_valid_frame_number(7));
        assert!(!is_valid_frame_number(8));
    }

    #[test]
    fn control_names() {
        assert_eq!(control_name(STX), "STX");
        assert_eq!(control_name(EOT), "EOT");
        assert_eq!(control_name(b'A'), "DATA");
    }
}
