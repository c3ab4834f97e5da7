//! Four-cell OTP entry buffer.

/// Number of OTP digits the recovery flow expects.
pub const OTP_LEN: usize = 4;

/// Result of entering a character into an OTP cell.
///
/// Focus advancement is reported here rather than performed: which widget
/// gains focus is the caller's business, not the state machine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitOutcome {
    /// The digit was stored. `advance_to` names the cell the caller should
    /// focus next, if any.
    Accepted {
        /// Index of the next cell to focus, `None` for the last cell.
        advance_to: Option<usize>,
    },
    /// Not a decimal digit; nothing was stored.
    Rejected,
}

/// The four independently editable OTP cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OtpInput {
    cells: [Option<char>; OTP_LEN],
}

impl OtpInput {
    /// Enter a character at `pos`. Non-digits are rejected at entry time,
    /// so submit never sees malformed cells. Callers validate `pos`.
    pub fn enter(&mut self, pos: usize, ch: char) -> DigitOutcome {
        if !ch.is_ascii_digit() {
            return DigitOutcome::Rejected;
        }
        if let Some(cell) = self.cells.get_mut(pos) {
            *cell = Some(ch);
        }
        DigitOutcome::Accepted {
            advance_to: (pos + 1 < OTP_LEN).then_some(pos + 1),
        }
    }

    /// Clear the cell at `pos`.
    pub fn clear(&mut self, pos: usize) {
        if let Some(cell) = self.cells.get_mut(pos) {
            *cell = None;
        }
    }

    /// The complete code, or `None` while any cell is empty.
    pub fn code(&self) -> Option<String> {
        self.cells.iter().copied().collect()
    }

    /// Current cell contents, for rendering.
    pub const fn digits(&self) -> [Option<char>; OTP_LEN] {
        self.cells
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_advances_focus() {
        let mut otp = OtpInput::default();
        assert_eq!(
            otp.enter(0, '7'),
            DigitOutcome::Accepted { advance_to: Some(1) }
        );
        assert_eq!(
            otp.enter(3, '1'),
            DigitOutcome::Accepted { advance_to: None }
        );
    }

    #[test]
    fn test_enter_rejects_non_digits() {
        let mut otp = OtpInput::default();
        assert_eq!(otp.enter(0, 'x'), DigitOutcome::Rejected);
        assert_eq!(otp.enter(1, ' '), DigitOutcome::Rejected);
        assert_eq!(otp.digits(), [None; OTP_LEN]);
    }

    #[test]
    fn test_code_requires_all_cells() {
        let mut otp = OtpInput::default();
        otp.enter(0, '1');
        otp.enter(1, '2');
        otp.enter(2, '3');
        assert_eq!(otp.code(), None);

        otp.enter(3, '4');
        assert_eq!(otp.code().unwrap(), "1234");
    }

    #[test]
    fn test_cells_are_independently_editable() {
        let mut otp = OtpInput::default();
        for (i, ch) in "1234".chars().enumerate() {
            otp.enter(i, ch);
        }
        otp.clear(2);
        assert_eq!(otp.code(), None);

        otp.enter(2, '9');
        assert_eq!(otp.code().unwrap(), "1294");
    }
}
