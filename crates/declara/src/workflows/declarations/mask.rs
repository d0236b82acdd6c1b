//! Canonical display masks for identifiers typed into the form.
//!
//! Every mask is total and idempotent: malformed input degrades to the longest valid
//! prefix and excess trailing input is dropped.

/// Digits in a CPF.
const TAX_ID_DIGITS: usize = 11;
/// Kept characters in an RG, the last one being the check character.
const STATE_ID_CHARS: usize = 9;
const REGISTRY_GROUP: usize = 3;

/// CPF mask: `NNN.NNN.NNN-NN`.
pub fn mask_tax_id(raw: &str) -> String {
    let mut masked = String::with_capacity(TAX_ID_DIGITS + 3);

    for (index, digit) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(TAX_ID_DIGITS)
        .enumerate()
    {
        match index {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(digit);
    }

    masked
}

/// RG mask: `NN.NNN.NNN-C`, where the check character `C` may be a digit or `X`.
///
/// An `X` is only kept in the check position; anywhere else it is dropped like any
/// other stray character. Its case is preserved.
pub fn mask_state_id(raw: &str) -> String {
    let mut kept: Vec<char> = Vec::with_capacity(STATE_ID_CHARS);

    for c in raw.chars() {
        if kept.len() == STATE_ID_CHARS {
            break;
        }
        let check_position = kept.len() == STATE_ID_CHARS - 1;
        if c.is_ascii_digit() || (check_position && matches!(c, 'X' | 'x')) {
            kept.push(c);
        }
    }

    let mut masked = String::with_capacity(STATE_ID_CHARS + 3);
    for (index, c) in kept.into_iter().enumerate() {
        match index {
            2 | 5 => masked.push('.'),
            8 => masked.push('-'),
            _ => {}
        }
        masked.push(c);
    }

    masked
}

/// Registry number mask: digits grouped in threes from the most significant digit,
/// e.g. `123.456.789`, `123.4`.
pub fn mask_registry_number(raw: &str) -> String {
    let mut masked = String::new();

    for (index, digit) in raw.chars().filter(char::is_ascii_digit).enumerate() {
        if index > 0 && index % REGISTRY_GROUP == 0 {
            masked.push('.');
        }
        masked.push(digit);
    }

    masked
}
