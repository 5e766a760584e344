//! SNILS-style identifier: nine digits plus a positional-weight checksum.

use rand::Rng;

/// Control number for nine digits weighted 9 down to 1.
pub fn snils_checksum(digits: &[u8; 9]) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (9 - i as u32))
        .sum();

    match sum {
        s if s < 100 => s,
        100 | 101 => 0,
        s => match s % 101 {
            100 => 0,
            rem => rem,
        },
    }
}

/// `XXX-XXX-XXX CC`; the leading digit is never zero.
pub fn generate_snils() -> String {
    let mut rng = rand::thread_rng();
    let mut digits = [0u8; 9];
    for (i, slot) in digits.iter_mut().enumerate() {
        *slot = if i == 0 {
            rng.gen_range(1..=9)
        } else {
            rng.gen_range(0..=9)
        };
    }
    format_snils(&digits)
}

fn format_snils(digits: &[u8; 9]) -> String {
    let group = |range: std::ops::Range<usize>| -> String {
        digits[range].iter().map(|d| char::from(b'0' + d)).collect()
    };
    format!(
        "{}-{}-{} {:02}",
        group(0..3),
        group(3..6),
        group(6..9),
        snils_checksum(digits)
    )
}
