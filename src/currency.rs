//! Indonesian rupiah formatting for amounts shown to the user.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format an amount as Indonesian rupiah: `Rp` prefix, `.` as the thousands
/// separator and no decimals, e.g. `3000000.0` becomes `Rp3.000.000`.
///
/// Negative amounts (such as a negative balance) render as `-Rp…`.
pub fn format_idr(amount: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .prefix("Rp")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .prefix("-Rp")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    // The amount is rounded to whole rupiah first so that e.g. 999.6 does
    // not format as "Rp999" with the fraction silently dropped.
    let rounded = amount.round();

    if rounded < 0.0 {
        negative_fmt.fmt_string(rounded.abs())
    } else if rounded > 0.0 {
        positive_fmt.fmt_string(rounded)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "Rp0".to_owned()
    }
}
