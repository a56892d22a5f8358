//! Regex patterns for identity card values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Day, month, year with `.`, `,` or `/` separators (12.05.1990, 1/5/90, 12,05,1990)
    pub static ref DATE_DMY: Regex = Regex::new(
        r"[0-9]{1,2}[.,/][0-9]{1,2}[.,/](?:[0-9]{4}|[0-9]{2})"
    ).unwrap();

    pub static ref DATE_SEPARATOR: Regex = Regex::new(r"[,/]").unwrap();

    // Height in metres, comma decimal separator (1,83)
    pub static ref HEIGHT_METRES: Regex = Regex::new(r"[0-9],[0-9]{2}").unwrap();
}
