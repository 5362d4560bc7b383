#![no_main]

use folio::forms::{Fields, FormKind, escape_html, is_valid_email, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = is_valid_email(s);

        // Split the input into three fields at the first two NUL bytes
        let mut parts = s.splitn(3, '\0');
        let fields = Fields {
            name: parts.next().unwrap_or_default(),
            email: parts.next().unwrap_or_default(),
            message: parts.next().unwrap_or_default(),
        };
        let contact = validate(&fields, FormKind::Contact);
        let comment = validate(&fields, FormKind::Comment);
        assert!(comment.len() <= contact.len());

        let escaped = escape_html(s);
        assert!(!escaped.contains('<'));
    }
});
