//! Media-type negotiation for the JSON:API contract.
//!
//! The gateway offers exactly one representation, so negotiation reduces to
//! answering three questions: does the client accept it, did the client send
//! it, and is the declared type free of parameters we do not understand.

use mime::Mime;

/// Canonical JSON:API media type.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// True when the Accept header (absent = accept anything) selects the
/// JSON:API media type against our single offered representation.
pub fn accepts_jsonapi(accept: Option<&str>) -> bool {
    let Some(raw) = accept else {
        return true;
    };
    if raw.trim().is_empty() {
        return true;
    }
    raw.split(',')
        .filter_map(|range| range.trim().parse::<Mime>().ok())
        .any(|range| range_matches(&range))
}

fn range_matches(range: &Mime) -> bool {
    if q_is_zero(range) {
        return false;
    }
    if range.type_() == mime::STAR {
        return true;
    }
    if range.type_() == mime::APPLICATION && range.subtype() == mime::STAR {
        return true;
    }
    range.essence_str() == MEDIA_TYPE
}

fn q_is_zero(range: &Mime) -> bool {
    match range.get_param("q") {
        // qvalue grammar allows up to three decimal places.
        Some(q) => q == "0" || q == "0.0" || q == "0.00" || q == "0.000",
        None => false,
    }
}

/// True when the Content-Type essence (parameters stripped) is exactly the
/// JSON:API media type.
pub fn content_type_is_jsonapi(content_type: &str) -> bool {
    content_type
        .parse::<Mime>()
        .is_ok_and(|m| m.essence_str() == MEDIA_TYPE)
}

/// True when the Content-Type carries any parameter other than `charset`
/// (e.g. a stray `boundary` or a vendor extension).
pub fn has_disallowed_params(content_type: &str) -> bool {
    content_type
        .parse::<Mime>()
        .map(|m| m.params().any(|(name, _)| name != mime::CHARSET))
        .unwrap_or(false)
}

/// True for any JSON-shaped Content-Type: `application/json` or an
/// `application/*+json` vendor type.
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.parse::<Mime>().is_ok_and(|m| {
        m.type_() == mime::APPLICATION
            && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_accept_header_accepts_anything() {
        assert!(accepts_jsonapi(None));
        assert!(accepts_jsonapi(Some("")));
    }

    #[test]
    fn exact_accept_matches() {
        assert!(accepts_jsonapi(Some("application/vnd.api+json")));
    }

    #[test]
    fn wildcards_resolve_to_the_offered_type() {
        assert!(accepts_jsonapi(Some("*/*")));
        assert!(accepts_jsonapi(Some("application/*")));
        assert!(accepts_jsonapi(Some("text/html, */*;q=0.1")));
    }

    #[test]
    fn foreign_types_are_not_acceptable() {
        assert!(!accepts_jsonapi(Some("application/json")));
        assert!(!accepts_jsonapi(Some("text/html, application/xml")));
    }

    #[test]
    fn zero_quality_range_does_not_match() {
        assert!(!accepts_jsonapi(Some("application/vnd.api+json;q=0")));
        assert!(!accepts_jsonapi(Some("*/*;q=0.0")));
    }

    #[test]
    fn content_type_essence_match_ignores_charset() {
        assert!(content_type_is_jsonapi("application/vnd.api+json"));
        assert!(content_type_is_jsonapi(
            "application/vnd.api+json; charset=utf-8"
        ));
        assert!(!content_type_is_jsonapi("application/json"));
    }

    #[test]
    fn charset_is_the_only_tolerated_parameter() {
        assert!(!has_disallowed_params("application/vnd.api+json"));
        assert!(!has_disallowed_params(
            "application/vnd.api+json; charset=utf-8"
        ));
        assert!(has_disallowed_params(
            "application/vnd.api+json; boundary=xyz"
        ));
        assert!(has_disallowed_params(
            "application/vnd.api+json; charset=utf-8; profile=bulk"
        ));
    }

    #[test]
    fn json_detection_covers_vendor_suffixes() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/vnd.api+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("text/json-ish"));
    }
}
