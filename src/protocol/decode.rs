//! Response decoding
//!
//! Extracts the status code, error message, and record list from the
//! server's JSON-shaped response envelope.
//!
//! Everything here is substring scanning, never structural parsing. That
//! is deliberate (the envelope has a small fixed shape and we take no
//! JSON dependency for it) and brittle: a text value containing a literal
//! `,` or the substring `},{` will misparse. That limitation is part of
//! the wire contract and is preserved, not fixed.

use crate::error::{ClientError, Result};
use crate::protocol::player::{Player, AGE_UNSET};

/// Status code: operation succeeded
pub const STATUS_OK: i32 = 200;

/// Status code: no matching record
pub const STATUS_NOT_FOUND: i32 = 404;

/// Status code: internal server error
pub const STATUS_INTERNAL_ERROR: i32 = 500;

/// Sentinel for a missing or unparsable status
pub const STATUS_UNKNOWN: i32 = -1;

/// Placeholder returned when no message can be extracted
pub const NO_MESSAGE: &str = "error detail not available";

const STATUS_MARKER: &str = "\"status\":";
const PAYLOAD_MARKER: &str = "\"payload\":";
const PAYLOAD_OPEN: &str = "\"payload\":[";
const PAYLOAD_CLOSE: &str = "],\"status\"";

/// Wire token for an unset value in response payloads
const NULL_VALUE: &str = "\"null\"";

// =============================================================================
// Status Extraction
// =============================================================================

/// Extract the status code from a response
///
/// Scans for the `"status":` marker and takes the text up to the next
/// comma, or the next closing brace if no comma follows. Returns
/// [`STATUS_UNKNOWN`] when the marker is missing, no delimiter follows,
/// or the value does not parse as an integer. Never fails on any input.
pub fn extract_status(response: &str) -> i32 {
    let Some(marker) = response.find(STATUS_MARKER) else {
        return STATUS_UNKNOWN;
    };

    let Some(rest) = response.get(marker + STATUS_MARKER.len()..) else {
        return STATUS_UNKNOWN;
    };

    let Some(end) = rest.find(',').or_else(|| rest.find('}')) else {
        return STATUS_UNKNOWN;
    };

    rest[..end].trim().parse().unwrap_or(STATUS_UNKNOWN)
}

// =============================================================================
// Message Extraction
// =============================================================================

/// Extract the quoted message from a response payload
///
/// Used for error envelopes where `"payload"` holds a quoted string.
/// Returns the first quoted string after the `"payload":` marker, or
/// [`NO_MESSAGE`] when none is found.
pub fn extract_message(response: &str) -> String {
    let Some(marker) = response.find(PAYLOAD_MARKER) else {
        return NO_MESSAGE.to_string();
    };

    let Some(rest) = response.get(marker + PAYLOAD_MARKER.len()..) else {
        return NO_MESSAGE.to_string();
    };

    let Some(open) = rest.find('"') else {
        return NO_MESSAGE.to_string();
    };
    let body = &rest[open + 1..];

    let Some(close) = body.find('"') else {
        return NO_MESSAGE.to_string();
    };

    body[..close].to_string()
}

// =============================================================================
// Record-list Extraction
// =============================================================================

/// Parse the record list from a list/filter response
///
/// Locates the payload array between `"payload":[` and `],"status"`,
/// strips the outer bracket markers (one leading and two trailing
/// characters of the region — the closing quote or brace of the last
/// record absorbs the cut), splits the remaining text on the literal
/// separator `},{`, and decodes each fragment into a [`Player`].
///
/// A malformed payload is a decode failure, distinct from any transport
/// failure: callers can tell "the server is unreachable" from "the
/// server sent something we couldn't understand".
pub fn parse_players(response: &str) -> Result<Vec<Player>> {
    let start = response
        .find(PAYLOAD_OPEN)
        .ok_or_else(|| decode_err("missing \"payload\":[ marker"))?
        + PAYLOAD_OPEN.len();
    let end = response
        .find(PAYLOAD_CLOSE)
        .ok_or_else(|| decode_err("missing ],\"status\" marker"))?;

    let region = response
        .get(start..end)
        .ok_or_else(|| decode_err("payload markers out of order"))?;
    if region.len() < 3 {
        return Err(decode_err("payload array is empty or truncated"));
    }

    // Strip the outer bracket markers: one leading and two trailing chars.
    let body = region
        .get(1..region.len() - 2)
        .ok_or_else(|| decode_err("payload array boundary is not valid text"))?;

    body.split("},{").map(parse_record).collect()
}

/// Decode one record fragment
///
/// Fields come in fixed order: id, idade, nomeJogador, nacionalidade,
/// nomeClube. Each is a `key:value` pair; the value after the first
/// colon is trimmed. Splitting is purely textual, so a comma inside a
/// quoted value shifts every following field.
fn parse_record(fragment: &str) -> Result<Player> {
    let parts: Vec<&str> = fragment.split(',').collect();
    if parts.len() < 5 {
        return Err(decode_err(&format!(
            "record fragment has {} fields, expected 5: {fragment:?}",
            parts.len()
        )));
    }

    let id = field_value(parts[0])?
        .parse()
        .map_err(|_| decode_err(&format!("unparsable record id in {fragment:?}")))?;
    let age = parse_nullable_number(field_value(parts[1])?)
        .ok_or_else(|| decode_err(&format!("unparsable record age in {fragment:?}")))?;
    let name = strip_quotes(null_to_empty(field_value(parts[2])?));
    let nationality = strip_quotes(null_to_empty(field_value(parts[3])?));
    let club = strip_quotes(null_to_empty(field_value(parts[4])?));

    Ok(Player {
        id,
        age,
        name,
        nationality,
        club,
    })
}

/// Take the trimmed text after the first colon of a `key:value` pair
fn field_value(part: &str) -> Result<&str> {
    part.split(':')
        .nth(1)
        .map(str::trim)
        .ok_or_else(|| decode_err(&format!("field {part:?} has no key:value separator")))
}

/// `"null"` resolves to the age sentinel, anything else must parse
fn parse_nullable_number(value: &str) -> Option<i32> {
    if value == NULL_VALUE {
        return Some(AGE_UNSET);
    }
    value.parse().ok()
}

/// `"null"` resolves to an empty string
fn null_to_empty(value: &str) -> &str {
    if value == NULL_VALUE {
        ""
    } else {
        value
    }
}

/// Strip one leading and one trailing double quote, if present
fn strip_quotes(value: &str) -> String {
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}

fn decode_err(detail: &str) -> ClientError {
    ClientError::Decode(detail.to_string())
}
