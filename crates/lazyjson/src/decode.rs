//! Per-kind decode attempts over raw JSON text.
//!
//! Each attempt either produces the payload for one kind or reports nothing.
//! Failures are swallowed here: the caller leaves its node unresolved and
//! tries again on the next query.
//!
//! Containers decode one level deep. Members are captured as raw sub-slices
//! and wrapped in fresh unresolved nodes, so nested values stay lazy until
//! they are queried themselves.

use std::collections::HashMap;

use log::trace;
use serde::Deserialize;
use serde_bytes::ByteBuf;
use serde_json::value::RawValue;

use crate::kind::Kind;
use crate::value::{Array, Decoded, Object, Value};

/// Try to decode `raw` as `kind`.
///
/// Returns `None` when the text is malformed or holds another kind.
/// `Kind::Unresolved` never decodes.
pub(crate) fn decode(raw: &[u8], kind: Kind) -> Option<Decoded> {
    match kind {
        Kind::Unresolved => None,
        Kind::Null => decode_null(raw).then_some(Decoded::Null),
        Kind::Object => decode_object(raw).map(Decoded::Object),
        Kind::Array => decode_array(raw).map(Decoded::Array),
        Kind::String => decode_string(raw).map(Decoded::String),
        Kind::Number => attempt::<f64>(raw, kind).map(Decoded::Number),
        Kind::Boolean => attempt::<bool>(raw, kind).map(Decoded::Boolean),
    }
}

/// Null only matches when the text is a well-formed JSON value equal to `null`.
fn decode_null(raw: &[u8]) -> bool {
    matches!(
        attempt::<serde_json::Value>(raw, Kind::Null),
        Some(serde_json::Value::Null)
    )
}

/// Strings with lone surrogate escapes (`"\ud800"`) are valid JSON but not
/// valid UTF-8. Each lone surrogate decodes to U+FFFD.
fn decode_string(raw: &[u8]) -> Option<String> {
    if let Some(s) = attempt::<String>(raw, Kind::String) {
        return Some(s);
    }
    // The byte form skips the control-character check, so apply it here.
    let literal = raw.trim_ascii();
    if literal.first() != Some(&b'"') || literal.iter().any(|&b| b < 0x20) {
        return None;
    }
    let bytes = attempt::<ByteBuf>(raw, Kind::String)?;
    Some(replace_surrogates(&bytes))
}

/// Lone surrogates arrive WTF-8 encoded as `ED A0..BF xx`.
fn replace_surrogates(bytes: &[u8]) -> String {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let surrogate = bytes[i] == 0xED
            && matches!(bytes.get(i + 1), Some(0xA0..=0xBF))
            && i + 2 < bytes.len();
        if surrogate {
            out.extend_from_slice("\u{FFFD}".as_bytes());
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn decode_object(raw: &[u8]) -> Option<Object> {
    let members = attempt::<HashMap<String, &RawValue>>(raw, Kind::Object)?;
    Some(
        members
            .into_iter()
            .map(|(key, member)| (key, Value::new(member.get())))
            .collect(),
    )
}

fn decode_array(raw: &[u8]) -> Option<Array> {
    let items = attempt::<Vec<&RawValue>>(raw, Kind::Array)?;
    Some(items.into_iter().map(|item| Value::new(item.get())).collect())
}

fn attempt<'de, T: Deserialize<'de>>(raw: &'de [u8], kind: Kind) -> Option<T> {
    match serde_json::from_slice(raw) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            trace!("{kind} decode rejected {} bytes: {err}", raw.len());
            None
        }
    }
}
