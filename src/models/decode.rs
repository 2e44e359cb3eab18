use std::collections::HashMap;

use anyhow::{Error, Result, anyhow};
use serde_json::{Map, Value};

use crate::models::event::{DecodedEvent, Trait};

/// Which trait map an indexed key belongs to.
#[derive(Clone, Copy, Debug)]
enum TraitScope {
    Event,
    User,
}

/// Which member of a key/value/type triple an indexed key carries.
#[derive(Clone, Copy, Debug)]
enum TraitSlot {
    Name,
    Value,
    Type,
}

#[derive(Default)]
struct TraitGroup {
    name: Option<String>,
    value: Option<String>,
    kind: Option<String>,
}

/// Decodes a raw inbound payload into a [`DecodedEvent`].
///
/// The nine required scalar fields (`ev, et, id, uid, mid, t, p, l, sc`) must
/// each be present and hold a string. Indexed keys (`atrk<idx>`/`atrv<idx>`/
/// `atrt<idx>` and the `u`-prefixed user variants) are first grouped by index
/// token, then each group is validated for completeness before its trait is
/// emitted. Index tokens are opaque strings and are never parsed numerically.
///
/// A name key whose value or type companion is absent fails the whole decode;
/// there is no partial-trait emission. Companion keys with no matching name
/// key, and keys outside both prefix families, are ignored.
pub fn decode_event(payload: &Value) -> Result<DecodedEvent, Error> {
    let fields = payload
        .as_object()
        .ok_or_else(|| anyhow!("Payload is not a JSON object"))?;

    Ok(DecodedEvent {
        event_name: required_string(fields, "ev")?,
        event_type: required_string(fields, "et")?,
        app_id: required_string(fields, "id")?,
        user_id: required_string(fields, "uid")?,
        message_id: required_string(fields, "mid")?,
        page_title: required_string(fields, "t")?,
        page_url: required_string(fields, "p")?,
        browser_language: required_string(fields, "l")?,
        screen_size: required_string(fields, "sc")?,
        attributes: collect_traits(fields, TraitScope::Event)?,
        user_traits: collect_traits(fields, TraitScope::User)?,
    })
}

fn required_string(fields: &Map<String, Value>, key: &str) -> Result<String, Error> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Required field `{}` is missing or not a string", key))
}

fn collect_traits(
    fields: &Map<String, Value>,
    scope: TraitScope,
) -> Result<HashMap<String, Trait>, Error> {
    let (name_prefix, value_prefix, type_prefix) = match scope {
        TraitScope::Event => ("atrk", "atrv", "atrt"),
        TraitScope::User => ("uatrk", "uatrv", "uatrt"),
    };

    let mut groups: HashMap<&str, TraitGroup> = HashMap::new();

    for (key, value) in fields {
        let (slot, index) = if let Some(index) = key.strip_prefix(name_prefix) {
            (TraitSlot::Name, index)
        } else if let Some(index) = key.strip_prefix(value_prefix) {
            (TraitSlot::Value, index)
        } else if let Some(index) = key.strip_prefix(type_prefix) {
            (TraitSlot::Type, index)
        } else {
            continue;
        };

        let text = value
            .as_str()
            .ok_or_else(|| anyhow!("Trait key `{}` holds a non-string value", key))?
            .to_string();

        let group = groups.entry(index).or_default();
        match slot {
            TraitSlot::Name => group.name = Some(text),
            TraitSlot::Value => group.value = Some(text),
            TraitSlot::Type => group.kind = Some(text),
        }
    }

    let mut traits = HashMap::new();

    for (index, group) in groups {
        // Companion keys without a name key cannot reference a trait.
        let Some(name) = group.name else {
            continue;
        };

        let value = group.value.ok_or_else(|| {
            anyhow!(
                "Trait `{}` is missing companion key `{}{}`",
                name,
                value_prefix,
                index
            )
        })?;
        let kind = group.kind.ok_or_else(|| {
            anyhow!(
                "Trait `{}` is missing companion key `{}{}`",
                name,
                type_prefix,
                index
            )
        })?;

        // Duplicate trait names across index tokens: last write wins.
        traits.insert(name, Trait { value, kind });
    }

    Ok(traits)
}
