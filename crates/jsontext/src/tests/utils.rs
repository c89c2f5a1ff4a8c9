use alloc::vec::Vec;

use crate::{JsonError, JsonEvent, JsonReader, JsonWriter};

/// Parses `text` fully, panicking on any error.
pub(crate) fn read_events(text: &str) -> Vec<JsonEvent> {
    JsonReader::from_string(text).map(Result::unwrap).collect()
}

/// Feeds a stream of reader events back into a writer.
pub(crate) fn replay<W: core::fmt::Write>(
    events: &[JsonEvent],
    writer: &mut JsonWriter<W>,
) -> Result<(), JsonError> {
    for event in events {
        match event {
            JsonEvent::ObjectStart => writer.write_object_start()?,
            JsonEvent::ObjectEnd => writer.write_object_end()?,
            JsonEvent::ArrayStart => writer.write_array_start()?,
            JsonEvent::ArrayEnd => writer.write_array_end()?,
            JsonEvent::PropertyName(name) => writer.write_property_name(name)?,
            JsonEvent::String(value) => writer.write_string(value)?,
            JsonEvent::Int(value) => writer.write_int(*value)?,
            JsonEvent::Long(value) => writer.write_long(*value)?,
            JsonEvent::ULong(value) => writer.write_ulong(*value)?,
            JsonEvent::Double(value) => writer.write_double(*value)?,
            JsonEvent::Boolean(value) => writer.write_bool(*value)?,
            JsonEvent::Null => writer.write_null()?,
        }
    }
    Ok(())
}
