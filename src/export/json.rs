use super::ExportError;
use std::io::Write;

/// Write any serializable data structure as pretty JSON
pub fn write_json<T, W>(data: &T, mut writer: W) -> Result<(), ExportError>
where
    T: serde::Serialize + ?Sized,
    W: Write,
{
    let json_data = serde_json::to_string_pretty(data)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    writer.write_all(json_data.as_bytes())?;
    writer.write_all(b"\n")?;

    Ok(())
}
