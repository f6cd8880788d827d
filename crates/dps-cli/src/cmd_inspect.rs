/// Implementation of `dps inspect`.
///
/// Loads a snapshot file and prints one entry per key: the key, its
/// value type, and the value (long text truncated). For base64 text
/// values, `--hex` adds a 16-byte-per-line hex dump of the decoded
/// record, which is the working form for byte-offset research — finding
/// the next "byte 4" starts here.
///
/// ```text
/// Key 167  string  "PAo6CgUIABC4Ahg"…
///          record: 16 bytes
///            0000  3c 0a 3a 0a 05 08 00 10 b8 02 18 04 18 54 4a 27  <.:..........TJ'
/// ```
use anyhow::Result;

use dps_blob::ByteBlob;
use dps_types::RawValue;

use crate::InspectArgs;
use crate::load_snapshot;

/// Run the `dps inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or ingested, or if
/// `--key` names a key the snapshot does not contain.
pub fn run(args: &InspectArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.file)?;

    if let Some(key) = &args.key
        && !snapshot.contains_key(key)
    {
        anyhow::bail!("key {key:?} not present in {}", args.file.display());
    }

    println!("{} keys in {}", snapshot.len(), args.file.display());

    for (key, value) in snapshot.iter() {
        if let Some(only) = &args.key
            && only != key
        {
            continue;
        }

        let description = dps_monitor::describe_key(key)
            .map(|d| format!("  ({d})"))
            .unwrap_or_default();
        println!("Key {key:<4} {:<7} {value}{description}", value.type_name());

        if args.hex
            && let RawValue::Text(text) = value
            && let Ok(blob) = ByteBlob::decode(text)
            && !blob.is_empty()
        {
            println!("         record: {} bytes", blob.len());
            hex_dump(blob.as_slice());
        }
    }

    Ok(())
}

/// 16-bytes-per-line hex + ASCII dump, indented under the key line.
fn hex_dump(raw: &[u8]) {
    for (i, chunk) in raw.chunks(16).enumerate() {
        let offset = i * 16;
        let hex: String = chunk
            .iter()
            .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                use std::fmt::Write as _;
                if !s.is_empty() {
                    s.push(' ');
                }
                let _ = write!(s, "{b:02x}");
                s
            });
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        println!("           {offset:04x}  {hex:<48}  {ascii}");
    }
}
