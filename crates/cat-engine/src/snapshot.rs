//! Bulk read and restore of the rig's menu space
//!
//! A snapshot walks the menu descriptor table in order and records every
//! value the rig will divulge. Items the rig will not answer (locked,
//! model-variant, or just silent) read as the `----` sentinel; one stubborn
//! item never aborts the rest of the snapshot. Snapshots run inside the
//! actor, so polling is naturally suspended for their duration.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

use cat_wire::{menu_table, MenuReading, PresetRecord, MENU_SENTINEL};

use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::preset;
use crate::session::CatSession;

/// Read every known menu item in table order
pub async fn read_all<T>(
    session: &mut CatSession<T>,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<Vec<MenuReading>, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let codes: Vec<&str> = menu_table::MENU_ITEMS.iter().map(|d| d.code).collect();
    read_codes(session, &codes, event_tx).await
}

/// Read a specific set of menu codes in the given order
///
/// An empty value echo counts as unanswered; the rig uses it for items the
/// current configuration hides.
pub async fn read_codes<T>(
    session: &mut CatSession<T>,
    codes: &[&str],
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<Vec<MenuReading>, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let total = codes.len();
    let mut readings = Vec::with_capacity(total);

    for (index, code) in codes.iter().enumerate() {
        let value = session.read_menu(code).await?;
        let reading = match value {
            Some(v) if !v.is_empty() => MenuReading::new(code, v),
            _ => MenuReading::new(code, MENU_SENTINEL),
        };

        let _ = event_tx
            .send(EngineEvent::SnapshotProgress {
                reading: reading.clone(),
                index: index + 1,
                total,
            })
            .await;
        readings.push(reading);
    }

    Ok(readings)
}

/// Write a snapshot back through the preset applier
///
/// Sentinel readings are dropped first; restoring `----` would be a write
/// of the placeholder text, not of a value.
pub async fn write_all<T>(
    session: &mut CatSession<T>,
    readings: &[MenuReading],
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<usize, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let records: Vec<PresetRecord> = readings
        .iter()
        .filter(|r| !r.is_sentinel())
        .map(|r| PresetRecord::new(r.code.clone(), r.value.clone()))
        .collect();
    preset::apply(session, &records, event_tx).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncReadExt;
    use tokio::time::timeout;

    use super::*;
    use crate::config::EngineConfig;

    #[tokio::test]
    async fn test_write_all_skips_sentinel_readings() {
        let (mut rig, local) = tokio::io::duplex(256);
        let mut session = CatSession::new(local, EngineConfig::default());
        let (event_tx, mut event_rx) = mpsc::channel(16);

        let readings = vec![
            MenuReading::new("053", "1"),
            MenuReading::new("055", MENU_SENTINEL),
            MenuReading::new("001", "20"),
        ];
        let applied = write_all(&mut session, &readings, &event_tx)
            .await
            .unwrap();
        assert_eq!(applied, 2);

        let mut seen = Vec::new();
        let mut buf = [0u8; 256];
        while let Ok(Ok(n)) = timeout(Duration::from_millis(50), rig.read(&mut buf)).await {
            seen.extend_from_slice(&buf[..n]);
            if seen.ends_with(b"EX00120;") {
                break;
            }
        }
        assert_eq!(String::from_utf8(seen).unwrap(), "EX0531;EX00120;");

        let mut progress = Vec::new();
        while let Ok(event) = event_rx.try_recv() {
            if let EngineEvent::PresetProgress {
                index,
                total,
                applied,
            } = event
            {
                progress.push((index, total, applied));
            }
        }
        assert_eq!(progress, vec![(1, 2, 1), (2, 2, 2)]);
    }
}
